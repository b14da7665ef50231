//! Reconstrucción de coordenadas GPS decimales a partir de racionales EXIF.

use exif::{Field, Rational, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("{component} has a zero denominator")]
    ZeroDenominator { component: &'static str },

    #[error("expected 3 rational components, found {0}")]
    WrongArity(usize),

    #[error("coordinate is not stored as rationals")]
    NotRational,
}

const COMPONENTS: [&str; 3] = ["degrees", "minutes", "seconds"];

/// `grados + minutos/60 + segundos/3600`.
pub fn dms_to_decimal(dms: &[Rational]) -> Result<f64, CoordinateError> {
    if dms.len() != 3 {
        return Err(CoordinateError::WrongArity(dms.len()));
    }

    let mut parts = [0.0_f64; 3];
    for (slot, (rational, component)) in parts.iter_mut().zip(dms.iter().zip(COMPONENTS)) {
        if rational.denom == 0 {
            return Err(CoordinateError::ZeroDenominator { component });
        }
        *slot = f64::from(rational.num) / f64::from(rational.denom);
    }

    let [degrees, minutes, seconds] = parts;
    Ok(degrees + minutes / 60.0 + seconds / 3600.0)
}

pub fn field_to_decimal(field: &Field) -> Result<f64, CoordinateError> {
    match &field.value {
        Value::Rational(values) => dms_to_decimal(values),
        _ => Err(CoordinateError::NotRational),
    }
}

/// Aplica el signo del hemisferio: `S` y `W` son negativos.
pub fn apply_hemisphere(value: f64, reference: Option<&str>, negative: &str) -> f64 {
    match reference {
        Some(reference) if reference.trim() == negative => -value,
        _ => value,
    }
}
