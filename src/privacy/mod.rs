//! Análisis heurístico de privacidad sobre la metadata extraída.

mod catalog;

#[cfg(test)]
mod tests;

pub use catalog::{SENSITIVE_FIELDS, match_field};

use crate::error::panic_message;
use crate::metadata::MetadataMap;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use tracing::error;

pub const GPS_COORDINATES_FIELD: &str = "GPS Coordinates";
const GPS_COORDINATES_DESCRIPTION: &str =
    "This file contains precise location information that could reveal where the file was created";
const GPS_COORDINATES_VALUE: &str = "Geographical coordinates present";
/// Un hallazgo con este nombre suprime el hallazgo combinado de coordenadas.
const GPS_SUPPRESSING_FIELD: &str = "GPS Latitude";
const EMAIL_DESCRIPTION: &str = "This field may contain an email address";
const ERROR_FIELD: &str = "Error";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyFinding {
    pub field: String,
    pub description: String,
    pub value: String,
}

impl PrivacyFinding {
    pub fn new(
        field: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            description: description.into(),
            value: value.into(),
        }
    }

    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::new(
            ERROR_FIELD,
            format!("Failed to analyze privacy concerns: {message}"),
            ERROR_FIELD,
        )
    }

    pub fn is_error(&self) -> bool {
        self.field == ERROR_FIELD && self.value == ERROR_FIELD
    }
}

/// Revisa la metadata y devuelve los hallazgos en orden: primero los del
/// catálogo según el orden del mapa, luego el de coordenadas y los de correo.
///
/// Nunca entra en pánico: una falla interna produce un único hallazgo `Error`.
pub fn analyze(metadata: &MetadataMap) -> Vec<PrivacyFinding> {
    match panic::catch_unwind(AssertUnwindSafe(|| collect_findings(metadata))) {
        Ok(findings) => findings,
        Err(payload) => {
            let cause = panic_message(payload.as_ref());
            error!(%cause, "privacy analysis failed");
            vec![PrivacyFinding::error(cause)]
        }
    }
}

/// `true` si algún hallazgo habla de ubicación.
pub fn has_location_findings(findings: &[PrivacyFinding]) -> bool {
    findings.iter().any(|finding| {
        let field = finding.field.to_lowercase();
        field.contains("gps") || field.contains("location")
    })
}

fn collect_findings(metadata: &MetadataMap) -> Vec<PrivacyFinding> {
    let mut findings: Vec<PrivacyFinding> = metadata
        .iter()
        .filter_map(|(field, value)| {
            let description = match_field(field)?;
            Some(PrivacyFinding::new(field, description, value))
        })
        .collect();

    if has_coordinate_pair(metadata) && !already_reported(&findings, GPS_SUPPRESSING_FIELD) {
        findings.push(PrivacyFinding::new(
            GPS_COORDINATES_FIELD,
            GPS_COORDINATES_DESCRIPTION,
            GPS_COORDINATES_VALUE,
        ));
    }

    for (field, value) in metadata {
        if looks_like_email(value) && !findings.iter().any(|finding| &finding.field == field) {
            findings.push(PrivacyFinding::new(field, EMAIL_DESCRIPTION, value));
        }
    }

    findings
}

fn has_coordinate_pair(metadata: &MetadataMap) -> bool {
    let has_key = |needle: &str| metadata.keys().any(|key| key.to_lowercase().contains(needle));
    has_key("latitude") && has_key("longitude")
}

fn already_reported(findings: &[PrivacyFinding], field: &str) -> bool {
    findings
        .iter()
        .any(|finding| finding.field.eq_ignore_ascii_case(field))
}

/// Contiene `@` y un `.` en el tramo que sigue a la primera `@`.
fn looks_like_email(value: &str) -> bool {
    value
        .split('@')
        .nth(1)
        .is_some_and(|domain| domain.contains('.'))
}
