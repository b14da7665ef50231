//! Fechas legibles derivadas de los formatos nativos EXIF y PDF.

use chrono::NaiveDateTime;

const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
const READABLE_EXIF_FORMAT: &str = "%B %d, %Y at %I:%M %p";
const PDF_DATE_PREFIX: &str = "D:";
const PDF_DATE_DIGITS: usize = 14;

/// `2023:01:15 12:00:00` → `January 15, 2023 at 12:00 PM`.
pub fn readable_exif_datetime(value: &str) -> Result<String, chrono::ParseError> {
    let parsed = NaiveDateTime::parse_from_str(value.trim(), EXIF_DATE_FORMAT)?;
    Ok(parsed.format(READABLE_EXIF_FORMAT).to_string())
}

/// `D:20230115120000+01'00'` → `2023-01-15 12:00:00`.
///
/// Devuelve `None` cuando el valor no tiene el prefijo `D:` seguido de al
/// menos 14 dígitos; el resto del valor (zona horaria) se ignora.
pub fn readable_pdf_date(value: &str) -> Option<String> {
    let digits = value.trim().strip_prefix(PDF_DATE_PREFIX)?;
    let block = digits.get(..PDF_DATE_DIGITS)?;
    if !block.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    Some(format!(
        "{}-{}-{} {}:{}:{}",
        &block[0..4],
        &block[4..6],
        &block[6..8],
        &block[8..10],
        &block[10..12],
        &block[12..14]
    ))
}
