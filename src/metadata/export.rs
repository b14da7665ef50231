//! Exportacion de la metadata en los formatos de descarga.

use crate::error::{MetadataError, Result};
use crate::metadata::MetadataMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExportFormat {
    Json,
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Txt => "txt",
        }
    }
}

pub fn parse_export_format(input: &str) -> Result<ExportFormat> {
    match input.to_lowercase().as_str() {
        "json" => Ok(ExportFormat::Json),
        "txt" | "text" => Ok(ExportFormat::Txt),
        _ => Err(MetadataError::UnsupportedExportFormat(input.to_string())),
    }
}

/// Serializa la metadata: objeto JSON plano o líneas `clave: valor`.
pub fn render_metadata(metadata: &MetadataMap, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(metadata)?),
        ExportFormat::Txt => Ok(render_txt(metadata)),
    }
}

fn render_txt(metadata: &MetadataMap) -> String {
    let mut output = String::new();
    for (key, value) in metadata {
        output.push_str(key);
        output.push_str(": ");
        output.push_str(value);
        output.push('\n');
    }
    output
}

/// Nombre sugerido para la descarga: `<base>_metadata.<ext>`.
pub fn export_file_name(original: &str, format: ExportFormat) -> String {
    let base = original
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(original);
    format!("{base}_metadata.{}", format.extension())
}
