//! Opciones de extracción configurables por quien llama.

use crate::error::{MetadataError, Result};
use serde::{Deserialize, Serialize};

/// Límite de subida por defecto: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    /// Tamaño máximo aceptado al leer desde disco.
    pub max_file_size: u64,
    /// Permite la segunda lectura del PDF cuando el diccionario Info está vacío.
    pub pdf_fallback: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            pdf_fallback: true,
        }
    }
}

impl ExtractionOptions {
    /// Carga opciones desde JSON; los campos ausentes toman el valor por defecto.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(MetadataError::Config)
    }
}
