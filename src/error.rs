//! Errores que cruzan la frontera del núcleo.
//!
//! Solo dos familias salen hacia quien llama: errores de entrada del cliente
//! (tipo no soportado, archivo sin metadata, archivo demasiado grande) y la
//! falla de extracción representada por el mapa centinela `Error`. Las
//! advertencias a nivel de campo se quedan en el log.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetadataError>;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Unsupported file type: {0}")]
    UnsupportedKind(String),

    #[error("Unable to extract metadata from this file")]
    NoMetadata,

    #[error("File exceeds the maximum allowed size ({size} > {limit})")]
    TooLarge { size: String, limit: String },

    #[error("Could not read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Extraction { message: String },

    #[error("Unsupported export format: {0}")]
    UnsupportedExportFormat(String),

    #[error("Invalid configuration: {0}")]
    Config(#[source] serde_json::Error),

    #[error("Could not serialize metadata: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MetadataError {
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    /// `true` cuando el error se debe a la entrada del cliente (clase 400)
    /// y no a una falla interna de extracción (clase 500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedKind(_)
                | Self::UnsupportedExportFormat(_)
                | Self::NoMetadata
                | Self::TooLarge { .. }
                | Self::Io(_)
                | Self::Config(_)
        )
    }
}

/// Texto de un pánico capturado con `catch_unwind`.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
