//! Tipo de archivo declarado por quien llama y detección por contenido.

use crate::error::MetadataError;
use infer::Infer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Jpg,
    Jpeg,
    Png,
    Pdf,
}

impl FileKind {
    pub const ALL: [FileKind; 4] = [FileKind::Jpg, FileKind::Jpeg, FileKind::Png, FileKind::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Jpg => "jpg",
            FileKind::Jpeg => "jpeg",
            FileKind::Png => "png",
            FileKind::Pdf => "pdf",
        }
    }

    pub fn is_image(self) -> bool {
        !matches!(self, FileKind::Pdf)
    }

    /// Tipo según la extensión de la ruta, sin mirar el contenido.
    pub fn from_path(path: &Path) -> Result<Self, MetadataError> {
        let ext = path
            .extension()
            .map(|value| value.to_string_lossy().into_owned())
            .ok_or_else(|| MetadataError::UnsupportedKind(path.display().to_string()))?;
        ext.parse()
    }

    /// Intenta detectar el tipo a partir de los primeros bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        let infer = Infer::new();
        let kind = infer.get(bytes)?;
        match kind.mime_type() {
            "image/jpeg" => Some(FileKind::Jpg),
            "image/png" => Some(FileKind::Png),
            "application/pdf" => Some(FileKind::Pdf),
            _ => None,
        }
    }
}

impl FromStr for FileKind {
    type Err = MetadataError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().trim_start_matches('.').to_ascii_lowercase();
        FileKind::ALL
            .into_iter()
            .find(|kind| kind.extension() == normalized)
            .ok_or_else(|| MetadataError::UnsupportedKind(input.to_string()))
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
