//! Extractores por formato y el despachador que elige entre ellos.

mod dates;
mod gps;
mod image;
mod image_info;
mod pdf;
mod xmp;


pub use gps::CoordinateError;
pub use self::image::extract_image_metadata;
pub use pdf::{PAGE_COUNT_KEY, extract_pdf_metadata};

use crate::error::{MetadataError, Result, panic_message};
use crate::formatting::format_size;
use crate::metadata::{ExtractionOptions, FileKind, MetadataMap};
use std::fmt::Display;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{error, warn};

/// Enruta los bytes al extractor del tipo indicado.
pub fn extract_kind(bytes: &[u8], kind: FileKind) -> MetadataMap {
    extract_kind_with_options(bytes, kind, &ExtractionOptions::default())
}

pub fn extract_kind_with_options(
    bytes: &[u8],
    kind: FileKind,
    options: &ExtractionOptions,
) -> MetadataMap {
    if kind.is_image() {
        extract_image_metadata(bytes)
    } else {
        extract_pdf_metadata(bytes, options)
    }
}

/// Contrato simple para quien llama: `None` si el tipo no está soportado o no
/// se encontró metadata; en otro caso el mapa, que puede ser el centinela
/// `Error`.
pub fn extract(bytes: &[u8], declared_kind: &str) -> Option<MetadataMap> {
    let kind = match declared_kind.parse::<FileKind>() {
        Ok(kind) => kind,
        Err(error) => {
            warn!(%error, "unsupported file extension");
            return None;
        }
    };

    let metadata = extract_kind(bytes, kind);
    (!metadata.is_empty()).then_some(metadata)
}

/// Igual que [`extract`], pero separa los tres desenlaces en el tipo de error:
/// errores del cliente (`UnsupportedKind`, `NoMetadata`) y falla interna
/// (`Extraction`).
pub fn extract_outcome(
    bytes: &[u8],
    declared_kind: &str,
    options: &ExtractionOptions,
) -> Result<MetadataMap> {
    let kind: FileKind = declared_kind.parse()?;
    classify(extract_kind_with_options(bytes, kind, options))
}

/// Lee un archivo respetando el límite de tamaño. El tipo sale de la
/// extensión; si no hay extensión se detecta por contenido.
pub fn extract_file(path: &Path, options: &ExtractionOptions) -> Result<MetadataMap> {
    let size = fs::metadata(path)?.len();
    if size > options.max_file_size {
        return Err(MetadataError::TooLarge {
            size: format_size(size),
            limit: format_size(options.max_file_size),
        });
    }

    let bytes = fs::read(path)?;
    let kind = match FileKind::from_path(path) {
        Ok(kind) => kind,
        Err(error) if path.extension().is_none() => FileKind::sniff(&bytes).ok_or(error)?,
        Err(error) => return Err(error),
    };

    classify(extract_kind_with_options(&bytes, kind, options))
}

fn classify(metadata: MetadataMap) -> Result<MetadataMap> {
    if metadata.is_empty() {
        return Err(MetadataError::NoMetadata);
    }
    if let Some(message) = metadata.failure_message() {
        return Err(MetadataError::extraction(message));
    }
    Ok(metadata)
}

/// Ejecuta un extractor y convierte cualquier error o pánico del parser en el
/// mapa centinela.
fn guarded<E, F>(kind: &'static str, run: F) -> MetadataMap
where
    E: Display,
    F: FnOnce() -> std::result::Result<MetadataMap, E>,
{
    match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(metadata)) => metadata,
        Ok(Err(cause)) => {
            error!(kind, %cause, "metadata extraction failed");
            MetadataMap::failure(format!("Failed to extract metadata: {cause}"))
        }
        Err(payload) => {
            let cause = panic_message(payload.as_ref());
            error!(kind, %cause, "metadata parser panicked");
            MetadataMap::failure(format!("Failed to extract metadata: {cause}"))
        }
    }
}
