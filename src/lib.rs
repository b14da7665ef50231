//! MetaLens: extracción de metadata embebida en imágenes y PDFs, y detección
//! de campos que pueden exponer información personal o de ubicación.
//!
//! El flujo típico es `extract` → `analyze`:
//!
//! ```no_run
//! use metalens::{analyze, extract};
//!
//! let bytes = std::fs::read("foto.jpg").unwrap();
//! if let Some(metadata) = extract(&bytes, "jpg") {
//!     for finding in analyze(&metadata) {
//!         println!("{}: {}", finding.field, finding.description);
//!     }
//! }
//! ```

pub mod error;
pub mod extractors;
pub mod formatting;
pub mod metadata;
pub mod privacy;

#[cfg(test)]
mod test_support;

pub use error::{MetadataError, Result};
pub use extractors::{extract, extract_file, extract_kind, extract_outcome};
pub use metadata::{ExtractionOptions, FileKind, MetadataMap};
pub use privacy::{PrivacyFinding, analyze};
