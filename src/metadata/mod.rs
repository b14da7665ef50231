//! Modelo de datos compartido: mapa de metadata, tipos de archivo, opciones
//! y formatos de salida.

pub mod export;
mod kind;
mod map;
pub mod normalize;
mod options;
pub mod report;

pub use kind::FileKind;
pub use map::{ERROR_KEY, MetadataMap};
pub use options::{DEFAULT_MAX_FILE_SIZE, ExtractionOptions};
