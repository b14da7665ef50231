//! Extracción de metadata EXIF para imágenes JPEG y PNG.
//!
//! Cada etiqueta se nombra `"<Espacio> <Etiqueta>"` (`Image`, `EXIF`, `GPS`,
//! `Interoperability` o `Thumbnail`) y luego se normaliza. Cuando la imagen no
//! trae EXIF se recurre a las propiedades básicas de [`super::image_info`].

use super::image_info::basic_image_metadata;
use super::{dates, gps, guarded};
use crate::metadata::MetadataMap;
use crate::metadata::normalize::{
    DisplayValue, MAX_BINARY_LEN, canonical_exif_key, decode_text_bytes, is_thumbnail,
};
use exif::{Context, Exif, Field, In, Tag, Value};
use std::io::Cursor;
use tracing::{debug, warn};

const DATETIME_KEY: &str = "DateTime";
const DATETIME_READABLE_KEY: &str = "DateTimeReadable";
const LATITUDE_KEY: &str = "GPSLatitude";
const LONGITUDE_KEY: &str = "GPSLongitude";

/// Extrae la metadata de una imagen. Nunca falla: los errores irrecuperables
/// se devuelven como el mapa centinela `Error`.
pub fn extract_image_metadata(bytes: &[u8]) -> MetadataMap {
    guarded("image", || read_image_metadata(bytes))
}

fn read_image_metadata(bytes: &[u8]) -> Result<MetadataMap, image::ImageError> {
    let mut metadata = MetadataMap::new();

    match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => {
            collect_exif_fields(&exif, &mut metadata);
            add_decimal_coordinates(&exif, &mut metadata);
        }
        Err(error) => debug!(%error, "no readable EXIF block, using basic image properties"),
    }

    if metadata.is_empty() {
        metadata = basic_image_metadata(bytes)?;
    }

    add_readable_datetime(&mut metadata);
    Ok(metadata)
}

fn collect_exif_fields(exif: &Exif, metadata: &mut MetadataMap) {
    for field in exif.fields() {
        let raw_name = raw_tag_name(field);
        if is_thumbnail(&raw_name) {
            continue;
        }
        let Some(value) = field.display_string() else {
            debug!(tag = %raw_name, "skipping binary EXIF payload");
            continue;
        };
        metadata.insert_if_absent(canonical_exif_key(&raw_name), value);
    }
}

fn raw_tag_name(field: &Field) -> String {
    let namespace = if field.ifd_num == In::THUMBNAIL {
        "Thumbnail"
    } else {
        match field.tag.context() {
            Context::Tiff => "Image",
            Context::Exif => "EXIF",
            Context::Gps => "GPS",
            Context::Interop => "Interoperability",
            _ => "Unknown",
        }
    };
    format!("{namespace} {}", field.tag)
}

impl DisplayValue for Field {
    fn display_string(&self) -> Option<String> {
        if self.tag == Tag::MakerNote {
            return None;
        }
        match &self.value {
            Value::Ascii(parts) => Some(
                parts
                    .iter()
                    .map(|part| decode_text_bytes(part))
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Value::Undefined(bytes, _) if self.tag == Tag::UserComment => {
                Some(decode_user_comment(bytes))
            }
            Value::Undefined(bytes, _) if bytes.len() > MAX_BINARY_LEN => None,
            _ => Some(self.display_value().to_string()),
        }
    }
}

/// `UserComment` lleva 8 bytes de código de juego de caracteres delante.
fn decode_user_comment(bytes: &[u8]) -> String {
    let (code, body) = bytes.split_at(bytes.len().min(8));
    if code == b"UNICODE\0" {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units)
            .trim_matches(|c: char| c == '\0' || c.is_whitespace())
            .to_string();
    }
    decode_text_bytes(body)
}

fn add_decimal_coordinates(exif: &Exif, metadata: &mut MetadataMap) {
    let (Some(latitude), Some(longitude)) = (
        exif.get_field(Tag::GPSLatitude, In::PRIMARY),
        exif.get_field(Tag::GPSLongitude, In::PRIMARY),
    ) else {
        return;
    };

    let coordinates = gps::field_to_decimal(latitude)
        .and_then(|lat| gps::field_to_decimal(longitude).map(|lon| (lat, lon)));

    match coordinates {
        Ok((lat, lon)) => {
            let lat_ref = hemisphere(exif, Tag::GPSLatitudeRef);
            let lon_ref = hemisphere(exif, Tag::GPSLongitudeRef);
            let lat = gps::apply_hemisphere(lat, lat_ref.as_deref(), "S");
            let lon = gps::apply_hemisphere(lon, lon_ref.as_deref(), "W");
            metadata.insert(LATITUDE_KEY, lat.to_string());
            metadata.insert(LONGITUDE_KEY, lon.to_string());
        }
        Err(error) => warn!(%error, "skipping GPS coordinates"),
    }
}

fn hemisphere(exif: &Exif, tag: Tag) -> Option<String> {
    exif.get_field(tag, In::PRIMARY)
        .and_then(DisplayValue::display_string)
}

fn add_readable_datetime(metadata: &mut MetadataMap) {
    let Some(raw) = metadata.get(DATETIME_KEY) else {
        return;
    };

    match dates::readable_exif_datetime(raw) {
        Ok(readable) => metadata.insert(DATETIME_READABLE_KEY, readable),
        Err(error) => warn!(value = raw, %error, "could not parse DateTime"),
    }
}
