//! Propiedades básicas de imagen para archivos sin EXIF.
//!
//! Además de formato, tamaño y modo de color, recoge los valores escalares
//! del bloque auxiliar de cada formato: fragmentos de texto PNG y los
//! segmentos JFIF/Adobe de JPEG.

use crate::metadata::MetadataMap;
use image::{ExtendedColorType, ImageDecoder, ImageFormat, ImageReader, ImageResult};
use std::io::Cursor;

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
const MARKER_APP0: u8 = 0xE0;
const MARKER_APP14: u8 = 0xEE;
const MARKER_SOS: u8 = 0xDA;
const MARKER_EOI: u8 = 0xD9;
const PROGRESSIVE_SOF: [u8; 4] = [0xC2, 0xC6, 0xCA, 0xCE];

/// Lee solo la cabecera y devuelve `Image Format`, `Image Size`, `Image Mode`
/// y los valores auxiliares. Los píxeles no se decodifican, así que un cuerpo
/// truncado no impide el reporte.
pub fn basic_image_metadata(bytes: &[u8]) -> ImageResult<MetadataMap> {
    let format = image::guess_format(bytes)?;
    let reader = ImageReader::with_format(Cursor::new(bytes), format);
    let decoder = reader.into_decoder()?;
    let (width, height) = decoder.dimensions();

    let (png_mode, auxiliary) = match format {
        ImageFormat::Png => png_header(bytes).unwrap_or_default(),
        ImageFormat::Jpeg => (None, jpeg_segments(bytes)),
        _ => (None, Vec::new()),
    };

    let mut metadata = MetadataMap::new();
    metadata.insert("Image Format", format_name(format));
    metadata.insert("Image Size", format!("{width} x {height}"));
    metadata.insert(
        "Image Mode",
        png_mode.unwrap_or_else(|| color_mode(decoder.original_color_type())),
    );

    for (key, value) in auxiliary {
        metadata.insert_if_absent(key, value);
    }

    Ok(metadata)
}

fn format_name(format: ImageFormat) -> String {
    format!("{format:?}").to_uppercase()
}

fn color_mode(color: ExtendedColorType) -> String {
    match color {
        ExtendedColorType::L1 => "1".to_string(),
        ExtendedColorType::L8 => "L".to_string(),
        ExtendedColorType::La8 => "LA".to_string(),
        ExtendedColorType::Rgb8 => "RGB".to_string(),
        ExtendedColorType::Rgba8 => "RGBA".to_string(),
        ExtendedColorType::Cmyk8 => "CMYK".to_string(),
        ExtendedColorType::L16 => "I;16".to_string(),
        ExtendedColorType::La16 => "LA;16".to_string(),
        ExtendedColorType::Rgb16 => "RGB;16".to_string(),
        ExtendedColorType::Rgba16 => "RGBA;16".to_string(),
        ExtendedColorType::Rgb32F => "RGB;F".to_string(),
        ExtendedColorType::Rgba32F => "RGBA;F".to_string(),
        other => format!("{other:?}"),
    }
}

/// Modo de color según la cabecera PNG (conserva `P` para paletas, que el
/// decodificador expande a RGB) y los fragmentos de texto previos a IDAT.
fn png_header(bytes: &[u8]) -> Option<(Option<String>, Vec<(String, String)>)> {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let reader = decoder.read_info().ok()?;
    let info = reader.info();

    let mode = match (info.color_type, info.bit_depth) {
        (png::ColorType::Grayscale, png::BitDepth::One) => "1",
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => "I;16",
        (png::ColorType::Grayscale, _) => "L",
        (png::ColorType::GrayscaleAlpha, _) => "LA",
        (png::ColorType::Rgb, _) => "RGB",
        (png::ColorType::Rgba, _) => "RGBA",
        (png::ColorType::Indexed, _) => "P",
    };

    let mut entries = Vec::new();
    for chunk in &info.uncompressed_latin1_text {
        entries.push((chunk.keyword.clone(), chunk.text.clone()));
    }
    for chunk in &info.compressed_latin1_text {
        if let Ok(text) = chunk.get_text() {
            entries.push((chunk.keyword.clone(), text));
        }
    }
    for chunk in &info.utf8_text {
        if let Ok(text) = chunk.get_text() {
            entries.push((chunk.keyword.clone(), text));
        }
    }

    Some((Some(mode.to_string()), entries))
}

/// Recorre los segmentos JPEG hasta SOS y devuelve los valores escalares de
/// JFIF (APP0), Adobe (APP14) y el indicador de codificación progresiva.
fn jpeg_segments(bytes: &[u8]) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    if !bytes.starts_with(&JPEG_SOI) {
        return entries;
    }

    let mut progressive = false;
    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            break;
        }
        let marker = bytes[pos + 1];
        if marker == 0xFF {
            pos += 1;
            continue;
        }
        if marker == MARKER_SOS || marker == MARKER_EOI {
            break;
        }
        if (0xD0..=0xD7).contains(&marker) || marker == 0x01 {
            pos += 2;
            continue;
        }

        let length = usize::from(u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]));
        let end = pos + 2 + length;
        if length < 2 || end > bytes.len() {
            break;
        }
        let segment = &bytes[pos + 4..end];

        match marker {
            MARKER_APP0 if segment.starts_with(b"JFIF\0") && segment.len() >= 8 => {
                let version = (u16::from(segment[5]) << 8) | u16::from(segment[6]);
                entries.push(("jfif".to_string(), version.to_string()));
                entries.push(("jfif_unit".to_string(), segment[7].to_string()));
            }
            MARKER_APP14 if segment.starts_with(b"Adobe") && segment.len() >= 12 => {
                let version = u16::from_be_bytes([segment[5], segment[6]]);
                entries.push(("adobe".to_string(), version.to_string()));
                entries.push(("adobe_transform".to_string(), segment[11].to_string()));
            }
            marker if PROGRESSIVE_SOF.contains(&marker) => progressive = true,
            _ => {}
        }

        pos = end;
    }

    if progressive {
        entries.push(("progressive".to_string(), "1".to_string()));
        entries.push(("progression".to_string(), "1".to_string()));
    }
    entries
}
