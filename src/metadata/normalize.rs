//! Normalización de nombres de etiquetas y conversión uniforme a texto.

/// Prefijos de espacio de nombres que pertenecen a la imagen principal.
/// Los de GPS e Interoperability se conservan para no chocar con las claves
/// derivadas (`GPSLatitude`, `GPSLongitude`).
const PRIMARY_NAMESPACES: [&str; 2] = ["EXIF ", "Image "];

/// Valores binarios más largos que esto se consideran carga útil y se omiten.
pub const MAX_BINARY_LEN: usize = 256;

/// Conversión uniforme de un valor nativo del formato a texto mostrable.
///
/// `None` indica que el valor es carga binaria y no debe entrar al mapa.
pub trait DisplayValue {
    fn display_string(&self) -> Option<String>;
}

pub fn is_thumbnail(name: &str) -> bool {
    name.to_ascii_lowercase().contains("thumbnail")
}

pub fn canonical_exif_key(raw: &str) -> String {
    PRIMARY_NAMESPACES
        .iter()
        .find_map(|prefix| raw.strip_prefix(prefix))
        .unwrap_or(raw)
        .to_string()
}

pub fn canonical_pdf_key(raw: &str) -> String {
    raw.strip_prefix('/').unwrap_or(raw).to_string()
}

/// Decodifica una cadena de texto PDF: UTF-16BE con BOM, UTF-8, o Latin-1.
pub fn decode_text_bytes(bytes: &[u8]) -> String {
    let text = if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8_lossy(rest).into_owned()
    } else {
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => bytes.iter().map(|&byte| byte as char).collect(),
        }
    };
    text.trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}
