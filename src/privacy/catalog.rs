//! Catálogo fijo de campos sensibles, en orden de prioridad.
//!
//! La comparación es por subcadena sin distinguir mayúsculas, y gana el
//! primer patrón que coincide, así que el orden importa: `DateTimeOriginal`
//! recibe la descripción de `DateTime`, que aparece antes.

pub const SENSITIVE_FIELDS: &[(&str, &str)] = &[
    // Ubicación
    ("GPSLatitude", "Contains your geographical latitude"),
    ("GPSLongitude", "Contains your geographical longitude"),
    ("GPSInfo", "Contains geographical positioning information"),
    ("GPSPosition", "Contains your geographical position"),
    ("location", "Contains location information"),
    // Datos personales
    ("Author", "Contains the document author name"),
    ("Creator", "Contains information about who created the document"),
    ("Producer", "Reveals which software was used to create the document"),
    ("Artist", "Contains the name of the image creator"),
    (
        "Copyright",
        "Contains copyright information that may include personal names",
    ),
    ("Owner", "Contains ownership information"),
    ("CameraOwnerName", "Contains the camera owner's name"),
    ("UserComment", "May contain personal comments or information"),
    // Dispositivo
    ("Make", "Reveals your camera/device manufacturer"),
    ("Model", "Reveals your specific camera/device model"),
    (
        "Software",
        "Reveals which software was used to create or edit the file",
    ),
    ("HostComputer", "Reveals your computer name"),
    ("SerialNumber", "Contains your device serial number"),
    (
        "DeviceSettingDescription",
        "Contains detailed device settings",
    ),
    // Fechas
    ("DateTime", "Contains the date and time the image was taken"),
    (
        "DateTimeOriginal",
        "Contains the original date and time the image was taken",
    ),
    ("DateTimeDigitized", "Contains when the image was digitized"),
    ("CreationDate", "Contains when the document was created"),
    ("ModDate", "Contains when the document was last modified"),
];

/// Descripción del primer patrón que aparece dentro de `field`.
pub fn match_field(field: &str) -> Option<&'static str> {
    let field = field.to_lowercase();
    SENSITIVE_FIELDS
        .iter()
        .find(|(pattern, _)| field.contains(&pattern.to_lowercase()))
        .map(|(_, description)| *description)
}
