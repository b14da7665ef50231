//! Lectura secundaria de metadata PDF directamente sobre los bytes.
//!
//! No depende del árbol de objetos: toma la versión de la cabecera, el
//! paquete XMP sin comprimir, la presencia de `/Encrypt` y cuenta los objetos
//! `/Type /Page`. Sirve para PDFs cuyo diccionario Info está vacío.

use std::collections::HashSet;
use xmltree::{Element, XMLNode};

const MAX_XMP_VALUE_LEN: usize = 2048;
const HEADER_SCAN_LIMIT: usize = 1024;

#[derive(Debug, Default)]
pub struct SecondaryMetadata {
    pub entries: Vec<(&'static str, String)>,
    pub page_count: Option<usize>,
}

struct XmpFieldSpec {
    key: &'static str,
    names: &'static [&'static str],
}

const XMP_FIELDS: [XmpFieldSpec; 9] = [
    XmpFieldSpec {
        key: "title",
        names: &["dc:title", "title"],
    },
    XmpFieldSpec {
        key: "author",
        names: &["dc:creator", "creator"],
    },
    XmpFieldSpec {
        key: "subject",
        names: &["dc:description", "description"],
    },
    XmpFieldSpec {
        key: "keywords",
        names: &["pdf:Keywords", "Keywords"],
    },
    XmpFieldSpec {
        key: "creator",
        names: &["xmp:CreatorTool", "CreatorTool"],
    },
    XmpFieldSpec {
        key: "producer",
        names: &["pdf:Producer", "Producer"],
    },
    XmpFieldSpec {
        key: "creationDate",
        names: &["xmp:CreateDate", "CreateDate"],
    },
    XmpFieldSpec {
        key: "modDate",
        names: &["xmp:ModifyDate", "ModifyDate"],
    },
    XmpFieldSpec {
        key: "trapped",
        names: &["pdf:Trapped", "Trapped"],
    },
];

pub fn read_secondary_metadata(bytes: &[u8]) -> SecondaryMetadata {
    let mut metadata = SecondaryMetadata::default();

    if let Some(version) = header_version(bytes) {
        metadata.entries.push(("format", format!("PDF {version}")));
    }

    if let Some(root) = find_xmp_packet(bytes).and_then(|packet| parse_xmp(&packet)) {
        for field in &XMP_FIELDS {
            let value = collect_values(&root, field.names);
            if !value.is_empty() {
                metadata.entries.push((field.key, value));
            }
        }
    }

    if find(bytes, b"/Encrypt", 0).is_some() {
        metadata.entries.push(("encryption", "Encrypted".to_string()));
    }

    metadata.page_count = Some(count_page_objects(bytes)).filter(|count| *count > 0);
    metadata
}

fn header_version(bytes: &[u8]) -> Option<String> {
    let window = &bytes[..bytes.len().min(HEADER_SCAN_LIMIT)];
    let start = find(window, b"%PDF-", 0)? + 5;
    let version: String = window[start..]
        .iter()
        .take_while(|byte| byte.is_ascii_digit() || **byte == b'.')
        .map(|&byte| byte as char)
        .collect();
    (!version.is_empty()).then_some(version)
}

fn find_xmp_packet(bytes: &[u8]) -> Option<String> {
    let start = find(bytes, b"<x:xmpmeta", 0)?;
    let end_tag = b"</x:xmpmeta>";
    let end = find(bytes, end_tag, start)? + end_tag.len();
    Some(String::from_utf8_lossy(&bytes[start..end]).into_owned())
}

fn parse_xmp(packet: &str) -> Option<Element> {
    Element::parse(packet.as_bytes()).ok()
}

/// Cuenta `/Type /Page` (admitiendo espacios) sin confundirlo con `/Pages`.
fn count_page_objects(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut from = 0;
    while let Some(pos) = find(bytes, b"/Type", from) {
        let mut cursor = pos + b"/Type".len();
        while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
            cursor += 1;
        }
        if bytes[cursor..].starts_with(b"/Page") {
            let after = cursor + b"/Page".len();
            if bytes.get(after).is_none_or(|byte| !byte.is_ascii_alphanumeric()) {
                count += 1;
            }
        }
        from = pos + 1;
    }
    count
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from >= haystack.len() || needle.is_empty() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}

fn collect_values(root: &Element, keys: &[&str]) -> String {
    let mut collected = Vec::new();
    for key in keys {
        collect_values_for_key(root, key, &mut collected);
    }

    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for value in collected {
        let trimmed = value.trim().to_string();
        if trimmed.is_empty() || trimmed.len() > MAX_XMP_VALUE_LEN {
            continue;
        }
        if seen.insert(trimmed.clone()) {
            values.push(trimmed);
        }
    }
    values.join(", ")
}

fn collect_values_for_key(root: &Element, key: &str, values: &mut Vec<String>) {
    for (attr_key, attr_value) in &root.attributes {
        if key_matches(attr_key, key) {
            values.push(attr_value.to_string());
        }
    }

    if key_matches(&qualified_name(root), key) {
        let text = element_text(root);
        if !text.is_empty() {
            values.push(text);
        }
    }

    for node in &root.children {
        if let XMLNode::Element(child) = node {
            collect_values_for_key(child, key, values);
        }
    }
}

fn qualified_name(element: &Element) -> String {
    match &element.prefix {
        Some(prefix) => format!("{prefix}:{}", element.name),
        None => element.name.clone(),
    }
}

fn element_text(element: &Element) -> String {
    let mut parts = Vec::new();
    collect_text_nodes(element, &mut parts);
    parts
        .into_iter()
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn collect_text_nodes(element: &Element, values: &mut Vec<String>) {
    for node in &element.children {
        match node {
            XMLNode::Text(text) => values.push(text.trim().to_string()),
            XMLNode::Element(child) => collect_text_nodes(child, values),
            _ => {}
        }
    }
}

fn key_matches(found: &str, wanted: &str) -> bool {
    if found.eq_ignore_ascii_case(wanted) {
        return true;
    }
    if !wanted.contains(':')
        && let Some(local) = found.rsplit(':').next()
    {
        return local.eq_ignore_ascii_case(wanted);
    }
    false
}
