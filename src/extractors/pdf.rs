//! Extracción de metadata en PDFs mediante lectura del diccionario Info.
//!
//! Si el diccionario no aporta nada más allá del número de páginas, se hace
//! una única segunda lectura del flujo completo con [`super::xmp`].

use super::xmp::read_secondary_metadata;
use super::{dates, guarded};
use crate::metadata::normalize::{DisplayValue, canonical_pdf_key, decode_text_bytes};
use crate::metadata::{ExtractionOptions, MetadataMap};
use lopdf::{Dictionary, Document, Object};
use tracing::debug;

pub const PAGE_COUNT_KEY: &str = "Page Count";
const DATE_FIELDS: [&str; 2] = ["CreationDate", "ModDate"];
const MAX_REFERENCE_DEPTH: usize = 8;

pub fn extract_pdf_metadata(bytes: &[u8], options: &ExtractionOptions) -> MetadataMap {
    guarded("pdf", || read_pdf_metadata(bytes, options))
}

fn read_pdf_metadata(
    bytes: &[u8],
    options: &ExtractionOptions,
) -> Result<MetadataMap, lopdf::Error> {
    let doc = Document::load_mem(bytes)?;
    let mut metadata = MetadataMap::new();

    if let Some(info) = info_dictionary(&doc) {
        for (key, value) in info.iter() {
            let key = canonical_pdf_key(&String::from_utf8_lossy(key));
            match PdfValue::new(&doc, value).display_string() {
                Some(text) => metadata.insert(key, text),
                None => debug!(%key, "skipping binary PDF info value"),
            }
        }
    }

    metadata.insert(PAGE_COUNT_KEY, doc.get_pages().len().to_string());

    if options.pdf_fallback && metadata.len() <= 1 {
        merge_secondary(bytes, &mut metadata);
    }

    add_readable_dates(&mut metadata);
    Ok(metadata)
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    let info_ref = doc.trailer.get(b"Info").ok()?;
    deref_dictionary(doc, info_ref)
}

fn deref_dictionary<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Reference(reference) => doc.get_dictionary(*reference).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn merge_secondary(bytes: &[u8], metadata: &mut MetadataMap) {
    debug!("PDF info dictionary is empty, reading secondary metadata");
    let secondary = read_secondary_metadata(bytes);

    for (key, value) in secondary.entries {
        if !value.trim().is_empty() {
            metadata.insert_if_absent(key, value);
        }
    }

    if let Some(pages) = secondary.page_count {
        metadata.insert_if_absent(PAGE_COUNT_KEY, pages.to_string());
    }
}

fn add_readable_dates(metadata: &mut MetadataMap) {
    for field in DATE_FIELDS {
        let Some(raw) = metadata.get(field) else {
            continue;
        };
        match dates::readable_pdf_date(raw) {
            Some(readable) => metadata.insert(format!("{field}Readable"), readable),
            None => debug!(field, value = raw, "PDF date left unconverted"),
        }
    }
}

/// Objeto PDF junto con el documento, para poder seguir referencias.
struct PdfValue<'a> {
    doc: &'a Document,
    object: &'a Object,
    depth: usize,
}

impl<'a> PdfValue<'a> {
    fn new(doc: &'a Document, object: &'a Object) -> Self {
        Self {
            doc,
            object,
            depth: 0,
        }
    }

    fn child(&self, object: &'a Object) -> Self {
        Self {
            doc: self.doc,
            object,
            depth: self.depth + 1,
        }
    }
}

impl DisplayValue for PdfValue<'_> {
    fn display_string(&self) -> Option<String> {
        match self.object {
            Object::Null => Some("null".to_string()),
            Object::Boolean(value) => Some(value.to_string()),
            Object::Integer(value) => Some(value.to_string()),
            Object::Real(value) => Some(value.to_string()),
            Object::Name(name) => Some(format!("/{}", String::from_utf8_lossy(name))),
            Object::String(bytes, _) => Some(decode_text_bytes(bytes)),
            Object::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|item| self.child(item).display_string())
                    .collect();
                Some(format!("[{}]", parts.join(", ")))
            }
            Object::Dictionary(dict) => {
                let parts: Vec<String> = dict
                    .iter()
                    .filter_map(|(key, value)| {
                        self.child(value)
                            .display_string()
                            .map(|text| format!("{}: {text}", String::from_utf8_lossy(key)))
                    })
                    .collect();
                Some(format!("{{{}}}", parts.join(", ")))
            }
            Object::Stream(_) => None,
            Object::Reference(reference) => {
                if self.depth >= MAX_REFERENCE_DEPTH {
                    return None;
                }
                let target = self.doc.get_object(*reference).ok()?;
                self.child(target).display_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{PdfFixture, xmp_packet};

    #[test]
    fn info_dictionary_entries_are_extracted() {
        let bytes = PdfFixture::new(2)
            .info("Author", "Jane Doe")
            .info("Producer", "LibreOffice 7.5")
            .build();
        let metadata = extract_pdf_metadata(&bytes, &ExtractionOptions::default());

        assert_eq!(metadata.get("Author"), Some("Jane Doe"));
        assert_eq!(metadata.get("Producer"), Some("LibreOffice 7.5"));
        assert_eq!(metadata.get(PAGE_COUNT_KEY), Some("2"));
    }

    #[test]
    fn creation_date_gets_readable_variant() {
        let bytes = PdfFixture::new(1)
            .info("CreationDate", "D:20230115120000")
            .info("ModDate", "D:20230116083000+01'00'")
            .build();
        let metadata = extract_pdf_metadata(&bytes, &ExtractionOptions::default());

        assert_eq!(
            metadata.get("CreationDateReadable"),
            Some("2023-01-15 12:00:00")
        );
        assert_eq!(metadata.get("ModDateReadable"), Some("2023-01-16 08:30:00"));
    }

    #[test]
    fn dates_without_pdf_shape_are_not_converted() {
        let bytes = PdfFixture::new(1)
            .info("CreationDate", "last tuesday")
            .build();
        let metadata = extract_pdf_metadata(&bytes, &ExtractionOptions::default());

        assert_eq!(metadata.get("CreationDate"), Some("last tuesday"));
        assert!(!metadata.contains_key("CreationDateReadable"));
    }

    #[test]
    fn empty_info_triggers_secondary_reader() {
        let bytes = PdfFixture::new(3)
            .xmp(&xmp_packet("Quarterly report", "Jane Doe", "Writer 2.0"))
            .build();
        let metadata = extract_pdf_metadata(&bytes, &ExtractionOptions::default());

        assert_eq!(metadata.get(PAGE_COUNT_KEY), Some("3"));
        assert_eq!(metadata.get("title"), Some("Quarterly report"));
        assert_eq!(metadata.get("author"), Some("Jane Doe"));
        assert_eq!(metadata.get("creator"), Some("Writer 2.0"));
        assert!(metadata.get("format").is_some_and(|format| format.starts_with("PDF 1.")));
    }

    #[test]
    fn secondary_reader_can_be_disabled() {
        let bytes = PdfFixture::new(1)
            .xmp(&xmp_packet("Quarterly report", "Jane Doe", "Writer 2.0"))
            .build();
        let options = ExtractionOptions {
            pdf_fallback: false,
            ..ExtractionOptions::default()
        };
        let metadata = extract_pdf_metadata(&bytes, &options);

        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.get(PAGE_COUNT_KEY), Some("1"));
    }

    #[test]
    fn populated_info_skips_secondary_reader() {
        let bytes = PdfFixture::new(1)
            .info("Title", "Primary title")
            .xmp(&xmp_packet("Secondary title", "Someone", "Tool"))
            .build();
        let metadata = extract_pdf_metadata(&bytes, &ExtractionOptions::default());

        assert_eq!(metadata.get("Title"), Some("Primary title"));
        assert!(!metadata.contains_key("title"));
        assert!(!metadata.contains_key("format"));
    }

    #[test]
    fn name_values_keep_their_slash() {
        let doc = Document::with_version("1.5");
        let trapped = Object::Name(b"False".to_vec());
        assert_eq!(
            PdfValue::new(&doc, &trapped).display_string(),
            Some("/False".to_string())
        );

        let names = Object::Array(vec![Object::Name(b"A".to_vec()), Object::Integer(2)]);
        assert_eq!(
            PdfValue::new(&doc, &names).display_string(),
            Some("[/A, 2]".to_string())
        );
    }

    #[test]
    fn garbage_becomes_error_sentinel() {
        let metadata =
            extract_pdf_metadata(b"%PDF-1.4 not really", &ExtractionOptions::default());
        assert!(metadata.is_failure());
    }
}
