//! Archivos de prueba construidos en memoria.

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::io::Cursor;

#[derive(Default)]
pub struct ExifFixture {
    fields: Vec<Field>,
}

impl ExifFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ascii(self, tag: Tag, text: &str) -> Self {
        self.push(tag, In::PRIMARY, Value::Ascii(vec![text.as_bytes().to_vec()]))
    }

    pub fn thumbnail_ascii(self, tag: Tag, text: &str) -> Self {
        self.push(tag, In::THUMBNAIL, Value::Ascii(vec![text.as_bytes().to_vec()]))
    }

    pub fn rationals(self, tag: Tag, parts: &[(u32, u32)]) -> Self {
        let values = parts
            .iter()
            .map(|&(num, denom)| Rational { num, denom })
            .collect();
        self.push(tag, In::PRIMARY, Value::Rational(values))
    }

    fn push(mut self, tag: Tag, ifd_num: In, value: Value) -> Self {
        self.fields.push(Field {
            tag,
            ifd_num,
            value,
        });
        self
    }

    fn tiff(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        for field in &self.fields {
            writer.push_field(field);
        }
        let mut buffer = Cursor::new(Vec::new());
        writer.write(&mut buffer, false).expect("escritura TIFF");
        buffer.into_inner()
    }
}

/// JPEG mínimo: SOI, APP1 con el bloque EXIF y EOI.
pub fn jpeg_with_exif(fixture: &ExifFixture) -> Vec<u8> {
    let tiff = fixture.tiff();
    let length = u16::try_from(2 + 6 + tiff.len()).expect("APP1 cabe en un segmento");

    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
    bytes.extend_from_slice(&length.to_be_bytes());
    bytes.extend_from_slice(b"Exif\0\0");
    bytes.extend_from_slice(&tiff);
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes
}

pub fn rgb_png(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbImage::new(width, height);
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, image::ImageFormat::Png)
        .expect("codificación PNG");
    cursor.into_inner()
}

pub fn png_with_text(chunks: &[(&str, &str)]) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, 2, 2);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        for (keyword, text) in chunks {
            encoder
                .add_text_chunk(keyword.to_string(), text.to_string())
                .expect("fragmento tEXt");
        }
        let mut writer = encoder.write_header().expect("cabecera PNG");
        writer.write_image_data(&[0_u8; 12]).expect("datos PNG");
        writer.finish().expect("cierre PNG");
    }
    bytes
}

pub fn xmp_packet(title: &str, author: &str, tool: &str) -> String {
    format!(
        r#"<?xpacket begin="" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/">
  <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
    <rdf:Description rdf:about=""
        xmlns:dc="http://purl.org/dc/elements/1.1/"
        xmlns:xmp="http://ns.adobe.com/xap/1.0/">
      <dc:title><rdf:Alt><rdf:li xml:lang="x-default">{title}</rdf:li></rdf:Alt></dc:title>
      <dc:creator><rdf:Seq><rdf:li>{author}</rdf:li></rdf:Seq></dc:creator>
      <xmp:CreatorTool>{tool}</xmp:CreatorTool>
    </rdf:Description>
  </rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#
    )
}

pub struct PdfFixture {
    pages: usize,
    info: Vec<(String, String)>,
    xmp: Option<String>,
}

impl PdfFixture {
    pub fn new(pages: usize) -> Self {
        Self {
            pages,
            info: Vec::new(),
            xmp: None,
        }
    }

    pub fn info(mut self, key: &str, value: &str) -> Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    pub fn xmp(mut self, packet: &str) -> Self {
        self.xmp = Some(packet.to_string());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut page_ids: Vec<Object> = Vec::new();
        for _ in 0..self.pages {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            page_ids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => self.pages as i64,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };
        if let Some(packet) = &self.xmp {
            let stream = Stream::new(
                dictionary! {
                    "Type" => "Metadata",
                    "Subtype" => "XML",
                },
                packet.as_bytes().to_vec(),
            );
            let metadata_id = doc.add_object(stream);
            catalog.set("Metadata", metadata_id);
        }
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", catalog_id);

        if !self.info.is_empty() {
            let mut info = Dictionary::new();
            for (key, value) in &self.info {
                info.set(key.as_bytes().to_vec(), Object::string_literal(value.as_str()));
            }
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("guardado PDF");
        bytes
    }
}
