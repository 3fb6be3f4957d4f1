//! Assembles pages into a complete PDF 1.4 file.

use super::object::{encode_text, Dictionary, Object, ObjectSerializer};
use crate::metrics::Font;
use chrono::{DateTime, Utc};

const CATALOG_ID: u32 = 1;
const PAGES_ID: u32 = 2;
const FIRST_FONT_ID: u32 = 3;
const INFO_ID: u32 = FIRST_FONT_ID + Font::ALL.len() as u32;
const FIRST_PAGE_ID: u32 = INFO_ID + 1;

/// Document information dictionary contents.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    /// Written as `/CreationDate`. Callers pass the report's own timestamp
    /// rather than the wall clock.
    pub created: DateTime<Utc>,
}

#[derive(Debug)]
struct PendingPage {
    width: f64,
    height: f64,
    content: Vec<u8>,
}

/// Collects page content streams and writes the final document.
#[derive(Debug, Default)]
pub struct PdfWriter {
    pages: Vec<PendingPage>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&mut self, width: f64, height: f64, content: Vec<u8>) {
        self.pages.push(PendingPage {
            width,
            height,
            content,
        });
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_id(index: usize) -> u32 {
        FIRST_PAGE_ID + 2 * index as u32
    }

    fn objects(&self, info: &DocumentInfo) -> Vec<Object> {
        let kids = (0..self.pages.len())
            .map(|index| Object::Reference(Self::page_id(index)))
            .collect();

        let mut objects = vec![
            Dictionary::typed("Catalog")
                .with("Pages", Object::Reference(PAGES_ID))
                .into(),
            Dictionary::typed("Pages")
                .with("Kids", Object::Array(kids))
                .with("Count", Object::Integer(self.pages.len() as i64))
                .into(),
        ];

        for font in Font::ALL {
            objects.push(
                Dictionary::typed("Font")
                    .with("Subtype", Object::Name("Type1"))
                    .with("BaseFont", Object::Name(font.base_font()))
                    .with("Encoding", Object::Name("WinAnsiEncoding"))
                    .into(),
            );
        }

        objects.push(
            Dictionary::new()
                .with("Title", Object::String(encode_text(&info.title)))
                .with("Author", Object::String(encode_text(&info.author)))
                .with("Producer", Object::String(b"ar-report".to_vec()))
                .with(
                    "CreationDate",
                    Object::String(
                        info.created
                            .format("D:%Y%m%d%H%M%SZ")
                            .to_string()
                            .into_bytes(),
                    ),
                )
                .into(),
        );

        let fonts = Font::ALL
            .iter()
            .enumerate()
            .fold(Dictionary::new(), |dict, (index, font)| {
                dict.with(
                    font.resource_name(),
                    Object::Reference(FIRST_FONT_ID + index as u32),
                )
            });
        let resources = Dictionary::new().with("Font", fonts.into());

        for (index, page) in self.pages.iter().enumerate() {
            let page_id = Self::page_id(index);
            objects.push(
                Dictionary::typed("Page")
                    .with("Parent", Object::Reference(PAGES_ID))
                    .with(
                        "MediaBox",
                        Object::Array(vec![
                            Object::Integer(0),
                            Object::Integer(0),
                            Object::Real(page.width),
                            Object::Real(page.height),
                        ]),
                    )
                    .with("Resources", resources.clone().into())
                    .with("Contents", Object::Reference(page_id + 1))
                    .into(),
            );
            objects.push(Object::Stream(Dictionary::new(), page.content.clone()));
        }
        objects
    }

    /// Serialize the document. Objects are numbered in a fixed order and no
    /// `/ID` is written, so equal input gives equal bytes.
    pub fn finish(self, info: &DocumentInfo) -> Vec<u8> {
        let serializer = ObjectSerializer::new();
        let objects = self.objects(info);

        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for (index, object) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
            serializer.write(object, &mut out);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }

        let trailer = Dictionary::new()
            .with("Size", Object::Integer(objects.len() as i64 + 1))
            .with("Root", Object::Reference(CATALOG_ID))
            .with("Info", Object::Reference(INFO_ID));
        out.extend_from_slice(b"trailer\n");
        serializer.write(&trailer.into(), &mut out);
        out.extend_from_slice(format!("\nstartxref\n{xref}\n%%EOF\n").as_bytes());
        out
    }
}
