//! PDF serialization of laid-out documents.
//!
//! Each page becomes one content stream drawing its lines with the base-14
//! Courier face at the fixed layout metrics. The renderer never re-measures
//! or re-wraps text: line and page boundaries are exactly what the layout
//! produced, so page count, line order, and text content survive the
//! round trip to any PDF viewer.

use crate::error::Result;
use crate::layout::{FontMetrics, PageGeometry};
use crate::model::{Document, Metadata};
use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document as PdfDocument, Object, Stream, StringFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialize a laid-out document into PDF bytes.
pub fn to_pdf(doc: &Document, geometry: &PageGeometry, metrics: &FontMetrics) -> Result<Vec<u8>> {
    let mut pdf = PdfDocument::with_version("1.5");

    let pages_id = pdf.new_object_id();
    let font_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        // First baseline sits one glyph height below the top margin.
        let origin_y = page.height - geometry.margin - metrics.size;

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), metrics.size.into()]),
            Operation::new("TL", vec![metrics.leading.into()]),
            Operation::new("Td", vec![geometry.margin.into(), origin_y.into()]),
        ];
        for line in &page.lines {
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(encode_winansi(line), StringFormat::Literal)],
            ));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                page.width.into(),
                page.height.into(),
            ],
        });
        kids.push(page_id.into());
    }

    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => doc.pages.len() as i64,
            "Resources" => resources_id,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let info_id = pdf.add_object(info_dictionary(&doc.metadata));
    pdf.trailer.set("Info", info_id);

    pdf.compress();

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)?;
    debug!(
        "serialized {} pages into {} PDF bytes",
        doc.pages.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Serialize a laid-out document and write it to `path`.
pub fn write_pdf<P: AsRef<Path>>(
    doc: &Document,
    geometry: &PageGeometry,
    metrics: &FontMetrics,
    path: P,
) -> Result<()> {
    let bytes = to_pdf(doc, geometry, metrics)?;
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

fn info_dictionary(metadata: &Metadata) -> Dictionary {
    let mut info = Dictionary::new();
    if let Some(ref title) = metadata.title {
        info.set("Title", Object::string_literal(title.clone()));
    }
    if let Some(ref producer) = metadata.producer {
        info.set("Producer", Object::string_literal(producer.clone()));
    }
    if let Some(created) = metadata.created {
        let stamp = format!("D:{}Z", created.format("%Y%m%d%H%M%S"));
        info.set("CreationDate", Object::string_literal(stamp));
    }
    info
}

/// Encode a text line for a WinAnsiEncoding content stream.
///
/// The document model keeps payload text exactly; this encoding is only the
/// glyph stream. Characters outside Latin-1 have no WinAnsi code point and
/// render as `?` (glyph fidelity is not part of the output contract).
fn encode_winansi(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::paginate;

    fn render(text: &str) -> (Document, Vec<u8>) {
        let geometry = PageGeometry::default();
        let metrics = FontMetrics::default();
        let mut doc = Document::new();
        doc.metadata = Metadata::with_title("test");
        doc.pages = paginate(text, &geometry, &metrics);
        doc.metadata.page_count = doc.page_count();
        let bytes = to_pdf(&doc, &geometry, &metrics).unwrap();
        (doc, bytes)
    }

    #[test]
    fn test_pdf_header_and_trailer() {
        let (_, bytes) = render("hello");
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
    }

    #[test]
    fn test_pdf_round_trips_through_lopdf() {
        let (doc, bytes) = render("alpha\nbeta\ngamma");
        let parsed = PdfDocument::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), doc.pages.len());
    }

    #[test]
    fn test_pdf_page_count_matches_layout() {
        // 61 lines on a 60-line page -> 2 PDF pages.
        let text: Vec<String> = (0..61).map(|i| format!("line {i}")).collect();
        let (doc, bytes) = render(&text.join("\n"));
        assert_eq!(doc.pages.len(), 2);

        let parsed = PdfDocument::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 2);
    }

    #[test]
    fn test_empty_document_still_has_one_page() {
        let (doc, bytes) = render("");
        assert_eq!(doc.pages.len(), 1);

        let parsed = PdfDocument::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[test]
    fn test_encode_winansi() {
        assert_eq!(encode_winansi("abc"), b"abc".to_vec());
        assert_eq!(encode_winansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        // Outside Latin-1: replaced in the glyph stream only.
        assert_eq!(encode_winansi("a\u{0131}b"), vec![b'a', b'?', b'b']);
    }
}
