//! Text-only PDF documents built on `lopdf`.
//!
//! The composer places `TextRun`s on `PdfPage`s; `to_bytes` turns them into a
//! page tree with the two base-14 fonts (`/F1`, `/F2`) shared as inherited
//! resources. Coordinates are PDF user space: points, origin at the
//! bottom-left corner.

use anyhow::anyhow;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::layout::font_metrics::{win_ansi_byte, FontFace};

const PDF_VERSION: &str = "1.4";
const FACES: [FontFace; 2] = [FontFace::Helvetica, FontFace::HelveticaBold];

/// A single line of text placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x_pt: f32,
    /// Baseline position, measured from the bottom edge.
    pub y_pt: f32,
    pub face: FontFace,
    pub size_pt: f32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct PdfPage {
    pub width_pt: f32,
    pub height_pt: f32,
    runs: Vec<TextRun>,
}

impl PdfPage {
    pub fn new(width_pt: f32, height_pt: f32) -> Self {
        Self {
            width_pt,
            height_pt,
            runs: Vec::new(),
        }
    }

    pub fn push_text(&mut self, x_pt: f32, y_pt: f32, face: FontFace, size_pt: f32, text: &str) {
        self.runs.push(TextRun {
            x_pt,
            y_pt,
            face,
            size_pt,
            text: text.to_string(),
        });
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// One `BT … ET` block per run.
    fn content(&self) -> Content {
        let mut operations = Vec::with_capacity(self.runs.len() * 5);
        for run in &self.runs {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![run.face.resource_name().into(), Object::Real(run.size_pt)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Real(run.x_pt), Object::Real(run.y_pt)],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(encode_text(&run.text), StringFormat::Literal)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        Content { operations }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PdfDocument {
    pages: Vec<PdfPage>,
}

impl PdfDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&mut self, page: PdfPage) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[PdfPage] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serializes the document with compressed content streams.
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for face in FACES {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let data = page
                .content()
                .encode()
                .map_err(|e| anyhow!("Failed to encode page content: {e}"))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, data));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(page.width_pt),
                    Object::Real(page.height_pt),
                ],
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.pages.len() as i64,
                "Resources" => resources_id,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut out = Vec::new();
        doc.save_to(&mut out)
            .map_err(|e| anyhow!("Failed to serialize PDF: {e}"))?;
        Ok(out)
    }
}

/// Encodes `text` as WinAnsiEncoding bytes, the form drawn by `Tj`.
///
/// Characters with no WinAnsi glyph become `?`, matching how they are measured.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn one_page_doc(text: &str) -> PdfDocument {
        let mut page = PdfPage::new(595.28, 841.89);
        page.push_text(42.52, 800.0, FontFace::Helvetica, 12.0, text);
        let mut doc = PdfDocument::new();
        doc.add_page(page);
        doc
    }

    /// Parses the serialized bytes and returns the decoded operations of each page.
    fn reload(doc: &PdfDocument) -> (Document, Vec<Vec<Operation>>) {
        let bytes = doc.to_bytes().unwrap();
        let loaded = Document::load_mem(&bytes).unwrap();
        let pages = loaded
            .get_pages()
            .values()
            .map(|id| {
                let data = loaded.get_page_content(*id).unwrap();
                Content::decode(&data).unwrap().operations
            })
            .collect();
        (loaded, pages)
    }

    fn shown_strings(ops: &[Operation]) -> Vec<Vec<u8>> {
        ops.iter()
            .filter(|op| op.operator == "Tj")
            .map(|op| op.operands[0].as_str().unwrap().to_vec())
            .collect()
    }

    #[test]
    fn test_encode_text_ascii_passthrough() {
        assert_eq!(encode_text(r"a (b) c\d"), br"a (b) c\d".to_vec());
    }

    #[test]
    fn test_encode_text_win_ansi_bytes() {
        assert_eq!(encode_text("café"), b"caf\xE9".to_vec());
        assert_eq!(encode_text("’—"), vec![0x92, 0x97]);
    }

    #[test]
    fn test_encode_text_unmapped_becomes_question_mark() {
        assert_eq!(encode_text("新闻"), b"??".to_vec());
    }

    #[test]
    fn test_document_has_header_and_fonts() {
        let bytes = one_page_doc("hello").to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));

        let loaded = Document::load_mem(&bytes).unwrap();
        let base_fonts: Vec<Vec<u8>> = loaded
            .objects
            .values()
            .filter_map(|obj| obj.as_dict().ok())
            .filter_map(|dict| dict.get(b"BaseFont").ok())
            .map(|name| name.as_name().unwrap().to_vec())
            .collect();
        assert!(base_fonts.contains(&b"Helvetica".to_vec()));
        assert!(base_fonts.contains(&b"Helvetica-Bold".to_vec()));
    }

    #[test]
    fn test_text_runs_round_trip_through_content_stream() {
        let (_, pages) = reload(&one_page_doc("a (tricky) \\ line"));
        assert_eq!(pages.len(), 1);
        assert_eq!(shown_strings(&pages[0]), vec![b"a (tricky) \\ line".to_vec()]);

        let tf = pages[0].iter().find(|op| op.operator == "Tf").unwrap();
        assert_eq!(tf.operands[0].as_name().unwrap(), b"F1");
    }

    #[test]
    fn test_page_tree_lists_every_page() {
        let mut doc = PdfDocument::new();
        let mut first = PdfPage::new(100.0, 100.0);
        first.push_text(10.0, 50.0, FontFace::HelveticaBold, 14.0, "one");
        let mut second = PdfPage::new(100.0, 100.0);
        second.push_text(10.0, 50.0, FontFace::Helvetica, 12.0, "two");
        doc.add_page(first);
        doc.add_page(second);
        assert_eq!(doc.page_count(), 2);

        let (loaded, pages) = reload(&doc);
        assert_eq!(loaded.get_pages().len(), 2);
        assert_eq!(shown_strings(&pages[0]), vec![b"one".to_vec()]);
        assert_eq!(shown_strings(&pages[1]), vec![b"two".to_vec()]);
    }
}
