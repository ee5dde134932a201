//! Report composer: lays out an `AnalysisReport` onto paginated PDF pages.
//!
//! Section order: article, prediction, explanation, web proof. Every block of
//! text goes through the layout engine at the page's printable width, so no
//! rendered row overflows the right margin.

use tracing::debug;

use crate::errors::AppError;
use crate::layout::font_metrics::{get_metrics, FontFace, PageConfig};
use crate::layout::wrap::layout_with_metrics;
use crate::models::report::{AnalysisReport, ProofLink};
use crate::render::pdf::{PdfDocument, PdfPage};

/// Fraction of the font size between the row's vertical centre and the baseline.
const BASELINE_SHIFT: f32 = 0.3;

/// Builds the document row by row, starting a new page at the bottom margin.
struct Composer<'a> {
    config: &'a PageConfig,
    doc: PdfDocument,
    page: PdfPage,
    /// Top edge of the next row, in PDF coordinates.
    cursor_y: f32,
}

impl<'a> Composer<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            doc: PdfDocument::new(),
            page: PdfPage::new(config.page_width_pt, config.page_height_pt),
            cursor_y: config.page_height_pt - config.margin_top_pt,
        }
    }

    fn new_page(&mut self) {
        let finished = std::mem::replace(
            &mut self.page,
            PdfPage::new(self.config.page_width_pt, self.config.page_height_pt),
        );
        self.doc.add_page(finished);
        self.cursor_y = self.config.page_height_pt - self.config.margin_top_pt;
    }

    fn row(&mut self, face: FontFace, size_pt: f32, text: &str) {
        let row_height = self.config.row_height_pt;
        if self.cursor_y - row_height < self.config.margin_bottom_pt {
            self.new_page();
        }
        let baseline = self.cursor_y - row_height / 2.0 - BASELINE_SHIFT * size_pt;
        self.page
            .push_text(self.config.margin_left_pt, baseline, face, size_pt, text);
        self.cursor_y -= row_height;
    }

    fn block(&mut self, face: FontFace, size_pt: f32, text: &str) -> Result<(), AppError> {
        let metrics = get_metrics(&face);
        let lines = layout_with_metrics(text, metrics, size_pt, self.config.text_width_pt())?;
        for line in &lines {
            self.row(face, size_pt, line);
        }
        Ok(())
    }

    fn gap(&mut self) {
        self.cursor_y -= self.config.section_gap_pt;
    }

    fn finish(mut self) -> PdfDocument {
        self.new_page();
        self.doc
    }
}

/// Text of a web-proof row. Slashes gain a trailing space so long URLs can wrap
/// at path boundaries instead of being force-split mid-segment.
pub fn proof_line(item: &ProofLink) -> String {
    format!("- {}: {}", item.display_title(), item.link.replace('/', "/ "))
}

/// Prediction summary row, e.g. `Prediction: Fake (87.5%)`.
pub fn prediction_line(report: &AnalysisReport) -> String {
    format!("Prediction: {} ({}%)", report.prediction, report.confidence)
}

/// Lays out the report into an in-memory document.
pub fn compose(report: &AnalysisReport, config: &PageConfig) -> Result<PdfDocument, AppError> {
    let body = config.body_font_size_pt;
    let mut composer = Composer::new(config);

    composer.block(FontFace::HelveticaBold, config.heading_font_size_pt, "News Article:")?;
    composer.block(FontFace::Helvetica, body, &report.news)?;
    composer.gap();

    composer.block(FontFace::HelveticaBold, body, &prediction_line(report))?;
    composer.gap();

    composer.block(FontFace::HelveticaBold, body, "Explanation:")?;
    composer.block(FontFace::Helvetica, body, &report.explanation)?;
    composer.gap();

    if !report.proof_links.is_empty() {
        composer.block(FontFace::HelveticaBold, body, "Web Proof:")?;
        for item in &report.proof_links {
            composer.block(FontFace::Helvetica, body, &proof_line(item))?;
        }
    }

    let doc = composer.finish();
    debug!(pages = doc.page_count(), "Report composed");
    Ok(doc)
}

/// Lays out and serializes the report as PDF bytes.
pub fn render_pdf(report: &AnalysisReport, config: &PageConfig) -> Result<Vec<u8>, AppError> {
    Ok(compose(report, config)?.to_bytes()?)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
