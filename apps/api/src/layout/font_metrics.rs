//! Static font-metric tables for the two PDF base-14 faces used by report export.
//!
//! Widths are the Adobe core-font AFM advance widths, in 1/1000 em. The base-14
//! faces are never embedded, so the viewer renders with the same metrics and the
//! layout engine's measurements match the rendered output.
//!
//! Tables are indexed by WinAnsiEncoding byte, covering 0x20..=0xFF.
//! Index = byte - 32. Characters are measured as the byte they are drawn as,
//! so anything outside WinAnsi counts as `?`.

use serde::{Deserialize, Serialize};

/// Points per millimetre.
pub const MM_TO_PT: f32 = 72.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Font face enum
// ────────────────────────────────────────────────────────────────────────────

/// The faces available to the PDF writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    /// Body text.
    Helvetica,
    /// Headings and the prediction line.
    HelveticaBold,
}

impl FontFace {
    /// The PostScript name written into the font dictionary.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used inside page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Page geometry and typography for exported reports. All lengths in points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_left_pt: f32,
    pub margin_right_pt: f32,
    pub margin_top_pt: f32,
    /// Rows whose baseline box would cross this margin move to a new page.
    pub margin_bottom_pt: f32,
    /// Vertical advance per rendered row.
    pub row_height_pt: f32,
    /// Vertical gap between report sections.
    pub section_gap_pt: f32,
    pub body_font_size_pt: f32,
    pub heading_font_size_pt: f32,
}

impl PageConfig {
    /// Printable width between the side margins; the layout width for body text.
    pub fn text_width_pt(&self) -> f32 {
        self.page_width_pt - self.margin_left_pt - self.margin_right_pt
    }
}

/// Returns the default page config.
///
/// A4 portrait, 15 mm side margins, 10 mm top margin, 20 mm bottom margin,
/// 8 mm rows, 12 pt body and 14 pt headings.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_pt: 595.28,
        page_height_pt: 841.89,
        margin_left_pt: 15.0 * MM_TO_PT,
        margin_right_pt: 15.0 * MM_TO_PT,
        margin_top_pt: 10.0 * MM_TO_PT,
        margin_bottom_pt: 20.0 * MM_TO_PT,
        row_height_pt: 8.0 * MM_TO_PT,
        section_gap_pt: 4.0 * MM_TO_PT,
        body_font_size_pt: 12.0,
        heading_font_size_pt: 14.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font face.
///
/// `widths[i]` = advance of WinAnsi byte `(i + 32)` in 1/1000 em.
pub struct FontMetricTable {
    widths: [u16; 224],
}

impl FontMetricTable {
    /// Advance of a single WinAnsi byte in 1/1000 em.
    pub fn byte_width(&self, byte: u8) -> u16 {
        let byte = if byte < 0x20 { b'?' } else { byte };
        self.widths[usize::from(byte - 0x20)]
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        let units: u32 = s
            .chars()
            .map(|c| u32::from(self.byte_width(win_ansi_byte(c))))
            .sum();
        units as f32 / 1000.0
    }

    /// Rendered width of `s` in points at `size_pt`.
    pub fn width_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }
}

/// The WinAnsiEncoding byte a character is drawn as.
///
/// Tabs render as spaces; characters with no WinAnsi glyph render as `?`.
pub fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        ' '..='~' | '\u{A0}'..='\u{FF}' => ch as u8,
        '\t' => b' ',
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
        // DEL  0x80 .. 0x8F
        350,
        556, 350, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
        // 0x90 .. 0x9F
        350, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 350, 500, 667,
        // 0xA0 .. 0xAF
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // 0xB0 .. 0xBF
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // 0xC0 .. 0xCF
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // 0xD0 .. 0xDF
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // 0xE0 .. 0xEF
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
        // 0xF0 .. 0xFF
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
    ],
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
        // DEL  0x80 .. 0x8F
        350,
        556, 350, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
        // 0x90 .. 0x9F
        350, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 350, 500, 667,
        // 0xA0 .. 0xAF
        278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // 0xB0 .. 0xBF
        400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // 0xC0 .. 0xCF
        722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // 0xD0 .. 0xDF
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // 0xE0 .. 0xEF
        556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
        // 0xF0 .. 0xFF
        611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
    ],
};

/// Returns the static metric table for a given face.
pub fn get_metrics(face: &FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(&FontFace::Helvetica);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_single_space() {
        let metrics = get_metrics(&FontFace::Helvetica);
        let width = metrics.measure_str(" ");
        assert!((width - 0.278).abs() < 1e-4, "space width should be 0.278, got {width}");
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(&FontFace::Helvetica);
        // "Fake" = F(611) + a(556) + k(500) + e(556) = 2223
        let width = metrics.measure_str("Fake");
        assert!((width - 2.223).abs() < 1e-3, "Fake width should be ~2.223, got {width}");
    }

    #[test]
    fn test_measure_str_win_ansi_glyphs() {
        let metrics = get_metrics(&FontFace::Helvetica);
        assert!((metrics.measure_str("—") - 1.0).abs() < 1e-4);
        assert!((metrics.measure_str("…") - 1.0).abs() < 1e-4);
        assert!((metrics.measure_str("Æ") - 1.0).abs() < 1e-4);
        assert!((metrics.measure_str("©") - 0.737).abs() < 1e-4);
        assert!((metrics.measure_str("é") - 0.556).abs() < 1e-4);
    }

    #[test]
    fn test_unmapped_chars_measure_as_question_mark() {
        let metrics = get_metrics(&FontFace::HelveticaBold);
        assert_eq!(metrics.measure_str("新"), metrics.measure_str("?"));
        assert_eq!(metrics.measure_str("\r"), metrics.measure_str("?"));
        assert_eq!(metrics.measure_str("\t"), metrics.measure_str(" "));
    }

    #[test]
    fn test_win_ansi_byte_mapping() {
        assert_eq!(win_ansi_byte('a'), b'a');
        assert_eq!(win_ansi_byte('é'), 0xE9);
        assert_eq!(win_ansi_byte('’'), 0x92);
        assert_eq!(win_ansi_byte('€'), 0x80);
        assert_eq!(win_ansi_byte('新'), b'?');
    }

    #[test]
    fn test_width_pt_scales_with_size() {
        let metrics = get_metrics(&FontFace::Helvetica);
        let at_12 = metrics.width_pt("Real", 12.0);
        let at_24 = metrics.width_pt("Real", 24.0);
        assert!((at_24 - 2.0 * at_12).abs() < 1e-3);
    }

    #[test]
    fn test_bold_wider_than_regular() {
        let text = "Prediction: Real";
        let regular = get_metrics(&FontFace::Helvetica).measure_str(text);
        let bold = get_metrics(&FontFace::HelveticaBold).measure_str(text);
        assert!(bold > regular, "bold {bold} should exceed regular {regular}");
    }

    #[test]
    fn test_font_face_names() {
        assert_eq!(FontFace::Helvetica.base_font(), "Helvetica");
        assert_eq!(FontFace::HelveticaBold.base_font(), "Helvetica-Bold");
        assert_ne!(
            FontFace::Helvetica.resource_name(),
            FontFace::HelveticaBold.resource_name()
        );
    }

    #[test]
    fn test_default_page_config_sanity() {
        let config = default_page_config();
        // A4 minus 2 × 15 mm ≈ 510 pt.
        let width = config.text_width_pt();
        assert!(width > 505.0 && width < 515.0, "text width {width}");
        assert!((config.row_height_pt - 22.68).abs() < 0.01);
        assert_eq!(config.body_font_size_pt, 12.0);
    }
}
