//! Greedy word-wrap with character-level fallback.
//!
//! # Algorithm
//! - Text is split into paragraphs on `'\n'`; each paragraph yields at least one line.
//! - Paragraphs are split into words on `' '` (runs of spaces yield empty words).
//! - Words are appended to an accumulator while `measure(candidate) <= max_width`.
//! - A word that does not fit flushes the accumulator, then is placed character by
//!   character. Every character that would overflow starts a new forced-split line.
//! - The remainder of a forced split stays in the accumulator and may receive the
//!   following words.
//!
//! The engine is pure: it owns no state, calls `measure` once per candidate, and
//! returns a fresh `Vec<String>` per call.

use std::convert::Infallible;

use thiserror::Error;

use crate::layout::font_metrics::FontMetricTable;

/// Paragraph delimiter.
const LINE_BREAK: char = '\n';
/// Word delimiter. Exactly one is re-inserted between joined words.
const WORD_SEPARATOR: char = ' ';

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError<E = Infallible> {
    #[error("Invalid layout width: {0} (must be positive)")]
    InvalidWidth(f32),

    #[error("Measurement failed: {0}")]
    Measure(E),
}

/// Splits `text` into lines no wider than `max_width` according to `measure`.
///
/// A line may only exceed `max_width` when it is a single character that is wider
/// than `max_width` on its own. An empty `text` yields `[""]`.
pub fn layout<F>(text: &str, max_width: f32, mut measure: F) -> Result<Vec<String>, LayoutError>
where
    F: FnMut(&str) -> f32,
{
    try_layout(text, max_width, |s| Ok::<f32, Infallible>(measure(s)))
}

/// Same as [`layout`], with a measurement function that may fail.
///
/// The first measurement error aborts the call and is returned as
/// [`LayoutError::Measure`]; no partial result is produced.
pub fn try_layout<F, E>(
    text: &str,
    max_width: f32,
    mut measure: F,
) -> Result<Vec<String>, LayoutError<E>>
where
    F: FnMut(&str) -> Result<f32, E>,
{
    if max_width.is_nan() || max_width <= 0.0 {
        return Err(LayoutError::InvalidWidth(max_width));
    }

    let mut fits = |s: &str| -> Result<bool, LayoutError<E>> {
        measure(s).map(|w| w <= max_width).map_err(LayoutError::Measure)
    };

    let mut lines = Vec::new();

    for paragraph in text.split(LINE_BREAK) {
        let mut line = String::new();

        for word in paragraph.split(WORD_SEPARATOR) {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line}{WORD_SEPARATOR}{word}")
            };

            if fits(&candidate)? {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }

            // Forced split. The remainder becomes the accumulator.
            let mut sub = String::new();
            for ch in word.chars() {
                sub.push(ch);
                if !fits(&sub)? {
                    sub.pop();
                    if !sub.is_empty() {
                        lines.push(std::mem::take(&mut sub));
                    }
                    sub.push(ch);
                }
            }
            line = sub;
        }

        lines.push(line);
    }

    Ok(lines)
}

/// Lays out `text` for a font from the static metric tables.
///
/// `max_width_pt` and the measured widths are both in points at `font_size_pt`.
pub fn layout_with_metrics(
    text: &str,
    metrics: &FontMetricTable,
    font_size_pt: f32,
    max_width_pt: f32,
) -> Result<Vec<String>, LayoutError> {
    layout(text, max_width_pt, |s| metrics.width_pt(s, font_size_pt))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
