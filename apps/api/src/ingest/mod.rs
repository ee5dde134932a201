//! Article ingest from uploaded PDF files.

pub mod handlers;

use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extracts the plain text of a PDF article.
///
/// CPU-bound: handlers call this inside `spawn_blocking`.
pub fn extract_article_text(pdf: &Bytes) -> Result<String, AppError> {
    if !pdf.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(
            "Uploaded file is not a PDF document".to_string(),
        ));
    }

    let raw = pdf_extract::extract_text_from_mem(pdf)
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;
    let text = normalize_extracted(&raw);

    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "PDF contains no extractable text".to_string(),
        ));
    }

    info!(bytes = pdf.len(), chars = text.len(), "Article text extracted");
    Ok(text)
}

/// Trims each line and collapses runs of blank lines into one paragraph break.
fn normalize_extracted(raw: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs.join("\n")
}
