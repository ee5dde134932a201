//! Axum route handler for article uploads.

use axum::{extract::Multipart, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::ingest::extract_article_text;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// POST /api/v1/articles/extract
///
/// Accepts a multipart upload with a `file` field holding a PDF article.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let text = tokio::task::spawn_blocking(move || extract_article_text(&data))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extract: {e}")))??;

        return Ok(Json(ExtractResponse { text }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}
