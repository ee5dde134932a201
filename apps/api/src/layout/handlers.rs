//! Axum route handler for the Layout API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::layout::wrap::layout_with_metrics;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub text: String,
    /// Line width in points. Defaults to the page's printable width.
    pub max_width: Option<f32>,
    pub font: Option<FontFace>,
    /// Font size in points. Defaults to the body size.
    pub font_size: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub lines: Vec<String>,
    pub max_width: f32,
    pub font: FontFace,
    pub font_size: f32,
}

/// POST /api/v1/layout
///
/// Wraps `text` with the same engine and metrics the PDF export uses.
/// Whole documents can be large, so the wrap runs on the blocking pool.
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    let max_width = request
        .max_width
        .unwrap_or_else(|| state.page_config.text_width_pt());
    let font = request.font.unwrap_or(FontFace::Helvetica);
    let font_size = request
        .font_size
        .unwrap_or(state.page_config.body_font_size_pt);

    if !(font_size.is_finite() && font_size > 0.0) {
        return Err(AppError::Validation(format!(
            "font_size must be positive, got {font_size}"
        )));
    }

    let text = request.text;
    let lines = tokio::task::spawn_blocking(move || {
        layout_with_metrics(&text, get_metrics(&font), font_size, max_width)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))??;

    Ok(Json(LayoutResponse {
        lines,
        max_width,
        font,
        font_size,
    }))
}
