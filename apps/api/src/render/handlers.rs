//! Axum route handlers for the Export API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::models::report::AnalysisReport;
use crate::render::bundle::{write_bundle, BundlePaths, JSON_FILE_NAME, PDF_FILE_NAME};
use crate::render::json::to_pretty_json;
use crate::render::report::render_pdf;
use crate::state::AppState;

fn attachment(content_type: &'static str, file_name: &str, body: Bytes) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

fn validate(report: &AnalysisReport) -> Result<(), AppError> {
    if !(0.0..=100.0).contains(&report.confidence) {
        return Err(AppError::Validation(format!(
            "confidence must be between 0 and 100, got {}",
            report.confidence
        )));
    }
    Ok(())
}

/// POST /api/v1/export/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(report): Json<AnalysisReport>,
) -> Result<Response, AppError> {
    validate(&report)?;
    let config = state.page_config.clone();
    let pdf = tokio::task::spawn_blocking(move || render_pdf(&report, &config))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF export: {e}")))??;

    Ok(attachment("application/pdf", PDF_FILE_NAME, Bytes::from(pdf)))
}

/// POST /api/v1/export/json
pub async fn handle_export_json(Json(report): Json<AnalysisReport>) -> Result<Response, AppError> {
    validate(&report)?;
    let json = to_pretty_json(&report)?;
    Ok(attachment("application/json", JSON_FILE_NAME, Bytes::from(json)))
}

/// POST /api/v1/export/bundle
///
/// Writes `result.pdf` and `result.json` into the configured export directory.
pub async fn handle_export_bundle(
    State(state): State<AppState>,
    Json(report): Json<AnalysisReport>,
) -> Result<Json<BundlePaths>, AppError> {
    validate(&report)?;
    let dir = state.config.export_dir.clone();
    let config = state.page_config.clone();
    let paths = tokio::task::spawn_blocking(move || write_bundle(&dir, &report, &config))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in bundle export: {e}")))??;

    Ok(Json(paths))
}
