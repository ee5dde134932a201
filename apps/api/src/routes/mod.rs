pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::ingest::handlers as ingest;
use crate::layout::handlers as layout;
use crate::news::handlers as news;
use crate::render::handlers as export;
use crate::state::AppState;

/// Largest accepted PDF upload.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Article input
        .route("/api/v1/news", get(news::handle_news))
        .route(
            "/api/v1/articles/extract",
            post(ingest::handle_extract).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Analysis
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        // Layout + export
        .route("/api/v1/layout", post(layout::handle_layout))
        .route("/api/v1/export/pdf", post(export::handle_export_pdf))
        .route("/api/v1/export/json", post(export::handle_export_json))
        .route("/api/v1/export/bundle", post(export::handle_export_bundle))
        .with_state(state)
}
