//! Axum route handler for the News API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::news::{DEFAULT_CATEGORY, DEFAULT_COUNTRY, DEFAULT_MAX_ARTICLES};
use crate::state::AppState;

/// Upper bound on `max`; NewsAPI pages hold at most 100 articles.
const MAX_ARTICLES_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub country: Option<String>,
    pub category: Option<String>,
    pub max: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HeadlinesResponse {
    pub headlines: Vec<String>,
}

/// GET /api/v1/news
///
/// Latest headlines for the live-news input mode.
pub async fn handle_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<HeadlinesResponse>, AppError> {
    let country = query.country.as_deref().unwrap_or(DEFAULT_COUNTRY);
    let category = query.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
    let max = query.max.unwrap_or(DEFAULT_MAX_ARTICLES);
    if max == 0 || max > MAX_ARTICLES_LIMIT {
        return Err(AppError::Validation(format!(
            "max must be between 1 and {MAX_ARTICLES_LIMIT}"
        )));
    }

    let headlines = state
        .news
        .top_headlines(country, category, max)
        .await
        .map_err(|e| {
            warn!(country, category, "Failed to fetch news: {e}");
            AppError::upstream("News", e)
        })?;

    Ok(Json(HeadlinesResponse { headlines }))
}
