//! Axum route handler for the Analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::pipeline::{run_analysis, AnalysisOutcome};
use crate::classifier::ModelSelection;
use crate::errors::AppError;
use crate::state::AppState;

fn default_model() -> String {
    "BERT".to_string()
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    /// A model name (`BERT`, `RoBERTa`, `DistilBERT`, `XLNet`) or `all`.
    #[serde(default = "default_model")]
    pub model: String,
}

/// POST /api/v1/analyze
///
/// Classifies the article, explains the verdict and gathers web proof.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let selection: ModelSelection = request.model.parse()?;
    let outcome = run_analysis(&state, &request.text, selection).await?;
    Ok(Json(outcome))
}
