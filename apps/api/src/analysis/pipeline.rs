//! Analysis pipeline.
//!
//! 1. Classify with the selected model(s). Failure here fails the analysis.
//! 2. Concurrently: ask the LLM for an explanation and search the web for the
//!    article's first sentence.
//! 3. A failed explanation becomes an inline failure message; a failed search
//!    becomes an empty proof list. Both are logged at `warn`.

use serde::Serialize;
use tracing::{info, warn};

use crate::classifier::{classify_selection, ConfidenceSplit, ModelKind, ModelSelection, Prediction, Verdict};
use crate::errors::AppError;
use crate::llm_client::explain_article;
use crate::models::report::{AnalysisReport, ProofLink};
use crate::search::{search_query, DEFAULT_MAX_RESULTS};
use crate::state::AppState;

/// Explanation label used when several models are compared.
pub const MIXED_LABEL: &str = "Mixed";

#[derive(Debug, Clone, Serialize)]
pub struct ModelResult {
    pub model: ModelKind,
    pub label: Verdict,
    pub confidence: f64,
    pub split: ConfidenceSplit,
}

impl From<&Prediction> for ModelResult {
    fn from(p: &Prediction) -> Self {
        Self {
            model: p.model,
            label: p.label,
            confidence: p.confidence,
            split: p.split(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub predictions: Vec<ModelResult>,
    pub explanation: String,
    pub proof_links: Vec<ProofLink>,
    /// Export payload. Only single-model analyses carry a definitive label.
    pub report: Option<AnalysisReport>,
}

/// Label the explanation is asked to justify.
pub fn explanation_label(selection: ModelSelection, predictions: &[Prediction]) -> &'static str {
    match (selection, predictions.first()) {
        (ModelSelection::Single(_), Some(p)) => p.label.as_str(),
        _ => MIXED_LABEL,
    }
}

pub async fn run_analysis(
    state: &AppState,
    text: &str,
    selection: ModelSelection,
) -> Result<AnalysisOutcome, AppError> {
    // Models and services see the trimmed article; the report keeps it as entered.
    let article = text.trim();
    if article.is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let predictions = classify_selection(state.classifier.as_ref(), article, selection).await?;
    let label = explanation_label(selection, &predictions);

    let query = search_query(article);
    let (explanation, proof_links) = tokio::join!(
        explain_article(&state.llm, article, label),
        state.search.search(query, DEFAULT_MAX_RESULTS),
    );

    let explanation = explanation.unwrap_or_else(|e| {
        warn!("Explanation unavailable: {e}");
        format!("Explanation failed: {e}")
    });
    let proof_links = proof_links.unwrap_or_else(|e| {
        warn!("Web verification unavailable: {e}");
        Vec::new()
    });

    info!(
        models = predictions.len(),
        label,
        proof_links = proof_links.len(),
        "Analysis complete"
    );

    let report = match selection {
        ModelSelection::Single(_) => predictions.first().map(|p| AnalysisReport {
            news: text.to_string(),
            prediction: p.label.as_str().to_string(),
            confidence: p.confidence,
            explanation: explanation.clone(),
            proof_links: proof_links.clone(),
        }),
        ModelSelection::All => None,
    };

    Ok(AnalysisOutcome {
        predictions: predictions.iter().map(ModelResult::from).collect(),
        explanation,
        proof_links,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{test_state, StubClassifier};

    #[test]
    fn test_explanation_label_single_uses_prediction() {
        let p = Prediction {
            model: ModelKind::Bert,
            label: Verdict::Fake,
            confidence: 60.0,
        };
        assert_eq!(
            explanation_label(ModelSelection::Single(ModelKind::Bert), &[p]),
            "Fake"
        );
    }

    #[test]
    fn test_explanation_label_compare_is_mixed() {
        assert_eq!(explanation_label(ModelSelection::All, &[]), "Mixed");
    }

    #[tokio::test]
    async fn test_run_analysis_rejects_blank_text() {
        let state = test_state(StubClassifier::always(Verdict::Real, 80.0));
        let result = run_analysis(&state, "   ", ModelSelection::All).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_analysis_degrades_when_services_unreachable() {
        let state = test_state(StubClassifier::always(Verdict::Fake, 66.5));
        let outcome = run_analysis(
            &state,
            "Moon made of cheese. Scientists stunned.",
            ModelSelection::Single(ModelKind::Roberta),
        )
        .await
        .unwrap();

        assert_eq!(outcome.predictions.len(), 1);
        assert_eq!(outcome.predictions[0].model, ModelKind::Roberta);
        assert!(outcome.explanation.starts_with("Explanation failed:"));
        assert!(outcome.proof_links.is_empty());

        let report = outcome.report.unwrap();
        assert_eq!(report.prediction, "Fake");
        assert_eq!(report.confidence, 66.5);
        assert_eq!(report.news, "Moon made of cheese. Scientists stunned.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_analysis_compare_has_no_report() {
        let state = test_state(StubClassifier::always(Verdict::Real, 51.0));
        let outcome = run_analysis(&state, "Some headline", ModelSelection::All)
            .await
            .unwrap();
        assert_eq!(outcome.predictions.len(), 4);
        assert!(outcome.report.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_keeps_article_as_entered() {
        let state = test_state(StubClassifier::always(Verdict::Real, 70.0));
        let entered = "\n\nCity opens new library.\n\n";
        let outcome = run_analysis(&state, entered, ModelSelection::Single(ModelKind::Bert))
            .await
            .unwrap();

        assert_eq!(outcome.report.unwrap().news, entered);
    }
}
