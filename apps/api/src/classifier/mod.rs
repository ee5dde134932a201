//! Real/Fake classification, delegated to pretrained transformer models served
//! by an inference server.
//!
//! The `Classifier` trait is carried in `AppState` as `Arc<dyn Classifier>` so the
//! backend can be swapped (or stubbed in tests) without touching handlers.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// The pretrained sequence-classification models offered for prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    #[serde(rename = "BERT")]
    Bert,
    #[serde(rename = "RoBERTa")]
    Roberta,
    #[serde(rename = "DistilBERT")]
    DistilBert,
    #[serde(rename = "XLNet")]
    XlNet,
}

impl ModelKind {
    /// Comparison order.
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Bert,
        ModelKind::Roberta,
        ModelKind::DistilBert,
        ModelKind::XlNet,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Bert => "BERT",
            ModelKind::Roberta => "RoBERTa",
            ModelKind::DistilBert => "DistilBERT",
            ModelKind::XlNet => "XLNet",
        }
    }

    /// Pretrained checkpoint id on the model hub.
    pub fn hub_id(self) -> &'static str {
        match self {
            ModelKind::Bert => "bert-base-uncased",
            ModelKind::Roberta => "roberta-base",
            ModelKind::DistilBert => "distilbert-base-uncased",
            ModelKind::XlNet => "xlnet-base-cased",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ModelKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::ALL
            .into_iter()
            .find(|m| m.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::Validation(format!("Unknown model: {s}")))
    }
}

/// Which models an analysis runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSelection {
    Single(ModelKind),
    /// Every model, compared side by side.
    All,
}

impl FromStr for ModelSelection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("All (Compare)") {
            Ok(ModelSelection::All)
        } else {
            s.parse().map(ModelSelection::Single)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Real,
    Fake,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Real => "Real",
            Verdict::Fake => "Fake",
        }
    }
}

/// Real vs Fake percentages for one prediction; always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSplit {
    pub real: f64,
    pub fake: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub model: ModelKind,
    pub label: Verdict,
    /// Probability of `label` as a percentage, rounded to two decimals.
    pub confidence: f64,
}

impl Prediction {
    pub fn split(&self) -> ConfidenceSplit {
        let real = match self.label {
            Verdict::Real => self.confidence,
            Verdict::Fake => 100.0 - self.confidence,
        };
        ConfidenceSplit {
            real,
            fake: 100.0 - real,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Classifier trait
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str, model: ModelKind) -> Result<Prediction, AppError>;
}

/// Runs every model in comparison order. The first failure aborts the comparison.
pub async fn compare_all(classifier: &dyn Classifier, text: &str) -> Result<Vec<Prediction>, AppError> {
    let mut predictions = Vec::with_capacity(ModelKind::ALL.len());
    for model in ModelKind::ALL {
        predictions.push(classifier.classify(text, model).await?);
    }
    Ok(predictions)
}

pub async fn classify_selection(
    classifier: &dyn Classifier,
    text: &str,
    selection: ModelSelection,
) -> Result<Vec<Prediction>, AppError> {
    match selection {
        ModelSelection::Single(model) => Ok(vec![classifier.classify(text, model).await?]),
        ModelSelection::All => compare_all(classifier, text).await,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HttpClassifier: inference-server backend
// ────────────────────────────────────────────────────────────────────────────

/// Longest input, in tokens, the models accept; longer articles are truncated server-side.
const MAX_INPUT_TOKENS: u32 = 512;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    truncation: bool,
    max_length: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl InferenceResponse {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            InferenceResponse::Nested(mut batches) if !batches.is_empty() => batches.swap_remove(0),
            InferenceResponse::Nested(_) => Vec::new(),
            InferenceResponse::Flat(scores) => scores,
        }
    }
}

/// POSTs `{"inputs": text}` to `{base_url}/models/{hub_id}`.
#[derive(Clone)]
pub struct HttpClassifier {
    client: Client,
    base_url: String,
}

impl HttpClassifier {
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, text: &str, model: ModelKind) -> Result<Prediction, AppError> {
        let url = format!("{}/models/{}", self.base_url, model.hub_id());
        let response = self
            .client
            .post(&url)
            .json(&InferenceRequest {
                inputs: text,
                parameters: InferenceParameters {
                    truncation: true,
                    max_length: MAX_INPUT_TOKENS,
                },
            })
            .send()
            .await
            .map_err(|e| AppError::upstream("Classifier", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                "Classifier",
                format!("{model} returned {status}: {body}"),
            ));
        }

        let body: InferenceResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream("Classifier", e))?;

        let prediction = to_prediction(model, body.into_scores())?;
        debug!(
            model = %model,
            label = prediction.label.as_str(),
            confidence = prediction.confidence,
            "Classification complete"
        );
        Ok(prediction)
    }
}

/// Picks the highest-scoring class. Class 1 is Real; every other class is Fake.
fn to_prediction(model: ModelKind, scores: Vec<LabelScore>) -> Result<Prediction, AppError> {
    let best = scores
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| AppError::upstream("Classifier", format!("{model} returned no scores")))?;

    Ok(Prediction {
        model,
        label: label_to_verdict(&best.label),
        confidence: round2(best.score * 100.0),
    })
}

fn label_to_verdict(label: &str) -> Verdict {
    match label.trim().to_ascii_uppercase().as_str() {
        "LABEL_1" | "1" | "REAL" | "TRUE" => Verdict::Real,
        _ => Verdict::Fake,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
