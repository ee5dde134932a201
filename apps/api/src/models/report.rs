use serde::{Deserialize, Serialize};

/// Placeholder shown when a search result carries no title.
pub const NO_TITLE: &str = "[no title]";

/// A search result offered as corroborating (or contradicting) evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofLink {
    pub title: Option<String>,
    pub link: String,
}

impl ProofLink {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(NO_TITLE)
    }
}

/// The export payload. Field names are the JSON keys of the exported file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub news: String,
    /// "Real" or "Fake".
    pub prediction: String,
    /// Winning class probability as a percentage, two decimals.
    pub confidence: f64,
    pub explanation: String,
    #[serde(default)]
    pub proof_links: Vec<ProofLink>,
}
