use std::sync::Arc;

use crate::classifier::Classifier;
use crate::config::Config;
use crate::layout::PageConfig;
use crate::llm_client::LlmClient;
use crate::news::NewsClient;
use crate::search::SearchClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub news: NewsClient,
    pub search: SearchClient,
    /// Pluggable classifier. Default: HttpClassifier against `CLASSIFIER_URL`.
    pub classifier: Arc<dyn Classifier>,
    pub config: Config,
    /// Page geometry and fonts for PDF export.
    pub page_config: PageConfig,
}
