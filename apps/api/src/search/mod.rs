//! Web verification through SerpAPI's Google engine.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::report::ProofLink;

const SERPAPI_URL: &str = "https://serpapi.com/search";
pub const DEFAULT_MAX_RESULTS: usize = 5;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API returned status {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl SearchClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_url(client, api_key, SERPAPI_URL.to_string())
    }

    pub fn with_url(client: Client, api_key: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }

    /// Returns up to `max_results` organic results for `query`.
    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<ProofLink>, SearchError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response.json().await?;
        debug!(results = body.organic_results.len(), "Search API responded");
        Ok(to_proof_links(body.organic_results, max_results))
    }
}

/// The article's first sentence: everything before the first `.`, trimmed.
pub fn search_query(text: &str) -> &str {
    text.split('.').next().unwrap_or_default().trim()
}

/// Results without a link are dropped; the limit applies before filtering.
fn to_proof_links(results: Vec<OrganicResult>, max_results: usize) -> Vec<ProofLink> {
    results
        .into_iter()
        .take(max_results)
        .filter_map(|r| {
            Some(ProofLink {
                title: r.title,
                link: r.link?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_is_first_sentence() {
        assert_eq!(
            search_query("Aliens land in Ohio. Officials deny it."),
            "Aliens land in Ohio"
        );
    }

    #[test]
    fn test_search_query_without_period_is_whole_text() {
        assert_eq!(search_query("  No period here "), "No period here");
    }

    #[test]
    fn test_to_proof_links_maps_and_limits() {
        let body: SearchResponse = serde_json::from_str(
            r#"{"organic_results":[
                {"title":"Fact check: Ohio landing","link":"https://facts.example/ohio"},
                {"link":"https://news.example/untitled"},
                {"title":"No link here"},
                {"title":"Fourth","link":"https://x.example"}
            ]}"#,
        )
        .unwrap();

        let links = to_proof_links(body.organic_results, 3);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].display_title(), "Fact check: Ohio landing");
        assert_eq!(links[1].display_title(), "[no title]");
        assert_eq!(links[1].link, "https://news.example/untitled");
    }

    #[test]
    fn test_missing_organic_results_is_empty() {
        let body: SearchResponse = serde_json::from_str(r#"{"search_metadata":{}}"#).unwrap();
        assert!(to_proof_links(body.organic_results, 5).is_empty());
    }

    use std::collections::HashMap;

    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    use crate::state::test_support::spawn_stub;

    #[tokio::test]
    async fn test_search_against_stub_server() {
        let router = Router::new().route(
            "/search",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["engine"], "google");
                assert_eq!(params["q"], "Aliens land in Ohio");
                assert_eq!(params["api_key"], "serp-key");
                Json(json!({
                    "search_metadata": {"status": "Success"},
                    "organic_results": [
                        {"title": "Fact check: Ohio landing", "link": "https://facts.example/ohio"},
                        {"link": "https://news.example/untitled"}
                    ]
                }))
            }),
        );
        let base_url = spawn_stub(router).await;
        let search = SearchClient::with_url(
            Client::new(),
            "serp-key".to_string(),
            format!("{base_url}/search"),
        );

        let query = search_query("Aliens land in Ohio. Officials deny it.");
        let links = search.search(query, DEFAULT_MAX_RESULTS).await.unwrap();
        assert_eq!(
            links,
            vec![
                ProofLink {
                    title: Some("Fact check: Ohio landing".to_string()),
                    link: "https://facts.example/ohio".to_string(),
                },
                ProofLink {
                    title: None,
                    link: "https://news.example/untitled".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_search_error_status() {
        let router = Router::new().route(
            "/search",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exceeded") }),
        );
        let base_url = spawn_stub(router).await;
        let search = SearchClient::with_url(Client::new(), "k".to_string(), format!("{base_url}/search"));

        let result = search.search("anything", 5).await;
        assert!(matches!(result, Err(SearchError::Api { status: 429, .. })));
    }
}
