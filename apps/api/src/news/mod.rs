//! Top-headline fetcher backed by NewsAPI.

pub mod handlers;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const NEWS_API_URL: &str = "https://newsapi.org/v2/top-headlines";

pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_CATEGORY: &str = "technology";
pub const DEFAULT_MAX_ARTICLES: usize = 5;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("News API returned status {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct TopHeadlinesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl NewsClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_url(client, api_key, NEWS_API_URL.to_string())
    }

    pub fn with_url(client: Client, api_key: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }

    /// Fetches up to `max_articles` headlines for `country` / `category`.
    pub async fn top_headlines(
        &self,
        country: &str,
        category: &str,
        max_articles: usize,
    ) -> Result<Vec<String>, NewsError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("country", country),
                ("category", category),
                ("apiKey", self.api_key.as_str()),
            ])
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NewsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: TopHeadlinesResponse = response.json().await?;
        debug!(articles = body.articles.len(), "News API responded");
        Ok(format_headlines(body.articles, max_articles))
    }
}

/// `"{title} - {description}"`, or just the title when there is no description.
/// Articles without a title are skipped.
fn format_headlines(articles: Vec<Article>, max_articles: usize) -> Vec<String> {
    articles
        .into_iter()
        .take(max_articles)
        .filter_map(|a| {
            let title = a.title?;
            Some(match a.description.filter(|d| !d.is_empty()) {
                Some(description) => format!("{title} - {description}"),
                None => title,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<Article> {
        serde_json::from_str::<TopHeadlinesResponse>(json)
            .unwrap()
            .articles
    }

    #[test]
    fn test_format_headlines_joins_description() {
        let articles = parse(
            r#"{"status":"ok","articles":[
                {"title":"Chipmaker posts record quarter","description":"Shares rose 8%."},
                {"title":"Storm hits coast","description":null},
                {"title":"Launch delayed","description":""}
            ]}"#,
        );
        assert_eq!(
            format_headlines(articles, 5),
            vec![
                "Chipmaker posts record quarter - Shares rose 8%.",
                "Storm hits coast",
                "Launch delayed",
            ]
        );
    }

    #[test]
    fn test_format_headlines_respects_limit() {
        let articles = parse(
            r#"{"articles":[{"title":"a"},{"title":"b"},{"title":"c"}]}"#,
        );
        assert_eq!(format_headlines(articles, 2), vec!["a", "b"]);
    }

    #[test]
    fn test_missing_articles_field_is_empty() {
        assert!(parse(r#"{"status":"ok"}"#).is_empty());
    }

    use std::collections::HashMap;

    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    use crate::state::test_support::spawn_stub;

    #[tokio::test]
    async fn test_top_headlines_against_stub_server() {
        let router = Router::new().route(
            "/v2/top-headlines",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("apiKey").map(String::as_str) != Some("news-key") {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"status": "error"})));
                }
                assert_eq!(params["country"], "gb");
                assert_eq!(params["category"], "science");
                (
                    StatusCode::OK,
                    Json(json!({
                        "status": "ok",
                        "articles": [
                            {"title": "Comet visible tonight", "description": "Look north."},
                            {"title": null, "description": "orphan"},
                            {"title": "Rover finds clay", "description": null},
                            {"title": "Past the limit"}
                        ]
                    })),
                )
            }),
        );
        let base_url = spawn_stub(router).await;
        let news = NewsClient::with_url(
            Client::new(),
            "news-key".to_string(),
            format!("{base_url}/v2/top-headlines"),
        );

        let headlines = news.top_headlines("gb", "science", 3).await.unwrap();
        assert_eq!(headlines, vec!["Comet visible tonight - Look north.", "Rover finds clay"]);
    }

    #[tokio::test]
    async fn test_top_headlines_error_status() {
        let router = Router::new().route(
            "/v2/top-headlines",
            get(|| async { (StatusCode::UNAUTHORIZED, "apiKeyInvalid") }),
        );
        let base_url = spawn_stub(router).await;
        let news = NewsClient::with_url(
            Client::new(),
            "bad-key".to_string(),
            format!("{base_url}/v2/top-headlines"),
        );

        match news.top_headlines(DEFAULT_COUNTRY, DEFAULT_CATEGORY, DEFAULT_MAX_ARTICLES).await {
            Err(NewsError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "apiKeyInvalid");
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }
}
