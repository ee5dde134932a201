mod analysis;
mod classifier;
mod config;
mod errors;
mod ingest;
mod layout;
mod llm_client;
mod models;
mod news;
mod render;
mod routes;
mod search;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::classifier::HttpClassifier;
use crate::config::Config;
use crate::layout::default_page_config;
use crate::llm_client::LlmClient;
use crate::news::NewsClient;
use crate::routes::build_router;
use crate::search::SearchClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Newsproof API v{}", env!("CARGO_PKG_VERSION"));

    // One connection pool shared by every outbound client
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .context("Failed to build HTTP client")?;

    let llm = LlmClient::new(http.clone(), config.llm_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let news = NewsClient::new(http.clone(), config.news_api_key.clone());
    let search = SearchClient::new(http.clone(), config.serpapi_api_key.clone());

    // Classifier backend (inference server; swap the Arc to change backends)
    let classifier = Arc::new(HttpClassifier::new(http, config.classifier_url.clone()));
    info!("Classifier endpoint: {}", config.classifier_url);

    let page_config = default_page_config();
    info!(
        "Export page: {:.0}x{:.0}pt, text width {:.1}pt",
        page_config.page_width_pt,
        page_config.page_height_pt,
        page_config.text_width_pt()
    );

    // Build app state
    let state = AppState {
        llm,
        news,
        search,
        classifier,
        config: config.clone(),
        page_config,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
