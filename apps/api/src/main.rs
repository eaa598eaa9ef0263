mod config;
mod errors;
mod extraction;
mod llm_client;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::DocumentExtractor;
use crate::llm_client::LlmClient;
use crate::resume::parser::LlmResumeParser;
use crate::routes::{build_router, ALLOWED_ORIGINS};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing OPENAI_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Reader API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::from_config(&config)?;
    info!("LLM client initialized (model: {})", llm.model());
    if config.openai_timeout.is_none() {
        info!("No timeout configured for completion calls");
    }

    // Initialize text extraction
    let extractor = DocumentExtractor::from_config(&config);
    info!(
        "Text extractor initialized (OCR: {} -l {})",
        config.tesseract_cmd, config.ocr_lang
    );

    // Build app state
    let state = AppState {
        extractor: Arc::new(extractor),
        parser: Arc::new(LlmResumeParser::new(llm)),
    };

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());
    info!("CORS origins: {}", ALLOWED_ORIGINS.join(", "));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
