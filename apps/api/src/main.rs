mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::orchestrator::AnalysisSettings;
use crate::analysis::projects::SuggestionPolicy;
use crate::config::Config;
use crate::extraction::DocumentDecoder;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
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

    info!("Starting SkillGap API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout())?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout_secs
    );

    // Initialize document decoder (text layer, then pdftoppm + tesseract)
    let decoder = DocumentDecoder::with_system_tools(
        config.ocr_dpi,
        &config.ocr_language,
        config.ocr_timeout(),
    );
    info!(
        "Document decoder initialized (OCR: {} at {} dpi)",
        config.ocr_language, config.ocr_dpi
    );

    let state = AppState {
        llm: Arc::new(llm),
        decoder: Arc::new(decoder),
        analysis: AnalysisSettings {
            stage_timeout: config.stage_timeout(),
            suggestions: SuggestionPolicy {
                drop_blank_lines: config.drop_blank_suggestions,
            },
        },
        max_upload_bytes: config.max_upload_bytes,
    };

    // The mobile client calls from arbitrary origins.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
