//! Draft Feedback Server
//!
//! Accepts a draft, asks a language model for categorized editorial
//! feedback on numbered words, and returns character spans the client can
//! highlight. Provides REST API endpoints for:
//!
//! - Draft submission (`POST /submit-draft`, `POST /submit-draft/detailed`)
//! - Liveness (`GET /`) and health (`GET /health`)
//!
//! ## Configuration
//!
//! Model credentials and parameters come from the environment (a `.env`
//! file is loaded if present); bind address and logging come from the
//! command line.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use draft_feedback_core::FeedbackOrchestrator;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod config;
mod error;
mod llm;
#[cfg(test)]
mod tests;

use api::{
    handle_health, handle_root, handle_submit_draft, handle_submit_draft_detailed,
};
use config::LlmConfig;
use llm::OpenAiFeedbackSource;

/// Command-line arguments for the draft feedback server
#[derive(Parser, Debug)]
#[command(name = "draft-feedback-api")]
#[command(about = "Language-model feedback on drafts, returned as highlight spans")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Chat model to use (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: FeedbackOrchestrator,
}

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Liveness
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        // Drafts
        .route("/submit-draft", post(handle_submit_draft))
        .route("/submit-draft/detailed", post(handle_submit_draft_detailed))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(error::handle_panic))
                .layer(cors),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive(log_level.into())
                .add_directive("tower_http=debug".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut llm_config = LlmConfig::from_env()?;
    if let Some(model) = args.model {
        llm_config = llm_config.with_model(model);
    }
    if llm_config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; every draft will receive the fallback item");
    }
    info!("Using model {} at {}", llm_config.model, llm_config.base_url);

    let source = OpenAiFeedbackSource::new(llm_config)?;
    let state = AppState {
        orchestrator: FeedbackOrchestrator::new(Arc::new(source)),
    };

    let app = build_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
