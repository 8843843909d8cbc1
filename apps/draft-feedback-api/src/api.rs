//! API handlers for the draft feedback server
//!
//! Provides REST endpoints for:
//! - Draft submission (highlight spans only, or the full report)
//! - Liveness and health checks

use axum::{extract::State, Json};
use draft_feedback_core::{CharSpan, FeedbackReport};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Service name reported by the liveness endpoints
pub const SERVICE_NAME: &str = "Text Editor Feedback API";

/// Root response
#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Handler: GET /
pub async fn handle_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("{} is running", SERVICE_NAME),
    })
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

/// Draft submission body
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub text: String,
}

/// Handler: POST /submit-draft
///
/// Returns `[[offset, length], ...]`, one pair per accepted feedback item.
pub async fn handle_submit_draft(
    State(state): State<AppState>,
    Json(req): Json<DraftRequest>,
) -> Result<Json<Vec<CharSpan>>, ApiError> {
    let report = run_draft(&state, &req).await?;
    Ok(Json(report.character_positions))
}

/// Handler: POST /submit-draft/detailed
///
/// Same processing as `/submit-draft`, returning the accepted items, the
/// numbered text and the word count alongside the spans.
pub async fn handle_submit_draft_detailed(
    State(state): State<AppState>,
    Json(req): Json<DraftRequest>,
) -> Result<Json<FeedbackReport>, ApiError> {
    let report = run_draft(&state, &req).await?;
    Ok(Json(report))
}

async fn run_draft(state: &AppState, req: &DraftRequest) -> Result<FeedbackReport, ApiError> {
    info!("Draft submission: {} chars", req.text.chars().count());
    Ok(state.orchestrator.submit(&req.text).await?)
}
