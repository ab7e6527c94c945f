//! Health check endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use quizmaster_quiz::domain::aggregates::SessionStatus;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Lifecycle status of the quiz session.
    pub session: SessionStatus,
    /// Whether a countdown task is armed.
    pub countdown_armed: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        session: state.runtime.view().status,
        countdown_armed: state.runtime.countdown_session().is_some(),
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
