//! Routes for the quiz session.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use quizmaster_core::error::DomainError;
use quizmaster_quiz::application::query_handlers::SessionView;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::shell::with_shell;
use crate::state::AppState;

/// Request body for POST /api/v1/session/start.
#[derive(Debug, Default, Deserialize)]
pub struct StartSessionRequest {
    /// Countdown length; the configured default when absent.
    #[serde(default)]
    pub duration_seconds: Option<i64>,
}

/// Request body for POST /api/v1/session/select.
#[derive(Debug, Deserialize)]
pub struct SelectOptionRequest {
    /// Zero-based option index.
    pub option: i64,
}

/// Narrows a requested countdown length to what the engine accepts.
fn duration_from_request(requested: i64) -> Result<u32, DomainError> {
    u32::try_from(requested)
        .ok()
        .filter(|seconds| *seconds > 0)
        .ok_or_else(|| {
            DomainError::InvalidInput(format!(
                "duration_seconds must be a positive number of seconds, got {requested}"
            ))
        })
}

fn option_from_request(requested: i64) -> Result<usize, DomainError> {
    usize::try_from(requested).map_err(|_| {
        DomainError::InvalidInput(format!("option must not be negative, got {requested}"))
    })
}

/// POST /api/v1/session/start
#[instrument(skip(state, request), fields(duration_seconds = ?request.duration_seconds))]
async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let bank = state.content.load_bank().await?;
    let duration_seconds = match request.duration_seconds {
        Some(requested) => duration_from_request(requested)?,
        None => state.default_duration_seconds,
    };

    info!(
        question_count = bank.len(),
        duration_seconds, "handling start_session command"
    );

    let view = state.runtime.start(bank, duration_seconds)?;
    with_shell(&state.shell, |shell| shell.celebration = None);

    Ok(Json(view))
}

/// POST /api/v1/session/select
#[instrument(skip(state, request), fields(option = request.option))]
async fn select_option(
    State(state): State<AppState>,
    Json(request): Json<SelectOptionRequest>,
) -> Result<Json<SessionView>, ApiError> {
    info!("handling select_option command");
    let option = option_from_request(request.option)?;
    Ok(Json(state.runtime.select_option(option)?))
}

/// POST /api/v1/session/advance
#[instrument(skip(state))]
async fn advance_question(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    info!("handling advance_question command");
    Ok(Json(state.runtime.advance()?))
}

/// GET /api/v1/session
async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.runtime.view())
}

/// Returns the router for the quiz session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/session", get(get_session))
        .route("/api/v1/session/start", post(start_session))
        .route("/api/v1/session/select", post(select_option))
        .route("/api/v1/session/advance", post(advance_question))
}
