//! Friend invitations.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use quizmaster_core::clock::Clock;
use quizmaster_core::error::DomainError;
use quizmaster_invite::domain::email::EmailAddress;
use quizmaster_invite::domain::outcome::DispatchOutcome;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::shell::{InviteTask, TaskStatus, with_shell};
use crate::state::AppState;

/// Request body for POST /api/v1/invite.
#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    /// Address to invite.
    pub email: String,
}

/// Response body for POST /api/v1/invite.
#[derive(Debug, Serialize)]
pub struct InviteResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable result.
    pub message: String,
}

fn record_invite(state: &AppState, email: &EmailAddress, status: TaskStatus) {
    let updated_at = state.clock.now();
    with_shell(&state.shell, |shell| {
        shell.invite = Some(InviteTask {
            email: email.to_string(),
            status,
            updated_at,
        });
    });
}

/// POST /api/v1/invite
#[instrument(skip(state, request))]
async fn send_invite(
    State(state): State<AppState>,
    Json(request): Json<InviteRequest>,
) -> Result<Json<InviteResponse>, ApiError> {
    let email = EmailAddress::parse(&request.email)?;

    info!(%email, "handling invitation");
    record_invite(&state, &email, TaskStatus::Pending);

    match state.invitations.dispatch(&email).await {
        DispatchOutcome::Sent => {
            record_invite(&state, &email, TaskStatus::Done);
            Ok(Json(InviteResponse {
                success: true,
                message: format!("Invitation sent to {email}"),
            }))
        }
        DispatchOutcome::Failed(reason) => {
            warn!(%email, %reason, "invitation dispatch failed");
            record_invite(&state, &email, TaskStatus::Failed(reason.clone()));
            Err(DomainError::Collaborator(reason).into())
        }
    }
}

/// Returns the router for invitations.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/invite", post(send_invite))
}
