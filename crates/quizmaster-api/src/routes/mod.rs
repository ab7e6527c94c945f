//! Route modules organized by concern.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod invite;
pub mod quiz;
pub mod session;
pub mod shell;
pub mod upload;

/// Returns the full application router, without middleware or state.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(quiz::router())
        .merge(session::router())
        .merge(upload::router())
        .merge(invite::router())
        .merge(shell::router())
}
