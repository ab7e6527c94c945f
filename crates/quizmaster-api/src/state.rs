//! Shared application state.

use std::sync::Arc;

use quizmaster_core::clock::Clock;
use quizmaster_core::content::QuizContentSource;
use quizmaster_ingest::application::ingestion::UploadIngestion;
use quizmaster_invite::application::dispatch::InvitationDispatch;
use quizmaster_quiz::application::runtime::QuizRuntime;

use crate::shell::SharedShell;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for shell timestamps.
    pub clock: Arc<dyn Clock>,
    /// The quiz engine and its countdown.
    pub runtime: QuizRuntime,
    /// Where `GET /api/v1/quiz` and `POST /session/start` get questions.
    pub content: Arc<dyn QuizContentSource>,
    /// Turns uploaded documents into question banks.
    pub ingestion: Arc<dyn UploadIngestion>,
    /// Sends friend invitations.
    pub invitations: Arc<dyn InvitationDispatch>,
    /// Upload, invite and completion banner state.
    pub shell: SharedShell,
    /// Countdown length when a start request does not name one.
    pub default_duration_seconds: u32,
}

impl AppState {
    /// Create new application state with an empty shell.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        runtime: QuizRuntime,
        content: Arc<dyn QuizContentSource>,
        ingestion: Arc<dyn UploadIngestion>,
        invitations: Arc<dyn InvitationDispatch>,
        default_duration_seconds: u32,
    ) -> Self {
        Self {
            clock,
            runtime,
            content,
            ingestion,
            invitations,
            shell: SharedShell::default(),
            default_duration_seconds,
        }
    }
}
