//! Query handlers for the Quiz Session context.
//!
//! Builds read-only views of the engine. Views never expose the answer key of
//! the question in progress.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::{QuizSession, SessionStatus};
use crate::domain::events::CompletionReason;

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// The question prompt.
    pub text: String,
    /// Answer options in display order.
    pub options: Vec<String>,
}

/// Outcome of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionSummary {
    /// How the session ended.
    pub reason: CompletionReason,
    /// Final score.
    pub score: u32,
    /// Number of questions in the session.
    pub question_count: usize,
}

/// Read-only view of the quiz session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// The current (or last) session, `None` before the first start.
    pub session_id: Option<Uuid>,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// One-based number of the current question.
    pub question_number: usize,
    /// Number of questions in the session.
    pub question_count: usize,
    /// The current question, only while the session is active.
    pub question: Option<QuestionView>,
    /// The selection for the current question.
    pub selected_option: Option<usize>,
    /// Accumulated score.
    pub score: u32,
    /// Seconds left on the countdown.
    pub seconds_remaining: u32,
    /// Countdown length the session was started with.
    pub duration_seconds: u32,
    /// The countdown as `m:ss`.
    pub formatted_time: String,
    /// `question_index / question_count`.
    pub progress_fraction: f64,
    /// `seconds_remaining / duration_seconds`.
    pub timer_fraction: f64,
    /// Whether advancing will finish the session.
    pub is_last_question: bool,
    /// Present once the session has completed.
    pub completion: Option<CompletionSummary>,
    /// When the session started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the session completed.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Summarizes a completed session, `None` otherwise.
#[must_use]
pub fn completion_summary(session: &QuizSession) -> Option<CompletionSummary> {
    session.completion_reason().map(|reason| CompletionSummary {
        reason,
        score: session.score(),
        question_count: session.question_count(),
    })
}

/// Builds the view of the engine's current state.
#[must_use]
pub fn get_session_view(session: &QuizSession) -> SessionView {
    let question = match session.status() {
        SessionStatus::Active => session.current_question().map(|q| QuestionView {
            text: q.text().to_owned(),
            options: q.options().to_vec(),
        }),
        SessionStatus::Idle | SessionStatus::Completed => None,
    };
    let question_number = if session.status() == SessionStatus::Idle {
        0
    } else {
        session.question_index() + 1
    };

    SessionView {
        session_id: session.session_id(),
        status: session.status(),
        question_number,
        question_count: session.question_count(),
        question,
        selected_option: session.selected_option(),
        score: session.score(),
        seconds_remaining: session.seconds_remaining(),
        duration_seconds: session.duration_seconds(),
        formatted_time: session.formatted_time(),
        progress_fraction: session.progress_fraction(),
        timer_fraction: session.timer_fraction(),
        is_last_question: session.status() != SessionStatus::Idle && session.is_last_question(),
        completion: completion_summary(session),
        started_at: session.started_at(),
        completed_at: session.completed_at(),
    }
}
