//! Domain events for the Quiz Session context.

use quizmaster_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a session reached `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// The last question was answered and advanced past.
    AllAnswered,
    /// The countdown reached zero first.
    TimedOut,
}

/// Emitted when a session is started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStarted {
    /// The session identifier.
    pub session_id: Uuid,
    /// Number of questions in the session's bank.
    pub question_count: usize,
    /// Countdown length in seconds.
    pub duration_seconds: u32,
}

/// Emitted when an option is selected for the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSelected {
    /// The session identifier.
    pub session_id: Uuid,
    /// Index of the question the selection applies to.
    pub question_index: usize,
    /// The selected option.
    pub option: usize,
}

/// Emitted when a question is finalized by `advance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswered {
    /// The session identifier.
    pub session_id: Uuid,
    /// Index of the finalized question.
    pub question_index: usize,
    /// The option that was selected when the question was finalized.
    pub selected_option: usize,
    /// Whether the selection matched the answer key.
    pub correct: bool,
    /// Score after this question was reconciled.
    pub score: u32,
}

/// Emitted when a session reaches `Completed`.
///
/// This is the advisory completion signal; consumers may celebrate, but the
/// session's state does not depend on anyone observing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCompleted {
    /// The session identifier.
    pub session_id: Uuid,
    /// How the session ended.
    pub reason: CompletionReason,
    /// Final score.
    pub score: u32,
    /// Number of questions in the session's bank.
    pub question_count: usize,
}

/// Event type identifier for [`SessionStarted`].
pub const SESSION_STARTED_EVENT_TYPE: &str = "quiz.session_started";

/// Event type identifier for [`OptionSelected`].
pub const OPTION_SELECTED_EVENT_TYPE: &str = "quiz.option_selected";

/// Event type identifier for [`QuestionAnswered`].
pub const QUESTION_ANSWERED_EVENT_TYPE: &str = "quiz.question_answered";

/// Event type identifier for [`SessionCompleted`].
pub const SESSION_COMPLETED_EVENT_TYPE: &str = "quiz.session_completed";

/// Event payload variants for the Quiz Session context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizEventKind {
    /// A session has started.
    SessionStarted(SessionStarted),
    /// An option has been selected.
    OptionSelected(OptionSelected),
    /// A question has been finalized.
    QuestionAnswered(QuestionAnswered),
    /// A session has completed.
    SessionCompleted(SessionCompleted),
}

/// Domain event envelope for the Quiz Session context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: QuizEventKind,
}

impl QuizEventKind {
    /// Returns the event type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SessionStarted(_) => SESSION_STARTED_EVENT_TYPE,
            Self::OptionSelected(_) => OPTION_SELECTED_EVENT_TYPE,
            Self::QuestionAnswered(_) => QUESTION_ANSWERED_EVENT_TYPE,
            Self::SessionCompleted(_) => SESSION_COMPLETED_EVENT_TYPE,
        }
    }
}

impl DomainEvent for QuizEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
