//! Ingestion outcomes.

use quizmaster_core::question::QuestionBank;

/// Result of processing an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionOutcome {
    /// The document yielded a question bank to start a session with.
    Ready(QuestionBank),
    /// Processing failed; the reason is shown to the user.
    Failed(String),
}

impl IngestionOutcome {
    /// Returns the bank for a `Ready` outcome.
    #[must_use]
    pub fn into_bank(self) -> Option<QuestionBank> {
        match self {
            Self::Ready(bank) => Some(bank),
            Self::Failed(_) => None,
        }
    }
}
