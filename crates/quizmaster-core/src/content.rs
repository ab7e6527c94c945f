//! Quiz content retrieval abstraction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::question::QuestionBank;

/// Source of the question bank a session is started with.
///
/// Implementations may serve a fixed set or fetch one from elsewhere; no
/// authentication or pagination is involved.
#[async_trait]
pub trait QuizContentSource: Send + Sync {
    /// Loads the current question bank.
    async fn load_bank(&self) -> Result<QuestionBank, DomainError>;
}
