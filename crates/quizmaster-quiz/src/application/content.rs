//! Quiz content sources.
//!
//! [`StaticQuizContent`] serves a fixed bank (by default the built-in general
//! knowledge quiz); [`YamlQuizContent`] reads one from disk on every load.

use std::path::PathBuf;

use async_trait::async_trait;
use quizmaster_core::content::QuizContentSource;
use quizmaster_core::error::DomainError;
use quizmaster_core::question::{OPTION_COUNT, Question, QuestionBank};
use tracing::info;

fn options(labels: [&str; OPTION_COUNT]) -> [String; OPTION_COUNT] {
    labels.map(str::to_owned)
}

/// The built-in five-question general knowledge bank.
///
/// # Errors
///
/// Never fails in practice; the literals below are valid questions.
pub fn general_knowledge_bank() -> Result<QuestionBank, DomainError> {
    QuestionBank::new(vec![
        Question::new(
            "What is the capital of France?",
            options(["London", "Berlin", "Paris", "Madrid"]),
            2,
        )?,
        Question::new(
            "Who wrote 'Romeo and Juliet'?",
            options([
                "Charles Dickens",
                "William Shakespeare",
                "Jane Austen",
                "Mark Twain",
            ]),
            1,
        )?,
        Question::new(
            "What is the largest planet in our solar system?",
            options(["Mars", "Jupiter", "Saturn", "Neptune"]),
            1,
        )?,
        Question::new(
            "Which element has the chemical symbol 'O'?",
            options(["Gold", "Silver", "Oxygen", "Iron"]),
            2,
        )?,
        Question::new(
            "What year did World War II end?",
            options(["1943", "1944", "1945", "1946"]),
            2,
        )?,
    ])
}

/// Serves the same bank on every load.
#[derive(Debug, Clone)]
pub struct StaticQuizContent {
    bank: QuestionBank,
}

impl StaticQuizContent {
    /// Serves `bank`.
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        Self { bank }
    }

    /// Serves the built-in general knowledge bank.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from [`general_knowledge_bank`].
    pub fn general_knowledge() -> Result<Self, DomainError> {
        Ok(Self::new(general_knowledge_bank()?))
    }
}

#[async_trait]
impl QuizContentSource for StaticQuizContent {
    async fn load_bank(&self) -> Result<QuestionBank, DomainError> {
        Ok(self.bank.clone())
    }
}

/// Reads a YAML list of questions from a file.
///
/// ```yaml
/// - text: What is the capital of France?
///   options: [London, Berlin, Paris, Madrid]
///   correct_option: 2
/// ```
#[derive(Debug, Clone)]
pub struct YamlQuizContent {
    path: PathBuf,
}

impl YamlQuizContent {
    /// Reads from `path` on every load.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuizContentSource for YamlQuizContent {
    async fn load_bank(&self) -> Result<QuestionBank, DomainError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::Infrastructure(format!(
                "failed to read question bank {}: {e}",
                self.path.display()
            ))
        })?;
        let bank: QuestionBank = serde_yaml::from_str(&raw).map_err(|e| {
            DomainError::InvalidInput(format!(
                "malformed question bank {}: {e}",
                self.path.display()
            ))
        })?;
        info!(path = %self.path.display(), question_count = bank.len(), "loaded question bank");
        Ok(bank)
    }
}
