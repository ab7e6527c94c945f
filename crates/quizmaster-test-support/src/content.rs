//! Question bank fixtures and content source doubles.

use async_trait::async_trait;
use quizmaster_core::content::QuizContentSource;
use quizmaster_core::error::DomainError;
use quizmaster_core::question::{OPTION_COUNT, Question, QuestionBank};

/// Builds a bank of `count` generated questions. Question `n` has correct
/// option `n % 4`.
///
/// # Panics
///
/// Panics if `count` is zero.
#[must_use]
pub fn sample_bank(count: usize) -> QuestionBank {
    let questions = (0..count)
        .map(|n| {
            Question::new(
                format!("Sample question {}?", n + 1),
                ["Option A", "Option B", "Option C", "Option D"].map(str::to_owned),
                n % OPTION_COUNT,
            )
            .expect("generated questions are valid")
        })
        .collect();
    QuestionBank::new(questions).expect("sample_bank requires count > 0")
}

/// A content source that always fails with an infrastructure error.
#[derive(Debug)]
pub struct FailingQuizContent;

#[async_trait]
impl QuizContentSource for FailingQuizContent {
    async fn load_bank(&self) -> Result<QuestionBank, DomainError> {
        Err(DomainError::Infrastructure("question bank unavailable".into()))
    }
}
