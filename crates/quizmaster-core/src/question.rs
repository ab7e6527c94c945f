//! Question and question bank types.
//!
//! Both are immutable once constructed. A [`QuestionBank`] is shared between
//! the content source, the collaborators and the running session by cloning
//! an `Arc`, never by copying the questions.

use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::DomainError;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    text: String,
    options: [String; OPTION_COUNT],
    correct_option: usize,
}

#[derive(Deserialize)]
struct RawQuestion {
    text: String,
    options: [String; OPTION_COUNT],
    correct_option: usize,
}

impl TryFrom<RawQuestion> for Question {
    type Error = DomainError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        Self::new(raw.text, raw.options, raw.correct_option)
    }
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if the text is blank or
    /// `correct_option` does not index one of the options.
    pub fn new(
        text: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_option: usize,
    ) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "question text must not be blank".to_owned(),
            ));
        }
        if correct_option >= OPTION_COUNT {
            return Err(DomainError::InvalidInput(format!(
                "correct option {correct_option} is outside 0..{OPTION_COUNT}"
            )));
        }
        Ok(Self {
            text,
            options,
            correct_option,
        })
    }

    /// The question prompt.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The answer options, in display order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the correct option.
    #[must_use]
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    /// Returns `true` if `option` is the correct answer.
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }
}

/// An ordered, non-empty, immutable list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Question>")]
pub struct QuestionBank {
    questions: Arc<[Question]>,
}

impl QuestionBank {
    /// Creates a bank from an ordered list of questions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, DomainError> {
        if questions.is_empty() {
            return Err(DomainError::InvalidInput(
                "question bank must contain at least one question".to_owned(),
            ));
        }
        Ok(Self {
            questions: questions.into(),
        })
    }

    /// Number of questions in the bank. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns the question at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// All questions in order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl TryFrom<Vec<Question>> for QuestionBank {
    type Error = DomainError;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        Self::new(questions)
    }
}

impl Serialize for QuestionBank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.questions.iter())
    }
}
