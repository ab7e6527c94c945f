//! Commands for the Quiz Session context.

use quizmaster_core::command::Command;
use quizmaster_core::question::QuestionBank;
use uuid::Uuid;

/// Command to start (or restart) a session.
#[derive(Debug, Clone)]
pub struct StartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Questions for the new session.
    pub bank: QuestionBank,
    /// Countdown length in seconds.
    pub duration_seconds: u32,
}

impl Command for StartSession {
    fn command_type(&self) -> &'static str {
        "quiz.start_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to select an option for the current question.
#[derive(Debug, Clone)]
pub struct SelectOption {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Index of the option to select.
    pub option: usize,
}

impl Command for SelectOption {
    fn command_type(&self) -> &'static str {
        "quiz.select_option"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to finalize the current question and move on.
#[derive(Debug, Clone)]
pub struct AdvanceQuestion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for AdvanceQuestion {
    fn command_type(&self) -> &'static str {
        "quiz.advance_question"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command issued by the countdown once per interval.
#[derive(Debug, Clone)]
pub struct TickCountdown {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session the countdown was armed for.
    pub session_id: Uuid,
}

impl Command for TickCountdown {
    fn command_type(&self) -> &'static str {
        "quiz.tick_countdown"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
