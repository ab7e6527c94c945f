//! Aggregate root for the Quiz Session context.

use chrono::{DateTime, Utc};
use quizmaster_core::clock::Clock;
use quizmaster_core::error::DomainError;
use quizmaster_core::event::EventMetadata;
use quizmaster_core::question::{Question, QuestionBank};
use serde::Serialize;
use uuid::Uuid;

use super::events::{
    CompletionReason, OptionSelected, QuestionAnswered, QuizEvent, QuizEventKind,
    SessionCompleted, SessionStarted,
};

/// Lifecycle status of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No session has been started yet.
    Idle,
    /// Questions are being answered and the countdown is running.
    Active,
    /// Terminal until the next `start`.
    Completed,
}

/// A question finalized by `advance`, with the selection recorded at that time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordedAnswer {
    /// Index of the finalized question.
    pub question_index: usize,
    /// The option selected when `advance` was called.
    pub selected_option: usize,
    /// Whether the selection matched the answer key.
    pub correct: bool,
}

/// The quiz session engine.
///
/// Owns the only mutable session state in the system. All operations run to
/// completion synchronously and leave the state untouched when they fail.
#[derive(Debug)]
pub struct QuizSession {
    session_id: Option<Uuid>,
    bank: Option<QuestionBank>,
    duration_seconds: u32,
    question_index: usize,
    selected_option: Option<usize>,
    score: u32,
    seconds_remaining: u32,
    status: SessionStatus,
    completion_reason: Option<CompletionReason>,
    answers: Vec<RecordedAnswer>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    /// Events emitted by the current session so far.
    sequence: u64,
    /// Events not yet drained by a command handler.
    uncommitted_events: Vec<QuizEvent>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// Creates an idle engine with no session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_id: None,
            bank: None,
            duration_seconds: 0,
            question_index: 0,
            selected_option: None,
            score: 0,
            seconds_remaining: 0,
            status: SessionStatus::Idle,
            completion_reason: None,
            answers: Vec::new(),
            started_at: None,
            completed_at: None,
            sequence: 0,
            uncommitted_events: Vec::new(),
        }
    }

    /// Starts a fresh session, discarding everything from the previous one.
    ///
    /// Valid from any status. Returns the new session's identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if `duration_seconds` is zero.
    pub fn start(
        &mut self,
        bank: QuestionBank,
        duration_seconds: u32,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Uuid, DomainError> {
        if duration_seconds == 0 {
            return Err(DomainError::InvalidInput(
                "session duration must be at least one second".to_owned(),
            ));
        }
        if bank.is_empty() {
            return Err(DomainError::InvalidInput(
                "question bank must contain at least one question".to_owned(),
            ));
        }

        let session_id = Uuid::new_v4();
        let question_count = bank.len();
        let pending = std::mem::take(&mut self.uncommitted_events);
        *self = Self {
            session_id: Some(session_id),
            bank: Some(bank),
            duration_seconds,
            seconds_remaining: duration_seconds,
            status: SessionStatus::Active,
            started_at: Some(clock.now()),
            uncommitted_events: pending,
            ..Self::new()
        };

        self.record(
            QuizEventKind::SessionStarted(SessionStarted {
                session_id,
                question_count,
                duration_seconds,
            }),
            correlation_id,
            clock,
        );
        Ok(session_id)
    }

    /// Selects `option` for the current question, replacing any earlier
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` unless the session is active, and
    /// `DomainError::InvalidInput` if `option` does not index one of the
    /// current question's options.
    pub fn select_option(
        &mut self,
        option: usize,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let (session_id, question) = self.active_question("select an option")?;
        let option_count = question.options().len();
        if option >= option_count {
            return Err(DomainError::InvalidInput(format!(
                "option {option} is outside 0..{option_count}"
            )));
        }

        self.selected_option = Some(option);
        self.record(
            QuizEventKind::OptionSelected(OptionSelected {
                session_id,
                question_index: self.question_index,
                option,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Finalizes the current question with the recorded selection.
    ///
    /// Credits the score when the selection is correct. On the last question
    /// the session completes and the countdown freezes; otherwise the next
    /// question becomes current with no selection.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` unless the session is active and
    /// an option has been selected.
    pub fn advance(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        let (session_id, question) = self.active_question("advance")?;
        let Some(selected_option) = self.selected_option else {
            return Err(DomainError::InvalidState(
                "an option must be selected before advancing".to_owned(),
            ));
        };
        let correct = question.is_correct(selected_option);
        let question_index = self.question_index;

        if correct {
            self.score += 1;
        }
        self.answers.push(RecordedAnswer {
            question_index,
            selected_option,
            correct,
        });
        self.selected_option = None;
        self.record(
            QuizEventKind::QuestionAnswered(QuestionAnswered {
                session_id,
                question_index,
                selected_option,
                correct,
                score: self.score,
            }),
            correlation_id,
            clock,
        );

        if self.is_last_question() {
            self.complete(CompletionReason::AllAnswered, correlation_id, clock);
        } else {
            self.question_index += 1;
        }
        Ok(())
    }

    /// Applies one countdown tick.
    ///
    /// Reaching zero completes the session immediately; the question in
    /// progress is not credited.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` unless the session is active.
    pub fn tick(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.status != SessionStatus::Active {
            return Err(self.not_active("tick"));
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.complete(CompletionReason::TimedOut, correlation_id, clock);
        }
        Ok(())
    }

    /// Identifier of the current (or last) session.
    #[must_use]
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Index of the current question.
    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    /// Number of questions in the session's bank, zero when idle.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.bank.as_ref().map_or(0, QuestionBank::len)
    }

    /// The current question, if a session has been started.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.bank.as_ref()?.get(self.question_index)
    }

    /// The selection for the current question.
    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    /// Accumulated score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Countdown length the session was started with.
    #[must_use]
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    /// How the session ended, once completed.
    #[must_use]
    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.completion_reason
    }

    /// Questions finalized so far, in order.
    #[must_use]
    pub fn answers(&self) -> &[RecordedAnswer] {
        &self.answers
    }

    /// When the session started.
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// When the session completed.
    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns `true` once the session has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Returns `true` if the current question is the bank's last one.
    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.question_index + 1 >= self.question_count()
    }

    /// `question_index / question_count`, or `0.0` when idle.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_fraction(&self) -> f64 {
        match self.question_count() {
            0 => 0.0,
            count => self.question_index as f64 / count as f64,
        }
    }

    /// `seconds_remaining / duration_seconds`, or `0.0` when idle.
    #[must_use]
    pub fn timer_fraction(&self) -> f64 {
        match self.duration_seconds {
            0 => 0.0,
            duration => f64::from(self.seconds_remaining) / f64::from(duration),
        }
    }

    /// The countdown formatted as `m:ss`.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        format_countdown(self.seconds_remaining)
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[QuizEvent] {
        &self.uncommitted_events
    }

    /// Removes and returns the events recorded since the last drain.
    pub fn take_uncommitted_events(&mut self) -> Vec<QuizEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }

    fn active_question(&self, operation: &str) -> Result<(Uuid, &Question), DomainError> {
        if self.status != SessionStatus::Active {
            return Err(self.not_active(operation));
        }
        match (self.session_id, self.current_question()) {
            (Some(session_id), Some(question)) => Ok((session_id, question)),
            _ => Err(self.not_active(operation)),
        }
    }

    fn not_active(&self, operation: &str) -> DomainError {
        let status = match self.status {
            SessionStatus::Idle => "idle",
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
        };
        DomainError::InvalidState(format!("cannot {operation}: session is {status}"))
    }

    fn complete(&mut self, reason: CompletionReason, correlation_id: Uuid, clock: &dyn Clock) {
        self.status = SessionStatus::Completed;
        self.completion_reason = Some(reason);
        self.completed_at = Some(clock.now());
        if let Some(session_id) = self.session_id {
            self.record(
                QuizEventKind::SessionCompleted(SessionCompleted {
                    session_id,
                    reason,
                    score: self.score,
                    question_count: self.question_count(),
                }),
                correlation_id,
                clock,
            );
        }
    }

    fn record(&mut self, kind: QuizEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let Some(session_id) = self.session_id else {
            return;
        };
        self.sequence += 1;
        self.uncommitted_events.push(QuizEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                session_id,
                sequence_number: self.sequence,
                correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        });
    }
}

/// Formats a number of seconds as `m:ss`.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
