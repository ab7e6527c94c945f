//! Command handlers for the Quiz Session context.
//!
//! Each handler runs one engine operation and drains the events it produced.
//! There is no persistence: the engine is memory resident and owned by the
//! caller, which is responsible for serializing access to it.

use quizmaster_core::clock::Clock;
use quizmaster_core::command::Command;
use quizmaster_core::error::DomainError;
use tracing::debug;
use uuid::Uuid;

use crate::domain::aggregates::QuizSession;
use crate::domain::commands::{AdvanceQuestion, SelectOption, StartSession, TickCountdown};
use crate::domain::events::QuizEvent;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct QuizCommandResult {
    /// The session affected or created by the command.
    pub session_id: Uuid,
    /// The events produced by the command.
    pub events: Vec<QuizEvent>,
}

fn drain(command: &dyn Command, session: &mut QuizSession) -> Result<QuizCommandResult, DomainError> {
    let session_id = session
        .session_id()
        .ok_or_else(|| DomainError::InvalidState("no session has been started".to_owned()))?;
    let events = session.take_uncommitted_events();
    debug!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        %session_id,
        event_count = events.len(),
        "command handled"
    );
    Ok(QuizCommandResult { session_id, events })
}

/// Handles the `StartSession` command: replaces whatever session the engine
/// held with a fresh one.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if the duration is zero.
pub fn handle_start_session(
    command: &StartSession,
    clock: &dyn Clock,
    session: &mut QuizSession,
) -> Result<QuizCommandResult, DomainError> {
    session.start(
        command.bank.clone(),
        command.duration_seconds,
        command.correlation_id,
        clock,
    )?;
    drain(command, session)
}

/// Handles the `SelectOption` command.
///
/// # Errors
///
/// Returns `DomainError::InvalidState` if no session is active and
/// `DomainError::InvalidInput` if the option is out of range.
pub fn handle_select_option(
    command: &SelectOption,
    clock: &dyn Clock,
    session: &mut QuizSession,
) -> Result<QuizCommandResult, DomainError> {
    session.select_option(command.option, command.correlation_id, clock)?;
    drain(command, session)
}

/// Handles the `AdvanceQuestion` command.
///
/// # Errors
///
/// Returns `DomainError::InvalidState` if no session is active or nothing is
/// selected.
pub fn handle_advance_question(
    command: &AdvanceQuestion,
    clock: &dyn Clock,
    session: &mut QuizSession,
) -> Result<QuizCommandResult, DomainError> {
    session.advance(command.correlation_id, clock)?;
    drain(command, session)
}

/// Handles the `TickCountdown` command: applies the tick only if the
/// countdown belongs to the engine's current session.
///
/// # Errors
///
/// Returns `DomainError::InvalidState` for a tick armed for a previous
/// session, or if the current session is not active.
pub fn handle_tick_countdown(
    command: &TickCountdown,
    clock: &dyn Clock,
    session: &mut QuizSession,
) -> Result<QuizCommandResult, DomainError> {
    if session.session_id() != Some(command.session_id) {
        return Err(DomainError::InvalidState(format!(
            "stale tick for session {}",
            command.session_id
        )));
    }
    session.tick(command.correlation_id, clock)?;
    drain(command, session)
}
