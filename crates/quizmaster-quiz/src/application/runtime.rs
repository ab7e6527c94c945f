//! Session runtime.
//!
//! [`QuizRuntime`] pairs the engine with its countdown. Every engine
//! operation, including the countdown's ticks, runs under one lock, so a tick
//! is never applied in the middle of a `start` or `advance`. `start` cancels
//! the old countdown and installs the new session while holding that lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use quizmaster_core::clock::Clock;
use quizmaster_core::error::DomainError;
use quizmaster_core::event::DomainEvent;
use quizmaster_core::question::QuestionBank;
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::command_handlers::{
    QuizCommandResult, handle_advance_question, handle_select_option, handle_start_session,
    handle_tick_countdown,
};
use crate::application::countdown::{CountdownScheduler, CountdownTarget, TickOutcome};
use crate::application::query_handlers::{SessionView, get_session_view};
use crate::domain::aggregates::{QuizSession, SessionStatus};
use crate::domain::commands::{AdvanceQuestion, SelectOption, StartSession, TickCountdown};
use crate::domain::events::{QuizEvent, QuizEventKind};

const EVENT_CHANNEL_CAPACITY: usize = 64;

struct Inner {
    session: QuizSession,
    scheduler: CountdownScheduler,
}

struct Shared {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<QuizEvent>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Engine operations never panic mid-mutation, so a poisoned lock
        // still guards a consistent session.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, result: QuizCommandResult) {
        for event in result.events {
            if let QuizEventKind::SessionCompleted(completed) = &event.kind {
                info!(
                    session_id = %completed.session_id,
                    reason = ?completed.reason,
                    score = completed.score,
                    question_count = completed.question_count,
                    "quiz session completed"
                );
            }
            debug!(
                event_type = DomainEvent::event_type(&event),
                sequence_number = event.metadata.sequence_number,
                payload = %event.to_payload(),
                "quiz event published"
            );
            // No subscribers is fine; events are advisory.
            let _ = self.events.send(event);
        }
    }
}

impl CountdownTarget for Shared {
    fn on_tick(&self, session_id: Uuid) -> TickOutcome {
        let mut inner = self.lock();
        let command = TickCountdown {
            correlation_id: Uuid::new_v4(),
            session_id,
        };
        match handle_tick_countdown(&command, self.clock.as_ref(), &mut inner.session) {
            Ok(result) => {
                let outcome = if inner.session.status() == SessionStatus::Active {
                    TickOutcome::Continue
                } else {
                    inner.scheduler.release(session_id);
                    TickOutcome::Stop
                };
                drop(inner);
                self.publish(result);
                outcome
            }
            Err(err) => {
                debug!(%session_id, error = %err, "countdown tick discarded");
                TickOutcome::Stop
            }
        }
    }
}

/// Countdown target that does not keep the runtime alive; ticks stop once
/// every [`QuizRuntime`] handle is gone.
struct WeakTarget(Weak<Shared>);

impl CountdownTarget for WeakTarget {
    fn on_tick(&self, session_id: Uuid) -> TickOutcome {
        match self.0.upgrade() {
            Some(shared) => shared.on_tick(session_id),
            None => TickOutcome::Stop,
        }
    }
}

/// The engine plus its countdown, safe to share between request handlers.
#[derive(Clone)]
pub struct QuizRuntime {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for QuizRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizRuntime").finish_non_exhaustive()
    }
}

impl QuizRuntime {
    /// Creates a runtime with an idle engine whose countdown ticks every
    /// `tick_interval`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, tick_interval: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    session: QuizSession::new(),
                    scheduler: CountdownScheduler::new(tick_interval),
                }),
                clock,
                events,
            }),
        }
    }

    /// Subscribes to the events produced by every session from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<QuizEvent> {
        self.shared.events.subscribe()
    }

    /// Starts a new session and arms its countdown, cancelling the previous
    /// one.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if `duration_seconds` is zero; the
    /// previous session and its countdown are then left running.
    pub fn start(
        &self,
        bank: QuestionBank,
        duration_seconds: u32,
    ) -> Result<SessionView, DomainError> {
        let command = StartSession {
            correlation_id: Uuid::new_v4(),
            bank,
            duration_seconds,
        };
        let mut inner = self.shared.lock();
        let result = handle_start_session(&command, self.shared.clock.as_ref(), &mut inner.session)?;
        let target: Arc<dyn CountdownTarget> =
            Arc::new(WeakTarget(Arc::downgrade(&self.shared)));
        inner.scheduler.arm(result.session_id, target);
        info!(
            session_id = %result.session_id,
            correlation_id = %command.correlation_id,
            question_count = inner.session.question_count(),
            duration_seconds,
            tick_interval_ms = inner.scheduler.interval().as_millis(),
            "quiz session started"
        );
        let view = get_session_view(&inner.session);
        drop(inner);
        self.shared.publish(result);
        Ok(view)
    }

    /// Selects an option for the current question.
    ///
    /// # Errors
    ///
    /// See [`QuizSession::select_option`].
    pub fn select_option(&self, option: usize) -> Result<SessionView, DomainError> {
        let command = SelectOption {
            correlation_id: Uuid::new_v4(),
            option,
        };
        let mut inner = self.shared.lock();
        let result = handle_select_option(&command, self.shared.clock.as_ref(), &mut inner.session)?;
        let view = get_session_view(&inner.session);
        drop(inner);
        self.shared.publish(result);
        Ok(view)
    }

    /// Finalizes the current question; disarms the countdown when that
    /// completes the session.
    ///
    /// # Errors
    ///
    /// See [`QuizSession::advance`].
    pub fn advance(&self) -> Result<SessionView, DomainError> {
        let command = AdvanceQuestion {
            correlation_id: Uuid::new_v4(),
        };
        let mut inner = self.shared.lock();
        let result =
            handle_advance_question(&command, self.shared.clock.as_ref(), &mut inner.session)?;
        if inner.session.is_finished() {
            inner.scheduler.cancel();
        }
        let view = get_session_view(&inner.session);
        drop(inner);
        self.shared.publish(result);
        Ok(view)
    }

    /// The current session view.
    #[must_use]
    pub fn view(&self) -> SessionView {
        get_session_view(&self.shared.lock().session)
    }

    /// The session whose countdown is running, if any.
    #[must_use]
    pub fn countdown_session(&self) -> Option<Uuid> {
        self.shared.lock().scheduler.armed_session()
    }

    /// A handle that observes this runtime without keeping it alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakQuizRuntime {
        WeakQuizRuntime {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Cancels the running countdown. The session state is kept as is.
    pub fn shutdown(&self) {
        if let Some(session_id) = self.shared.lock().scheduler.cancel() {
            info!(%session_id, "countdown stopped for shutdown");
        }
    }
}

/// Non-owning counterpart of [`QuizRuntime`], for background listeners.
#[derive(Clone)]
pub struct WeakQuizRuntime {
    shared: Weak<Shared>,
}

impl std::fmt::Debug for WeakQuizRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakQuizRuntime").finish_non_exhaustive()
    }
}

impl WeakQuizRuntime {
    /// The runtime, unless every owning handle has been dropped.
    #[must_use]
    pub fn upgrade(&self) -> Option<QuizRuntime> {
        self.shared.upgrade().map(|shared| QuizRuntime { shared })
    }
}
