//! Shell-local state.
//!
//! Upload and invite progress and the completion banner live here, next to
//! the engine but never inside it.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use quizmaster_core::clock::Clock;
use quizmaster_quiz::application::query_handlers::CompletionSummary;
use quizmaster_quiz::application::runtime::{QuizRuntime, WeakQuizRuntime};
use quizmaster_quiz::domain::events::QuizEventKind;
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How long the completion banner is shown.
pub const CELEBRATION_SECONDS: i64 = 5;

/// Progress of a one-shot collaborator call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum TaskStatus {
    /// The call is in flight.
    Pending,
    /// The call succeeded.
    Done,
    /// The call failed with the given reason.
    Failed(String),
}

/// The most recent document upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadTask {
    /// Name of the uploaded file.
    pub file_name: String,
    /// Current status.
    pub status: TaskStatus,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

/// The most recent invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviteTask {
    /// Address the invitation went to.
    pub email: String,
    /// Current status.
    pub status: TaskStatus,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

/// Completion banner for the last finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Celebration {
    /// The session that completed.
    pub session_id: Uuid,
    /// How it ended.
    pub summary: CompletionSummary,
    /// Banner text, e.g. "Quiz Completed! Your score: 4 out of 5".
    pub message: String,
    /// When the banner stops being shown.
    pub celebrate_until: DateTime<Utc>,
}

/// Everything the shell tracks outside the engine.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShellState {
    /// Latest upload, if any.
    pub upload: Option<UploadTask>,
    /// Latest invitation, if any.
    pub invite: Option<InviteTask>,
    /// Latest completion banner, if any.
    pub celebration: Option<Celebration>,
}

impl ShellState {
    /// Whether an invitation has been delivered.
    #[must_use]
    pub fn invite_sent(&self) -> bool {
        self.invite
            .as_ref()
            .is_some_and(|invite| invite.status == TaskStatus::Done)
    }

    /// Whether the completion banner is still showing at `now`.
    #[must_use]
    pub fn is_celebrating(&self, now: DateTime<Utc>) -> bool {
        self.celebration
            .as_ref()
            .is_some_and(|celebration| now < celebration.celebrate_until)
    }

    /// Records a completed session.
    pub fn celebrate(&mut self, session_id: Uuid, summary: CompletionSummary, now: DateTime<Utc>) {
        self.celebration = Some(Celebration {
            session_id,
            summary,
            message: format!(
                "Quiz Completed! Your score: {} out of {}",
                summary.score, summary.question_count
            ),
            celebrate_until: now + Duration::seconds(CELEBRATION_SECONDS),
        });
    }
}

/// Shell state shared between handlers and the completion listener.
pub type SharedShell = Arc<Mutex<ShellState>>;

/// Applies `f` to the shell state under its lock.
pub fn with_shell<T>(shell: &SharedShell, f: impl FnOnce(&mut ShellState) -> T) -> T {
    let mut guard = shell.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Applies one quiz event to the shell.
///
/// A completion raises the banner only while its session is still the
/// runtime's current one; a later start clears a banner left by an older
/// session.
fn apply_event(
    shell: &SharedShell,
    runtime: &WeakQuizRuntime,
    kind: QuizEventKind,
    now: DateTime<Utc>,
) {
    match kind {
        QuizEventKind::SessionStarted(started) => with_shell(shell, |state| {
            if state
                .celebration
                .as_ref()
                .is_some_and(|celebration| celebration.session_id != started.session_id)
            {
                state.celebration = None;
            }
        }),
        QuizEventKind::SessionCompleted(completed) => {
            let current = runtime
                .upgrade()
                .and_then(|runtime| runtime.view().session_id);
            if current != Some(completed.session_id) {
                debug!(
                    session_id = %completed.session_id,
                    "completion of a replaced session ignored"
                );
                return;
            }
            let summary = CompletionSummary {
                reason: completed.reason,
                score: completed.score,
                question_count: completed.question_count,
            };
            with_shell(shell, |state| {
                state.celebrate(completed.session_id, summary, now);
            });
            info!(session_id = %completed.session_id, "completion banner raised");
        }
        QuizEventKind::OptionSelected(_) | QuizEventKind::QuestionAnswered(_) => {}
    }
}

/// Listens for completed sessions and raises the completion banner.
///
/// The task holds no owning handle on the runtime and ends when the
/// runtime's event channel closes.
pub fn spawn_completion_listener(
    runtime: &QuizRuntime,
    shell: SharedShell,
    clock: Arc<dyn Clock>,
) -> JoinHandle<()> {
    let mut events = runtime.subscribe();
    let runtime = runtime.downgrade();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => apply_event(&shell, &runtime, event.kind, clock.now()),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "completion listener lagged behind quiz events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use quizmaster_quiz::domain::events::CompletionReason;
    use quizmaster_test_support::{FixedClock, sample_bank};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_invite_sent_only_when_done() {
        // Arrange
        let mut state = ShellState::default();
        assert!(!state.invite_sent());

        // Act
        state.invite = Some(InviteTask {
            email: "friend@example.com".into(),
            status: TaskStatus::Pending,
            updated_at: now(),
        });
        let pending = state.invite_sent();
        if let Some(invite) = state.invite.as_mut() {
            invite.status = TaskStatus::Done;
        }

        // Assert
        assert!(!pending);
        assert!(state.invite_sent());
    }

    #[test]
    fn test_celebration_lasts_five_seconds() {
        // Arrange
        let mut state = ShellState::default();
        let summary = CompletionSummary {
            reason: CompletionReason::AllAnswered,
            score: 4,
            question_count: 5,
        };

        // Act
        state.celebrate(Uuid::new_v4(), summary, now());

        // Assert
        let celebration = state.celebration.as_ref().unwrap();
        assert_eq!(celebration.message, "Quiz Completed! Your score: 4 out of 5");
        assert!(state.is_celebrating(now() + Duration::seconds(4)));
        assert!(!state.is_celebrating(now() + Duration::seconds(5)));
    }

    #[test]
    fn test_task_status_serializes_with_reason() {
        let failed = serde_json::to_value(TaskStatus::Failed("relay down".into())).unwrap();
        let done = serde_json::to_value(TaskStatus::Done).unwrap();

        assert_eq!(
            failed,
            serde_json::json!({ "state": "failed", "reason": "relay down" })
        );
        assert_eq!(done, serde_json::json!({ "state": "done" }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_listener_ignores_completion_of_replaced_session() {
        // Arrange
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(now()));
        let runtime = QuizRuntime::new(clock.clone(), std::time::Duration::from_secs(3600));
        let shell: SharedShell = Arc::default();
        let _listener = spawn_completion_listener(&runtime, shell.clone(), clock);

        // Act
        runtime.start(sample_bank(1), 60).unwrap();
        runtime.select_option(0).unwrap();
        let first = runtime.advance().unwrap();
        let second = runtime.start(sample_bank(3), 60).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        // Assert
        assert_eq!(first.completion.map(|c| c.score), Some(1));
        assert_ne!(first.session_id, second.session_id);
        assert!(with_shell(&shell, |state| state.celebration.is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_listener_raises_banner_on_timeout() {
        // Arrange
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(now()));
        let runtime = QuizRuntime::new(clock.clone(), std::time::Duration::from_secs(1));
        let shell: SharedShell = Arc::default();
        let _listener = spawn_completion_listener(&runtime, shell.clone(), clock);

        // Act
        let view = runtime.start(sample_bank(2), 2).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2500)).await;

        // Assert
        let celebration = with_shell(&shell, |state| state.celebration.clone()).unwrap();
        assert_eq!(Some(celebration.session_id), view.session_id);
        assert_eq!(celebration.summary.reason, CompletionReason::TimedOut);
        assert_eq!(celebration.summary.score, 0);
        assert_eq!(celebration.message, "Quiz Completed! Your score: 0 out of 2");
    }
}
