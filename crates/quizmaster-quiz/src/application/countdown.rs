//! Countdown scheduling.
//!
//! A [`CountdownScheduler`] owns at most one [`CountdownHandle`]: a spawned
//! task that calls back into a [`CountdownTarget`] once per interval for the
//! session it was armed for. Arming always cancels the previous handle first.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

/// Default countdown interval (one second).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What the countdown task should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking.
    Continue,
    /// The session is no longer active; stop the task.
    Stop,
}

/// Receiver of countdown ticks.
pub trait CountdownTarget: Send + Sync {
    /// Called once per interval with the session the countdown was armed for.
    fn on_tick(&self, session_id: Uuid) -> TickOutcome;
}

/// A running countdown for one session.
#[derive(Debug)]
pub struct CountdownHandle {
    session_id: Uuid,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    /// The session this countdown was armed for.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Returns `true` once the task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    fn cancel(self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

/// Arms and cancels the countdown task.
#[derive(Debug)]
pub struct CountdownScheduler {
    interval: Duration,
    active: Option<CountdownHandle>,
}

impl CountdownScheduler {
    /// Creates a scheduler that ticks every `interval`.
    ///
    /// Intervals shorter than a millisecond are rounded up to one.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            active: None,
        }
    }

    /// The tick interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cancels any running countdown, then starts one for `session_id`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn arm(&mut self, session_id: Uuid, target: Arc<dyn CountdownTarget>) {
        self.cancel();

        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_countdown(
            session_id,
            self.interval,
            cancel.clone(),
            target,
        ));
        debug!(%session_id, interval_ms = self.interval.as_millis(), "countdown armed");
        self.active = Some(CountdownHandle {
            session_id,
            cancel,
            task,
        });
    }

    /// Cancels the running countdown, if any, returning the session it was
    /// armed for.
    ///
    /// The cancellation token is flipped and the task aborted before this
    /// returns, so no further tick is delivered from it.
    pub fn cancel(&mut self) -> Option<Uuid> {
        let handle = self.active.take()?;
        let session_id = handle.session_id();
        handle.cancel();
        debug!(%session_id, "countdown cancelled");
        Some(session_id)
    }

    /// Forgets the handle for `session_id` without aborting its task.
    ///
    /// Used from inside a tick that has just ended the session; the task exits
    /// on its own once the tick returns [`TickOutcome::Stop`].
    pub fn release(&mut self, session_id: Uuid) {
        if self
            .active
            .as_ref()
            .is_some_and(|handle| handle.session_id() == session_id)
        {
            if let Some(handle) = self.active.take() {
                handle.cancel.cancel();
            }
        }
    }

    /// The session whose countdown is currently running.
    #[must_use]
    pub fn armed_session(&self) -> Option<Uuid> {
        self.active
            .as_ref()
            .filter(|handle| !handle.is_finished() && !handle.cancel.is_cancelled())
            .map(CountdownHandle::session_id)
    }
}

impl Drop for CountdownScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_countdown(
    session_id: Uuid,
    period: Duration,
    cancel: CancellationToken,
    target: Arc<dyn CountdownTarget>,
) {
    let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticks.tick() => {
                if cancel.is_cancelled() || target.on_tick(session_id) == TickOutcome::Stop {
                    break;
                }
            }
        }
    }
    debug!(%session_id, "countdown task exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every tick; stops after `limit` ticks.
    struct CountingTarget {
        ticks: Mutex<Vec<Uuid>>,
        limit: usize,
    }

    impl CountingTarget {
        fn new(limit: usize) -> Arc<Self> {
            Arc::new(Self {
                ticks: Mutex::new(Vec::new()),
                limit,
            })
        }

        fn ticks(&self) -> Vec<Uuid> {
            self.ticks.lock().unwrap().clone()
        }
    }

    impl CountdownTarget for CountingTarget {
        fn on_tick(&self, session_id: Uuid) -> TickOutcome {
            let mut ticks = self.ticks.lock().unwrap();
            ticks.push(session_id);
            if ticks.len() >= self.limit {
                TickOutcome::Stop
            } else {
                TickOutcome::Continue
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_arm_ticks_once_per_interval() {
        // Arrange
        let target = CountingTarget::new(usize::MAX);
        let mut scheduler = CountdownScheduler::new(DEFAULT_TICK_INTERVAL);
        let session_id = Uuid::new_v4();

        // Act
        scheduler.arm(session_id, target.clone());
        tokio::time::sleep(Duration::from_millis(3500)).await;

        // Assert
        assert_eq!(target.ticks(), vec![session_id; 3]);
        assert_eq!(scheduler.armed_session(), Some(session_id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_before_first_full_interval() {
        let target = CountingTarget::new(usize::MAX);
        let mut scheduler = CountdownScheduler::new(DEFAULT_TICK_INTERVAL);

        scheduler.arm(Uuid::new_v4(), target.clone());
        tokio::time::sleep(Duration::from_millis(999)).await;

        assert!(target.ticks().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks_immediately() {
        // Arrange
        let target = CountingTarget::new(usize::MAX);
        let mut scheduler = CountdownScheduler::new(DEFAULT_TICK_INTERVAL);
        let session_id = Uuid::new_v4();
        scheduler.arm(session_id, target.clone());
        tokio::time::sleep(Duration::from_millis(1500)).await;

        // Act
        let cancelled = scheduler.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;

        // Assert
        assert_eq!(cancelled, Some(session_id));
        assert_eq!(target.ticks().len(), 1);
        assert_eq!(scheduler.armed_session(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearming_cancels_previous_countdown() {
        // Arrange
        let first = CountingTarget::new(usize::MAX);
        let second = CountingTarget::new(usize::MAX);
        let mut scheduler = CountdownScheduler::new(DEFAULT_TICK_INTERVAL);
        let first_id = Uuid::new_v4();
        let second_id = Uuid::new_v4();
        scheduler.arm(first_id, first.clone());
        tokio::time::sleep(Duration::from_millis(1500)).await;

        // Act
        scheduler.arm(second_id, second.clone());
        tokio::time::sleep(Duration::from_millis(2200)).await;

        // Assert
        assert_eq!(first.ticks().len(), 1);
        assert_eq!(second.ticks(), vec![second_id; 2]);
        assert_eq!(scheduler.armed_session(), Some(second_id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_target_stop_ends_the_task() {
        let target = CountingTarget::new(2);
        let mut scheduler = CountdownScheduler::new(DEFAULT_TICK_INTERVAL);

        scheduler.arm(Uuid::new_v4(), target.clone());
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(target.ticks().len(), 2);
        assert_eq!(scheduler.armed_session(), None);
    }

    #[test]
    fn test_interval_is_rounded_up_to_one_millisecond() {
        assert_eq!(
            CountdownScheduler::new(Duration::ZERO).interval(),
            Duration::from_millis(1)
        );
        assert_eq!(
            CountdownScheduler::new(DEFAULT_TICK_INTERVAL).interval(),
            DEFAULT_TICK_INTERVAL
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_ignores_other_sessions() {
        let target = CountingTarget::new(usize::MAX);
        let mut scheduler = CountdownScheduler::new(DEFAULT_TICK_INTERVAL);
        let session_id = Uuid::new_v4();
        scheduler.arm(session_id, target);

        scheduler.release(Uuid::new_v4());
        assert_eq!(scheduler.armed_session(), Some(session_id));

        scheduler.release(session_id);
        assert_eq!(scheduler.armed_session(), None);
    }
}
