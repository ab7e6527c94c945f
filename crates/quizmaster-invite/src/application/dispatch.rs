//! The invitation dispatch contract.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::domain::email::EmailAddress;
use crate::domain::outcome::DispatchOutcome;

/// Default simulated delivery delay.
pub const DEFAULT_DISPATCH_DELAY: Duration = Duration::from_millis(1000);

/// Delivers an invitation to a friend.
#[async_trait]
pub trait InvitationDispatch: Send + Sync {
    /// Sends an invitation to `email`.
    async fn dispatch(&self, email: &EmailAddress) -> DispatchOutcome;
}

/// Simulated delivery: waits a fixed delay, then reports `Sent`.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedInvitationDispatch {
    delay: Duration,
}

impl SimulatedInvitationDispatch {
    /// Reports `Sent` for every address after `delay`.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedInvitationDispatch {
    fn default() -> Self {
        Self::new(DEFAULT_DISPATCH_DELAY)
    }
}

#[async_trait]
impl InvitationDispatch for SimulatedInvitationDispatch {
    async fn dispatch(&self, email: &EmailAddress) -> DispatchOutcome {
        tokio::time::sleep(self.delay).await;
        info!(%email, "invitation sent");
        DispatchOutcome::Sent
    }
}
