//! Dispatch outcomes.

/// Result of sending an invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The invitation was handed off for delivery.
    Sent,
    /// Delivery failed; the reason is shown to the user.
    Failed(String),
}
