//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Every variant is recoverable: the engine's state is left untouched and a
/// fresh `start` always succeeds with valid input.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed start parameters or an out-of-range option index.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The operation is not permitted in the session's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// An external collaborator (upload processing, invite delivery) failed.
    #[error("collaborator failed: {0}")]
    Collaborator(String),

    /// An infrastructure error, e.g. the question bank could not be read.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
