//! Shared test doubles and fixtures for the Quizmaster quiz engine.

mod clock;
mod collaborators;
mod content;

pub use clock::FixedClock;
pub use collaborators::{
    FailingInvitationDispatch, FailingUploadIngestion, InstantUploadIngestion,
    RecordingInvitationDispatch,
};
pub use content::{FailingQuizContent, sample_bank};
