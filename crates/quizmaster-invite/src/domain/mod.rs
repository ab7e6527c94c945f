//! Domain layer: email addresses and dispatch outcomes.

pub mod email;
pub mod outcome;
