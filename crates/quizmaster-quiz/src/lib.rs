//! Quizmaster: Quiz Session context.
//!
//! Responsible for question sequencing, the per-session countdown, answer to
//! score reconciliation and completion detection.

pub mod application;
pub mod domain;
