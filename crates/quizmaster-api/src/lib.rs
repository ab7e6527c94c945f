//! Quizmaster API: HTTP shell around the quiz session engine.

pub mod config;
pub mod error;
pub mod routes;
pub mod shell;
pub mod state;
