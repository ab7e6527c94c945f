//! Quizmaster: Upload Ingestion context.
//!
//! Accepts an uploaded document and, after an unspecified latency, yields a
//! question bank to start a session with. Real document parsing is not done
//! here; the shipped implementation is a simulation.

pub mod application;
pub mod domain;
