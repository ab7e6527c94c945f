//! Quizmaster Core: shared domain abstractions.
//!
//! This crate defines the traits and types every quiz context depends on:
//! time, commands, domain events, the question bank and the error taxonomy.
//! It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod content;
pub mod error;
pub mod event;
pub mod question;
