//! Quizmaster: Invitation Dispatch context.
//!
//! Sends a "quiz with a friend" invitation to an email address. Delivery is
//! simulated; nothing here touches the quiz session.

pub mod application;
pub mod domain;
