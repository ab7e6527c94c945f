//! Application layer: command/query handlers, content sources, the countdown
//! scheduler and the runtime that serializes them.

pub mod command_handlers;
pub mod content;
pub mod countdown;
pub mod query_handlers;
pub mod runtime;
