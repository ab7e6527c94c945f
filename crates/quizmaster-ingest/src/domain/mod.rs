//! Domain layer: uploaded documents and ingestion outcomes.

pub mod document;
pub mod outcome;
