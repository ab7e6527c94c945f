//! Application layer: the ingestion contract and its simulated implementation.

pub mod ingestion;
