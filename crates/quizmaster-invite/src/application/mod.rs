//! Application layer: the dispatch contract and its simulated implementation.

pub mod dispatch;
