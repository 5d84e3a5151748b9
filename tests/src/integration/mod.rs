//! # Integration Tests
//!
//! Exercise `ma-aggregation` end to end with the real attestation engine
//! and the in-memory counter store.

pub mod fixtures;

mod concurrency;
mod flows;
mod tampering;
