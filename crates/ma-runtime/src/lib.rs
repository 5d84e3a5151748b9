//! # MA Runtime Library
//!
//! Exposes the runtime wiring for testing. The entry point is the
//! `ma-runtime` binary.
//!
//! ## Run Sequence
//!
//! 1. Parse arguments (with `MA_*` environment fallbacks)
//! 2. Initialize telemetry
//! 3. Load the batch (or the demo batch)
//! 4. Aggregate from genesis
//! 5. Merge into the counter through the state gate

#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod runtime;

pub use batch::{demo_batch, load_batch, parse_batch, BatchError};
pub use config::RuntimeConfig;
pub use runtime::{AggregationRuntime, RunReport, MAX_SUBMIT_ATTEMPTS};
