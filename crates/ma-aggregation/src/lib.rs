//! # Message Aggregation
//!
//! Verifiable running maximum over a stream of sequence-numbered messages.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Validate message payloads against fixed bounds and a checksum
//! - Fold messages one at a time into a chain of attested certificates
//! - Merge a finished certificate into a persistent counter that never
//!   moves backwards
//!
//! ## Guarantees
//!
//! | Property | Where it holds |
//! |----------|----------------|
//! | Invalid payloads never move the maximum | `algorithms::fold` |
//! | Every fold verifies its prior | `service::AggregationService` |
//! | Step outputs are computed by the engine | `adapters::ZkpAttestationEngine` |
//! | Counter is monotone | `algorithms::merge` |
//! | Stale writes are rejected | `service::StateGateService` |
//!
//! ## Module Structure
//!
//! ```text
//! ma-aggregation/
//! ├── domain/          # Payload, Certificate, config, errors
//! ├── algorithms/      # Fold and merge transitions
//! ├── ports/           # MessageAggregationApi, StateGateApi, engines, stores
//! ├── adapters/        # ma-zkp engine, in-memory counter
//! └── service/         # Aggregation and state gate services
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryCounterStore, ZkpAttestationEngine};
pub use algorithms::{is_accepted, merge_counter, next_output};
pub use domain::{
    invariant_counter_monotone, invariant_invalid_is_identity, invariant_output_non_decreasing,
    AggregationConfig, AggregationError, AggregationOutput, BatchEntry, Certificate,
    GateOutcome, GateTransaction, Payload, PayloadViolation, SequenceNumber, StepKind,
    BYPASS_AGENT_ID, DEFAULT_MAX_BATCH_SIZE, DEFAULT_PROGRAM_NAME, MAX_AGENT_ID,
    MAX_X_LOCATION, MAX_Y_LOCATION, MIN_Y_LOCATION,
};
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::{AttestationEngine, CounterStore, MessageAggregationApi, StateGateApi};
pub use service::{AggregationService, StateGateService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
