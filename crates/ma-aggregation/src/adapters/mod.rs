//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for message aggregation.

mod memory_counter;
mod zkp_engine;

pub use memory_counter::InMemoryCounterStore;
pub use zkp_engine::ZkpAttestationEngine;
