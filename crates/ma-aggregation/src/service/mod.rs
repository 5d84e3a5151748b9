//! Service layer
//!
//! Orchestrates domain logic and coordinates with external dependencies.

mod aggregation_service;
mod state_gate;

pub use aggregation_service::AggregationService;
pub use state_gate::StateGateService;
