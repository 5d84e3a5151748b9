//! # Domain Module
//!
//! Core domain types for Message Aggregation.

pub mod config;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod payload;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use payload::*;
