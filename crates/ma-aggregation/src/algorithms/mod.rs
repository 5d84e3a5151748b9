//! # Algorithms Module
//!
//! Pure transition rules for the aggregation chain and the counter.

pub mod fold;
pub mod merge;

pub use fold::{is_accepted, next_output};
pub use merge::merge_counter;
