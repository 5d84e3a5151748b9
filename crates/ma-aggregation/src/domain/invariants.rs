//! # Domain Invariants
//!
//! Rules every transition of the aggregation chain and the counter obeys.

use super::entities::AggregationOutput;
use super::payload::Payload;

/// Invariant: the running maximum never decreases along a chain.
pub fn invariant_output_non_decreasing(prior: AggregationOutput, next: AggregationOutput) -> bool {
    next.highest_accepted_number >= prior.highest_accepted_number
}

/// Invariant: an invalid payload is absorbed.
///
/// Folding an invalid payload must reproduce the prior output exactly.
pub fn invariant_invalid_is_identity(
    prior: AggregationOutput,
    next: AggregationOutput,
    payload: &Payload,
) -> bool {
    payload.is_valid() || prior == next
}

/// Invariant: the persistent counter never moves backwards.
pub fn invariant_counter_monotone(previous: u64, stored: u64) -> bool {
    stored >= previous
}
