//! # Fold Step
//!
//! Output transition of one aggregation step. Takes the prior output and
//! one entry; never looks at earlier entries.

use crate::domain::{AggregationOutput, Payload, SequenceNumber};

/// Whether an entry raises the running maximum.
pub fn is_accepted(
    prior: AggregationOutput,
    sequence_number: SequenceNumber,
    payload: &Payload,
) -> bool {
    payload.is_valid() && sequence_number > prior.highest_accepted_number
}

/// Output after folding one entry.
///
/// Result is `max(prior, sequence_number)` when the payload is valid and
/// `prior` otherwise, so the output never decreases and the final value is
/// independent of folding order.
pub fn next_output(
    prior: AggregationOutput,
    sequence_number: SequenceNumber,
    payload: &Payload,
) -> AggregationOutput {
    if is_accepted(prior, sequence_number, payload) {
        AggregationOutput::new(sequence_number)
    } else {
        prior
    }
}
