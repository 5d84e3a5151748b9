//! # Monotonic Merge
//!
//! Counter update rule applied by the state gate.

/// New counter value: never below what is already stored.
pub fn merge_counter(stored: u64, attested: u64) -> u64 {
    stored.max(attested)
}
