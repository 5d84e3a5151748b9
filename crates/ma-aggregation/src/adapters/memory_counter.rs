//! In-Memory Counter Store Adapter
//!
//! Implements `CounterStore` with a mutex-guarded value. The comparison and
//! the write happen under one lock acquisition.

use crate::domain::AggregationError;
use crate::ports::outbound::CounterStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

/// In-memory persistent counter, initialized to 0.
pub struct InMemoryCounterStore {
    value: Mutex<u64>,
}

impl InMemoryCounterStore {
    /// Create a store at 0.
    pub fn new() -> Self {
        Self::with_value(0)
    }

    /// Create a store preset to `value`.
    pub fn with_value(value: u64) -> Self {
        Self {
            value: Mutex::new(value),
        }
    }
}

impl Default for InMemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn read(&self) -> Result<u64, AggregationError> {
        Ok(*self.value.lock())
    }

    async fn write_if_unchanged(
        &self,
        expected_old: u64,
        new: u64,
    ) -> Result<bool, AggregationError> {
        let mut value = self.value.lock();
        if *value != expected_old {
            debug!(
                expected = expected_old,
                actual = *value,
                "[ma-store] Conditional write rejected"
            );
            return Ok(false);
        }
        *value = new;
        Ok(true)
    }
}
