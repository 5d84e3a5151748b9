//! # Inbound Ports
//!
//! API traits defining what the Message Aggregation subsystem can do.

use crate::domain::{
    AggregationError, BatchEntry, Certificate, GateOutcome, GateTransaction, Payload,
    SequenceNumber,
};
use async_trait::async_trait;

/// Recursive aggregation API - inbound port.
pub trait MessageAggregationApi: Send + Sync {
    /// Initial certificate, declaring a highest accepted number of 0.
    fn genesis(&self) -> Result<Certificate, AggregationError>;

    /// Fold one entry onto a prior certificate.
    ///
    /// Fails with `VerificationFailed` if `prior` does not verify. An
    /// invalid payload is not an error; it leaves the output unchanged.
    fn fold(
        &self,
        sequence_number: SequenceNumber,
        prior: &Certificate,
        payload: &Payload,
    ) -> Result<Certificate, AggregationError>;

    /// Genesis followed by one fold per entry, in the given order.
    fn aggregate(&self, entries: &[BatchEntry]) -> Result<Certificate, AggregationError>;

    /// Fold every entry onto an existing certificate.
    fn extend(
        &self,
        prior: &Certificate,
        entries: &[BatchEntry],
    ) -> Result<Certificate, AggregationError>;
}

/// State gate API - inbound port.
///
/// Single mutator of the persistent counter.
#[async_trait]
pub trait StateGateApi: Send + Sync {
    /// Current stored value (read-only).
    async fn current(&self) -> Result<u64, AggregationError>;

    /// Build a transaction pinned to the counter value read now.
    async fn prepare(&self, certificate: Certificate) -> Result<GateTransaction, AggregationError>;

    /// Verify and commit a prepared transaction.
    ///
    /// Fails with `StaleState` if the counter moved since `prepare`.
    async fn submit(&self, transaction: GateTransaction) -> Result<GateOutcome, AggregationError>;

    /// `prepare` then `submit`.
    async fn apply(&self, certificate: Certificate) -> Result<GateOutcome, AggregationError>;
}
