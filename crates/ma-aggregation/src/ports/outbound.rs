//! # Outbound Ports
//!
//! Traits for the external collaborators: the attestation engine and the
//! persistent counter store.

use crate::domain::{AggregationError, Certificate, Payload, SequenceNumber, StepKind};
use async_trait::async_trait;

/// Attestation engine - outbound port.
///
/// Produces and checks unforgeable certificates. The engine computes the
/// step output itself: callers choose only the step, its public input, the
/// prior certificate and the private witness. Implementations must refuse
/// to attest a step whose `prior` does not verify.
pub trait AttestationEngine: Send + Sync {
    /// Attest one step of the aggregation program.
    ///
    /// Genesis takes public input `0`, no prior and no witness, and always
    /// outputs [`AggregationOutput::GENESIS`](crate::domain::AggregationOutput::GENESIS).
    /// A fold takes the sequence number, the prior certificate and the
    /// payload, and outputs the transition of the prior output.
    fn attest(
        &self,
        step: StepKind,
        public_input: SequenceNumber,
        prior: Option<&Certificate>,
        witness: Option<&Payload>,
    ) -> Result<Certificate, AggregationError>;

    /// Check a certificate, including that its output is a legal successor
    /// of the output it was folded from.
    fn verify(&self, certificate: &Certificate) -> bool;
}

/// Persistent counter store - outbound port.
///
/// Holds the single `highest_accepted` value. The conditional write is the
/// only mutation primitive and must be atomic with respect to itself.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Read the stored value.
    async fn read(&self) -> Result<u64, AggregationError>;

    /// Store `new` if the current value is still `expected_old`.
    ///
    /// Returns `Ok(false)` without writing if the value changed.
    async fn write_if_unchanged(&self, expected_old: u64, new: u64)
        -> Result<bool, AggregationError>;
}
