//! # Domain Errors
//!
//! Error types for Message Aggregation.
//!
//! A payload that fails validation is not an error: it simply does not move
//! the running maximum.

use super::entities::StepKind;
use ma_zkp::ZkpError;
use thiserror::Error;

/// Message aggregation error types.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// A supplied certificate does not verify. Fatal for the operation.
    #[error("Certificate verification failed ({step} step)")]
    VerificationFailed {
        /// Step that produced the rejected certificate.
        step: StepKind,
    },

    /// The counter moved between read and conditional write. Retryable.
    #[error("Stale state: expected counter {expected}, found {actual}")]
    StaleState {
        /// Value the transaction was built against.
        expected: u64,
        /// Value found at write time.
        actual: u64,
    },

    /// The attestation engine refused to attest.
    #[error("Attestation error: {0}")]
    Attestation(#[from] ZkpError),

    /// Certificate or proof encoding error.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Counter store failure.
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid configuration or request shape.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AggregationError {
    /// Whether resubmitting with freshly read state may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StaleState { .. })
    }
}
