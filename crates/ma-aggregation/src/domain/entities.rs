//! # Domain Entities
//!
//! Aggregation output, certificates and state gate transactions.

use super::errors::AggregationError;
use super::payload::Payload;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message sequence number.
pub type SequenceNumber = u64;

/// Public output of every aggregation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregationOutput {
    /// Highest sequence number among valid payloads folded so far.
    pub highest_accepted_number: SequenceNumber,
}

impl AggregationOutput {
    /// Output declared by the genesis step.
    pub const GENESIS: Self = Self {
        highest_accepted_number: 0,
    };

    /// Create an output.
    pub fn new(highest_accepted_number: SequenceNumber) -> Self {
        Self {
            highest_accepted_number,
        }
    }
}

/// Which step of the recursive program produced a certificate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    /// Initial step, consumes nothing.
    Genesis,
    /// One entry folded onto a prior certificate.
    Fold,
}

impl StepKind {
    /// Step identifier used by the attestation engine.
    pub fn id(&self) -> u8 {
        match self {
            Self::Genesis => 0,
            Self::Fold => 1,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genesis => f.write_str("genesis"),
            Self::Fold => f.write_str("fold"),
        }
    }
}

/// Attested result of one aggregation step.
///
/// The `proof` bytes belong to the attestation engine and are never
/// interpreted by this crate. Whether a certificate is trustworthy is only
/// decided by `AttestationEngine::verify`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    step: StepKind,
    public_input: SequenceNumber,
    output: AggregationOutput,
    proof: Vec<u8>,
}

impl Certificate {
    /// Assemble a certificate. Intended for attestation engines.
    pub fn new(
        step: StepKind,
        public_input: SequenceNumber,
        output: AggregationOutput,
        proof: Vec<u8>,
    ) -> Self {
        Self {
            step,
            public_input,
            output,
            proof,
        }
    }

    /// Step that produced this certificate.
    pub fn step(&self) -> StepKind {
        self.step
    }

    /// Declared public input (the folded sequence number, 0 for genesis).
    pub fn public_input(&self) -> SequenceNumber {
        self.public_input
    }

    /// Attested output.
    pub fn output(&self) -> AggregationOutput {
        self.output
    }

    /// Shorthand for `output().highest_accepted_number`.
    pub fn highest_accepted_number(&self) -> SequenceNumber {
        self.output.highest_accepted_number
    }

    /// Opaque engine proof.
    pub fn proof(&self) -> &[u8] {
        &self.proof
    }

    /// Short hex tag for logs.
    pub fn tag(&self) -> String {
        hex::encode(&self.proof[self.proof.len().saturating_sub(4)..])
    }

    /// Encode for transport.
    pub fn to_bytes(&self) -> Result<Vec<u8>, AggregationError> {
        bincode::serialize(self).map_err(|e| AggregationError::Encoding(e.to_string()))
    }

    /// Decode a certificate produced by [`Certificate::to_bytes`].
    ///
    /// Decoding says nothing about validity; verify before trusting it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AggregationError> {
        bincode::deserialize(bytes).map_err(|e| AggregationError::Encoding(e.to_string()))
    }
}

/// One message to fold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Message number.
    pub sequence_number: SequenceNumber,
    /// Message data.
    pub payload: Payload,
}

impl BatchEntry {
    /// Create an entry.
    pub fn new(sequence_number: SequenceNumber, payload: Payload) -> Self {
        Self {
            sequence_number,
            payload,
        }
    }
}

/// A state gate write, pinned to the counter value observed when it was
/// built.
#[derive(Clone, Debug)]
pub struct GateTransaction {
    /// Counter value the write is conditioned on.
    pub expected_prior: u64,
    /// Certificate to merge.
    pub certificate: Certificate,
}

/// Result of a committed state gate write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateOutcome {
    /// Counter value before the write.
    pub previous: u64,
    /// Counter value after the write.
    pub stored: u64,
}

impl GateOutcome {
    /// Whether the counter moved.
    pub fn advanced(&self) -> bool {
        self.stored > self.previous
    }
}
