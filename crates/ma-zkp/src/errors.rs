//! ZKP error types.

use thiserror::Error;

/// Zero-knowledge proof errors.
#[derive(Debug, Error)]
pub enum ZkpError {
    /// Proof verification failed
    #[error("Proof verification failed")]
    VerificationFailed,

    /// A prior proof handed to the prover does not verify
    #[error("Prior proof {index} does not verify")]
    PriorProofInvalid {
        /// Position of the offending proof in the prior list
        index: usize,
    },
}
