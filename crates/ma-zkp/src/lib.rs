//! # MA-ZKP: Step Attestation
//!
//! Attestation engine for recursive programs over the Goldilocks field.
//!
//! ## Components
//!
//! - `field` - Goldilocks field arithmetic (p = 2^64 - 2^32 + 1) and `u64` limb encoding
//! - `polynomial` - Witness polynomial opening
//! - `commitment` - Merkle commitments to the private witness
//! - `key` - Attestation key shared by prover and verifier
//! - `proof` - Proof generation and verification

#![warn(missing_docs)]

pub mod commitment;
pub mod errors;
pub mod field;
pub mod key;
pub mod polynomial;
pub mod proof;

pub use commitment::{HashOutput, MerkleCommitment};
pub use errors::ZkpError;
pub use field::FieldElement;
pub use key::AttestationKey;
pub use polynomial::Polynomial;
pub use proof::{Proof, Prover, Verifier};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
