//! # Attestation Key
//!
//! Secret shared by the prover and the verifier of one program. Whoever
//! holds it can mint certificates, so it never leaves the engine.

use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use zeroize::Zeroize;

/// 256-bit attestation key, zeroized on drop.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct AttestationKey([u8; 32]);

impl AttestationKey {
    /// Generate a fresh key from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Wrap existing key material.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for AttestationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AttestationKey(..)")
    }
}
