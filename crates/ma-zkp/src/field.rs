//! # Goldilocks Field
//!
//! Prime field with p = 2^64 - 2^32 + 1 (the "Goldilocks" prime).
//!
//! Public inputs and outputs of an attested step are encoded as field
//! elements before they enter the transcript. A `u64` does not fit in a
//! single element (p < 2^64), so it is carried as two 32-bit limbs.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Goldilocks prime: p = 2^64 - 2^32 + 1
pub const GOLDILOCKS_PRIME: u64 = 0xFFFF_FFFF_0000_0001;

/// Element in the Goldilocks field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldElement(u64);

impl FieldElement {
    /// Create new field element (reduces mod p).
    pub fn new(value: u64) -> Self {
        Self(value % GOLDILOCKS_PRIME)
    }

    /// Create from u128, reducing mod p.
    pub fn from_u128(value: u128) -> Self {
        Self((value % GOLDILOCKS_PRIME as u128) as u64)
    }

    /// Derive an element from the first eight bytes of a digest.
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Self::new(u64::from_le_bytes(bytes))
    }

    /// Get the raw value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Canonical little-endian encoding.
    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Split a `u64` into `[low, high]` 32-bit limbs.
    pub fn limbs(value: u64) -> [FieldElement; 2] {
        [
            FieldElement(value & 0xFFFF_FFFF),
            FieldElement(value >> 32),
        ]
    }

    /// Rebuild a `u64` from limbs produced by [`FieldElement::limbs`].
    ///
    /// Returns `None` if the slice is not exactly two limbs or a limb is
    /// wider than 32 bits.
    pub fn from_limbs(limbs: &[FieldElement]) -> Option<u64> {
        match limbs {
            [low, high] if low.0 <= u32::MAX as u64 && high.0 <= u32::MAX as u64 => {
                Some(low.0 | (high.0 << 32))
            }
            _ => None,
        }
    }
}

impl From<u32> for FieldElement {
    fn from(value: u32) -> Self {
        Self(value as u64)
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        // Use u128 to avoid overflow
        let sum = self.0 as u128 + rhs.0 as u128;
        Self::from_u128(sum)
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let product = self.0 as u128 * rhs.0 as u128;
        Self::from_u128(product)
    }
}
