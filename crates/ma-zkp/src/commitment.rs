//! # Merkle Commitment
//!
//! Binary Merkle commitment over the private witness of a step. Leaves and
//! inner nodes are hashed with distinct BLAKE3 domain prefixes.

use crate::field::FieldElement;

/// BLAKE3 hash output.
pub type HashOutput = [u8; 32];

const LEAF_DOMAIN: &[u8] = b"ma-zkp/merkle/leaf";
const NODE_DOMAIN: &[u8] = b"ma-zkp/merkle/node";

/// Merkle tree commitment for field element vectors.
#[derive(Clone, Debug)]
pub struct MerkleCommitment {
    root: HashOutput,
    leaf_count: usize,
}

impl MerkleCommitment {
    /// Commit to a vector of field elements.
    ///
    /// The empty vector commits to the all-zero root.
    pub fn commit(values: &[FieldElement]) -> Self {
        if values.is_empty() {
            return Self {
                root: [0u8; 32],
                leaf_count: 0,
            };
        }

        let mut layer: Vec<HashOutput> = values.iter().map(hash_leaf).collect();

        while layer.len() > 1 {
            // Pad to even length
            if layer.len() % 2 == 1 {
                layer.push([0u8; 32]);
            }
            layer = layer
                .chunks(2)
                .map(|pair| hash_pair(&pair[0], &pair[1]))
                .collect();
        }

        Self {
            root: layer[0],
            leaf_count: values.len(),
        }
    }

    /// Get commitment root.
    pub fn root(&self) -> &HashOutput {
        &self.root
    }

    /// Number of committed values.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }
}

fn hash_leaf(elem: &FieldElement) -> HashOutput {
    let mut hasher = blake3::Hasher::new();
    hasher.update(LEAF_DOMAIN);
    hasher.update(&elem.to_le_bytes());
    *hasher.finalize().as_bytes()
}

fn hash_pair(left: &HashOutput, right: &HashOutput) -> HashOutput {
    let mut hasher = blake3::Hasher::new();
    hasher.update(NODE_DOMAIN);
    hasher.update(left);
    hasher.update(right);
    *hasher.finalize().as_bytes()
}
