//! # Recursive Step Proofs
//!
//! Proof generation and verification for one step of a recursive program.
//!
//! A proof binds the program, the step identifier, the public input and
//! output, the seals and public outputs of every prior proof the step
//! consumed, and a commitment to the private witness. The statement is sealed with a keyed
//! BLAKE3 MAC derived from the [`AttestationKey`], so only a holder of the
//! key can produce a proof that verifies.
//!
//! The prover refuses to consume a prior proof that does not verify, which
//! makes validity transitive: a verifying proof can only descend from a
//! chain of verifying proofs.

use crate::commitment::{HashOutput, MerkleCommitment};
use crate::errors::ZkpError;
use crate::field::FieldElement;
use crate::key::AttestationKey;
use crate::polynomial::Polynomial;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const PROGRAM_DOMAIN: &[u8] = b"ma-zkp/program";
const TRANSCRIPT_DOMAIN: &[u8] = b"ma-zkp/transcript/v1";
const SEAL_CONTEXT: &str = "ma-zkp certificate seal v1";

/// Zero-knowledge proof of one program step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Digest of the program name
    pub program: HashOutput,
    /// Step identifier within the program
    pub step: u8,
    /// Public input
    pub public_input: Vec<FieldElement>,
    /// Public output
    pub public_output: Vec<FieldElement>,
    /// Seals of the proofs this step consumed
    pub prior_seals: Vec<HashOutput>,
    /// Public outputs of the proofs this step consumed, in the same order
    pub prior_outputs: Vec<Vec<FieldElement>>,
    /// Commitment to the private witness
    pub witness_commitment: HashOutput,
    /// Fiat-Shamir challenge
    pub challenge: FieldElement,
    /// Witness polynomial opened at the challenge
    pub opening: FieldElement,
    /// Keyed MAC over the whole statement
    pub seal: HashOutput,
}

/// Prover for generating step proofs.
#[derive(Clone, Debug)]
pub struct Prover {
    program: HashOutput,
    key: Arc<AttestationKey>,
}

impl Prover {
    /// Create a prover for the named program.
    pub fn new(program_name: &str, key: AttestationKey) -> Self {
        Self {
            program: program_digest(program_name),
            key: Arc::new(key),
        }
    }

    /// Verifier sharing this prover's program and key.
    pub fn verifier(&self) -> Verifier {
        Verifier {
            program: self.program,
            key: Arc::clone(&self.key),
        }
    }

    /// Prove one step.
    ///
    /// Every entry in `priors` is verified first; the step is not proven
    /// if any of them fails.
    pub fn prove(
        &self,
        step: u8,
        public_input: &[FieldElement],
        public_output: &[FieldElement],
        priors: &[&Proof],
        witness: &[FieldElement],
    ) -> Result<Proof, ZkpError> {
        let verifier = self.verifier();

        // 1. Recursive verification of every consumed proof
        for (index, prior) in priors.iter().enumerate() {
            verifier
                .check(prior)
                .map_err(|_| ZkpError::PriorProofInvalid { index })?;
        }

        // 2. Commit to witness
        let witness_commitment = *MerkleCommitment::commit(witness).root();

        let prior_seals: Vec<HashOutput> = priors.iter().map(|p| p.seal).collect();
        let prior_outputs: Vec<Vec<FieldElement>> =
            priors.iter().map(|p| p.public_output.clone()).collect();

        // 3. Fiat-Shamir challenge over the statement
        let statement = statement_digest(
            &self.program,
            step,
            public_input,
            public_output,
            &prior_seals,
            &prior_outputs,
            &witness_commitment,
        );
        let challenge = FieldElement::from_digest(&statement);

        // 4. Open witness polynomial at the challenge
        let opening = Polynomial::new(witness.to_vec()).evaluate(challenge);

        // 5. Seal
        let seal = seal(&self.key, &statement, opening);

        Ok(Proof {
            program: self.program,
            step,
            public_input: public_input.to_vec(),
            public_output: public_output.to_vec(),
            prior_seals,
            prior_outputs,
            witness_commitment,
            challenge,
            opening,
            seal,
        })
    }
}

/// Verifier for checking step proofs.
#[derive(Clone, Debug)]
pub struct Verifier {
    program: HashOutput,
    key: Arc<AttestationKey>,
}

impl Verifier {
    /// Verify a proof.
    pub fn verify(&self, proof: &Proof) -> bool {
        self.check(proof).is_ok()
    }

    /// Verify a proof, reporting failure as an error.
    pub fn check(&self, proof: &Proof) -> Result<(), ZkpError> {
        // 1. Proof must belong to this program and list one output per prior
        if proof.program != self.program || proof.prior_outputs.len() != proof.prior_seals.len() {
            return Err(ZkpError::VerificationFailed);
        }

        // 2. Challenge must match (Fiat-Shamir check)
        let statement = statement_digest(
            &proof.program,
            proof.step,
            &proof.public_input,
            &proof.public_output,
            &proof.prior_seals,
            &proof.prior_outputs,
            &proof.witness_commitment,
        );
        if proof.challenge != FieldElement::from_digest(&statement) {
            return Err(ZkpError::VerificationFailed);
        }

        // 3. Seal must match (constant-time comparison)
        let expected = blake3::Hash::from(seal(&self.key, &statement, proof.opening));
        if expected != blake3::Hash::from(proof.seal) {
            return Err(ZkpError::VerificationFailed);
        }

        Ok(())
    }
}

fn program_digest(name: &str) -> HashOutput {
    let mut hasher = blake3::Hasher::new();
    hasher.update(PROGRAM_DOMAIN);
    hasher.update(name.as_bytes());
    *hasher.finalize().as_bytes()
}

/// Length-prefixed absorption so that adjacent fields cannot be confused.
struct Transcript(blake3::Hasher);

impl Transcript {
    fn new() -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(TRANSCRIPT_DOMAIN);
        Self(hasher)
    }

    fn absorb_bytes(&mut self, label: &[u8], bytes: &[u8]) {
        self.0.update(&(label.len() as u64).to_le_bytes());
        self.0.update(label);
        self.0.update(&(bytes.len() as u64).to_le_bytes());
        self.0.update(bytes);
    }

    fn absorb_fields(&mut self, label: &[u8], elements: &[FieldElement]) {
        let bytes: Vec<u8> = elements.iter().flat_map(|e| e.to_le_bytes()).collect();
        self.absorb_bytes(label, &bytes);
    }

    fn finish(self) -> HashOutput {
        *self.0.finalize().as_bytes()
    }
}

fn statement_digest(
    program: &HashOutput,
    step: u8,
    public_input: &[FieldElement],
    public_output: &[FieldElement],
    prior_seals: &[HashOutput],
    prior_outputs: &[Vec<FieldElement>],
    witness_commitment: &HashOutput,
) -> HashOutput {
    let mut transcript = Transcript::new();
    transcript.absorb_bytes(b"program", program);
    transcript.absorb_bytes(b"step", &[step]);
    transcript.absorb_fields(b"public_input", public_input);
    transcript.absorb_fields(b"public_output", public_output);
    transcript.absorb_bytes(b"prior_seals", &prior_seals.concat());
    for output in prior_outputs {
        transcript.absorb_fields(b"prior_output", output);
    }
    transcript.absorb_bytes(b"witness", witness_commitment);
    transcript.finish()
}

fn seal(key: &AttestationKey, statement: &HashOutput, opening: FieldElement) -> HashOutput {
    let mac_key = blake3::derive_key(SEAL_CONTEXT, key.as_bytes());
    let mut hasher = blake3::Hasher::new_keyed(&mac_key);
    hasher.update(statement);
    hasher.update(&opening.to_le_bytes());
    *hasher.finalize().as_bytes()
}
