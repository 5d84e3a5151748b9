//! ZKP Attestation Engine Adapter
//!
//! Implements the `AttestationEngine` port on top of `ma-zkp`.
//!
//! The engine runs the fold transition itself, so a certificate's output is
//! never taken from the caller. Public values are encoded as `u64` limbs,
//! the folded payload becomes the private witness, and the resulting
//! `ma_zkp::Proof` is stored in the certificate as opaque bincode bytes.

use crate::algorithms::next_output;
use crate::domain::{
    AggregationConfig, AggregationError, AggregationOutput, Certificate, Payload,
    SequenceNumber, StepKind,
};
use crate::ports::outbound::AttestationEngine;
use ma_zkp::{AttestationKey, FieldElement, Proof, Prover, Verifier};
use tracing::{debug, warn};

/// Attestation engine backed by `ma-zkp` keyed proofs.
pub struct ZkpAttestationEngine {
    prover: Prover,
    verifier: Verifier,
}

impl ZkpAttestationEngine {
    /// Create an engine for the configured program with the given key.
    pub fn new(config: &AggregationConfig, key: AttestationKey) -> Result<Self, AggregationError> {
        config.validate()?;
        let prover = Prover::new(&config.program_name, key);
        let verifier = prover.verifier();
        Ok(Self { prover, verifier })
    }

    /// Create an engine with a freshly generated key.
    pub fn with_random_key(config: &AggregationConfig) -> Result<Self, AggregationError> {
        Self::new(config, AttestationKey::generate())
    }

    fn decode(certificate: &Certificate) -> Option<Proof> {
        bincode::deserialize(certificate.proof()).ok()
    }
}

fn witness_of(payload: Option<&Payload>) -> Vec<FieldElement> {
    payload
        .map(|p| {
            vec![
                FieldElement::from(p.agent_id),
                FieldElement::from(p.x_location),
                FieldElement::from(p.y_location),
                FieldElement::from(p.checksum),
            ]
        })
        .unwrap_or_default()
}

/// Whether `output` is a legal successor of `prior` at `sequence_number`.
///
/// The payload is private, so only the shape of the transition can be
/// checked here: the output either stays at `prior` or jumps up to the
/// sequence number.
fn is_legal_successor(
    prior: SequenceNumber,
    sequence_number: SequenceNumber,
    output: SequenceNumber,
) -> bool {
    output == prior || (output == sequence_number && sequence_number > prior)
}

impl AttestationEngine for ZkpAttestationEngine {
    fn attest(
        &self,
        step: StepKind,
        public_input: SequenceNumber,
        prior: Option<&Certificate>,
        witness: Option<&Payload>,
    ) -> Result<Certificate, AggregationError> {
        let (prior_proof, public_output) = match (step, prior, witness) {
            (StepKind::Genesis, None, None) if public_input == 0 => {
                (None, AggregationOutput::GENESIS)
            }
            (StepKind::Genesis, None, None) => {
                return Err(AggregationError::InvalidConfig(format!(
                    "genesis step takes public input 0, got {public_input}"
                )))
            }
            (StepKind::Genesis, _, _) => {
                return Err(AggregationError::InvalidConfig(
                    "genesis step takes no prior certificate or witness".to_string(),
                ))
            }
            (StepKind::Fold, Some(prior), Some(payload)) => {
                let proof = Self::decode(prior)
                    .filter(|_| self.verify(prior))
                    .ok_or(AggregationError::VerificationFailed { step: prior.step() })?;
                (Some(proof), next_output(prior.output(), public_input, payload))
            }
            (StepKind::Fold, None, _) => {
                return Err(AggregationError::InvalidConfig(
                    "fold step requires a prior certificate".to_string(),
                ))
            }
            (StepKind::Fold, Some(_), None) => {
                return Err(AggregationError::InvalidConfig(
                    "fold step requires a payload witness".to_string(),
                ))
            }
        };

        let priors: Vec<&Proof> = prior_proof.iter().collect();
        let proof = self.prover.prove(
            step.id(),
            &FieldElement::limbs(public_input),
            &FieldElement::limbs(public_output.highest_accepted_number),
            &priors,
            &witness_of(witness),
        )?;

        let bytes =
            bincode::serialize(&proof).map_err(|e| AggregationError::Encoding(e.to_string()))?;

        debug!(
            step = %step,
            public_input,
            output = public_output.highest_accepted_number,
            "[ma-zkp] Step attested"
        );

        Ok(Certificate::new(step, public_input, public_output, bytes))
    }

    fn verify(&self, certificate: &Certificate) -> bool {
        let Some(proof) = Self::decode(certificate) else {
            warn!(step = %certificate.step(), "[ma-zkp] Undecodable proof");
            return false;
        };

        let input = certificate.public_input();
        let output = certificate.highest_accepted_number();

        // Output must follow from the output the step consumed
        let transition_holds = match (certificate.step(), proof.prior_outputs.as_slice()) {
            (StepKind::Genesis, []) => input == 0 && output == 0,
            (StepKind::Fold, [prior]) => FieldElement::from_limbs(prior)
                .is_some_and(|prior_value| is_legal_successor(prior_value, input, output)),
            _ => false,
        };

        // Certificate fields must be exactly what the proof attests
        transition_holds
            && proof.step == certificate.step().id()
            && proof.prior_seals.len() == proof.prior_outputs.len()
            && FieldElement::from_limbs(&proof.public_input) == Some(input)
            && FieldElement::from_limbs(&proof.public_output) == Some(output)
            && self.verifier.verify(&proof)
    }
}
