//! Message Aggregation Service
//!
//! Implements the recursive aggregation program on top of an injected
//! attestation engine.
//!
//! Every fold step verifies its prior certificate before reading the prior
//! output. Invalid payloads are absorbed into the arithmetic of the step and
//! never surface as errors.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::algorithms::{is_accepted, next_output};
use crate::domain::{
    invariant_invalid_is_identity, invariant_output_non_decreasing, AggregationConfig,
    AggregationError, BatchEntry, Certificate, Payload, SequenceNumber, StepKind,
};
use crate::metrics::Metrics;
use crate::ports::{AttestationEngine, MessageAggregationApi};

/// Aggregation service implementation
///
/// Implements the `MessageAggregationApi` port using an injected engine.
pub struct AggregationService<E: AttestationEngine> {
    /// Attestation engine (driven port)
    engine: Arc<E>,
    /// Service configuration
    config: AggregationConfig,
    /// Shared counters
    metrics: Arc<Metrics>,
}

impl<E: AttestationEngine> AggregationService<E> {
    /// Create a new service with the given engine and configuration
    pub fn new(engine: Arc<E>, config: AggregationConfig) -> Result<Self, AggregationError> {
        config.validate()?;
        Ok(Self {
            engine,
            config,
            metrics: Arc::new(Metrics::new()),
        })
    }

    /// Share a metrics collector with other services
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Metrics collector used by this service
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    fn check_batch(&self, entries: &[BatchEntry]) -> Result<(), AggregationError> {
        if entries.len() > self.config.max_batch_size {
            return Err(AggregationError::InvalidConfig(format!(
                "batch of {} entries exceeds max_batch_size {}",
                entries.len(),
                self.config.max_batch_size
            )));
        }
        Ok(())
    }

    fn require_verified(&self, certificate: &Certificate) -> Result<(), AggregationError> {
        if self.engine.verify(certificate) {
            return Ok(());
        }
        self.metrics.record_verification_failure();
        warn!(
            step = %certificate.step(),
            claimed = certificate.highest_accepted_number(),
            "[ma-aggregation] Prior certificate failed verification"
        );
        Err(AggregationError::VerificationFailed {
            step: certificate.step(),
        })
    }

    fn fold_entries(
        &self,
        start: Certificate,
        entries: &[BatchEntry],
    ) -> Result<Certificate, AggregationError> {
        entries.iter().try_fold(start, |prior, entry| {
            self.fold(entry.sequence_number, &prior, &entry.payload)
        })
    }
}

impl<E: AttestationEngine> MessageAggregationApi for AggregationService<E> {
    fn genesis(&self) -> Result<Certificate, AggregationError> {
        let certificate = self.engine.attest(StepKind::Genesis, 0, None, None)?;
        self.metrics.record_genesis();
        debug!(tag = %certificate.tag(), "[ma-aggregation] Genesis certificate issued");
        Ok(certificate)
    }

    fn fold(
        &self,
        sequence_number: SequenceNumber,
        prior: &Certificate,
        payload: &Payload,
    ) -> Result<Certificate, AggregationError> {
        // 1. Recursive verification gates everything else
        self.require_verified(prior)?;

        // 2. Attest; the engine runs the transition
        let certificate =
            self.engine
                .attest(StepKind::Fold, sequence_number, Some(prior), Some(payload))?;

        // 3. Step invariants on the attested output
        let prior_output = prior.output();
        let output = certificate.output();
        let valid = payload.is_valid();
        let accepted = is_accepted(prior_output, sequence_number, payload);
        debug_assert_eq!(output, next_output(prior_output, sequence_number, payload));
        debug_assert!(invariant_output_non_decreasing(prior_output, output));
        debug_assert!(invariant_invalid_is_identity(prior_output, output, payload));

        if let Some(violation) = payload.first_violation() {
            trace!(sequence_number, %violation, "[ma-aggregation] Payload absorbed");
        }
        self.metrics.record_fold(accepted, valid);

        debug!(
            sequence_number,
            valid,
            accepted,
            highest = output.highest_accepted_number,
            "[ma-aggregation] Entry folded"
        );

        Ok(certificate)
    }

    fn aggregate(&self, entries: &[BatchEntry]) -> Result<Certificate, AggregationError> {
        self.check_batch(entries)?;
        let genesis = self.genesis()?;
        self.fold_entries(genesis, entries)
    }

    fn extend(
        &self,
        prior: &Certificate,
        entries: &[BatchEntry],
    ) -> Result<Certificate, AggregationError> {
        self.check_batch(entries)?;
        if entries.is_empty() {
            self.require_verified(prior)?;
            return Ok(prior.clone());
        }
        self.fold_entries(prior.clone(), entries)
    }
}
