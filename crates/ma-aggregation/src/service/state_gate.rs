//! State Gate Service
//!
//! Merges finished aggregation certificates into the persistent counter.
//!
//! The write is conditioned on the counter value read when the transaction
//! was prepared. Losing that race surfaces as `StaleState`; resubmitting
//! with a fresh read is the caller's job.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::algorithms::merge_counter;
use crate::domain::{
    invariant_counter_monotone, AggregationError, Certificate, GateOutcome, GateTransaction,
};
use crate::metrics::Metrics;
use crate::ports::{AttestationEngine, CounterStore, StateGateApi};

/// State gate service implementation
pub struct StateGateService<E: AttestationEngine, S: CounterStore> {
    /// Attestation engine (driven port)
    engine: Arc<E>,
    /// Persistent counter (driven port)
    store: Arc<S>,
    /// Shared counters
    metrics: Arc<Metrics>,
}

impl<E: AttestationEngine, S: CounterStore> StateGateService<E, S> {
    /// Create a new gate over the given engine and store
    pub fn new(engine: Arc<E>, store: Arc<S>) -> Self {
        Self {
            engine,
            store,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Share a metrics collector with other services
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Metrics collector used by this gate
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }
}

#[async_trait]
impl<E: AttestationEngine, S: CounterStore> StateGateApi for StateGateService<E, S> {
    async fn current(&self) -> Result<u64, AggregationError> {
        self.store.read().await
    }

    async fn prepare(&self, certificate: Certificate) -> Result<GateTransaction, AggregationError> {
        let expected_prior = self.store.read().await?;
        Ok(GateTransaction {
            expected_prior,
            certificate,
        })
    }

    async fn submit(&self, transaction: GateTransaction) -> Result<GateOutcome, AggregationError> {
        let GateTransaction {
            expected_prior,
            certificate,
        } = transaction;

        // 1. Verify
        if !self.engine.verify(&certificate) {
            self.metrics.record_verification_failure();
            warn!(
                step = %certificate.step(),
                claimed = certificate.highest_accepted_number(),
                "[ma-gate] Certificate failed verification"
            );
            return Err(AggregationError::VerificationFailed {
                step: certificate.step(),
            });
        }

        // 2-3. Monotonic merge under the read precondition
        let stored = merge_counter(expected_prior, certificate.highest_accepted_number());
        debug_assert!(invariant_counter_monotone(expected_prior, stored));
        if !self.store.write_if_unchanged(expected_prior, stored).await? {
            let actual = self.store.read().await?;
            self.metrics.record_stale();
            warn!(
                expected = expected_prior,
                actual, "[ma-gate] Counter moved since transaction was prepared"
            );
            return Err(AggregationError::StaleState {
                expected: expected_prior,
                actual,
            });
        }

        self.metrics.record_gate_commit();
        info!(
            previous = expected_prior,
            stored,
            tag = %certificate.tag(),
            "[ma-gate] Counter committed"
        );

        Ok(GateOutcome {
            previous: expected_prior,
            stored,
        })
    }

    async fn apply(&self, certificate: Certificate) -> Result<GateOutcome, AggregationError> {
        let transaction = self.prepare(certificate).await?;
        self.submit(transaction).await
    }
}
