//! # Aggregation Runtime
//!
//! Owns the engine, the counter store and both services, and drives one
//! batch from genesis to a committed counter value.

use std::sync::Arc;

use ma_aggregation::{
    AggregationConfig, AggregationError, AggregationService, BatchEntry, Certificate,
    GateOutcome, InMemoryCounterStore, MessageAggregationApi, Metrics, StateGateApi,
    StateGateService, ZkpAttestationEngine,
};
use ma_telemetry::{time_histogram, AGGREGATION_DURATION};
use tracing::{info, warn};

/// Gate submissions attempted before giving up on a moving counter.
pub const MAX_SUBMIT_ATTEMPTS: usize = 3;

/// Summary of one run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Entries folded
    pub entries: usize,
    /// Highest accepted number attested by the final certificate
    pub attested: u64,
    /// Counter transition
    pub outcome: GateOutcome,
    /// Short proof tag of the final certificate
    pub certificate_tag: String,
}

/// Wired services for a single process.
pub struct AggregationRuntime {
    aggregation: AggregationService<ZkpAttestationEngine>,
    gate: StateGateService<ZkpAttestationEngine, InMemoryCounterStore>,
    metrics: Arc<Metrics>,
}

impl AggregationRuntime {
    /// Wire the services with a freshly generated attestation key.
    pub fn new(config: AggregationConfig, initial_counter: u64) -> Result<Self, AggregationError> {
        let engine = Arc::new(ZkpAttestationEngine::with_random_key(&config)?);
        let store = Arc::new(InMemoryCounterStore::with_value(initial_counter));
        let metrics = Arc::new(Metrics::new());

        let aggregation =
            AggregationService::new(Arc::clone(&engine), config)?.with_metrics(Arc::clone(&metrics));
        let gate = StateGateService::new(engine, store).with_metrics(Arc::clone(&metrics));

        info!(initial_counter, "[ma-runtime] Services wired");

        Ok(Self {
            aggregation,
            gate,
            metrics,
        })
    }

    /// Aggregate `entries` from genesis and merge the result into the counter.
    pub async fn run(&self, entries: &[BatchEntry]) -> Result<RunReport, AggregationError> {
        let certificate = {
            let _timer = time_histogram!(AGGREGATION_DURATION);
            self.aggregation.aggregate(entries)?
        };

        info!(
            entries = entries.len(),
            attested = certificate.highest_accepted_number(),
            tag = %certificate.tag(),
            "[ma-runtime] Batch aggregated"
        );

        let outcome = self.commit(&certificate).await;
        self.publish_metrics();
        let outcome = outcome?;
        ma_telemetry::set_counter_value(outcome.stored);

        Ok(RunReport {
            entries: entries.len(),
            attested: certificate.highest_accepted_number(),
            outcome,
            certificate_tag: certificate.tag(),
        })
    }

    /// Submit to the gate, re-reading the counter after a stale write.
    async fn commit(&self, certificate: &Certificate) -> Result<GateOutcome, AggregationError> {
        let mut attempt = 1;
        loop {
            match self.gate.apply(certificate.clone()).await {
                Err(e) if e.is_retryable() && attempt < MAX_SUBMIT_ATTEMPTS => {
                    warn!(attempt, error = %e, "[ma-runtime] Retrying gate submission");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Current persistent counter value.
    pub async fn counter(&self) -> Result<u64, AggregationError> {
        self.gate.current().await
    }

    /// Shared service counters.
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    fn publish_metrics(&self) {
        ma_telemetry::record_snapshot(&self.metrics.snapshot());
    }
}
