//! Prometheus metrics for message aggregation.
//!
//! All metrics follow the naming convention: `ma_<component>_<metric>_<unit>`
//!
//! The services keep their own atomic counters
//! ([`ma_aggregation::Metrics`]); [`record_snapshot`] publishes those totals
//! into the process-wide registry.

use lazy_static::lazy_static;
use ma_aggregation::MetricsSnapshot;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry,
    TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // AGGREGATION METRICS
    // =========================================================================

    /// Genesis certificates issued
    pub static ref GENESES: IntCounter = IntCounter::new(
        "ma_aggregation_geneses_total",
        "Total number of genesis certificates issued"
    ).expect("metric creation failed");

    /// Fold steps attested
    pub static ref FOLDS: IntCounter = IntCounter::new(
        "ma_aggregation_folds_total",
        "Total number of fold steps attested"
    ).expect("metric creation failed");

    /// Fold steps that raised the running maximum
    pub static ref ACCEPTED: IntCounter = IntCounter::new(
        "ma_aggregation_accepted_total",
        "Fold steps whose entry raised the highest accepted number"
    ).expect("metric creation failed");

    /// Fold steps whose payload failed validation
    pub static ref REJECTED_PAYLOADS: IntCounter = IntCounter::new(
        "ma_aggregation_rejected_payloads_total",
        "Fold steps whose payload failed validation"
    ).expect("metric creation failed");

    /// Certificates that failed verification
    pub static ref VERIFICATION_FAILURES: IntCounter = IntCounter::new(
        "ma_aggregation_verification_failures_total",
        "Certificates rejected by the attestation engine"
    ).expect("metric creation failed");

    /// Batch aggregation duration
    pub static ref AGGREGATION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "ma_aggregation_batch_duration_seconds",
            "Time spent aggregating one batch"
        ).buckets(exponential_buckets(0.0001, 2.0, 16).expect("metric creation failed"))
    ).expect("metric creation failed");

    // =========================================================================
    // STATE GATE METRICS
    // =========================================================================

    /// Committed gate writes
    pub static ref GATE_COMMITS: IntCounter = IntCounter::new(
        "ma_gate_commits_total",
        "Total number of committed counter writes"
    ).expect("metric creation failed");

    /// Gate writes lost to a concurrent writer
    pub static ref STALE_FAILURES: IntCounter = IntCounter::new(
        "ma_gate_stale_total",
        "Counter writes rejected because the stored value moved"
    ).expect("metric creation failed");

    /// Last stored counter value
    pub static ref COUNTER_VALUE: IntGauge = IntGauge::new(
        "ma_gate_counter_value",
        "Most recently observed persistent counter value"
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Calling this more than once is harmless.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Aggregation
        Box::new(GENESES.clone()),
        Box::new(FOLDS.clone()),
        Box::new(ACCEPTED.clone()),
        Box::new(REJECTED_PAYLOADS.clone()),
        Box::new(VERIFICATION_FAILURES.clone()),
        Box::new(AGGREGATION_DURATION.clone()),
        // Gate
        Box::new(GATE_COMMITS.clone()),
        Box::new(STALE_FAILURES.clone()),
        Box::new(COUNTER_VALUE.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Publish cumulative service counters.
///
/// Each Prometheus counter is advanced to the snapshot total; counters never
/// move backwards if an older snapshot arrives late.
pub fn record_snapshot(snapshot: &MetricsSnapshot) {
    advance(&GENESES, snapshot.geneses);
    advance(&FOLDS, snapshot.folds);
    advance(&ACCEPTED, snapshot.accepted);
    advance(&REJECTED_PAYLOADS, snapshot.rejected_payloads);
    advance(&VERIFICATION_FAILURES, snapshot.verification_failures);
    advance(&GATE_COMMITS, snapshot.gate_commits);
    advance(&STALE_FAILURES, snapshot.stale_failures);
}

fn advance(counter: &IntCounter, total: u64) {
    let current = counter.get();
    if total > current {
        counter.inc_by(total - current);
    }
}

/// Record the persistent counter value.
pub fn set_counter_value(value: u64) {
    COUNTER_VALUE.set(i64::try_from(value).unwrap_or(i64::MAX));
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
