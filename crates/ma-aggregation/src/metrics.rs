//! Metrics hooks for aggregation and state gate operations
//!
//! ## Usage
//!
//! ```ignore
//! use ma_aggregation::metrics::Metrics;
//!
//! let metrics = Metrics::new();
//! metrics.record_fold(true, true);
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.folds, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for aggregation operations
///
/// Thread-safe counters shared by the aggregation service and the state
/// gate.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Genesis certificates issued
    pub geneses: AtomicU64,
    /// Fold steps attested
    pub folds: AtomicU64,
    /// Fold steps that raised the running maximum
    pub accepted: AtomicU64,
    /// Fold steps whose payload failed validation
    pub rejected_payloads: AtomicU64,
    /// Certificates that failed verification
    pub verification_failures: AtomicU64,
    /// Committed state gate writes
    pub gate_commits: AtomicU64,
    /// State gate writes lost to a concurrent writer
    pub stale_failures: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a genesis step
    pub fn record_genesis(&self) {
        self.geneses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fold step
    ///
    /// # Arguments
    /// * `accepted` - Whether the entry raised the maximum
    /// * `payload_valid` - Whether the payload passed validation
    pub fn record_fold(&self, accepted: bool, payload_valid: bool) {
        self.folds.fetch_add(1, Ordering::Relaxed);
        if accepted {
            self.accepted.fetch_add(1, Ordering::Relaxed);
        }
        if !payload_valid {
            self.rejected_payloads.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a certificate that did not verify
    pub fn record_verification_failure(&self) {
        self.verification_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a committed gate write
    pub fn record_gate_commit(&self) {
        self.gate_commits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a stale gate write
    pub fn record_stale(&self) {
        self.stale_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            geneses: self.geneses.load(Ordering::Relaxed),
            folds: self.folds.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected_payloads: self.rejected_payloads.load(Ordering::Relaxed),
            verification_failures: self.verification_failures.load(Ordering::Relaxed),
            gate_commits: self.gate_commits.load(Ordering::Relaxed),
            stale_failures: self.stale_failures.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`Metrics`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Genesis certificates issued
    pub geneses: u64,
    /// Fold steps attested
    pub folds: u64,
    /// Fold steps that raised the running maximum
    pub accepted: u64,
    /// Fold steps whose payload failed validation
    pub rejected_payloads: u64,
    /// Certificates that failed verification
    pub verification_failures: u64,
    /// Committed state gate writes
    pub gate_commits: u64,
    /// State gate writes lost to a concurrent writer
    pub stale_failures: u64,
}
