//! Shared payloads and service wiring.

use std::sync::Arc;

use ma_aggregation::{
    AggregationConfig, AggregationService, BatchEntry, InMemoryCounterStore, Payload,
    StateGateService, ZkpAttestationEngine,
};
use ma_zkp::AttestationKey;

/// Aggregation service over the shared test engine.
pub type Aggregator = AggregationService<ZkpAttestationEngine>;

/// State gate over the shared test engine and an in-memory counter.
pub type Gate = StateGateService<ZkpAttestationEngine, InMemoryCounterStore>;

/// Both services sharing one engine.
pub struct Harness {
    /// Attestation engine
    pub engine: Arc<ZkpAttestationEngine>,
    /// Aggregation service
    pub aggregator: Aggregator,
    /// State gate
    pub gate: Arc<Gate>,
}

/// Engine with a fixed key so failures are reproducible.
pub fn engine_with_key(key: u8) -> Arc<ZkpAttestationEngine> {
    Arc::new(
        ZkpAttestationEngine::new(&AggregationConfig::default(), AttestationKey::from_bytes([key; 32]))
            .expect("default config is valid"),
    )
}

/// Wire both services with the counter starting at `initial`.
pub fn harness(initial: u64) -> Harness {
    let engine = engine_with_key(0x42);
    let aggregator = AggregationService::new(Arc::clone(&engine), AggregationConfig::default())
        .expect("default config is valid");
    let gate = Arc::new(StateGateService::new(
        Arc::clone(&engine),
        Arc::new(InMemoryCounterStore::with_value(initial)),
    ));
    Harness {
        engine,
        aggregator,
        gate,
    }
}

/// The three entries of the unordered scenario; the maximum valid number is 5.
pub fn unordered_batch() -> Vec<BatchEntry> {
    vec![
        BatchEntry::new(4, Payload::new(0, 15_000, 20_000, 36_500)),
        BatchEntry::new(5, Payload::new(1, 1000, 20_000, 21_001)),
        BatchEntry::new(1, Payload::new(0, 1, 2, 3)),
    ]
}

/// One entry per validation rule, each breaking exactly that rule.
pub fn invalid_batch() -> Vec<BatchEntry> {
    vec![
        // bad checksum
        BatchEntry::new(1, Payload::new(2, 3, 5001, 1)),
        // y below x
        BatchEntry::new(2, Payload::new(1, 6000, 5001, 11_002)),
        // agent id too large
        BatchEntry::new(3, Payload::new(3001, 0, 12_000, 15_001)),
        // x too large
        BatchEntry::new(4, Payload::new(11, 30_000, 20_001, 50_012)),
        // y too large
        BatchEntry::new(5, Payload::new(10, 5000, 50_000, 55_010)),
        // y too small
        BatchEntry::new(6, Payload::new(10, 5000, 0, 5010)),
    ]
}

/// Valid entry with a non-zero agent.
pub fn valid_entry(sequence_number: u64) -> BatchEntry {
    BatchEntry::new(sequence_number, Payload::with_valid_checksum(17, 2500, 9000))
}
