//! # Aggregation Flows
//!
//! Chains built from genesis through the aggregation service and merged
//! through the state gate.
//!
//! ## Flows Tested:
//!
//! 1. Unordered entries settle on the largest valid number
//! 2. Invalid entries leave the counter untouched, however often folded
//! 3. The agent-zero bypass accepts any coordinates
//! 4. Long chains of bypass entries
//! 5. Certificates survive a byte round trip before reaching the gate

#[cfg(test)]
mod tests {
    use ma_aggregation::{
        BatchEntry, Certificate, MessageAggregationApi, Payload, StateGateApi, StepKind,
    };

    use crate::integration::fixtures::{
        harness, invalid_batch, unordered_batch, valid_entry,
    };

    // =========================================================================
    // AGGREGATION → GATE
    // =========================================================================

    #[tokio::test]
    async fn test_messages_number_unordered() {
        let h = harness(0);

        let mut proof = h.aggregator.genesis().unwrap();
        for entry in unordered_batch() {
            proof = h
                .aggregator
                .fold(entry.sequence_number, &proof, &entry.payload)
                .unwrap();
        }

        let outcome = h.gate.apply(proof).await.unwrap();
        assert_eq!(outcome.stored, 5);
        assert_eq!(h.gate.current().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_invalid_cases_folded_repeatedly() {
        let h = harness(0);
        let messages = invalid_batch();

        let mut proof = h.aggregator.genesis().unwrap();
        for _ in 0..messages.len() {
            for entry in &messages {
                proof = h
                    .aggregator
                    .fold(entry.sequence_number, &proof, &entry.payload)
                    .unwrap();
            }
        }

        assert_eq!(proof.highest_accepted_number(), 0);
        h.gate.apply(proof).await.unwrap();
        assert_eq!(h.gate.current().await.unwrap(), 0);

        let snap = h.aggregator.metrics().snapshot();
        assert_eq!(snap.folds, 36);
        assert_eq!(snap.rejected_payloads, 36);
        assert_eq!(snap.accepted, 0);
    }

    #[tokio::test]
    async fn test_agent_zero_skips_other_checks() {
        let h = harness(0);

        let genesis = h.aggregator.genesis().unwrap();
        let proof = h
            .aggregator
            .fold(100, &genesis, &Payload::new(0, 0, 0, 0))
            .unwrap();

        h.gate.apply(proof).await.unwrap();
        assert_eq!(h.gate.current().await.unwrap(), 100);
    }

    #[tokio::test]
    async fn test_stress_150_messages() {
        let h = harness(0);

        let entries: Vec<BatchEntry> = (0..150)
            .map(|i| BatchEntry::new(i, Payload::new(0, 1, 2, 3)))
            .collect();
        let proof = h.aggregator.aggregate(&entries).unwrap();

        h.gate.apply(proof).await.unwrap();
        assert_eq!(h.gate.current().await.unwrap(), 149);
    }

    #[tokio::test]
    async fn test_gate_keeps_higher_stored_value() {
        let h = harness(100);
        let proof = h.aggregator.aggregate(&[valid_entry(50)]).unwrap();

        let outcome = h.gate.apply(proof).await.unwrap();
        assert_eq!(outcome.previous, 100);
        assert_eq!(outcome.stored, 100);
        assert!(!outcome.advanced());
    }

    #[tokio::test]
    async fn test_gate_advances_to_higher_attested_value() {
        let h = harness(100);
        let proof = h.aggregator.aggregate(&[valid_entry(150)]).unwrap();

        let outcome = h.gate.apply(proof).await.unwrap();
        assert!(outcome.advanced());
        assert_eq!(h.gate.current().await.unwrap(), 150);
    }

    #[tokio::test]
    async fn test_genesis_alone_changes_nothing() {
        let h = harness(7);
        let genesis = h.aggregator.genesis().unwrap();
        assert_eq!(genesis.step(), StepKind::Genesis);

        let outcome = h.gate.apply(genesis).await.unwrap();
        assert_eq!(outcome.stored, 7);
    }

    #[tokio::test]
    async fn test_extend_across_runs() {
        let h = harness(0);

        let first = h.aggregator.aggregate(&unordered_batch()).unwrap();
        h.gate.apply(first.clone()).await.unwrap();

        let second = h
            .aggregator
            .extend(&first, &[valid_entry(3), valid_entry(12)])
            .unwrap();
        h.gate.apply(second).await.unwrap();

        assert_eq!(h.gate.current().await.unwrap(), 12);
    }

    // =========================================================================
    // SERIALIZATION
    // =========================================================================

    #[tokio::test]
    async fn test_certificate_bytes_round_trip_to_gate() {
        let h = harness(0);
        let proof = h.aggregator.aggregate(&unordered_batch()).unwrap();

        let bytes = proof.to_bytes().unwrap();
        let restored = Certificate::from_bytes(&bytes).unwrap();
        assert_eq!(restored, proof);

        h.gate.apply(restored).await.unwrap();
        assert_eq!(h.gate.current().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_json_batch_matches_in_memory_batch() {
        let h = harness(0);
        let json = serde_json::to_string(&unordered_batch()).unwrap();
        let entries = ma_runtime::parse_batch(&json).unwrap();

        let proof = h.aggregator.aggregate(&entries).unwrap();
        assert_eq!(proof.highest_accepted_number(), 5);
    }
}
