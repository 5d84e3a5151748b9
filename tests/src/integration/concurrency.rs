//! # Concurrency
//!
//! Racing state gate submissions and independent chains built in parallel.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ma_aggregation::{AggregationError, MessageAggregationApi, StateGateApi};

    use crate::integration::fixtures::{harness, valid_entry};

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_two_transactions_from_same_read() {
        let h = harness(100);
        let high = h.aggregator.aggregate(&[valid_entry(150)]).unwrap();
        let low = h.aggregator.aggregate(&[valid_entry(120)]).unwrap();

        let first = h.gate.prepare(high).await.unwrap();
        let second = h.gate.prepare(low).await.unwrap();
        assert_eq!(first.expected_prior, 100);
        assert_eq!(second.expected_prior, 100);

        let (a, b) = tokio::join!(
            {
                let gate = Arc::clone(&h.gate);
                tokio::spawn(async move { gate.submit(first).await })
            },
            {
                let gate = Arc::clone(&h.gate);
                tokio::spawn(async move { gate.submit(second).await })
            }
        );
        let results = [a.unwrap(), b.unwrap()];

        let committed = results.iter().filter(|r| r.is_ok()).count();
        let stale = results
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    Err(AggregationError::StaleState { expected: 100, .. })
                )
            })
            .count();
        assert_eq!(committed, 1);
        assert_eq!(stale, 1);

        let stored = h.gate.current().await.unwrap();
        assert!(stored == 150 || stored == 120);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_retrying_submitters_converge_on_maximum() {
        let h = harness(0);
        let certificates: Vec<_> = (1..=8u64)
            .map(|n| h.aggregator.aggregate(&[valid_entry(n * 10)]).unwrap())
            .collect();

        let handles: Vec<_> = certificates
            .into_iter()
            .map(|certificate| {
                let gate = Arc::clone(&h.gate);
                tokio::spawn(async move {
                    loop {
                        match gate.apply(certificate.clone()).await {
                            Ok(outcome) => return outcome,
                            Err(e) if e.is_retryable() => tokio::task::yield_now().await,
                            Err(e) => panic!("unexpected gate error: {e}"),
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            let outcome = handle.await.unwrap();
            assert!(outcome.stored >= outcome.previous);
        }

        assert_eq!(h.gate.current().await.unwrap(), 80);
    }

    #[test]
    fn test_independent_chains_on_threads() {
        let h = harness(0);
        let aggregator = &h.aggregator;

        let results: Vec<u64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4u64)
                .map(|t| {
                    scope.spawn(move || {
                        let mut proof = aggregator.genesis().unwrap();
                        for n in 0..20 {
                            let entry = valid_entry(t * 100 + n);
                            proof = aggregator
                                .fold(entry.sequence_number, &proof, &entry.payload)
                                .unwrap();
                        }
                        proof.highest_accepted_number()
                    })
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        assert_eq!(results, vec![19, 119, 219, 319]);
        assert_eq!(h.aggregator.metrics().snapshot().folds, 80);
    }
}
