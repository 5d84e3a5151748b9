//! # Aggregation Benchmarks
//!
//! | Operation | Expectation |
//! |-----------|-------------|
//! | Payload validation | Constant time, no allocation |
//! | Fold step | One verification plus one attestation |
//! | Certificate verification | Independent of chain length |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ma_aggregation::{BatchEntry, MessageAggregationApi, Payload};
use ma_tests::integration::fixtures::{harness, valid_entry};

fn bench_payload_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload-validation");
    let valid = Payload::with_valid_checksum(17, 2500, 9000);
    let invalid = Payload::new(3001, 0, 12_000, 15_001);

    group.bench_function("valid", |b| b.iter(|| black_box(valid).is_valid()));
    group.bench_function("invalid", |b| b.iter(|| black_box(invalid).is_valid()));
    group.finish();
}

fn bench_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("fold");
    let h = harness(0);
    let genesis = h.aggregator.genesis().expect("genesis");
    let entry = valid_entry(42);

    group.bench_function("single_step", |b| {
        b.iter(|| {
            h.aggregator
                .fold(entry.sequence_number, black_box(&genesis), &entry.payload)
                .expect("fold")
        })
    });
    group.finish();
}

fn bench_aggregate_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let h = harness(0);

    for size in [10u64, 100, 500] {
        let entries: Vec<BatchEntry> = (0..size).map(valid_entry).collect();
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("batch", size), &entries, |b, entries| {
            b.iter(|| h.aggregator.aggregate(black_box(entries)).expect("aggregate"))
        });
    }
    group.finish();
}

fn bench_verify_depth(c: &mut Criterion) {
    use ma_aggregation::AttestationEngine;

    let mut group = c.benchmark_group("verify");
    let h = harness(0);

    for depth in [1u64, 100] {
        let entries: Vec<BatchEntry> = (0..depth).map(valid_entry).collect();
        let certificate = h.aggregator.aggregate(&entries).expect("aggregate");
        group.bench_with_input(BenchmarkId::new("depth", depth), &certificate, |b, cert| {
            b.iter(|| h.engine.verify(black_box(cert)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_payload_validation,
    bench_fold,
    bench_aggregate_batch,
    bench_verify_depth
);
criterion_main!(benches);
