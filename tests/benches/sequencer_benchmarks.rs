//! # Gapfill Benchmarks
//!
//! | Component | Operation | Target |
//! |-----------|-----------|--------|
//! | gf-01 Aggregator | trace → completed block | < 5µs per trace |
//! | gf-02 Sequencer | ingest + deliver, dense stream | < 2µs per block |
//! | gf-02 Sequencer | filler synthesis across gaps | < 2µs per block |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gf_01_block_aggregator::{BlockAggregator, StreamConfig, TraceHandler};
use gf_02_block_sequencer::{SequencerConfig, SequencerState};
use gf_tests::fixtures::{envelope, events_for_blocks};
use reader_runtime::SequencerListener;

// ============================================================================
// GF-01: Aggregation
// ============================================================================

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("gf-01-block-aggregator");
    group.measurement_time(Duration::from_secs(5));

    for size in [100u64, 1_000] {
        let numbers: Vec<u64> = (1..=size).collect();
        let events = events_for_blocks(&numbers);

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("aggregate", size), &events, |b, events| {
            b.iter(|| {
                let mut aggregator = BlockAggregator::new(StreamConfig::for_testing());
                for event in events.iter().cloned() {
                    aggregator.on_event(event);
                }
                black_box(aggregator.emitted_count())
            })
        });
    }

    group.finish();
}

// ============================================================================
// GF-02: Sequencing
// ============================================================================

fn bench_sequencing(c: &mut Criterion) {
    let mut group = c.benchmark_group("gf-02-block-sequencer");
    group.measurement_time(Duration::from_secs(5));

    let config = SequencerConfig {
        max_queue_length: 2_000,
        ..SequencerConfig::default()
    };

    for stride in [1u64, 10] {
        let envelopes: Vec<_> = (0..1_000u64).map(|i| envelope(1 + i * stride, 0)).collect();
        let delivered = 1 + 999 * stride;

        group.throughput(Throughput::Elements(delivered));
        group.bench_with_input(
            BenchmarkId::new("ingest_and_drain_stride", stride),
            &envelopes,
            |b, envelopes| {
                b.iter(|| {
                    let mut state = SequencerState::new(&config);
                    for envelope in envelopes.iter().cloned() {
                        state.ingest(envelope);
                    }
                    let mut count = 0u64;
                    while let Some(delivered) = state.take_next() {
                        black_box(&delivered);
                        count += 1;
                    }
                    count
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// End to end: aggregator publishing into the sequencer
// ============================================================================

fn bench_pipeline(c: &mut Criterion) {
    use gf_02_block_sequencer::BlockSequencer;

    let mut group = c.benchmark_group("gapfill-pipeline");
    let numbers: Vec<u64> = (1..=500).map(|i| i * 3).collect();
    let events = events_for_blocks(&numbers);

    group.throughput(Throughput::Elements(events.len() as u64));
    group.bench_function("aggregate_into_sequencer", |b| {
        b.iter(|| {
            let config = SequencerConfig {
                max_queue_length: 1_000,
                ..SequencerConfig::default()
            };
            let sequencer = Arc::new(BlockSequencer::new(config).unwrap());
            let mut aggregator = BlockAggregator::new(StreamConfig::for_testing());
            aggregator.add_listener(Arc::new(SequencerListener::new(Arc::clone(&sequencer))));
            for event in events.iter().cloned() {
                aggregator.on_event(event);
            }
            black_box(sequencer.queue_len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_aggregation, bench_sequencing, bench_pipeline);
criterion_main!(benches);
