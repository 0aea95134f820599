//! # Integration Test Flows
//!
//! The aggregator publishes into the sequencer through a listener, and a
//! consumer pulls from the sequencer, as in the reader runtime but without
//! the producer task.
//!
//! ## Flows Tested
//!
//! 1. **Gap filling**: blocks without matching transactions are synthesized
//! 2. **Rollback**: a fork replays block numbers with `is_rollback` set
//! 3. **Live marker**: the head watermark stops running ahead of the stream
//! 4. **Concurrency**: a suspended consumer is woken by the producer

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;
    use tokio::time::timeout;

    use gf_01_block_aggregator::{BlockAggregator, BlockListener, StreamConfig, TraceHandler};
    use gf_02_block_sequencer::{
        invariant_linked, ActionReader, BlockSequencer, SequencerConfig, SequencerError,
    };
    use reader_runtime::SequencerListener;
    use shared_types::{BlockEnvelope, TraceEvent};

    use crate::fixtures::{block_id, events_for_blocks, trace, undo_trace};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Harness {
        aggregator: BlockAggregator,
        sequencer: Arc<BlockSequencer>,
    }

    impl Harness {
        fn new(sequencer_config: SequencerConfig) -> Self {
            let sequencer = Arc::new(BlockSequencer::new(sequencer_config).unwrap());
            let mut aggregator = BlockAggregator::new(StreamConfig::for_testing());
            aggregator.add_listener(Arc::new(SequencerListener::new(Arc::clone(&sequencer))));
            Self {
                aggregator,
                sequencer,
            }
        }

        fn feed(&mut self, events: impl IntoIterator<Item = TraceEvent>) {
            for event in events {
                self.aggregator.on_event(event);
            }
        }

        async fn pull(&self, count: usize) -> Vec<BlockEnvelope> {
            let mut blocks = Vec::with_capacity(count);
            for _ in 0..count {
                blocks.push(self.sequencer.next_block().await.unwrap());
            }
            blocks
        }
    }

    /// Records every block the aggregator publishes.
    #[derive(Default)]
    struct Recorder {
        blocks: Mutex<Vec<BlockEnvelope>>,
    }

    impl BlockListener for Recorder {
        fn on_block(&self, envelope: BlockEnvelope) {
            self.blocks.lock().push(envelope);
        }
    }

    fn numbers(blocks: &[BlockEnvelope]) -> Vec<u64> {
        blocks.iter().map(BlockEnvelope::block_number).collect()
    }

    // =============================================================================
    // GAP FILLING
    // =============================================================================

    #[tokio::test]
    async fn test_sparse_stream_becomes_contiguous() {
        let mut harness = Harness::new(SequencerConfig::for_testing());
        harness.feed(events_for_blocks(&[100, 101, 104, 110, 111]));

        let blocks = harness.pull(11).await;
        assert_eq!(numbers(&blocks), (100..=110).collect::<Vec<_>>());

        for pair in blocks.windows(2) {
            assert!(
                invariant_linked(&pair[0], &pair[1]),
                "{} -> {} not linked",
                pair[0].block_number(),
                pair[1].block_number()
            );
        }

        let real: Vec<_> = blocks
            .iter()
            .filter(|b| !b.is_empty())
            .map(BlockEnvelope::block_number)
            .collect();
        assert_eq!(real, vec![100, 101, 104, 110]);
        assert!(blocks[0].meta.is_earliest_block);
        assert!(!blocks[1].meta.is_earliest_block);
    }

    #[tokio::test]
    async fn test_fillers_carry_current_irreversible_watermark() {
        let mut harness = Harness::new(SequencerConfig::for_testing());
        harness.feed(events_for_blocks(&[20, 30, 31]));

        let blocks = harness.pull(11).await;
        let filler = &blocks[5];
        assert_eq!(filler.block_number(), 25);
        assert!(filler.is_empty());
        // Block 30's trace reported 27 before the filler was built.
        assert_eq!(filler.last_irreversible_block_number, 27);
        assert_eq!(filler.block.block_info.timestamp, shared_types::EPOCH_TIMESTAMP);
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_block_is_held_back() {
        let mut harness = Harness::new(SequencerConfig::for_testing());
        harness.feed(events_for_blocks(&[5]));

        let pending = timeout(Duration::from_secs(5), harness.sequencer.next_block()).await;
        assert!(pending.is_err());
        assert_eq!(harness.aggregator.open_block().unwrap().block_number(), 5);
    }

    // =============================================================================
    // ROLLBACK
    // =============================================================================

    #[tokio::test]
    async fn test_rollback_boundary_splits_same_block_number() {
        let recorder = Arc::new(Recorder::default());
        let mut harness = Harness::new(SequencerConfig::for_testing());
        harness.aggregator.add_listener(recorder.clone());

        harness.feed([
            TraceEvent::Trace(trace(3, "a")),
            TraceEvent::Trace(trace(3, "b")),
            TraceEvent::Trace(trace(3, "c")),
            TraceEvent::Trace(undo_trace(3, "d")),
            TraceEvent::Trace(trace(4, "e")),
        ]);

        let published = recorder.blocks.lock().clone();
        assert_eq!(numbers(&published), vec![3, 3]);
        assert!(!published[0].meta.is_rollback);
        assert_eq!(published[0].block.actions.len(), 3);
        assert!(published[1].meta.is_rollback);
        assert_eq!(published[1].block.actions.len(), 1);

        // The consumer sees block 3, then seeks back to replay the fork.
        let first = harness.sequencer.next_block().await.unwrap();
        assert_eq!(first.block_number(), 3);
        assert!(!first.meta.is_rollback);

        harness.sequencer.seek_to_block(3);
        let replayed = harness.sequencer.next_block().await.unwrap();
        assert_eq!(replayed.block_number(), 3);
        assert!(replayed.meta.is_rollback);
        assert_eq!(replayed.block.actions[0].payload.transaction_id, "d");
    }

    #[tokio::test]
    async fn test_seek_back_before_queue_synthesizes() {
        let mut harness = Harness::new(SequencerConfig::for_testing());
        harness.feed(events_for_blocks(&[50, 51, 52, 53]));
        harness.pull(2).await;

        harness.sequencer.seek_to_block(48);
        let blocks = harness.pull(2).await;
        assert_eq!(numbers(&blocks), vec![48, 49]);
        assert!(blocks.iter().all(BlockEnvelope::is_empty));
        assert_eq!(blocks[0].block.previous_block_hash(), block_id(51));
        assert_eq!(harness.sequencer.queue_len(), 1);
        assert_eq!(harness.sequencer.info().current_block_number, 49);
    }

    // =============================================================================
    // LIVE MARKER AND WATERMARKS
    // =============================================================================

    #[tokio::test]
    async fn test_live_marker_stops_head_offset() {
        let mut harness = Harness::new(SequencerConfig::for_testing());
        harness.feed(events_for_blocks(&[10, 11]));
        assert_eq!(harness.sequencer.head_block_number().await, Ok(11));

        harness.feed([TraceEvent::LiveMarker]);
        harness.feed(events_for_blocks(&[12]));
        assert_eq!(harness.sequencer.head_block_number().await, Ok(11));

        harness.feed(events_for_blocks(&[13]));
        assert_eq!(harness.sequencer.head_block_number().await, Ok(12));
        assert!(harness.aggregator.is_live_marker_reached());
    }

    #[tokio::test]
    async fn test_reader_info_tracks_consumer() {
        let config = SequencerConfig {
            start_at_block: 200,
            ..SequencerConfig::for_testing()
        };
        let mut harness = Harness::new(config);
        assert_eq!(harness.sequencer.info().current_block_number, 199);

        harness.feed(events_for_blocks(&[200, 203, 204]));
        harness.pull(3).await;

        let info = harness.sequencer.info();
        assert_eq!(info.current_block_number, 202);
        assert_eq!(info.start_at_block, 200);
        assert_eq!(info.head_block_number, 204);
        assert_eq!(info.last_irreversible_block_number, 200);
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_consumer_woken_by_producer_task() {
        let config = SequencerConfig {
            max_queue_length: 64,
            ..SequencerConfig::for_testing()
        };
        let sequencer = Arc::new(BlockSequencer::new(config).unwrap());

        let consumer = {
            let sequencer = Arc::clone(&sequencer);
            tokio::spawn(async move {
                let mut received = Vec::new();
                for _ in 0..20 {
                    received.push(sequencer.next_block().await.unwrap().block_number());
                }
                received
            })
        };

        let producer = {
            let sequencer = Arc::clone(&sequencer);
            tokio::spawn(async move {
                let mut aggregator = BlockAggregator::new(StreamConfig::for_testing());
                aggregator.add_listener(Arc::new(SequencerListener::new(sequencer)));
                for num in (1..=23).step_by(2) {
                    aggregator.on_event(TraceEvent::Trace(trace(num, &format!("trx-{num}"))));
                    tokio::task::yield_now().await;
                }
            })
        };

        producer.await.unwrap();
        let received = timeout(Duration::from_secs(10), consumer)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(received, (1..=20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_shutdown_releases_all_waiters() {
        let sequencer = Arc::new(BlockSequencer::new(SequencerConfig::for_testing()).unwrap());

        let block_waiter = {
            let sequencer = Arc::clone(&sequencer);
            tokio::spawn(async move { sequencer.next_block().await.map(|b| b.block_number()) })
        };
        let head_waiter = {
            let sequencer = Arc::clone(&sequencer);
            tokio::spawn(async move { sequencer.head_block_number().await })
        };
        tokio::task::yield_now().await;

        sequencer.shutdown();
        assert_eq!(block_waiter.await.unwrap(), Err(SequencerError::Cancelled));
        assert_eq!(head_waiter.await.unwrap(), Err(SequencerError::Cancelled));
    }
}
