//! Block Sequencer Service
//!
//! Wraps [`SequencerState`] with the locking and wakeups a concurrent
//! producer and a suspended consumer need. The producer side
//! ([`BlockSequencer::ingest`]) never blocks on the consumer.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{BlockEnvelope, BlockNumber};
use tokio::sync::{watch, Notify};
use tracing::{debug, info};

use crate::config::SequencerConfig;
use crate::domain::{DeliveryKind, SequencerError, SequencerState, Watermarks};
use crate::ports::inbound::{ActionReader, ReaderInfo};

/// Gap-filling block sequencer.
pub struct BlockSequencer {
    config: SequencerConfig,
    state: Mutex<SequencerState>,
    /// Wakes the consumer when a block is queued.
    arrivals: Notify,
    watermarks: watch::Sender<Watermarks>,
    shutdown: watch::Sender<bool>,
}

impl BlockSequencer {
    /// Creates a sequencer, rejecting configurations it cannot run with.
    pub fn new(config: SequencerConfig) -> Result<Self, SequencerError> {
        config.validate()?;
        let state = SequencerState::new(&config);
        let (watermarks, _) = watch::channel(Watermarks::default());
        let (shutdown, _) = watch::channel(false);

        info!(
            start_at_block = config.start_at_block,
            max_queue_length = config.max_queue_length,
            only_irreversible = config.only_irreversible,
            "Block sequencer created"
        );

        Ok(Self {
            config,
            state: Mutex::new(state),
            arrivals: Notify::new(),
            watermarks,
            shutdown,
        })
    }

    /// Queues a completed block and wakes the consumer.
    ///
    /// Returns the block evicted to stay within capacity, if any.
    pub fn ingest(&self, envelope: BlockEnvelope) -> Option<BlockEnvelope> {
        let (evicted, watermarks) = {
            let mut state = self.state.lock();
            let evicted = state.ingest(envelope);
            (evicted, state.watermarks())
        };
        self.watermarks.send_if_modified(|current| {
            let changed = *current != watermarks;
            *current = watermarks;
            changed
        });
        self.arrivals.notify_one();
        evicted
    }

    /// Called once the aggregator reports the source caught up with the
    /// chain head.
    pub fn mark_live_marker_reached(&self) {
        self.state.lock().mark_live_marker_reached();
        info!("Live marker reached, head watermark now tracks the newest block");
    }

    /// Cancels every pending and future wait.
    pub fn shutdown(&self) {
        if !self.shutdown.send_replace(true) {
            info!("Block sequencer shut down");
        }
    }

    /// Whether [`BlockSequencer::shutdown`] was called.
    pub fn is_shut_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Number of queued blocks.
    pub fn queue_len(&self) -> usize {
        self.state.lock().queue_len()
    }

    /// Current watermarks without waiting.
    pub fn watermarks(&self) -> Watermarks {
        *self.watermarks.borrow()
    }

    /// Configuration the sequencer was built with.
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Suspends until the selected watermark is non-zero.
    async fn wait_for_watermark(
        &self,
        select: fn(&Watermarks) -> BlockNumber,
    ) -> Result<BlockNumber, SequencerError> {
        let mut watermarks = self.watermarks.subscribe();
        let mut shutdown = self.shutdown.subscribe();
        loop {
            let value = select(&*watermarks.borrow_and_update());
            if value > 0 {
                return Ok(value);
            }
            if *shutdown.borrow_and_update() {
                return Err(SequencerError::Cancelled);
            }
            tokio::select! {
                changed = watermarks.changed() => {
                    if changed.is_err() {
                        return Err(SequencerError::Cancelled);
                    }
                }
                _ = shutdown.changed() => {}
            }
        }
    }
}

#[async_trait]
impl ActionReader for BlockSequencer {
    async fn next_block(&self) -> Result<BlockEnvelope, SequencerError> {
        let mut shutdown = self.shutdown.subscribe();
        loop {
            if *shutdown.borrow_and_update() {
                return Err(SequencerError::Cancelled);
            }

            let delivered = self.state.lock().take_next();
            if let Some(delivered) = delivered {
                match delivered.kind {
                    DeliveryKind::Real => debug!(
                        block_number = delivered.envelope.block_number(),
                        actions = delivered.envelope.block.actions.len(),
                        rollback = delivered.envelope.meta.is_rollback,
                        "Delivering block"
                    ),
                    DeliveryKind::Filler => debug!(
                        block_number = delivered.envelope.block_number(),
                        "Delivering filler block"
                    ),
                }
                return Ok(delivered.envelope);
            }

            tokio::select! {
                _ = shutdown.changed() => {}
                _ = self.arrivals.notified() => {}
            }
        }
    }

    fn seek_to_block(&self, block_number: BlockNumber) {
        debug!(block_number, "Seeking");
        self.state.lock().seek(block_number);
    }

    async fn head_block_number(&self) -> Result<BlockNumber, SequencerError> {
        self.wait_for_watermark(|watermarks| watermarks.head_block_number)
            .await
    }

    async fn last_irreversible_block_number(&self) -> Result<BlockNumber, SequencerError> {
        self.wait_for_watermark(|watermarks| watermarks.last_irreversible_block_number)
            .await
    }

    fn info(&self) -> ReaderInfo {
        let state = self.state.lock();
        let watermarks = state.watermarks();
        ReaderInfo {
            current_block_number: state.current_block_number(),
            start_at_block: state.start_at_block(),
            head_block_number: watermarks.head_block_number,
            only_irreversible: self.config.only_irreversible,
            last_irreversible_block_number: watermarks.last_irreversible_block_number,
        }
    }
}
