//! # Sequencer State
//!
//! The lookahead queue, the watermarks and the consumer cursor. Pure and
//! synchronous; locking and wakeups live in [`crate::service`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use shared_types::{BlockEnvelope, BlockInfo, BlockNumber};
use tracing::{trace, warn};

use super::invariants::{
    invariant_queue_bounded, invariant_watermarks_monotonic, DEFAULT_MAX_QUEUE_LENGTH,
};
use crate::config::SequencerConfig;
use crate::metrics;

/// Head and irreversibility watermarks. Zero means "not observed yet".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watermarks {
    /// Highest block number believed to exist on chain.
    pub head_block_number: BlockNumber,
    /// Highest block number reported final by the source.
    pub last_irreversible_block_number: BlockNumber,
}

/// Where a delivered envelope came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryKind {
    /// Dequeued from the lookahead queue.
    Real,
    /// Synthesized for a block the source never delivered.
    Filler,
}

impl DeliveryKind {
    /// Metrics label.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryKind::Real => "real",
            DeliveryKind::Filler => "filler",
        }
    }
}

/// An envelope handed to the consumer.
#[derive(Clone, Debug, PartialEq)]
pub struct Delivered {
    /// The block handed out.
    pub envelope: BlockEnvelope,
    /// Whether it was queued or synthesized.
    pub kind: DeliveryKind,
}

/// Sequencer state.
#[derive(Debug)]
pub struct SequencerState {
    /// Completed blocks in arrival order.
    queue: VecDeque<BlockEnvelope>,
    max_queue_length: usize,
    watermarks: Watermarks,
    /// Set by the first delivery; a seek before it is overridden.
    initialized: bool,
    /// Block number the consumer expects next.
    next_needed: Option<BlockNumber>,
    /// Last envelope handed to the consumer, real or filler.
    last_accepted: Option<BlockInfo>,
    live_marker_reached: bool,
    start_at_block: i64,
    /// Number of the last block accepted by the consumer.
    current_block_number: i64,
}

impl SequencerState {
    /// Empty state. Nothing is delivered before the first ingest.
    pub fn new(config: &SequencerConfig) -> Self {
        Self {
            // The configured bound is a cap, not a reservation.
            queue: VecDeque::with_capacity(config.max_queue_length.min(DEFAULT_MAX_QUEUE_LENGTH)),
            max_queue_length: config.max_queue_length,
            watermarks: Watermarks::default(),
            initialized: false,
            next_needed: None,
            last_accepted: None,
            live_marker_reached: false,
            start_at_block: config.start_at_block,
            current_block_number: config.start_at_block - 1,
        }
    }

    /// Latches the live marker. Later ingests report the head without offset.
    pub fn mark_live_marker_reached(&mut self) {
        self.live_marker_reached = true;
    }

    /// Queues a completed block and raises the watermarks.
    ///
    /// Before the live marker the chain head is unknown, so the head is
    /// reported one above the newest block seen. This keeps a fast
    /// consumer from concluding it caught up with the chain.
    ///
    /// Returns the envelope evicted to stay within capacity, if any. The
    /// oldest queued block is the one evicted.
    pub fn ingest(&mut self, envelope: BlockEnvelope) -> Option<BlockEnvelope> {
        let before = self.watermarks;
        let offset = if self.live_marker_reached { 0 } else { 1 };
        let observed_head = envelope.block_number() + offset;

        self.watermarks.head_block_number = self.watermarks.head_block_number.max(observed_head);
        self.watermarks.last_irreversible_block_number = self
            .watermarks
            .last_irreversible_block_number
            .max(envelope.last_irreversible_block_number);
        debug_assert!(invariant_watermarks_monotonic(&before, &self.watermarks));

        trace!(
            block_number = envelope.block_number(),
            head = self.watermarks.head_block_number,
            lib = self.watermarks.last_irreversible_block_number,
            queued = self.queue.len() + 1,
            "Block queued"
        );
        self.queue.push_back(envelope);

        let evicted = if self.queue.len() > self.max_queue_length {
            self.queue.pop_front()
        } else {
            None
        };
        if let Some(dropped) = &evicted {
            warn!(
                block_number = dropped.block_number(),
                capacity = self.max_queue_length,
                "Block queue full, evicted oldest block"
            );
            metrics::record_block_evicted();
        }
        debug_assert!(invariant_queue_bounded(self.queue.len(), self.max_queue_length));
        metrics::record_block_ingested(self.queue.len());
        metrics::set_watermarks(
            self.watermarks.head_block_number,
            self.watermarks.last_irreversible_block_number,
        );

        evicted
    }

    /// Produces the next envelope for the consumer, or `None` if it has to
    /// wait for more blocks.
    pub fn take_next(&mut self) -> Option<Delivered> {
        let next_needed = match self.next_needed {
            Some(next_needed) if self.initialized => next_needed,
            _ => self.initialize()?,
        };

        let mut skipped = 0;
        while self
            .queue
            .front()
            .is_some_and(|queued| queued.block_number() < next_needed)
        {
            self.queue.pop_front();
            skipped += 1;
        }
        if skipped > 0 {
            trace!(skipped, next_needed, "Dropped blocks the consumer moved past");
            metrics::record_blocks_skipped(skipped);
        }

        let front = self.queue.front()?;
        let delivered = if front.block_number() == next_needed {
            let envelope = self.queue.pop_front()?;
            Delivered {
                envelope,
                kind: DeliveryKind::Real,
            }
        } else {
            let bridges_to_front = front.block_number() == next_needed + 1;
            let mut filler = BlockEnvelope::filler(
                next_needed,
                self.last_accepted
                    .as_ref()
                    .map(|info| info.block_hash.clone())
                    .unwrap_or_default(),
                self.watermarks.last_irreversible_block_number,
            );
            if bridges_to_front {
                filler.block.block_info.block_hash = front.block.previous_block_hash().to_string();
            }
            Delivered {
                envelope: filler,
                kind: DeliveryKind::Filler,
            }
        };

        self.accept(&delivered.envelope);
        self.next_needed = Some(next_needed + 1);
        metrics::record_block_delivered(delivered.kind.as_str(), self.queue.len());
        Some(delivered)
    }

    /// Sets the block number the next delivery starts from.
    pub fn seek(&mut self, block_number: BlockNumber) {
        self.next_needed = Some(block_number);
    }

    /// Current watermarks.
    pub fn watermarks(&self) -> Watermarks {
        self.watermarks
    }

    /// Number of queued blocks.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Block number of the next delivery, once known.
    pub fn next_needed(&self) -> Option<BlockNumber> {
        self.next_needed
    }

    /// Info of the last block handed to the consumer.
    pub fn last_accepted(&self) -> Option<&BlockInfo> {
        self.last_accepted.as_ref()
    }

    /// Whether the live marker was latched.
    pub fn is_live_marker_reached(&self) -> bool {
        self.live_marker_reached
    }

    /// Configured starting block.
    pub fn start_at_block(&self) -> i64 {
        self.start_at_block
    }

    /// Number of the last block accepted by the consumer.
    pub fn current_block_number(&self) -> i64 {
        self.current_block_number
    }

    /// First delivery: start from whatever the source delivered first.
    fn initialize(&mut self) -> Option<BlockNumber> {
        let first = self.queue.front()?.block_number();
        if self.current_block_number < 0 {
            self.current_block_number = first as i64 - 1;
        }
        self.initialized = true;
        self.next_needed = Some(first);
        Some(first)
    }

    fn accept(&mut self, envelope: &BlockEnvelope) {
        self.current_block_number = envelope.block_number() as i64;
        self.last_accepted = Some(envelope.block.block_info.clone());
    }
}
