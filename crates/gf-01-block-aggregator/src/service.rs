//! # Block Aggregator Service
//!
//! Turns the ordered trace stream into completed block envelopes.

use std::sync::Arc;

use shared_types::{BlockEnvelope, BlockInfo, TraceEvent, TransactionTrace};
use tracing::{debug, info, trace};

use crate::config::StreamConfig;
use crate::domain::{ListenerId, ListenerRegistry, OpenBlock, SubscriptionRequest};
use crate::ports::{BlockListener, TraceHandler};

/// Block Aggregator - groups traces by block and publishes completed blocks.
#[derive(Debug)]
pub struct BlockAggregator {
    /// Configuration of the upstream stream.
    config: StreamConfig,
    /// Receivers of completed blocks.
    listeners: ListenerRegistry,
    /// Block receiving traces, if any.
    open_block: Option<OpenBlock>,
    /// Info of the last block published.
    last_emitted: Option<BlockInfo>,
    /// Number of blocks published.
    emitted_count: u64,
    /// Resumption point of the last trace consumed.
    active_cursor: String,
    /// Latched once the source reports it reached the head.
    live_marker_reached: bool,
}

impl BlockAggregator {
    /// Create a new aggregator with no listeners.
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config,
            listeners: ListenerRegistry::new(),
            open_block: None,
            last_emitted: None,
            emitted_count: 0,
            active_cursor: String::new(),
            live_marker_reached: false,
        }
    }

    /// Register a listener for completed blocks.
    pub fn add_listener(&mut self, listener: Arc<dyn BlockListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Unregister a listener. Returns false if it was unknown.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Stream configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Block currently receiving traces.
    pub fn open_block(&self) -> Option<&OpenBlock> {
        self.open_block.as_ref()
    }

    /// Info of the most recently published block.
    pub fn last_emitted(&self) -> Option<&BlockInfo> {
        self.last_emitted.as_ref()
    }

    /// Number of blocks published so far.
    pub fn emitted_count(&self) -> u64 {
        self.emitted_count
    }

    /// Request that resumes the stream right after the last consumed trace.
    pub fn subscription_request(&self) -> SubscriptionRequest {
        SubscriptionRequest::new(&self.config, self.active_cursor.clone())
    }

    fn on_trace(&mut self, transaction: TransactionTrace) {
        trace!(
            block_number = transaction.block_number(),
            undo = transaction.undo,
            actions = transaction.matching_actions.len(),
            "Trace received"
        );

        let is_new_block = self
            .open_block
            .as_ref()
            .map_or(true, |open| !open.accepts(&transaction));

        if is_new_block {
            if let Some(completed) = self.open_block.take() {
                self.publish(completed);
            }
            self.open_block = Some(OpenBlock::open(&transaction));
        }

        if let Some(open) = self.open_block.as_mut() {
            open.append(&transaction);
        }

        self.active_cursor = transaction.cursor;
    }

    fn publish(&mut self, completed: OpenBlock) {
        let envelope: BlockEnvelope = completed.finalize(self.last_emitted.is_none());

        debug!(
            block_number = envelope.block_number(),
            actions = envelope.block.actions.len(),
            rollback = envelope.meta.is_rollback,
            earliest = envelope.meta.is_earliest_block,
            "Block completed"
        );

        self.listeners.notify_block(&envelope);
        self.last_emitted = Some(envelope.block.block_info);
        self.emitted_count += 1;
    }
}

impl TraceHandler for BlockAggregator {
    fn on_event(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::Trace(transaction) => self.on_trace(transaction),
            TraceEvent::LiveMarker => {
                if !self.live_marker_reached {
                    info!("Live marker has been reached");
                }
                self.live_marker_reached = true;
                self.listeners.notify_live_marker();
            }
        }
    }

    fn active_cursor(&self) -> &str {
        &self.active_cursor
    }

    fn is_live_marker_reached(&self) -> bool {
        self.live_marker_reached
    }
}
