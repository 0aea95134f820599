//! Feeds completed blocks from the aggregator into the sequencer.

use std::sync::Arc;

use gf_01_block_aggregator::BlockListener;
use gf_02_block_sequencer::BlockSequencer;
use shared_types::BlockEnvelope;

/// [`BlockListener`] adapter over a shared [`BlockSequencer`].
#[derive(Clone)]
pub struct SequencerListener {
    sequencer: Arc<BlockSequencer>,
}

impl SequencerListener {
    /// Wraps a sequencer.
    pub fn new(sequencer: Arc<BlockSequencer>) -> Self {
        Self { sequencer }
    }
}

impl BlockListener for SequencerListener {
    fn on_block(&self, envelope: BlockEnvelope) {
        self.sequencer.ingest(envelope);
    }

    fn on_live_marker(&self) {
        self.sequencer.mark_live_marker_reached();
    }
}
