//! # Sequencer Configuration

use serde::{Deserialize, Serialize};

use crate::domain::{SequencerError, DEFAULT_MAX_QUEUE_LENGTH, DEFAULT_START_AT_BLOCK};

/// Sequencer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Block the consumer starts at. Zero or negative means "wherever the
    /// source starts".
    pub start_at_block: i64,

    /// Capacity of the lookahead queue.
    pub max_queue_length: usize,

    /// The upstream only delivers irreversible blocks. Reported in
    /// [`crate::ReaderInfo`].
    pub only_irreversible: bool,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            start_at_block: DEFAULT_START_AT_BLOCK,
            max_queue_length: DEFAULT_MAX_QUEUE_LENGTH,
            only_irreversible: false,
        }
    }
}

impl SequencerConfig {
    /// Create a config for testing (small queue).
    pub fn for_testing() -> Self {
        Self {
            start_at_block: DEFAULT_START_AT_BLOCK,
            max_queue_length: 8,
            only_irreversible: false,
        }
    }

    /// Rejects configurations the sequencer cannot run with.
    pub fn validate(&self) -> Result<(), SequencerError> {
        if self.max_queue_length == 0 {
            return Err(SequencerError::InvalidConfig(
                "max_queue_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
