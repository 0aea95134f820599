//! Driving Ports (API - Inbound)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{BlockEnvelope, BlockNumber};

use crate::domain::SequencerError;

/// Snapshot of the reader's progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderInfo {
    /// Number of the last block handed to the consumer.
    pub current_block_number: i64,
    /// Configured starting block.
    pub start_at_block: i64,
    /// Head watermark (zero until observed).
    pub head_block_number: BlockNumber,
    /// Whether the upstream only delivers irreversible blocks.
    pub only_irreversible: bool,
    /// Irreversibility watermark (zero until observed).
    pub last_irreversible_block_number: BlockNumber,
}

/// Pull-based block reader.
///
/// This is the driving port for the Block Sequencer. A single consumer
/// calls [`ActionReader::next_block`] in a loop and receives every block
/// number in order, each linked to the one before it.
#[async_trait]
pub trait ActionReader: Send + Sync {
    /// Waits for and returns the next block in sequence.
    ///
    /// Suspends while the lookahead queue is empty. Returns
    /// [`SequencerError::Cancelled`] once the reader is shut down.
    async fn next_block(&self) -> Result<BlockEnvelope, SequencerError>;

    /// Makes the next delivery start at `block_number`.
    ///
    /// Queued blocks below it are dropped on the next call. Blocks the
    /// upstream never delivered are filled in.
    fn seek_to_block(&self, block_number: BlockNumber);

    /// Head watermark. Suspends until one has been observed.
    async fn head_block_number(&self) -> Result<BlockNumber, SequencerError>;

    /// Irreversibility watermark. Suspends until one has been observed.
    async fn last_irreversible_block_number(&self) -> Result<BlockNumber, SequencerError>;

    /// Current progress snapshot.
    fn info(&self) -> ReaderInfo;
}
