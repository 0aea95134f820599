//! # `BlockEnvelope`
//!
//! The unit handed from the aggregator to the sequencer and from the
//! sequencer to the consumer.
//!
//! An envelope is either *real* (built from observed traces) or a *filler*
//! (synthesized for a block number the source never delivered). Fillers
//! have no actions and chain onto the previously delivered block.

use serde::{Deserialize, Serialize};

use crate::entities::{Block, BlockHash, BlockInfo, BlockNumber};

/// Flags describing how the consumer should treat a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMeta {
    /// The block supersedes a previously reported one after a fork.
    pub is_rollback: bool,
    /// The block has not been seen by the consumer before.
    pub is_new_block: bool,
    /// This is the first block ever emitted by the aggregator.
    pub is_earliest_block: bool,
}

impl BlockMeta {
    /// Meta for a block that was never reported before.
    pub fn new_block() -> Self {
        Self {
            is_rollback: false,
            is_new_block: true,
            is_earliest_block: false,
        }
    }
}

/// A block plus the metadata and irreversibility watermark it was observed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockEnvelope {
    /// The block itself.
    pub block: Block,
    /// How the consumer should treat the block.
    #[serde(rename = "blockMeta")]
    pub meta: BlockMeta,
    /// Highest final block number known when this envelope was built.
    pub last_irreversible_block_number: BlockNumber,
}

impl BlockEnvelope {
    /// Synthesizes an empty block standing in for `block_number`.
    ///
    /// The filler chains onto `previous_block_hash` so consecutive
    /// deliveries stay linked.
    pub fn filler(
        block_number: BlockNumber,
        previous_block_hash: BlockHash,
        last_irreversible_block_number: BlockNumber,
    ) -> Self {
        Self {
            block: Block::new(BlockInfo::empty(block_number, previous_block_hash)),
            meta: BlockMeta::new_block(),
            last_irreversible_block_number,
        }
    }

    pub fn block_number(&self) -> BlockNumber {
        self.block.block_number()
    }

    pub fn block_hash(&self) -> &str {
        self.block.block_hash()
    }

    /// True when the envelope carries no actions.
    pub fn is_empty(&self) -> bool {
        self.block.actions.is_empty()
    }
}
