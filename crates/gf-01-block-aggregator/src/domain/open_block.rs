//! # Open Block
//!
//! The block currently being assembled from incoming traces.

use shared_types::{
    Block, BlockEnvelope, BlockInfo, BlockMeta, BlockNumber, TransactionTrace,
};

/// A block that still accepts traces.
///
/// A block's completion is only known once a trace of a different block
/// arrives, at which point it is finalized into an immutable envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenBlock {
    envelope: BlockEnvelope,
}

impl OpenBlock {
    /// Opens a block from the first trace belonging to it.
    ///
    /// `is_earliest_block` stays false until [`OpenBlock::finalize`].
    pub fn open(trace: &TransactionTrace) -> Self {
        Self {
            envelope: BlockEnvelope {
                block: Block::new(BlockInfo::from(&trace.block)),
                meta: BlockMeta {
                    is_rollback: trace.undo,
                    is_new_block: true,
                    is_earliest_block: false,
                },
                last_irreversible_block_number: trace.irreversible_block_num,
            },
        }
    }

    /// Number of the block being assembled.
    pub fn block_number(&self) -> BlockNumber {
        self.envelope.block_number()
    }

    /// True when the block replays a fork.
    pub fn is_rollback(&self) -> bool {
        self.envelope.meta.is_rollback
    }

    /// Number of actions appended so far.
    pub fn action_count(&self) -> usize {
        self.envelope.block.actions.len()
    }

    /// True when `trace` continues this block.
    ///
    /// A rollback trace for the same number is a different block.
    pub fn accepts(&self, trace: &TransactionTrace) -> bool {
        trace.block_number() == self.block_number() && trace.undo == self.is_rollback()
    }

    /// Appends the trace's matched actions in arrival order.
    pub fn append(&mut self, trace: &TransactionTrace) {
        self.envelope.block.actions.extend(trace.actions());
    }

    /// Seals the block into an envelope.
    pub fn finalize(mut self, is_earliest_block: bool) -> BlockEnvelope {
        self.envelope.meta.is_earliest_block = is_earliest_block;
        self.envelope
    }
}
