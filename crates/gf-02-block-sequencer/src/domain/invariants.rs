//! # Domain Invariants
//!
//! Business rules that must always hold true.

use shared_types::BlockEnvelope;

use super::state::Watermarks;

/// Block the consumer starts at when none is configured.
pub const DEFAULT_START_AT_BLOCK: i64 = 1;

/// Default capacity of the lookahead queue.
pub const DEFAULT_MAX_QUEUE_LENGTH: usize = 200;

/// Invariant: consecutive deliveries form a chain.
///
/// `next` is numbered one above `previous` and points at its hash.
pub fn invariant_linked(previous: &BlockEnvelope, next: &BlockEnvelope) -> bool {
    next.block_number() == previous.block_number() + 1
        && next.block.previous_block_hash() == previous.block_hash()
}

/// Invariant: watermarks never move backwards.
pub fn invariant_watermarks_monotonic(before: &Watermarks, after: &Watermarks) -> bool {
    after.head_block_number >= before.head_block_number
        && after.last_irreversible_block_number >= before.last_irreversible_block_number
}

/// Invariant: the lookahead queue stays within capacity.
pub fn invariant_queue_bounded(len: usize, max_queue_length: usize) -> bool {
    len <= max_queue_length
}
