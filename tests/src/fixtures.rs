//! Builders for traces, wire lines and envelopes.

use shared_types::{
    Authorization, Block, BlockEnvelope, BlockInfo, BlockMeta, MatchingAction, TraceBlock,
    TraceEvent, TransactionTrace,
};

/// Hash of block `num` in the fixture chain.
pub fn block_id(num: u64) -> String {
    format!("{num:08x}-block")
}

/// A trace of block `num` with one `eosio.token::transfer` action.
pub fn trace(num: u64, trx: &str) -> TransactionTrace {
    TransactionTrace {
        id: trx.to_string(),
        block: TraceBlock {
            num,
            id: block_id(num),
            previous: block_id(num.saturating_sub(1)),
            timestamp: "2019-06-01T00:00:00.000".to_string(),
        },
        undo: false,
        irreversible_block_num: num.saturating_sub(3),
        cursor: format!("cursor-{trx}"),
        matching_actions: vec![MatchingAction {
            account: "eosio.token".to_string(),
            name: "transfer".to_string(),
            authorization: vec![Authorization {
                actor: "alice".to_string(),
                permission: "active".to_string(),
            }],
            data: serde_json::json!({ "from": "alice", "to": "bob", "quantity": "1.0000 EOS" }),
        }],
    }
}

/// Same as [`trace`], flagged as part of a fork rollback.
pub fn undo_trace(num: u64, trx: &str) -> TransactionTrace {
    TransactionTrace {
        undo: true,
        ..trace(num, trx)
    }
}

/// Trace events for one transaction per listed block.
pub fn events_for_blocks(numbers: &[u64]) -> Vec<TraceEvent> {
    numbers
        .iter()
        .map(|num| TraceEvent::Trace(trace(*num, &format!("trx-{num}"))))
        .collect()
}

/// A real envelope for block `num` chained onto `num - 1`.
pub fn envelope(num: u64, lib: u64) -> BlockEnvelope {
    BlockEnvelope {
        block: Block::new(BlockInfo {
            block_number: num,
            block_hash: block_id(num),
            previous_block_hash: block_id(num.saturating_sub(1)),
            timestamp: "2019-06-01T00:00:00.000".to_string(),
        }),
        meta: BlockMeta::new_block(),
        last_irreversible_block_number: lib,
    }
}

/// One line of the source's newline-delimited JSON stream.
pub fn wire_line(trace: &TransactionTrace) -> String {
    serde_json::json!({
        "undo": trace.undo,
        "irreversibleBlockNum": trace.irreversible_block_num,
        "cursor": trace.cursor,
        "trace": {
            "id": trace.id,
            "block": trace.block,
            "matchingActions": trace.matching_actions,
        }
    })
    .to_string()
}

/// The live marker line.
pub fn live_marker_line() -> String {
    r#"{"undo":false,"irreversibleBlockNum":0,"cursor":"","trace":null}"#.to_string()
}
