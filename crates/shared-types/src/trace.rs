//! # Transaction Traces
//!
//! Events delivered by the upstream filtered transaction source.

use serde::{Deserialize, Serialize};

use crate::entities::{Action, ActionPayload, Authorization, BlockInfo, BlockNumber};

/// Block a trace belongs to, in the source's field naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceBlock {
    /// Block number.
    pub num: BlockNumber,
    /// Block id.
    pub id: String,
    /// Parent block id.
    pub previous: String,
    /// Block timestamp.
    pub timestamp: String,
}

impl From<&TraceBlock> for BlockInfo {
    fn from(block: &TraceBlock) -> Self {
        Self {
            block_number: block.num,
            block_hash: block.id.clone(),
            previous_block_hash: block.previous.clone(),
            timestamp: block.timestamp.clone(),
        }
    }
}

/// An action of the transaction that matched the subscription query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingAction {
    pub account: String,
    pub name: String,
    #[serde(default)]
    pub authorization: Vec<Authorization>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// One matching transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTrace {
    /// Transaction id.
    pub id: String,
    /// Block the transaction was included in.
    pub block: TraceBlock,
    /// Part of a fork rollback.
    pub undo: bool,
    /// Irreversible block number reported by the source with this trace.
    pub irreversible_block_num: BlockNumber,
    /// Opaque resumption point.
    pub cursor: String,
    /// Matched actions in execution order.
    pub matching_actions: Vec<MatchingAction>,
}

impl TransactionTrace {
    pub fn block_number(&self) -> BlockNumber {
        self.block.num
    }

    /// Converts the matched actions into typed actions.
    ///
    /// `action_index` is the ordinal of the action among this
    /// transaction's matched actions.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.matching_actions
            .iter()
            .enumerate()
            .map(move |(index, matched)| Action {
                action_type: Action::type_tag(&matched.account, &matched.name),
                payload: ActionPayload {
                    transaction_id: self.id.clone(),
                    action_index: index as u32,
                    account: matched.account.clone(),
                    name: matched.name.clone(),
                    authorization: matched.authorization.clone(),
                    data: matched.data.clone(),
                },
            })
    }
}

/// An event from the upstream source.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A matching transaction.
    Trace(TransactionTrace),
    /// The source caught up to the chain head at subscription time.
    LiveMarker,
}

impl From<TransactionTrace> for TraceEvent {
    fn from(trace: TransactionTrace) -> Self {
        TraceEvent::Trace(trace)
    }
}
