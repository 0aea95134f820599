//! # Core Domain Entities
//!
//! Blocks and the actions they carry, as observed by the downstream
//! action-processing consumer.

use serde::{Deserialize, Serialize};

/// Block number as reported by the source chain.
pub type BlockNumber = u64;

/// Opaque block identifier (hex block id as delivered by the source).
pub type BlockHash = String;

/// Timestamp reported for a block filled in when nothing real was observed.
pub const EPOCH_TIMESTAMP: &str = "1970-01-01T00:00:00Z";

/// Identity and linkage of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    /// Height of the block in the chain.
    pub block_number: BlockNumber,
    /// Identifier of this block.
    pub block_hash: BlockHash,
    /// Identifier of the parent block (creates the chain linkage).
    pub previous_block_hash: BlockHash,
    /// Production time as reported by the source.
    pub timestamp: String,
}

impl BlockInfo {
    /// Info for a block that carries no data of interest.
    pub fn empty(block_number: BlockNumber, previous_block_hash: BlockHash) -> Self {
        Self {
            block_number,
            block_hash: String::new(),
            previous_block_hash,
            timestamp: EPOCH_TIMESTAMP.to_string(),
        }
    }
}

/// An account permission that authorized an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    /// Account that signed.
    pub actor: String,
    /// Permission level used.
    pub permission: String,
}

/// Identifying data of a matched action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    /// Transaction that contains the action.
    pub transaction_id: String,
    /// Ordinal of the action among the matched actions of its transaction.
    pub action_index: u32,
    /// Contract account the action was sent to.
    pub account: String,
    /// Action name on the contract.
    pub name: String,
    /// Permissions that authorized the action.
    pub authorization: Vec<Authorization>,
    /// Source-specific action data.
    pub data: serde_json::Value,
}

/// One matched operation inside a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Type tag in the form `account::name`.
    #[serde(rename = "type")]
    pub action_type: String,
    /// Full identifying data of the action.
    pub payload: ActionPayload,
}

impl Action {
    /// Builds the type tag used to route an action to its handlers.
    pub fn type_tag(account: &str, name: &str) -> String {
        format!("{account}::{name}")
    }
}

/// A block together with the actions of interest it contains.
///
/// Actions keep the order in which their transactions arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Identity and linkage.
    pub block_info: BlockInfo,
    /// Matched actions in arrival order.
    pub actions: Vec<Action>,
}

impl Block {
    /// Creates a block with no actions yet.
    pub fn new(block_info: BlockInfo) -> Self {
        Self {
            block_info,
            actions: Vec::new(),
        }
    }

    pub fn block_number(&self) -> BlockNumber {
        self.block_info.block_number
    }

    pub fn block_hash(&self) -> &str {
        &self.block_info.block_hash
    }

    pub fn previous_block_hash(&self) -> &str {
        &self.block_info.previous_block_hash
    }
}
