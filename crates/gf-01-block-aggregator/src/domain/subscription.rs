//! # Subscription Request
//!
//! What the transport needs to (re)open the filtered transaction stream.

use serde::{Deserialize, Serialize};

use crate::config::StreamConfig;

/// Network used when none is configured.
pub const DEFAULT_NETWORK: &str = "mainnet";

/// Query used when none is configured: every executed transaction.
pub const DEFAULT_QUERY: &str = "status:executed";

/// First block streamed when no lower bound is configured.
pub const DEFAULT_LOW_BLOCK_NUM: u64 = 1;

/// Blocks between two live markers.
pub const DEFAULT_LIVE_MARKER_INTERVAL: u64 = 1000;

/// Parameters of a subscription to the filtered transaction stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    /// Network to stream from.
    pub network: String,
    /// Resume after this cursor. Empty starts from `low_block_num`.
    pub cursor: String,
    /// Lowest block number to stream.
    pub low_block_num: u64,
    /// Search query.
    pub query: String,
    /// Restrict to irreversible blocks.
    pub only_irreversible: bool,
    /// Blocks between live markers.
    pub live_marker_interval: u64,
}

impl SubscriptionRequest {
    /// Builds a request from the stream configuration and a resumption cursor.
    pub fn new(config: &StreamConfig, cursor: impl Into<String>) -> Self {
        Self {
            network: config.network.clone(),
            cursor: cursor.into(),
            low_block_num: config.low_block_num,
            query: config.query.clone(),
            only_irreversible: config.only_irreversible,
            live_marker_interval: config.live_marker_interval,
        }
    }

    /// True when the request resumes a previous subscription.
    pub fn is_resume(&self) -> bool {
        !self.cursor.is_empty()
    }
}
