//! # Stream Configuration
//!
//! Parameters of the upstream subscription the aggregator is fed from.

use serde::{Deserialize, Serialize};

use crate::domain::{
    DEFAULT_LIVE_MARKER_INTERVAL, DEFAULT_LOW_BLOCK_NUM, DEFAULT_NETWORK, DEFAULT_QUERY,
};

/// Upstream stream configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Network the source serves (e.g. `mainnet`).
    pub network: String,

    /// Search query selecting the transactions to stream.
    pub query: String,

    /// Lowest block number the subscription starts from.
    pub low_block_num: u64,

    /// Only deliver transactions from irreversible blocks.
    pub only_irreversible: bool,

    /// Number of blocks between two live markers.
    pub live_marker_interval: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            query: DEFAULT_QUERY.to_string(),
            low_block_num: DEFAULT_LOW_BLOCK_NUM,
            only_irreversible: false,
            live_marker_interval: DEFAULT_LIVE_MARKER_INTERVAL,
        }
    }
}

impl StreamConfig {
    /// Create a config for testing (local network, start at block 1).
    pub fn for_testing() -> Self {
        Self {
            network: "local".to_string(),
            live_marker_interval: 1,
            ..Self::default()
        }
    }
}
