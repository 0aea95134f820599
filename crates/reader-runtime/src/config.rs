//! # Runtime Configuration
//!
//! Stream and sequencer settings, overridable from the environment.

use std::env;
use std::path::PathBuf;

use gf_01_block_aggregator::StreamConfig;
use gf_02_block_sequencer::SequencerConfig;
use tracing::{info, warn};

/// Complete reader configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Upstream subscription parameters.
    pub stream: StreamConfig,
    /// Lookahead queue and start block.
    pub sequencer: SequencerConfig,
    /// Newline-delimited JSON file to replay traces from. `None` reads stdin.
    pub trace_file: Option<PathBuf>,
    /// Resume the subscription after this cursor.
    pub cursor: String,
}

impl RuntimeConfig {
    /// Create a config for testing.
    pub fn for_testing() -> Self {
        Self {
            stream: StreamConfig::for_testing(),
            sequencer: SequencerConfig::for_testing(),
            trace_file: None,
            cursor: String::new(),
        }
    }

    /// Load configuration from environment variables over the defaults.
    ///
    /// # Environment Variables
    ///
    /// - `GF_START_AT_BLOCK`: First block to deliver (default: 1)
    /// - `GF_MAX_QUEUE_LENGTH`: Lookahead queue capacity (default: 200)
    /// - `GF_ONLY_IRREVERSIBLE`: Only stream irreversible blocks (default: false)
    /// - `GF_QUERY`: Search query (default: status:executed)
    /// - `GF_NETWORK`: Network name (default: mainnet)
    /// - `GF_TRACE_FILE`: Trace file to replay (default: stdin)
    /// - `GF_CURSOR`: Resume after this cursor (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup("GF_START_AT_BLOCK") {
            match value.trim().parse::<i64>() {
                Ok(start) => config.sequencer.start_at_block = start,
                Err(_) => warn!(value = %value, "GF_START_AT_BLOCK must be an integer"),
            }
        }
        if let Some(value) = lookup("GF_MAX_QUEUE_LENGTH") {
            match value.trim().parse::<usize>() {
                Ok(length) => config.sequencer.max_queue_length = length,
                Err(_) => warn!(value = %value, "GF_MAX_QUEUE_LENGTH must be a positive integer"),
            }
        }
        if let Some(value) = lookup("GF_ONLY_IRREVERSIBLE") {
            let only_irreversible = matches!(value.trim().to_lowercase().as_str(), "true" | "1");
            config.stream.only_irreversible = only_irreversible;
            config.sequencer.only_irreversible = only_irreversible;
        }
        if let Some(query) = lookup("GF_QUERY") {
            config.stream.query = query;
        }
        if let Some(network) = lookup("GF_NETWORK") {
            config.stream.network = network;
        }
        if let Some(path) = lookup("GF_TRACE_FILE").filter(|path| !path.is_empty()) {
            config.trace_file = Some(PathBuf::from(path));
        }
        if let Some(cursor) = lookup("GF_CURSOR") {
            info!("Resuming from configured cursor");
            config.cursor = cursor;
        }

        config.align_low_block_num();
        config
    }

    /// The subscription starts at the first block the consumer wants.
    /// Non-positive starts leave the stream's own lower bound in place.
    fn align_low_block_num(&mut self) {
        if self.sequencer.start_at_block > 0 {
            self.stream.low_block_num = self.sequencer.start_at_block as u64;
        }
    }
}
