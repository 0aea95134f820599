//! # GF-02 Block Sequencer
//!
//! Serves a strictly sequential, gap-free block stream to a single
//! pull-based consumer.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Blocks completed by the aggregator are queued in a bounded FIFO. The
//! consumer pulls them one at a time and expects every block number in
//! order. When the next block it needs was never delivered upstream (it
//! matched nothing), the sequencer synthesizes an empty filler block
//! chained onto the last block it handed out.
//!
//! ## Guarantees
//!
//! | Property | Enforcement |
//! |----------|-------------|
//! | Head watermark never decreases | `max` on every ingest |
//! | Irreversible watermark never decreases | `max` on every ingest |
//! | Consecutive deliveries are linked | fillers chain onto the last accepted block |
//! | Block numbers advance by one | `next_needed += 1` after each delivery |
//! | Bounded memory | oldest queued block evicted past `max_queue_length` |
//!
//! ## Module Structure
//!
//! ```text
//! gf-02-block-sequencer/
//! ├── domain/          # SequencerState, Watermarks, invariants, errors
//! ├── ports/           # ActionReader (inbound)
//! ├── service.rs       # BlockSequencer (locking + wakeups)
//! ├── metrics.rs       # Prometheus metrics (feature = "metrics")
//! └── config.rs        # SequencerConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports
pub use config::SequencerConfig;
pub use domain::{
    invariant_linked, invariant_queue_bounded, invariant_watermarks_monotonic, Delivered,
    DeliveryKind, SequencerError, SequencerState, Watermarks, DEFAULT_MAX_QUEUE_LENGTH,
    DEFAULT_START_AT_BLOCK,
};
pub use ports::{ActionReader, ReaderInfo};
pub use service::BlockSequencer;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
