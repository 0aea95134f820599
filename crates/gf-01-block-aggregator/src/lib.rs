//! # GF-01 Block Aggregator
//!
//! Groups an ordered stream of matching transaction traces into completed
//! block envelopes.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! The upstream source only delivers transactions that match a query, one
//! at a time. The aggregator detects block boundaries in that stream and
//! publishes one envelope per block to its registered listeners:
//! - consecutive traces of the same block are merged
//! - a rollback trace never merges into a non-rollback block of the same number
//! - the live marker is latched and forwarded, it never produces a block
//!
//! A block is only complete once a trace of the *next* block arrives, so the
//! most recently opened block is always held back by one boundary.
//!
//! ## Module Structure
//!
//! ```text
//! gf-01-block-aggregator/
//! ├── domain/          # OpenBlock, listener registry, subscription request, errors
//! ├── ports/           # TraceHandler (inbound), BlockListener + TraceSource (outbound)
//! ├── service.rs       # BlockAggregator
//! └── config.rs        # StreamConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use config::StreamConfig;
pub use domain::{
    ListenerId, ListenerRegistry, OpenBlock, SubscriptionRequest, TransportError,
    DEFAULT_LIVE_MARKER_INTERVAL, DEFAULT_LOW_BLOCK_NUM, DEFAULT_NETWORK, DEFAULT_QUERY,
};
pub use ports::{BlockListener, MockTraceSource, TraceHandler, TraceSource};
pub use service::BlockAggregator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
