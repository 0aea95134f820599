//! # Reader Runtime Library
//!
//! Runs the block reader: a producer task pulls events from a
//! [`TraceSource`](gf_01_block_aggregator::TraceSource), the aggregator
//! turns them into completed blocks, and the sequencer serves them to a
//! single consumer without gaps.
//!
//! ```text
//! TraceSource ──TraceEvent──→ BlockAggregator ──BlockEnvelope──→ BlockSequencer
//!  (producer task)                                                 │
//!                                                                  ↓
//!                                                     consumer: next_block()
//! ```
//!
//! The `gapfill-reader` binary is the main entry point.

#![warn(missing_docs)]

pub mod adapters;
pub mod config;
pub mod wiring;

pub use adapters::{JsonLinesTraceSource, SequencerListener};
pub use config::RuntimeConfig;
pub use wiring::{PipelineError, ProducerSummary, ReaderPipeline};
