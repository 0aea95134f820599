//! # Adapters
//!
//! Port implementations connecting the aggregator and the sequencer to the
//! outside world.

pub mod json_lines;
pub mod sequencer_listener;

pub use json_lines::JsonLinesTraceSource;
pub use sequencer_listener::SequencerListener;
