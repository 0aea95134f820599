//! # Wiring
//!
//! Connects a trace source, the aggregator and the sequencer.

pub mod pipeline;

pub use pipeline::{PipelineError, ProducerSummary, ReaderPipeline};
