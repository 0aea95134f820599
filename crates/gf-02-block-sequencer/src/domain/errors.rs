//! # Domain Errors

use thiserror::Error;

/// Sequencer error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequencerError {
    /// The sequencer was shut down while (or before) the caller waited.
    #[error("Sequencer shut down")]
    Cancelled,

    /// Configuration rejected at construction.
    #[error("Invalid sequencer configuration: {0}")]
    InvalidConfig(String),
}
