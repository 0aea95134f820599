//! # Domain Errors
//!
//! Faults raised by the upstream transport. The aggregator itself never
//! fails: ordering is trusted to the transport.

use thiserror::Error;

/// Transport error types.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection to the source was lost.
    #[error("Source disconnected: {0}")]
    Disconnected(String),

    /// A message from the source could not be decoded.
    #[error("Malformed message at line {line}: {reason}")]
    Malformed {
        /// Position of the message in the stream (1-based)
        line: u64,
        /// Decoder error
        reason: String,
    },

    /// `next_event` was called before `subscribe`.
    #[error("No active subscription")]
    NotSubscribed,

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
