//! # Gapfill Telemetry
//!
//! Logging setup shared by the reader binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gapfill_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `gapfill-reader` | Service name attached to startup logs |
//! | `GF_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `GF_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `GF_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber was already installed.
    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}

/// Installs the global subscriber.
///
/// Returns a guard that should be held for the lifetime of the
/// application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}
