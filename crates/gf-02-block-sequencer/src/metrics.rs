//! # Sequencer Metrics
//!
//! Prometheus metrics for monitoring the lookahead queue and watermarks.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! gf-02-block-sequencer = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `sequencer_blocks_ingested_total` - Counter of completed blocks queued
//! - `sequencer_blocks_delivered_total` - Counter of blocks handed to the consumer (by kind)
//! - `sequencer_blocks_evicted_total` - Counter of blocks evicted from a full queue
//! - `sequencer_blocks_skipped_total` - Counter of queued blocks the consumer moved past
//! - `sequencer_queue_length` - Gauge of queued blocks
//! - `sequencer_head_block_number` - Gauge of the head watermark
//! - `sequencer_last_irreversible_block_number` - Gauge of the irreversibility watermark

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total blocks queued
    pub static ref BLOCKS_INGESTED: IntCounter = register_int_counter!(
        "sequencer_blocks_ingested_total",
        "Total number of completed blocks queued"
    )
    .expect("Failed to create BLOCKS_INGESTED metric");

    /// Total blocks delivered, labeled by kind (real, filler)
    pub static ref BLOCKS_DELIVERED: IntCounterVec = register_int_counter_vec!(
        "sequencer_blocks_delivered_total",
        "Total number of blocks handed to the consumer",
        &["kind"]
    )
    .expect("Failed to create BLOCKS_DELIVERED metric");

    /// Total blocks evicted from a full queue
    pub static ref BLOCKS_EVICTED: IntCounter = register_int_counter!(
        "sequencer_blocks_evicted_total",
        "Total number of blocks evicted from a full queue"
    )
    .expect("Failed to create BLOCKS_EVICTED metric");

    /// Total queued blocks dropped because the consumer moved past them
    pub static ref BLOCKS_SKIPPED: IntCounter = register_int_counter!(
        "sequencer_blocks_skipped_total",
        "Total number of queued blocks the consumer moved past"
    )
    .expect("Failed to create BLOCKS_SKIPPED metric");

    /// Current queue length
    pub static ref QUEUE_LENGTH: IntGauge = register_int_gauge!(
        "sequencer_queue_length",
        "Number of blocks waiting in the lookahead queue"
    )
    .expect("Failed to create QUEUE_LENGTH metric");

    /// Head watermark
    pub static ref HEAD_BLOCK_NUMBER: IntGauge = register_int_gauge!(
        "sequencer_head_block_number",
        "Highest block number believed to exist on chain"
    )
    .expect("Failed to create HEAD_BLOCK_NUMBER metric");

    /// Irreversibility watermark
    pub static ref LAST_IRREVERSIBLE_BLOCK_NUMBER: IntGauge = register_int_gauge!(
        "sequencer_last_irreversible_block_number",
        "Highest block number reported final by the source"
    )
    .expect("Failed to create LAST_IRREVERSIBLE_BLOCK_NUMBER metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a block queued, with the resulting queue length
#[cfg(feature = "metrics")]
pub fn record_block_ingested(queue_length: usize) {
    BLOCKS_INGESTED.inc();
    QUEUE_LENGTH.set(queue_length as i64);
}

/// Record a block handed to the consumer
#[cfg(feature = "metrics")]
pub fn record_block_delivered(kind: &str, queue_length: usize) {
    BLOCKS_DELIVERED.with_label_values(&[kind]).inc();
    QUEUE_LENGTH.set(queue_length as i64);
}

/// Record a block evicted from a full queue
#[cfg(feature = "metrics")]
pub fn record_block_evicted() {
    BLOCKS_EVICTED.inc();
}

/// Record queued blocks dropped after the consumer moved past them
#[cfg(feature = "metrics")]
pub fn record_blocks_skipped(count: usize) {
    BLOCKS_SKIPPED.inc_by(count as u64);
}

/// Update watermark gauges
#[cfg(feature = "metrics")]
pub fn set_watermarks(head_block_number: u64, last_irreversible_block_number: u64) {
    HEAD_BLOCK_NUMBER.set(head_block_number as i64);
    LAST_IRREVERSIBLE_BLOCK_NUMBER.set(last_irreversible_block_number as i64);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

/// No-op: record a block queued
#[cfg(not(feature = "metrics"))]
pub fn record_block_ingested(_queue_length: usize) {}

/// No-op: record a block handed to the consumer
#[cfg(not(feature = "metrics"))]
pub fn record_block_delivered(_kind: &str, _queue_length: usize) {}

/// No-op: record a block evicted from a full queue
#[cfg(not(feature = "metrics"))]
pub fn record_block_evicted() {}

/// No-op: record queued blocks dropped after the consumer moved past them
#[cfg(not(feature = "metrics"))]
pub fn record_blocks_skipped(_count: usize) {}

/// No-op: update watermark gauges
#[cfg(not(feature = "metrics"))]
pub fn set_watermarks(_head_block_number: u64, _last_irreversible_block_number: u64) {}
