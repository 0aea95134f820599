//! # Shared Types Crate
//!
//! This crate contains the entities exchanged between the Gapfill
//! subsystems: the transaction traces delivered by the upstream source,
//! the actions they carry, and the block envelopes produced from them.
//!
//! ## Data Flow
//!
//! ```text
//! TraceEvent ──▶ gf-01 Aggregator ──▶ BlockEnvelope ──▶ gf-02 Sequencer ──▶ consumer
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Tagged Events**: A live marker is a variant of `TraceEvent`, never a
//!   trace with missing fields.
//! - **Immutable Envelopes**: A `BlockEnvelope` is not modified once it has
//!   been handed to a listener.

pub mod entities;
pub mod envelope;
pub mod trace;

pub use entities::*;
pub use envelope::{BlockEnvelope, BlockMeta};
pub use trace::{MatchingAction, TraceBlock, TraceEvent, TransactionTrace};
