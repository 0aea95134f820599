//! # Domain Module
//!
//! Core domain types for the Block Sequencer.

pub mod errors;
pub mod invariants;
pub mod state;

pub use errors::*;
pub use invariants::*;
pub use state::*;
