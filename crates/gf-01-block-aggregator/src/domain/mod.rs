//! # Domain Module
//!
//! Core domain types for the Block Aggregator.

pub mod errors;
pub mod listeners;
pub mod open_block;
pub mod subscription;

pub use errors::*;
pub use listeners::*;
pub use open_block::*;
pub use subscription::*;
