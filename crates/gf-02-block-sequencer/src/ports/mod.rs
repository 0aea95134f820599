//! Ports (hexagonal boundaries)

pub mod inbound;

pub use inbound::*;
