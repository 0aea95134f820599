//! # Gapfill Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Trace and envelope builders
//! └── integration/      # Aggregator → sequencer → consumer flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gf-tests
//! cargo test -p gf-tests integration::
//!
//! # Benchmarks
//! cargo bench -p gf-tests
//! ```

pub mod fixtures;
