//! Unit test suite for wireup
//!
//! Fine-grained tests against the public API. Run with:
//!
//! ```bash
//! cargo test --test unit
//! ```
//!
//! Test organization:
//! - **graph_properties**: edge ordering, graph shape, isolation, and the
//!   single-pass edge sequence contract
//! - **flatten_roundtrip**: property-based round-trip coverage of the
//!   flat/unflat transform

mod graph_properties;
