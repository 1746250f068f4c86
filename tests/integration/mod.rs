//! Integration test suite for wireup
//!
//! End-to-end scenarios exercising the full pipeline the way a caller
//! would: resource lists in, edge sequences, isolation lists, and
//! adjacency maps out. Run with:
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! Test organization:
//! - **resource_graph**: the documented three-resource scenario, list
//!   mutation and regeneration, and serde-boundary behavior
//! - **template_root**: the Tera extractor against a filesystem-backed
//!   template root

mod template_root;
