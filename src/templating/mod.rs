//! Template scanning for wireup resources.
//!
//! The graph builder never renders anything: it only needs to know which
//! variable roots a templated string references. This module provides that
//! capability behind the [`VariableExtractor`] trait, with a Tera-backed
//! default ([`TeraExtractor`]) so the concrete template engine stays
//! swappable without touching the edge or graph logic.
//!
//! Template fragments conventionally live under a filesystem-backed template
//! root; [`TeraExtractor::with_template_root`] wires that up. The scanned
//! resource text itself is always passed in memory - nothing in this crate
//! reads resource data from disk.

mod error;
mod extractor;

pub use error::TemplateError;
pub use extractor::{TeraExtractor, VariableExtractor};

/// Detect whether content contains template syntax markers at all.
///
/// Cheap probe used to skip full scans of resources whose serialized form
/// has no expressions, statements, or comments.
///
/// # Examples
///
/// ```rust
/// use wireup::contains_template_syntax;
///
/// assert!(contains_template_syntax("{{ database.endpoint }}"));
/// assert!(contains_template_syntax("{% if ready %}go{% endif %}"));
/// assert!(!contains_template_syntax("plain text"));
/// ```
#[must_use]
pub fn contains_template_syntax(content: &str) -> bool {
    content.contains("{{") || content.contains("{%") || content.contains("{#")
}
