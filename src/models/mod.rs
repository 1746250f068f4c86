//! Shared data models for wireup operations
//!
//! This module provides the [`Resource`] record consumed by the graph
//! builder. Resources usually arrive from configuration files (JSON, YAML
//! pre-converted to JSON), so the model is serde-derived and lenient:
//! only `name` is required, everything else defaults to empty.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named resource with templated inputs and declared outputs.
///
/// The `inputs` values may contain template expressions referencing other
/// resources' outputs (`{{ database.endpoint }}`); those references are what
/// the graph builder scans for. Identity is by `name`: resources are supplied
/// as an ordered sequence and no two may share a name - an invariant the
/// caller owns, not enforced here.
///
/// `inputs` is insertion-ordered so that reference discovery follows the
/// order the caller declared the inputs in.
///
/// # Examples
///
/// ```rust
/// use wireup::Resource;
///
/// let app = Resource::new("app")
///     .with_input("db", "{{ database.endpoint }}")
///     .with_outputs(["url"])
///     .with_requires(["database"]);
/// assert_eq!(app.name, "app");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub name: String,

    /// Input key to templated string value.
    #[serde(default)]
    pub inputs: IndexMap<String, String>,

    /// Ordered output names this resource produces.
    #[serde(default)]
    pub outputs: Vec<String>,

    /// Explicit dependency names. Accepted and carried through
    /// serialization, but not consumed by edge generation - dependencies are
    /// inferred from template references only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<Vec<String>>,
}

impl Resource {
    /// Create a resource with the given name and no inputs or outputs.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: IndexMap::new(),
            outputs: Vec::new(),
            requires: None,
        }
    }

    /// Add a single templated input.
    #[must_use]
    pub fn with_input(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.inputs.insert(key.into(), template.into());
        self
    }

    /// Replace the declared outputs.
    #[must_use]
    pub fn with_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs = outputs.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the explicit `requires` list.
    #[must_use]
    pub fn with_requires<I, S>(mut self, requires: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires = Some(requires.into_iter().map(Into::into).collect());
        self
    }
}
