//! Reversible flattening of nested key/value structures.
//!
//! Key/value stores want single-level mappings; configuration wants nesting.
//! [`flat`] walks a nested JSON object and encodes each leaf's access path
//! into a delimiter-joined key (`key1_key11_key111`), and [`unflat`] rebuilds
//! the nesting from those keys. Sequence elements are encoded with a bracket
//! pair appended to the owning key (`key2[1]`), but only when the `full`
//! option asks for it - by default a sequence stays intact as a leaf value so
//! it can still be joined against as a unit.
//!
//! Both directions visit keys in explicitly sorted order, so the output is
//! deterministic regardless of how the input mapping was built, and sequence
//! elements rebuild in index order.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use wireup::{FlatOptions, flat, flat_with, unflat};
//!
//! let data = json!({
//!     "key1": { "key11": { "key111": "value111" } },
//!     "key2": ["one", "two", "three"]
//! });
//! let data = data.as_object().unwrap();
//!
//! // Default: sequences stay whole.
//! let flattened = flat(data);
//! assert_eq!(flattened["key1_key11_key111"], json!("value111"));
//! assert_eq!(flattened["key2"], json!(["one", "two", "three"]));
//!
//! // Full: sequences expand element by element, and the transform inverts.
//! let options = FlatOptions { full: true, ..FlatOptions::default() };
//! let flattened = flat_with(data, &options);
//! assert_eq!(flattened["key2[0]"], json!("one"));
//! assert_eq!(&unflat(&flattened), data);
//! ```

use regex::Regex;
use serde_json::{Map, Value};

/// Options for [`flat_with`].
#[derive(Debug, Clone)]
pub struct FlatOptions {
    /// Prefix prepended (with a separator) to every produced key.
    pub prefix: Option<String>,
    /// Separator joining nested key segments.
    pub separator: String,
    /// Expand sequence elements into their own entries instead of keeping
    /// sequences as leaf values.
    pub full: bool,
    /// Bracket pair marking sequence indices in `full` mode.
    pub list_brackets: (String, String),
}

impl Default for FlatOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            separator: "_".to_string(),
            full: false,
            list_brackets: ("[".to_string(), "]".to_string()),
        }
    }
}

/// Options for [`unflat_with`]. Must mirror the options the data was
/// flattened with.
#[derive(Debug, Clone)]
pub struct UnflatOptions {
    /// Separator joining nested key segments.
    pub separator: String,
    /// Bracket pair marking sequence indices.
    pub list_brackets: (String, String),
}

impl Default for UnflatOptions {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
            list_brackets: ("[".to_string(), "]".to_string()),
        }
    }
}

/// Flatten a nested object with default options.
#[must_use]
pub fn flat(data: &Map<String, Value>) -> Map<String, Value> {
    flat_with(data, &FlatOptions::default())
}

/// Flatten a nested object into a single-level mapping from encoded key
/// path to leaf value.
///
/// Nested objects always recurse. Sequences stay intact as leaves unless
/// `full` is set, in which case each element becomes its own entry keyed
/// `parent[index]` (recursing when the element is itself an object). The
/// set of leaves is the same whatever the options; only the key encoding
/// changes.
#[must_use]
pub fn flat_with(data: &Map<String, Value>, options: &FlatOptions) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(data, options.prefix.as_deref(), options, &mut out);
    out
}

fn flatten_into(
    data: &Map<String, Value>,
    prefix: Option<&str>,
    options: &FlatOptions,
    out: &mut Map<String, Value>,
) {
    // Sort explicitly: determinism must not depend on the container.
    let mut keys: Vec<&String> = data.keys().collect();
    keys.sort();

    for key in keys {
        let path = match prefix {
            Some(prefix) => format!("{prefix}{}{key}", options.separator),
            None => key.clone(),
        };
        match &data[key.as_str()] {
            Value::Object(nested) => flatten_into(nested, Some(&path), options, out),
            Value::Array(items) if options.full => {
                for (index, item) in items.iter().enumerate() {
                    let indexed = format!(
                        "{path}{}{index}{}",
                        options.list_brackets.0, options.list_brackets.1
                    );
                    match item {
                        Value::Object(nested) => {
                            flatten_into(nested, Some(&indexed), options, out);
                        }
                        other => {
                            out.insert(indexed, other.clone());
                        }
                    }
                }
            }
            other => {
                out.insert(path, other.clone());
            }
        }
    }
}

/// Rebuild nesting from a flat mapping with default options.
#[must_use]
pub fn unflat(data: &Map<String, Value>) -> Map<String, Value> {
    unflat_with(data, &UnflatOptions::default())
}

/// Rebuild a nested object from delimiter-encoded flat keys.
///
/// Keys are processed in sorted order so sequence elements insert in index
/// order. Leading key segments become the nested object path; a final
/// segment shaped `name[digit]` inserts into the sequence stored under
/// `name`. Anything that does not parse as a path segment is used as a
/// literal key - best-effort nesting, never an error.
#[must_use]
pub fn unflat_with(data: &Map<String, Value>, options: &UnflatOptions) -> Map<String, Value> {
    // Anchored like a prefix match: `name[digit]`, brackets configurable.
    // Escaping keeps the pattern literal, so compilation cannot fail.
    let pattern = format!(
        r"^(\w*){}(\d){}",
        regex::escape(&options.list_brackets.0),
        regex::escape(&options.list_brackets.1)
    );
    let index_re = Regex::new(&pattern).unwrap();

    let mut root = Map::new();
    let mut keys: Vec<&String> = data.keys().collect();
    keys.sort();

    for key in keys {
        let value = data[key.as_str()].clone();
        let segments: Vec<&str> = key.split(options.separator.as_str()).collect();
        let Some((last, path)) = segments.split_last() else {
            continue;
        };

        let mut context = &mut root;
        for segment in path {
            let slot = context
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                // A scalar already sits on this path segment: replace it,
                // best effort.
                *slot = Value::Object(Map::new());
            }
            let Value::Object(next) = slot else {
                unreachable!()
            };
            context = next;
        }

        if let Some(caps) = index_re.captures(last) {
            let name = caps.get(1).map_or("", |m| m.as_str());
            let index: usize = caps[2].parse().unwrap();
            let slot = context
                .entry(name.to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            let Value::Array(items) = slot else {
                unreachable!()
            };
            let at = index.min(items.len());
            items.insert(at, value);
        } else {
            context.insert((*last).to_string(), value);
        }
    }

    root
}
