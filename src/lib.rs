//! Wireup - static dependency wiring for templated resources
//!
//! Wireup provides two small, independent utilities that show up together in
//! configuration-driven orchestration pipelines:
//!
//! - **Dependency graphing**: derive a directed dependency graph among named
//!   resources by statically scanning each resource's templated input strings
//!   for references to other resources' outputs. No execution, no rendering -
//!   just "who mentions whom".
//! - **Flat/unflat**: reversible flattening of nested key/value structures
//!   into single-level mappings with delimiter-encoded key paths, the shape
//!   most key/value stores want.
//!
//! # Architecture Overview
//!
//! A resource declares `inputs` whose values are template strings such as
//! `{{ database.endpoint }}`. The root name of every such reference is treated
//! as a dependency on the resource with that name. The pipeline is:
//!
//! 1. [`generate_edges`] serializes each resource to its canonical JSON text
//!    and asks a [`templating::VariableExtractor`] for the undeclared root
//!    names, yielding one directed edge per distinct reference - or a
//!    self-loop sentinel when a resource references nothing.
//! 2. [`find_isolated_vertices`] reports the vertices whose only edge is the
//!    self-loop sentinel.
//! 3. [`generate_graph`] folds an edge sequence into an adjacency map from
//!    vertex name to ordered dependency names.
//!
//! Edge sequences are lazy and single-pass: each call to [`generate_edges`]
//! reflects the resource list as it is at iteration time, so callers can
//! mutate the list and regenerate without stale caches. Consuming the same
//! iterator twice yields nothing the second time - materialize into a `Vec`
//! first when more than one consumer needs the edges.
//!
//! # Core Modules
//!
//! - [`models`] - the [`Resource`] record (serde-derived)
//! - [`graph`] - edge generation, isolation detection, graph assembly
//! - [`templating`] - template-variable extraction behind a pluggable trait,
//!   with a Tera-backed default implementation
//! - [`flatten`] - the flat/unflat transform
//!
//! # Examples
//!
//! ## Building a dependency graph
//!
//! ```rust
//! use wireup::{Resource, dependency_graph, find_isolated_vertices, generate_edges};
//!
//! # fn main() -> Result<(), wireup::GraphError> {
//! let resources = vec![
//!     Resource::new("database")
//!         .with_input("key1", "{{ ignore.var1 }}")
//!         .with_outputs(["endpoint", "port"]),
//!     Resource::new("app")
//!         .with_input("db", "{{ database.endpoint }}")
//!         .with_outputs(["url"]),
//!     Resource::new("monitor")
//!         .with_input("db", "{{ database.endpoint }}")
//!         .with_input("app", "{{ app.url }}"),
//! ];
//!
//! let graph = dependency_graph(&resources)?;
//! assert_eq!(graph["database"], Vec::<String>::new());
//! assert_eq!(graph["app"], vec!["database"]);
//! assert_eq!(graph["monitor"], vec!["database", "app"]);
//!
//! let isolated = find_isolated_vertices(generate_edges(&resources))?;
//! assert_eq!(isolated, vec!["database"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Flattening for a key/value store
//!
//! ```rust
//! use serde_json::json;
//! use wireup::{FlatOptions, flat_with, unflat};
//!
//! let data = json!({
//!     "server": { "host": "localhost", "ports": [8080, 8081] }
//! });
//! let data = data.as_object().unwrap();
//!
//! let options = FlatOptions { full: true, ..FlatOptions::default() };
//! let flat = flat_with(data, &options);
//! assert_eq!(flat["server_host"], json!("localhost"));
//! assert_eq!(flat["server_ports[0]"], json!(8080));
//!
//! assert_eq!(&unflat(&flat), data);
//! ```

pub mod flatten;
pub mod graph;
pub mod models;
pub mod templating;

pub use flatten::{FlatOptions, UnflatOptions, flat, flat_with, unflat, unflat_with};
pub use graph::{
    AdjacencyMap, Edge, Edges, GraphError, dependency_graph, find_isolated_vertices,
    generate_edges, generate_edges_with, generate_graph,
};
pub use models::Resource;
pub use templating::{TemplateError, TeraExtractor, VariableExtractor, contains_template_syntax};
