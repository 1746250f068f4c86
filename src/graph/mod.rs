//! Dependency graph derivation for templated resources.
//!
//! This module turns a resource slice into a directed dependency graph by
//! statically scanning the templated input strings of each resource for
//! references to other resources. The pipeline has three independent pieces:
//!
//! 1. [`generate_edges`] - a lazy, single-pass sequence of directed edges,
//!    one per distinct reference, with a self-loop sentinel for resources
//!    that reference nothing.
//! 2. [`find_isolated_vertices`] - the vertices whose only edge is the
//!    sentinel.
//! 3. [`generate_graph`] - an insertion-ordered adjacency map from vertex
//!    name to dependency names.
//!
//! Both consumers fully consume their input. An [`Edges`] iterator is
//! single-pass, so feeding the *same* iterator to two consumers gives the
//! second one nothing; either generate twice or materialize into a `Vec`
//! and share that:
//!
//! ```rust
//! use wireup::{Edge, Resource, find_isolated_vertices, generate_edges, generate_graph};
//!
//! # fn main() -> Result<(), wireup::GraphError> {
//! let resources = vec![Resource::new("solo").with_input("key1", "{{ ignore.var1 }}")];
//!
//! let edges: Vec<Edge> = generate_edges(&resources).collect::<Result<_, _>>()?;
//! let isolated = find_isolated_vertices(&edges)?;
//! let graph = generate_graph(&edges)?;
//!
//! assert_eq!(isolated, vec!["solo"]);
//! assert_eq!(graph["solo"], Vec::<String>::new());
//! # Ok(())
//! # }
//! ```
//!
//! The assembled graph is purely structural: it is not necessarily acyclic,
//! and neither cycle detection nor any ordering or scheduling of the
//! resources happens here.

mod edges;

pub use edges::{EDGE_IGNORES, Edge, Edges, IntoEdgeResult, generate_edges, generate_edges_with};

use indexmap::IndexMap;
use thiserror::Error;

use crate::models::Resource;
use crate::templating::TemplateError;

/// Adjacency mapping from vertex name to ordered, distinct neighbor names.
///
/// Every edge source keys an entry (possibly empty). Self-loop sentinels
/// contribute the entry but never a neighbor. Vertex order is first-seen
/// order; neighbor order is edge-emission order.
pub type AdjacencyMap = IndexMap<String, Vec<String>>;

/// Errors surfaced while deriving edges or assembling the graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A resource record could not be serialized for scanning.
    #[error("failed to serialize resource '{name}' for scanning")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The template extractor rejected a resource's serialized form.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Return the vertices whose only edge is the isolation sentinel.
///
/// Fully consumes the input, then reports self-loop vertices in encountered
/// order. The first edge error short-circuits.
///
/// # Examples
///
/// ```rust
/// use wireup::{Resource, find_isolated_vertices, generate_edges};
///
/// let resources = vec![
///     Resource::new("database").with_input("key1", "{{ ignore.var1 }}"),
///     Resource::new("app").with_input("db", "{{ database.endpoint }}"),
/// ];
/// let isolated = find_isolated_vertices(generate_edges(&resources))?;
/// assert_eq!(isolated, vec!["database"]);
/// # Ok::<(), wireup::GraphError>(())
/// ```
pub fn find_isolated_vertices<I>(edges: I) -> Result<Vec<String>, GraphError>
where
    I: IntoIterator,
    I::Item: IntoEdgeResult,
{
    let edges: Vec<Edge> = edges
        .into_iter()
        .map(IntoEdgeResult::into_edge_result)
        .collect::<Result<_, _>>()?;

    Ok(edges
        .into_iter()
        .filter(Edge::is_isolation)
        .map(|edge| edge.vertex)
        .collect())
}

/// Fold an edge sequence into an [`AdjacencyMap`].
///
/// Fully consumes the input. Every edge source gets an entry; self-loop
/// sentinels contribute only the entry. Duplicate neighbors are not
/// collapsed here - the edge generator already deduplicates per resource.
///
/// # Examples
///
/// ```rust
/// use wireup::{Resource, generate_edges, generate_graph};
///
/// let resources = vec![
///     Resource::new("database").with_input("key1", "{{ ignore.var1 }}"),
///     Resource::new("app").with_input("db", "{{ database.endpoint }}"),
/// ];
/// let graph = generate_graph(generate_edges(&resources))?;
/// assert_eq!(graph["database"], Vec::<String>::new());
/// assert_eq!(graph["app"], vec!["database"]);
/// # Ok::<(), wireup::GraphError>(())
/// ```
pub fn generate_graph<I>(edges: I) -> Result<AdjacencyMap, GraphError>
where
    I: IntoIterator,
    I::Item: IntoEdgeResult,
{
    let mut graph = AdjacencyMap::new();
    for item in edges {
        let edge = item.into_edge_result()?;
        let isolation = edge.is_isolation();
        let neighbors = graph.entry(edge.vertex).or_default();
        if !isolation {
            neighbors.push(edge.neighbor);
        }
    }

    tracing::debug!(
        vertices = graph.len(),
        edges = graph.values().map(Vec::len).sum::<usize>(),
        "assembled dependency graph"
    );
    Ok(graph)
}

/// Derive the dependency graph for a resource slice in one call.
///
/// Equivalent to `generate_graph(generate_edges(resources))`.
pub fn dependency_graph(resources: &[Resource]) -> Result<AdjacencyMap, GraphError> {
    generate_graph(generate_edges(resources))
}
