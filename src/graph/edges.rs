//! Edge derivation from templated resources.
//!
//! An edge is the connecting line between two resources, directed from a
//! resource to something it references. Edges are derived, never stored:
//! each call to [`generate_edges`] walks the resource slice afresh, so the
//! sequence always reflects the list's current state.

use std::collections::VecDeque;
use std::fmt;

use crate::models::Resource;
use crate::templating::{TeraExtractor, VariableExtractor};

use super::GraphError;

/// Root names that never count as dependencies.
///
/// `ignore` is the conventional placeholder namespace for inputs that
/// reference nothing real (`{{ ignore.var1 }}`).
pub const EDGE_IGNORES: &[&str] = &["ignore"];

/// A directed edge between two resource names.
///
/// Equal endpoints are the isolation sentinel - "no dependency found for
/// this vertex" - not a real cycle. Dependency edges never have equal
/// endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    /// The resource the edge starts from.
    pub vertex: String,
    /// The referenced resource.
    pub neighbor: String,
}

impl Edge {
    /// Create an edge from `vertex` to `neighbor`.
    #[must_use]
    pub fn new(vertex: impl Into<String>, neighbor: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            neighbor: neighbor.into(),
        }
    }

    /// Whether this edge is the isolation sentinel (a self-loop).
    #[must_use]
    pub fn is_isolation(&self) -> bool {
        self.vertex == self.neighbor
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.vertex, self.neighbor)
    }
}

/// Conversion seam for edge consumers.
///
/// [`find_isolated_vertices`](super::find_isolated_vertices) and
/// [`generate_graph`](super::generate_graph) accept anything iterable whose
/// items convert to `Result<Edge, GraphError>`: a live [`Edges`] iterator, a
/// materialized `Vec<Edge>`, or borrowed `&Edge`s from a shared slice.
pub trait IntoEdgeResult {
    /// Convert this item into an edge or the error that replaced it.
    fn into_edge_result(self) -> Result<Edge, GraphError>;
}

impl IntoEdgeResult for Edge {
    fn into_edge_result(self) -> Result<Edge, GraphError> {
        Ok(self)
    }
}

impl IntoEdgeResult for &Edge {
    fn into_edge_result(self) -> Result<Edge, GraphError> {
        Ok(self.clone())
    }
}

impl IntoEdgeResult for Result<Edge, GraphError> {
    fn into_edge_result(self) -> Result<Edge, GraphError> {
        self
    }
}

/// Lazy, single-pass edge sequence over a resource slice.
///
/// Each resource's edges are derived when the iterator reaches it. The
/// sequence is forward-only and not restartable: once exhausted it yields
/// nothing, and regeneration requires a fresh [`generate_edges`] call over
/// the (possibly changed) slice. After yielding an error the iterator is
/// finished.
pub struct Edges<'a, X = TeraExtractor> {
    resources: std::slice::Iter<'a, Resource>,
    extractor: X,
    pending: VecDeque<Edge>,
    finished: bool,
}

impl<X: VariableExtractor> Edges<'_, X> {
    /// Derive the edges for one resource: serialize it, extract referenced
    /// roots, filter the ignore-set and self-references, dedup in first-seen
    /// order, and fall back to the isolation sentinel when nothing remains.
    fn edges_for(&self, resource: &Resource) -> Result<Vec<Edge>, GraphError> {
        let raw = serde_json::to_string(resource).map_err(|source| GraphError::Serialize {
            name: resource.name.clone(),
            source,
        })?;

        let vertex = &resource.name;
        let mut neighbors: Vec<String> = Vec::new();
        for candidate in self.extractor.undeclared_variables(&raw)? {
            if EDGE_IGNORES.contains(&candidate.as_str()) {
                tracing::trace!(vertex = %vertex, candidate = %candidate, "ignored namespace");
                continue;
            }
            if candidate == *vertex {
                tracing::trace!(vertex = %vertex, "skipping self-reference");
                continue;
            }
            if !neighbors.contains(&candidate) {
                neighbors.push(candidate);
            }
        }

        tracing::debug!(
            vertex = %vertex,
            neighbors = neighbors.len(),
            "derived dependency edges"
        );

        if neighbors.is_empty() {
            // Isolated node: the self-loop sentinel keeps it visible to
            // downstream consumers.
            return Ok(vec![Edge::new(vertex.clone(), vertex.clone())]);
        }

        Ok(neighbors.into_iter().map(|neighbor| Edge::new(vertex.clone(), neighbor)).collect())
    }
}

impl<X: VariableExtractor> Iterator for Edges<'_, X> {
    type Item = Result<Edge, GraphError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            if let Some(edge) = self.pending.pop_front() {
                return Some(Ok(edge));
            }
            let resource = self.resources.next()?;
            match self.edges_for(resource) {
                Ok(edges) => self.pending.extend(edges),
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Generate the directed edge sequence for a resource slice using the
/// default Tera-backed extractor.
///
/// Per resource, in input order: one edge per distinct referenced root name
/// (ignore-set and self-references dropped), or a single self-loop sentinel
/// when none remain.
///
/// # Examples
///
/// ```rust
/// use wireup::{Edge, Resource, generate_edges};
///
/// let resources = vec![
///     Resource::new("database").with_input("key1", "{{ ignore.var1 }}"),
///     Resource::new("app").with_input("db", "{{ database.endpoint }}"),
/// ];
///
/// let edges: Vec<Edge> = generate_edges(&resources).collect::<Result<_, _>>()?;
/// assert_eq!(edges, vec![Edge::new("database", "database"), Edge::new("app", "database")]);
/// # Ok::<(), wireup::GraphError>(())
/// ```
pub fn generate_edges(resources: &[Resource]) -> Edges<'_, TeraExtractor> {
    generate_edges_with(resources, TeraExtractor::new())
}

/// Generate the edge sequence with a caller-supplied extractor.
///
/// The extractor seam keeps the templating technology swappable; pass a
/// borrowed extractor to reuse one across generations.
pub fn generate_edges_with<X: VariableExtractor>(
    resources: &[Resource],
    extractor: X,
) -> Edges<'_, X> {
    Edges {
        resources: resources.iter(),
        extractor,
        pending: VecDeque::new(),
        finished: false,
    }
}
