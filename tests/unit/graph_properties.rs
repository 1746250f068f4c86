//! Graph derivation properties: ordering, shape, and sequence semantics.

use anyhow::Result;
use wireup::{
    Edge, GraphError, Resource, dependency_graph, find_isolated_vertices, generate_edges,
    generate_graph,
};

fn webshop() -> Vec<Resource> {
    vec![
        Resource::new("database")
            .with_input("key1", "{{ ignore.var1 }}")
            .with_outputs(["endpoint", "port"]),
        Resource::new("app")
            .with_input("db", "{{ database.endpoint }}")
            .with_input("unused", "{{ ignore.var1 }}")
            .with_outputs(["url"]),
        Resource::new("monitor")
            .with_input("db", "{{ database.endpoint }}")
            .with_input("app", "{{ app.url }}"),
    ]
}

#[test]
fn every_resource_keys_the_graph() -> Result<()> {
    let resources = webshop();
    let graph = dependency_graph(&resources)?;
    for resource in &resources {
        assert!(graph.contains_key(&resource.name), "missing vertex {}", resource.name);
    }
    Ok(())
}

#[test]
fn isolated_resources_map_to_empty_neighbor_lists() -> Result<()> {
    let resources = webshop();

    let isolated = find_isolated_vertices(generate_edges(&resources))?;
    assert_eq!(isolated, vec!["database"]);

    let graph = dependency_graph(&resources)?;
    assert!(graph["database"].is_empty());
    Ok(())
}

#[test]
fn edge_order_is_stable() -> Result<()> {
    let resources = webshop();
    let edges: Vec<Edge> = generate_edges(&resources).collect::<Result<_, _>>()?;
    assert_eq!(
        edges,
        vec![
            Edge::new("database", "database"),
            Edge::new("app", "database"),
            Edge::new("monitor", "database"),
            Edge::new("monitor", "app"),
        ]
    );

    // Same list, same order, every time.
    let again: Vec<Edge> = generate_edges(&resources).collect::<Result<_, _>>()?;
    assert_eq!(edges, again);
    Ok(())
}

#[test]
fn references_to_unknown_names_still_become_edges() -> Result<()> {
    let resources = vec![Resource::new("app").with_input("ext", "{{ elsewhere.value }}")];

    let graph = dependency_graph(&resources)?;
    assert_eq!(graph.len(), 1);
    assert_eq!(graph["app"], vec!["elsewhere"]);
    Ok(())
}

#[test]
fn repeated_references_collapse_to_one_edge() -> Result<()> {
    let resources = vec![
        Resource::new("app")
            .with_input("host", "{{ database.endpoint }}")
            .with_input("port", "{{ database.port }}"),
    ];

    let edges: Vec<Edge> = generate_edges(&resources).collect::<Result<_, _>>()?;
    assert_eq!(edges, vec![Edge::new("app", "database")]);
    Ok(())
}

#[test]
fn requires_is_not_consumed_by_edge_generation() -> Result<()> {
    let resources = vec![
        Resource::new("app")
            .with_input("key1", "{{ ignore.var1 }}")
            .with_requires(["database"]),
        Resource::new("database").with_input("key1", "{{ ignore.var1 }}"),
    ];

    let edges: Vec<Edge> = generate_edges(&resources).collect::<Result<_, _>>()?;
    assert_eq!(
        edges,
        vec![Edge::new("app", "app"), Edge::new("database", "database")],
        "explicit requires must not produce edges"
    );
    Ok(())
}

#[test]
fn self_references_in_content_are_dropped() -> Result<()> {
    let resources =
        vec![Resource::new("app").with_input("loopback", "{{ app.url }}/{{ database.endpoint }}")];

    let edges: Vec<Edge> = generate_edges(&resources).collect::<Result<_, _>>()?;
    // The self-reference disappears; only the sentinel may have equal ends.
    assert_eq!(edges, vec![Edge::new("app", "database")]);
    Ok(())
}

#[test]
fn exhausted_sequence_yields_nothing_on_second_pass() -> Result<()> {
    let resources = webshop();

    let mut edges = generate_edges(&resources);
    let first = find_isolated_vertices(&mut edges)?;
    assert_eq!(first, vec!["database"]);

    // Intended single-pass behavior, not a defect: the sequence is spent.
    let second = find_isolated_vertices(&mut edges)?;
    assert!(second.is_empty());

    let graph = generate_graph(&mut edges)?;
    assert!(graph.is_empty());
    Ok(())
}

#[test]
fn materialized_edges_feed_multiple_consumers() -> Result<()> {
    let resources = webshop();
    let edges: Vec<Edge> = generate_edges(&resources).collect::<Result<_, _>>()?;

    let isolated = find_isolated_vertices(&edges)?;
    let graph = generate_graph(&edges)?;

    assert_eq!(isolated, vec!["database"]);
    assert_eq!(graph["monitor"], vec!["database", "app"]);
    Ok(())
}

#[test]
fn regeneration_reflects_a_mutated_list() -> Result<()> {
    let mut resources = webshop();
    assert_eq!(dependency_graph(&resources)?.len(), 3);

    resources.push(
        Resource::new("backup")
            .with_input("db", "{{ database.endpoint }}")
            .with_outputs(["archive"]),
    );

    let graph = dependency_graph(&resources)?;
    assert_eq!(graph.len(), 4);
    assert_eq!(graph["backup"], vec!["database"]);
    Ok(())
}

#[test]
fn template_errors_propagate_and_finish_the_sequence() {
    let resources = vec![
        Resource::new("broken").with_input("key1", "{{ oops"),
        Resource::new("fine").with_input("key1", "{{ ignore.var1 }}"),
    ];

    let mut edges = generate_edges(&resources);
    let first = edges.next().expect("one item expected");
    assert!(matches!(first, Err(GraphError::Template(_))));
    assert!(edges.next().is_none(), "sequence must finish after an error");

    let collected: Result<Vec<Edge>, GraphError> = generate_edges(&resources).collect();
    assert!(collected.is_err());
}
