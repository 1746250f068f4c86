//! The Tera extractor against a filesystem-backed template root.

use anyhow::Result;
use tempfile::tempdir;
use wireup::{
    Edge, Resource, TemplateError, TeraExtractor, VariableExtractor, generate_edges_with,
};

#[test]
fn extraction_works_with_a_template_root() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("banner.tera"), "deployed {{ release.tag }}")?;

    let extractor = TeraExtractor::with_template_root(dir.path())?;
    let roots = extractor.undeclared_variables("{{ database.endpoint }}")?;
    assert_eq!(roots, vec!["database"]);
    Ok(())
}

#[test]
fn a_shared_extractor_drives_edge_generation() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("footer.tera"), "powered by {{ vendor.name }}")?;
    let extractor = TeraExtractor::with_template_root(dir.path())?;

    let resources = vec![
        Resource::new("database").with_input("key1", "{{ ignore.var1 }}"),
        Resource::new("app").with_input("db", "{{ database.endpoint }}"),
    ];

    // Borrowed extractor: reusable across generations.
    let edges: Vec<Edge> =
        generate_edges_with(&resources, &extractor).collect::<Result<_, _>>()?;
    assert_eq!(edges, vec![Edge::new("database", "database"), Edge::new("app", "database")]);

    let again: Vec<Edge> =
        generate_edges_with(&resources, &extractor).collect::<Result<_, _>>()?;
    assert_eq!(edges, again);
    Ok(())
}

#[test]
fn a_broken_fragment_fails_root_loading() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("broken.tera"), "{% endfor %}")?;

    let result = TeraExtractor::with_template_root(dir.path());
    assert!(matches!(result, Err(TemplateError::Loader { .. })));
    Ok(())
}
