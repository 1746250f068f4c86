//! Template-variable extraction.
//!
//! The graph builder needs exactly one capability from a template engine:
//! given a templated string, report the root names of every variable
//! reference the template does not declare itself (`database` from
//! `{{ database.endpoint }}`, but not a `{% for %}` loop binding). The
//! [`VariableExtractor`] trait captures that capability so the concrete
//! templating technology stays swappable without touching edge or graph
//! logic.
//!
//! [`TeraExtractor`] is the default implementation. It validates the source
//! with Tera first - so malformed templates fail with a real engine error -
//! and then statically scans the expression bodies for root identifiers.
//! Names bound by `{% for %}` or `{% set %}` are considered declared, engine
//! keywords and filter/test names are never reported, and results come back
//! deduplicated in first-appearance order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tera::Tera;

use super::contains_template_syntax;
use super::error::{TemplateError, error_chain};

/// Internal name under which scanned sources are registered for validation.
const SCAN_TEMPLATE: &str = "__wireup_scan__";

/// Identifiers that belong to the template language rather than the caller.
const KEYWORDS: &[&str] = &[
    "and", "or", "not", "in", "is", "if", "elif", "else", "endif", "for", "endfor", "set",
    "set_global", "endset", "include", "extends", "import", "macro", "endmacro", "block",
    "endblock", "filter", "endfilter", "raw", "endraw", "break", "continue", "as", "with",
    "true", "false", "True", "False", "none", "None", "loop",
];

/// Extract the undeclared variable root names referenced by a template.
///
/// Implementations must be pure: the same source always yields the same
/// names, in first-appearance order, with no side effects beyond whatever
/// template-root configuration the extractor was constructed with.
pub trait VariableExtractor {
    /// Return the distinct root names the template references but does not
    /// declare, in discovery order.
    fn undeclared_variables(&self, source: &str) -> Result<Vec<String>, TemplateError>;
}

impl<X: VariableExtractor + ?Sized> VariableExtractor for &X {
    fn undeclared_variables(&self, source: &str) -> Result<Vec<String>, TemplateError> {
        (**self).undeclared_variables(source)
    }
}

/// Tera-backed [`VariableExtractor`].
///
/// Template fragments resolve against an optional filesystem template root,
/// the conventional loader setup. A fresh engine is built per scan - cheap,
/// and it keeps the extractor free of shared mutable state. The engine is
/// only used to parse; nothing is ever rendered.
///
/// # Examples
///
/// ```rust
/// use wireup::{TeraExtractor, VariableExtractor};
///
/// let extractor = TeraExtractor::new();
/// let roots = extractor
///     .undeclared_variables("{{ database.endpoint }}:{{ database.port }}")
///     .unwrap();
/// assert_eq!(roots, vec!["database"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TeraExtractor {
    template_root: Option<PathBuf>,
}

impl TeraExtractor {
    /// Create an extractor with no template root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor whose engine loads template fragments from a
    /// filesystem-backed template root.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Loader`] when the root cannot be loaded.
    pub fn with_template_root(root: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let extractor = Self {
            template_root: Some(root.as_ref().to_path_buf()),
        };
        // Fail fast on an unloadable root instead of at first scan.
        extractor.engine()?;
        Ok(extractor)
    }

    fn engine(&self) -> Result<Tera, TemplateError> {
        match &self.template_root {
            Some(root) => {
                let glob = format!("{}/**/*", root.display());
                Tera::new(&glob).map_err(|source| TemplateError::Loader {
                    root: root.clone(),
                    source,
                })
            }
            None => Ok(Tera::default()),
        }
    }
}

impl VariableExtractor for TeraExtractor {
    fn undeclared_variables(&self, source: &str) -> Result<Vec<String>, TemplateError> {
        if !contains_template_syntax(source) {
            return Ok(Vec::new());
        }

        // Parse with the real engine first so syntax errors surface as
        // engine errors rather than silently producing partial results.
        let mut engine = self.engine()?;
        engine
            .add_raw_template(SCAN_TEMPLATE, source)
            .map_err(|source| TemplateError::Syntax {
                message: error_chain(&source),
                source,
            })?;

        let bound = bound_names(source);
        let mut roots = Vec::new();
        for body in expression_bodies(source) {
            collect_roots(&body, &bound, &mut roots);
        }

        tracing::trace!(roots = ?roots, "extracted undeclared template roots");
        Ok(roots)
    }
}

fn expression_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Comments first so their contents are consumed, never scanned.
    RE.get_or_init(|| Regex::new(r"(?s)\{#.*?#\}|\{\{(.*?)\}\}|\{%(.*?)%\}").unwrap())
}

fn for_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{%-?\s*for\s+(\w+)(?:\s*,\s*(\w+))?\s+in").unwrap())
}

fn set_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{%-?\s*set(?:_global)?\s+(\w+)").unwrap())
}

fn string_literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"'[^']*'|"[^"]*""#).unwrap())
}

fn ident_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap())
}

/// Names the template declares itself: loop bindings and assignments.
fn bound_names(source: &str) -> HashSet<String> {
    let mut bound = HashSet::new();
    for caps in for_re().captures_iter(source) {
        if let Some(var) = caps.get(1) {
            bound.insert(var.as_str().to_string());
        }
        if let Some(var) = caps.get(2) {
            bound.insert(var.as_str().to_string());
        }
    }
    for caps in set_re().captures_iter(source) {
        if let Some(var) = caps.get(1) {
            bound.insert(var.as_str().to_string());
        }
    }
    bound
}

/// Yield expression and statement bodies in document order.
fn expression_bodies(source: &str) -> impl Iterator<Item = String> + '_ {
    expression_re().captures_iter(source).filter_map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|body| body.as_str().to_string())
    })
}

/// Collect root identifiers from one expression body, in order.
fn collect_roots(body: &str, bound: &HashSet<String>, roots: &mut Vec<String>) {
    // String literals can contain anything; drop them before scanning.
    let stripped = string_literal_re().replace_all(body, " ");

    let mut previous_ident: Option<&str> = None;
    for found in ident_re().find_iter(&stripped) {
        let ident = found.as_str();
        let is_test_name = previous_ident == Some("is");
        previous_ident = Some(ident);

        if is_test_name
            || KEYWORDS.contains(&ident)
            || bound.contains(ident)
            || !at_root_position(&stripped, found.start())
        {
            continue;
        }
        if !roots.iter().any(|seen| seen == ident) {
            roots.push(ident.to_string());
        }
    }
}

/// A match is a root reference unless it is an attribute (`.name`), a
/// filter (`| name`), or the tail of a longer token (`3rd`).
fn at_root_position(body: &str, start: usize) -> bool {
    let mut before = body[..start].chars().rev();
    match before.next() {
        None => true,
        Some('.') | Some('|') => false,
        Some(c) if c.is_ascii_alphanumeric() => false,
        Some(c) if c.is_whitespace() => {
            // A pipe may sit further back: `name | upper`.
            for c in before {
                if c.is_whitespace() {
                    continue;
                }
                return c != '|';
            }
            true
        }
        Some(_) => true,
    }
}
