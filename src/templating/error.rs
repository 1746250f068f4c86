//! Error types for template scanning.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the template-variable extraction layer.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template source could not be parsed by the engine.
    ///
    /// `message` carries the engine's full cause chain, since Tera's
    /// top-level message alone is rarely actionable.
    #[error("template syntax error: {message}")]
    Syntax {
        message: String,
        #[source]
        source: tera::Error,
    },

    /// The filesystem template root could not be loaded.
    #[error("failed to load template root {root:?}")]
    Loader {
        root: PathBuf,
        #[source]
        source: tera::Error,
    },
}

/// Flatten a Tera error and its cause chain into one message.
pub(crate) fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
