//! CLI error types.

use mdkit_service::MarkdownError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Markdown(#[from] MarkdownError),

    #[error("{0}")]
    Template(#[from] minijinja::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),
}
