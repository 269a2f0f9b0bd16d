//! Service error type.

use mdkit_cache::CacheError;
use mdkit_config::ConfigError;
use mdkit_renderer::RenderError;

/// Error returned by the markdown service, renderer facade and component.
#[derive(Debug, thiserror::Error)]
pub enum MarkdownError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The configured cache store does not exist.
    #[error(transparent)]
    Cache(#[from] CacheError),
    /// The rendering environment could not be built.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// `commonmark_options` do not describe valid options.
    #[error("Invalid CommonMark options: {0}")]
    Options(#[source] serde_json::Error),
    /// Template registration or rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}
