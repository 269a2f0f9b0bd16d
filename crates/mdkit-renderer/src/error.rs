//! Pipeline construction errors.

/// Error raised while assembling a rendering environment.
///
/// Rendering itself never fails: problems found while converting a document
/// are reported as warnings on [`RenderedContent`](crate::RenderedContent).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The highlighting theme is neither an alias nor a bundled theme.
    #[error("Unknown highlighting theme [{name}], available themes: {available}")]
    UnknownTheme {
        /// Requested theme name.
        name: String,
        /// Comma-separated list of accepted names.
        available: String,
    },
    /// No extension is registered under this name.
    #[error("Unknown markdown extension [{0}]")]
    UnknownExtension(String),
    /// No renderer is registered under this name.
    #[error("Unknown node renderer [{0}]")]
    UnknownRenderer(String),
    /// The name does not denote a node kind (or not one of the expected family).
    #[error("Unknown node kind [{0}]")]
    UnknownNodeKind(String),
}
