//! Extensible markdown to HTML pipeline.
//!
//! Parsing is done by `pulldown-cmark`. Every parsed node is handed to the
//! [`NodeRenderer`]s bound to its [`NodeKind`] in an [`Environment`]; the first
//! renderer returning `Some` produces the node's HTML. [`Extension`]s bundle
//! parser options and renderers under a name.
//!
//! # Architecture
//!
//! - [`CoreExtension`]: CommonMark rules for every node kind at [`PRIORITY_CORE`]
//! - [`HighlightCodeExtension`]: `syntect` highlighting of fenced code
//! - [`AnchorHeadingRenderer`]: heading ids and permalinks
//! - [`Registry`]: extensions and renderers by configuration name
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mdkit_renderer::{CommonMarkOptions, CoreExtension, EnvironmentBuilder, MarkdownConverter};
//!
//! let mut builder = EnvironmentBuilder::new(CommonMarkOptions::default());
//! builder.add_extension(Arc::new(CoreExtension));
//! let converter = MarkdownConverter::new(builder.build().unwrap());
//!
//! assert_eq!(converter.convert("*hi*").html, "<p><em>hi</em></p>\n");
//! ```

mod commonmark;
mod converter;
mod environment;
mod error;
mod extension;
mod extensions;
mod highlight;
mod node;
mod options;
mod registry;
mod renderers;
mod state;
mod util;
mod writer;

pub use commonmark::{CoreExtension, CoreRenderer};
pub use converter::{MarkdownConverter, RenderedContent};
pub use environment::{
    Environment, EnvironmentBuilder, PRIORITY_CORE, PRIORITY_DEFAULT, PRIORITY_OVERRIDE,
};
pub use error::RenderError;
pub use extension::{Extension, NodeRenderer, RenderContext};
pub use extensions::{ExternalLinkExtension, ExternalLinkRenderer, GfmExtension, ParserFeature};
pub use highlight::{HighlightCodeExtension, available_themes};
pub use node::{BlockKind, CellAlignment, InlineKind, Node, NodeData, NodeKind};
pub use options::{CommonMarkOptions, HtmlInput};
pub use registry::Registry;
pub use renderers::{AnchorHeadingRenderer, LazyImageRenderer};
pub use state::{escape_html, slugify};
pub use util::{escape_href, is_unsafe_link};
