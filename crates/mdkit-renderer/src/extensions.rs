//! Bundled extensions: parser features and external links.

use std::sync::Arc;

use pulldown_cmark::Options;

use crate::commonmark::link_html;
use crate::environment::{EnvironmentBuilder, PRIORITY_DEFAULT};
use crate::extension::{Extension, NodeRenderer, RenderContext};
use crate::{InlineKind, Node, RenderError};

/// Enables a single `pulldown-cmark` parser feature.
pub struct ParserFeature {
    name: &'static str,
    options: Options,
}

impl ParserFeature {
    /// GFM pipe tables.
    pub fn table() -> Self {
        Self {
            name: "table",
            options: Options::ENABLE_TABLES,
        }
    }

    /// `~~strikethrough~~`.
    pub fn strikethrough() -> Self {
        Self {
            name: "strikethrough",
            options: Options::ENABLE_STRIKETHROUGH,
        }
    }

    /// `- [x] task` list items.
    pub fn task_list() -> Self {
        Self {
            name: "task_list",
            options: Options::ENABLE_TASKLISTS,
        }
    }

    /// Curly quotes, dashes and ellipses.
    pub fn smart_punctuation() -> Self {
        Self {
            name: "smart_punctuation",
            options: Options::ENABLE_SMART_PUNCTUATION,
        }
    }

    /// `# Heading {#id .class}`.
    pub fn heading_attributes() -> Self {
        Self {
            name: "heading_attributes",
            options: Options::ENABLE_HEADING_ATTRIBUTES,
        }
    }
}

impl Extension for ParserFeature {
    fn name(&self) -> &str {
        self.name
    }

    fn register(&self, environment: &mut EnvironmentBuilder) -> Result<(), RenderError> {
        environment.enable_parser_options(self.options);
        Ok(())
    }
}

/// GitHub Flavored Markdown: tables, strikethrough and task lists.
pub struct GfmExtension;

impl Extension for GfmExtension {
    fn name(&self) -> &str {
        "gfm"
    }

    fn register(&self, environment: &mut EnvironmentBuilder) -> Result<(), RenderError> {
        environment
            .add_extension(Arc::new(ParserFeature::table()))
            .add_extension(Arc::new(ParserFeature::strikethrough()))
            .add_extension(Arc::new(ParserFeature::task_list()));
        Ok(())
    }
}

/// Opens absolute `http(s)` links in a new tab without leaking the opener.
pub struct ExternalLinkExtension;

impl Extension for ExternalLinkExtension {
    fn name(&self) -> &str {
        "external_link"
    }

    fn register(&self, environment: &mut EnvironmentBuilder) -> Result<(), RenderError> {
        environment.add_inline_renderer(
            InlineKind::Link,
            Arc::new(ExternalLinkRenderer),
            PRIORITY_DEFAULT,
        );
        Ok(())
    }
}

/// Link renderer adding `rel` and `target` to external links only.
pub struct ExternalLinkRenderer;

impl NodeRenderer for ExternalLinkRenderer {
    fn render(&self, node: &Node<'_>, context: &mut RenderContext<'_>) -> Option<String> {
        let url = node.url()?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return None;
        }
        Some(link_html(
            node,
            context,
            " rel=\"noopener noreferrer\" target=\"_blank\"",
        ))
    }

    fn name(&self) -> &str {
        "external_link"
    }
}
