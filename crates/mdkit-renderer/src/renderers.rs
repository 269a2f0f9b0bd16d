//! Bundled node renderers.

use crate::commonmark::{heading_html, image_html};
use crate::extension::{NodeRenderer, RenderContext};
use crate::state::{escape_html, slugify};
use crate::{Node, NodeData};

/// Gives every heading an `id` and appends a permalink to it.
///
/// The id is the explicit `{#id}` attribute when present, otherwise the slug
/// of the heading text, made unique within the document.
///
/// Explicit ids are reserved so later generated ids never repeat them.
pub struct AnchorHeadingRenderer {
    class: String,
    symbol: String,
    name: String,
}

const ANCHOR_CLASS: &str = "heading-permalink";
const ANCHOR_SYMBOL: &str = "#";

impl AnchorHeadingRenderer {
    pub fn new() -> Self {
        Self {
            class: ANCHOR_CLASS.to_owned(),
            symbol: ANCHOR_SYMBOL.to_owned(),
            name: "anchor_heading".to_owned(),
        }
    }

    fn with_settings(mut self) -> Self {
        self.name = if self.class == ANCHOR_CLASS && self.symbol == ANCHOR_SYMBOL {
            "anchor_heading".to_owned()
        } else {
            format!("anchor_heading(class={},symbol={})", self.class, self.symbol)
        };
        self
    }

    /// Use a different CSS class for the permalink.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self.with_settings()
    }

    /// Use a different permalink text.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self.with_settings()
    }
}

impl Default for AnchorHeadingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRenderer for AnchorHeadingRenderer {
    fn render(&self, node: &Node<'_>, context: &mut RenderContext<'_>) -> Option<String> {
        let NodeData::Heading { id, .. } = node.data() else {
            return None;
        };

        let id = match id {
            Some(explicit) => {
                context.reserve_id(explicit);
                explicit.clone()
            }
            None => {
                let slug = slugify(node.text());
                context.unique_id(if slug.is_empty() { "section" } else { &slug })
            }
        };
        let permalink = format!(
            "<a href=\"#{}\" class=\"{}\" aria-hidden=\"true\">{}</a>",
            escape_html(&id),
            escape_html(&self.class),
            escape_html(&self.symbol),
        );
        Some(heading_html(node, Some(&id), &permalink))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Defers offscreen image loading with `loading="lazy"`.
pub struct LazyImageRenderer;

impl NodeRenderer for LazyImageRenderer {
    fn render(&self, node: &Node<'_>, context: &mut RenderContext<'_>) -> Option<String> {
        node.url()?;
        Some(image_html(node, context, " loading=\"lazy\""))
    }

    fn name(&self) -> &str {
        "lazy_image"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_anchor_name_reflects_settings() {
        assert_eq!(AnchorHeadingRenderer::new().name(), "anchor_heading");
        assert_eq!(
            AnchorHeadingRenderer::new().with_symbol("¶").name(),
            "anchor_heading(class=heading-permalink,symbol=¶)"
        );
        assert_eq!(
            AnchorHeadingRenderer::new().with_class("anchor").name(),
            "anchor_heading(class=anchor,symbol=#)"
        );
        assert_eq!(
            AnchorHeadingRenderer::new()
                .with_symbol("¶")
                .with_symbol("#")
                .name(),
            "anchor_heading"
        );
    }
}
