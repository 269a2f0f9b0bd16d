//! CommonMark HTML rules for every node kind.

use std::fmt::Write;
use std::sync::Arc;

use crate::environment::{EnvironmentBuilder, PRIORITY_CORE};
use crate::extension::{Extension, NodeRenderer, RenderContext};
use crate::state::escape_html;
use crate::util::{escape_href, is_unsafe_link};
use crate::{BlockKind, InlineKind, Node, NodeData, NodeKind, RenderError};

/// Registers [`CoreRenderer`] for every node kind at [`PRIORITY_CORE`].
pub struct CoreExtension;

impl Extension for CoreExtension {
    fn name(&self) -> &str {
        "core"
    }

    fn register(&self, environment: &mut EnvironmentBuilder) -> Result<(), RenderError> {
        let renderer: Arc<dyn NodeRenderer> = Arc::new(CoreRenderer);
        for kind in NodeKind::all() {
            environment.add_renderer(kind, Arc::clone(&renderer), PRIORITY_CORE);
        }
        Ok(())
    }
}

/// Renders any node the way a CommonMark reference renderer would.
pub struct CoreRenderer;

impl NodeRenderer for CoreRenderer {
    fn render(&self, node: &Node<'_>, context: &mut RenderContext<'_>) -> Option<String> {
        Some(render_default(node, context))
    }

    fn name(&self) -> &str {
        "core"
    }
}

fn render_default(node: &Node<'_>, context: &RenderContext<'_>) -> String {
    let children = node.children();
    match node.kind() {
        NodeKind::Block(kind) => match kind {
            BlockKind::Paragraph => format!("<p>{children}</p>\n"),
            BlockKind::Heading => heading_html(node, None, ""),
            BlockKind::BlockQuote => format!("<blockquote>\n{children}</blockquote>\n"),
            BlockKind::CodeBlock => match node.language() {
                Some(language) => format!(
                    "<pre><code class=\"language-{}\">{children}</code></pre>\n",
                    escape_html(language)
                ),
                None => format!("<pre><code>{children}</code></pre>\n"),
            },
            BlockKind::HtmlBlock => children.to_owned(),
            BlockKind::List => match node.data() {
                NodeData::List { start: None } => format!("<ul>\n{children}</ul>\n"),
                NodeData::List { start: Some(1) } => format!("<ol>\n{children}</ol>\n"),
                NodeData::List { start: Some(n) } => {
                    format!("<ol start=\"{n}\">\n{children}</ol>\n")
                }
                _ => format!("<ul>\n{children}</ul>\n"),
            },
            BlockKind::Item => format!("<li>{children}</li>\n"),
            BlockKind::Table => format!("<table>\n{children}</table>\n"),
            BlockKind::TableHead => format!("<thead>\n<tr>\n{children}</tr>\n</thead>\n"),
            BlockKind::TableRow => format!("<tr>\n{children}</tr>\n"),
            BlockKind::TableCell => {
                let (tag, align) = match node.data() {
                    NodeData::TableCell { header, alignment } => {
                        (if *header { "th" } else { "td" }, *alignment)
                    }
                    _ => ("td", None),
                };
                let align = align
                    .map(|a| format!(" align=\"{}\"", a.as_str()))
                    .unwrap_or_default();
                format!("<{tag}{align}>{children}</{tag}>\n")
            }
            BlockKind::ThematicBreak => "<hr />\n".to_owned(),
        },
        NodeKind::Inline(kind) => match kind {
            InlineKind::Emphasis => format!("<em>{children}</em>"),
            InlineKind::Strong => format!("<strong>{children}</strong>"),
            InlineKind::Strikethrough => format!("<del>{children}</del>"),
            InlineKind::Superscript => format!("<sup>{children}</sup>"),
            InlineKind::Subscript => format!("<sub>{children}</sub>"),
            InlineKind::Code => format!("<code>{children}</code>"),
            InlineKind::Link => link_html(node, context, ""),
            InlineKind::Image => image_html(node, context, ""),
        },
    }
}

/// Heading markup with an optional `id` and trailing HTML inside the element.
pub(crate) fn heading_html(node: &Node<'_>, id: Option<&str>, suffix: &str) -> String {
    let NodeData::Heading {
        level,
        id: explicit_id,
        classes,
    } = node.data()
    else {
        return node.children().to_owned();
    };

    let mut attrs = String::new();
    if let Some(id) = id.or(explicit_id.as_deref()) {
        write!(attrs, " id=\"{}\"", escape_html(id)).unwrap();
    }
    if !classes.is_empty() {
        write!(attrs, " class=\"{}\"", escape_html(&classes.join(" "))).unwrap();
    }
    format!("<h{level}{attrs}>{}{suffix}</h{level}>\n", node.children())
}

/// Link markup; `extra_attrs` is inserted verbatim into the opening tag.
pub(crate) fn link_html(node: &Node<'_>, context: &RenderContext<'_>, extra_attrs: &str) -> String {
    let url = node.url().unwrap_or_default();
    let mut attrs = String::new();
    if context.options().allow_unsafe_links || !is_unsafe_link(url) {
        write!(attrs, " href=\"{}\"", escape_href(url)).unwrap();
    }
    if let Some(title) = node.title() {
        write!(attrs, " title=\"{}\"", escape_html(title)).unwrap();
    }
    format!("<a{attrs}{extra_attrs}>{}</a>", node.children())
}

/// Image markup; the alt text is the plain text of the image description.
pub(crate) fn image_html(
    node: &Node<'_>,
    context: &RenderContext<'_>,
    extra_attrs: &str,
) -> String {
    let url = node.url().unwrap_or_default();
    let src = if context.options().allow_unsafe_links || !is_unsafe_link(url) {
        escape_href(url)
    } else {
        String::new()
    };
    let title = node
        .title()
        .map(|title| format!(" title=\"{}\"", escape_html(title)))
        .unwrap_or_default();
    format!(
        "<img src=\"{src}\" alt=\"{}\"{title}{extra_attrs} />",
        escape_html(node.text())
    )
}
