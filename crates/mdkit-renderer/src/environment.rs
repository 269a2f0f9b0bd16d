//! Environment assembly and renderer resolution.

use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use pulldown_cmark::Options;

use crate::extension::{Extension, NodeRenderer, RenderContext};
use crate::{BlockKind, CommonMarkOptions, InlineKind, Node, NodeKind, RenderError};

/// Priority of the core CommonMark rules.
pub const PRIORITY_CORE: i32 = -100;
/// Priority used by bundled extensions.
pub const PRIORITY_DEFAULT: i32 = 0;
/// Priority of renderers that must win over every extension.
pub const PRIORITY_OVERRIDE: i32 = 10;

struct Registered {
    priority: i32,
    renderer: Arc<dyn NodeRenderer>,
}

/// Collects extensions and renderers before freezing them into an
/// [`Environment`].
///
/// Renderers for a node kind are tried from the highest priority down; at
/// equal priority, in registration order. Extensions register during
/// [`build`](Self::build), so renderers added directly on the builder come
/// before extension renderers of the same priority.
pub struct EnvironmentBuilder {
    options: CommonMarkOptions,
    parser_options: Options,
    pending: VecDeque<Arc<dyn Extension>>,
    installed: Vec<String>,
    renderers: HashMap<NodeKind, Vec<Registered>>,
}

impl EnvironmentBuilder {
    pub fn new(options: CommonMarkOptions) -> Self {
        Self {
            options,
            parser_options: Options::empty(),
            pending: VecDeque::new(),
            installed: Vec::new(),
            renderers: HashMap::new(),
        }
    }

    pub fn options(&self) -> &CommonMarkOptions {
        &self.options
    }

    /// Queue an extension. Extensions are installed in queue order and only
    /// once per name.
    pub fn add_extension(&mut self, extension: Arc<dyn Extension>) -> &mut Self {
        self.pending.push_back(extension);
        self
    }

    /// Bind a renderer to a node kind.
    pub fn add_renderer(
        &mut self,
        kind: NodeKind,
        renderer: Arc<dyn NodeRenderer>,
        priority: i32,
    ) -> &mut Self {
        self.renderers
            .entry(kind)
            .or_default()
            .push(Registered { priority, renderer });
        self
    }

    pub fn add_block_renderer(
        &mut self,
        kind: BlockKind,
        renderer: Arc<dyn NodeRenderer>,
        priority: i32,
    ) -> &mut Self {
        self.add_renderer(NodeKind::Block(kind), renderer, priority)
    }

    pub fn add_inline_renderer(
        &mut self,
        kind: InlineKind,
        renderer: Arc<dyn NodeRenderer>,
        priority: i32,
    ) -> &mut Self {
        self.add_renderer(NodeKind::Inline(kind), renderer, priority)
    }

    /// Enable `pulldown-cmark` parser features.
    pub fn enable_parser_options(&mut self, options: Options) -> &mut Self {
        self.parser_options |= options;
        self
    }

    /// Install queued extensions and freeze renderer order.
    pub fn build(mut self) -> Result<Environment, RenderError> {
        while let Some(extension) = self.pending.pop_front() {
            let name = extension.name().to_owned();
            if self.installed.contains(&name) {
                continue;
            }
            tracing::debug!(extension = %name, "registering markdown extension");
            extension.register(&mut self)?;
            self.installed.push(name);
        }

        let renderers: HashMap<NodeKind, Vec<Arc<dyn NodeRenderer>>> = self
            .renderers
            .into_iter()
            .map(|(kind, mut list)| {
                list.sort_by_key(|registered| Reverse(registered.priority));
                (kind, list.into_iter().map(|r| r.renderer).collect())
            })
            .collect();

        Ok(Environment {
            options: self.options,
            parser_options: self.parser_options,
            renderers,
            extensions: self.installed,
        })
    }
}

/// A frozen set of parser options and node renderers.
pub struct Environment {
    options: CommonMarkOptions,
    parser_options: Options,
    renderers: HashMap<NodeKind, Vec<Arc<dyn NodeRenderer>>>,
    extensions: Vec<String>,
}

impl Environment {
    pub fn options(&self) -> &CommonMarkOptions {
        &self.options
    }

    pub fn parser_options(&self) -> Options {
        self.parser_options
    }

    /// Renderers for `kind` in resolution order.
    pub fn renderers_for(&self, kind: NodeKind) -> &[Arc<dyn NodeRenderer>] {
        self.renderers.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Names of installed extensions in installation order.
    pub fn extension_names(&self) -> &[String] {
        &self.extensions
    }

    /// Render `node` with the first willing renderer.
    ///
    /// A node nobody renders contributes only its children and a warning.
    pub fn render(&self, node: &Node<'_>, context: &mut RenderContext<'_>) -> String {
        for renderer in self.renderers_for(node.kind()) {
            if let Some(html) = renderer.render(node, context) {
                return html;
            }
        }
        context.warn(format!("no renderer accepted {} node", node.kind()));
        node.children().to_owned()
    }
}
