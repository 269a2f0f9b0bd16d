//! Extension points of the pipeline.

use std::collections::{HashMap, HashSet};

use crate::environment::EnvironmentBuilder;
use crate::{CommonMarkOptions, Node, RenderError};

/// A bundle of parser options and node renderers installed into an
/// environment by name.
pub trait Extension: Send + Sync {
    /// Name used for de-duplication and in cache keys.
    fn name(&self) -> &str;

    /// Install the extension.
    ///
    /// May enable parser options, add renderers or queue further extensions.
    fn register(&self, environment: &mut EnvironmentBuilder) -> Result<(), RenderError>;
}

/// Produces the HTML for a single node.
///
/// Returning `None` passes the node on to the next renderer bound to its kind.
pub trait NodeRenderer: Send + Sync {
    fn render(&self, node: &Node<'_>, context: &mut RenderContext<'_>) -> Option<String>;

    /// Name used in cache keys.
    ///
    /// Renderers with settings must include them, otherwise differently
    /// configured instances share cached output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Per-document state shared by all renderers during one conversion.
pub struct RenderContext<'a> {
    options: &'a CommonMarkOptions,
    ids: HashSet<String>,
    suffixes: HashMap<String, usize>,
    warnings: Vec<String>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(options: &'a CommonMarkOptions) -> Self {
        Self {
            options,
            ids: HashSet::new(),
            suffixes: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn options(&self) -> &'a CommonMarkOptions {
        self.options
    }

    /// Return `base` if no id issued in this document uses it yet,
    /// otherwise the first free `base-1`, `base-2`, ...
    pub fn unique_id(&mut self, base: &str) -> String {
        if self.ids.insert(base.to_owned()) {
            return base.to_owned();
        }
        let suffix = self.suffixes.entry(base.to_owned()).or_insert(0);
        loop {
            *suffix += 1;
            let id = format!("{base}-{suffix}");
            if self.ids.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Mark an explicit id as taken so generated ids avoid it.
    pub fn reserve_id(&mut self, id: &str) {
        self.ids.insert(id.to_owned());
    }

    /// Record a conversion warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(warning = %message, "markdown conversion warning");
        self.warnings.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub(crate) fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}
