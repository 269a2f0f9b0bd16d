//! Name lookup for extensions and renderers referenced from configuration.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::extension::{Extension, NodeRenderer};
use crate::extensions::{ExternalLinkExtension, ExternalLinkRenderer, GfmExtension, ParserFeature};
use crate::renderers::{AnchorHeadingRenderer, LazyImageRenderer};
use crate::RenderError;

/// Extensions and renderers by name.
///
/// Entries are shared instances, so they must not carry per-document state.
#[derive(Clone, Default)]
pub struct Registry {
    extensions: BTreeMap<String, Arc<dyn Extension>>,
    renderers: BTreeMap<String, Arc<dyn NodeRenderer>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every bundled extension and renderer.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register_extension("gfm", Arc::new(GfmExtension))
            .register_extension("table", Arc::new(ParserFeature::table()))
            .register_extension("strikethrough", Arc::new(ParserFeature::strikethrough()))
            .register_extension("task_list", Arc::new(ParserFeature::task_list()))
            .register_extension(
                "smart_punctuation",
                Arc::new(ParserFeature::smart_punctuation()),
            )
            .register_extension(
                "heading_attributes",
                Arc::new(ParserFeature::heading_attributes()),
            )
            .register_extension("external_link", Arc::new(ExternalLinkExtension));
        registry
            .register_renderer("anchor_heading", Arc::new(AnchorHeadingRenderer::new()))
            .register_renderer("external_link", Arc::new(ExternalLinkRenderer))
            .register_renderer("lazy_image", Arc::new(LazyImageRenderer));
        registry
    }

    /// Register or replace a named extension.
    pub fn register_extension(
        &mut self,
        name: impl Into<String>,
        extension: Arc<dyn Extension>,
    ) -> &mut Self {
        self.extensions.insert(name.into(), extension);
        self
    }

    /// Register or replace a named renderer.
    pub fn register_renderer(
        &mut self,
        name: impl Into<String>,
        renderer: Arc<dyn NodeRenderer>,
    ) -> &mut Self {
        self.renderers.insert(name.into(), renderer);
        self
    }

    pub fn extension(&self, name: &str) -> Result<Arc<dyn Extension>, RenderError> {
        self.extensions
            .get(name)
            .cloned()
            .ok_or_else(|| RenderError::UnknownExtension(name.to_owned()))
    }

    pub fn renderer(&self, name: &str) -> Result<Arc<dyn NodeRenderer>, RenderError> {
        self.renderers
            .get(name)
            .cloned()
            .ok_or_else(|| RenderError::UnknownRenderer(name.to_owned()))
    }

    pub fn extension_names(&self) -> impl Iterator<Item = &str> {
        self.extensions.keys().map(String::as_str)
    }

    pub fn renderer_names(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }
}
