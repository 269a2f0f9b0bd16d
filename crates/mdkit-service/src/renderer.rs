//! Renderer facade: pipeline assembly and cached conversion.

use std::sync::Arc;

use md5::{Digest, Md5};
use mdkit_cache::{CacheBucketExt, CacheManager};
use mdkit_config::CacheStoreSetting;
use mdkit_renderer::{
    AnchorHeadingRenderer, BlockKind, CommonMarkOptions, CoreExtension, Environment,
    EnvironmentBuilder, Extension, HighlightCodeExtension, InlineKind, MarkdownConverter,
    NodeRenderer, PRIORITY_DEFAULT, PRIORITY_OVERRIDE, RenderError, RenderedContent,
};
use serde_json::json;

use crate::MarkdownError;

/// Bucket holding rendered documents.
pub const CACHE_BUCKET: &str = "markdown";

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "github-light";

/// Converts markdown to HTML with a configurable pipeline.
///
/// The pipeline is assembled from the core CommonMark rules, optional code
/// highlighting, optional heading anchors, user extensions and user
/// renderers. [`to_html`](Self::to_html) memoizes the result in the
/// configured cache store under a key derived from the document and every
/// setting that affects its output.
#[derive(Clone)]
pub struct MarkdownRenderer {
    options: CommonMarkOptions,
    highlight_code: bool,
    highlight_theme: String,
    cache_store: CacheStoreSetting,
    render_anchors: bool,
    extensions: Vec<Arc<dyn Extension>>,
    block_renderers: Vec<(BlockKind, Arc<dyn NodeRenderer>)>,
    inline_renderers: Vec<(InlineKind, Arc<dyn NodeRenderer>)>,
    caches: Arc<CacheManager>,
}

impl MarkdownRenderer {
    /// Create a renderer with highlighting, anchors and the default store enabled.
    pub fn new(caches: Arc<CacheManager>) -> Self {
        Self {
            options: CommonMarkOptions::default(),
            highlight_code: true,
            highlight_theme: DEFAULT_THEME.to_owned(),
            cache_store: CacheStoreSetting::Default,
            render_anchors: true,
            extensions: Vec::new(),
            block_renderers: Vec::new(),
            inline_renderers: Vec::new(),
            caches,
        }
    }

    #[must_use]
    pub fn with_commonmark_options(mut self, options: CommonMarkOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_highlighting(mut self, enabled: bool) -> Self {
        self.highlight_code = enabled;
        self
    }

    #[must_use]
    pub fn without_highlighting(self) -> Self {
        self.with_highlighting(false)
    }

    /// Set the highlight theme. Unknown names fail when the environment is built.
    #[must_use]
    pub fn with_highlight_theme(mut self, theme: impl Into<String>) -> Self {
        self.highlight_theme = theme.into();
        self
    }

    #[must_use]
    pub fn with_cache_store(mut self, store: CacheStoreSetting) -> Self {
        self.cache_store = store;
        self
    }

    #[must_use]
    pub fn without_cache(self) -> Self {
        self.with_cache_store(CacheStoreSetting::Disabled)
    }

    #[must_use]
    pub fn with_anchors(mut self, enabled: bool) -> Self {
        self.render_anchors = enabled;
        self
    }

    #[must_use]
    pub fn without_anchors(self) -> Self {
        self.with_anchors(false)
    }

    #[must_use]
    pub fn with_extension(mut self, extension: Arc<dyn Extension>) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Bind a renderer to a block kind, ahead of every bundled renderer.
    #[must_use]
    pub fn with_block_renderer(mut self, kind: BlockKind, renderer: Arc<dyn NodeRenderer>) -> Self {
        self.block_renderers.push((kind, renderer));
        self
    }

    /// Bind a renderer to an inline kind, ahead of every bundled renderer.
    #[must_use]
    pub fn with_inline_renderer(
        mut self,
        kind: InlineKind,
        renderer: Arc<dyn NodeRenderer>,
    ) -> Self {
        self.inline_renderers.push((kind, renderer));
        self
    }

    pub fn options(&self) -> &CommonMarkOptions {
        &self.options
    }

    pub fn highlight_code(&self) -> bool {
        self.highlight_code
    }

    pub fn highlight_theme(&self) -> &str {
        &self.highlight_theme
    }

    pub fn cache_store(&self) -> &CacheStoreSetting {
        &self.cache_store
    }

    pub fn render_anchors(&self) -> bool {
        self.render_anchors
    }

    /// Assemble the rendering environment.
    pub fn environment(&self) -> Result<Environment, RenderError> {
        let mut builder = EnvironmentBuilder::new(self.options.clone());
        builder.add_extension(Arc::new(CoreExtension));

        if self.highlight_code {
            builder.add_extension(Arc::new(HighlightCodeExtension::new(
                self.highlight_theme.clone(),
            )));
        }

        if self.render_anchors {
            builder.add_block_renderer(
                BlockKind::Heading,
                Arc::new(AnchorHeadingRenderer::new()),
                PRIORITY_DEFAULT,
            );
        }

        for extension in &self.extensions {
            builder.add_extension(Arc::clone(extension));
        }
        for (kind, renderer) in &self.block_renderers {
            builder.add_block_renderer(*kind, Arc::clone(renderer), PRIORITY_OVERRIDE);
        }
        for (kind, renderer) in &self.inline_renderers {
            builder.add_inline_renderer(*kind, Arc::clone(renderer), PRIORITY_OVERRIDE);
        }

        builder.build()
    }

    /// Convert without consulting the cache.
    pub fn convert_to_html(&self, markdown: &str) -> Result<RenderedContent, RenderError> {
        let converter = MarkdownConverter::new(self.environment()?);
        Ok(converter.convert(markdown))
    }

    /// Convert to HTML, reusing a cached result when caching is enabled.
    pub fn to_html(&self, markdown: &str) -> Result<String, MarkdownError> {
        if !self.cache_store.is_enabled() {
            return Ok(self.convert_to_html(markdown)?.html);
        }

        let store = self.caches.store(self.cache_store.store_name())?;
        let bucket = store.bucket(CACHE_BUCKET);
        let key = self.cache_key(markdown);

        bucket.remember_string(&key, "", || {
            let rendered = self.convert_to_html(markdown)?;
            Ok(rendered.html)
        })
    }

    /// Hex MD5 of the document and every setting that affects its HTML.
    pub fn cache_key(&self, markdown: &str) -> String {
        let block_renderers: Vec<_> = self
            .block_renderers
            .iter()
            .map(|(kind, renderer)| [kind.name(), renderer.name()])
            .collect();
        let inline_renderers: Vec<_> = self
            .inline_renderers
            .iter()
            .map(|(kind, renderer)| [kind.name(), renderer.name()])
            .collect();
        let extensions: Vec<_> = self.extensions.iter().map(|ext| ext.name()).collect();

        let settings = json!({
            "theme": self.highlight_theme,
            "render_anchors": self.render_anchors,
            "commonmark_options": self.options,
            "highlight_code": self.highlight_code,
            "extensions": extensions,
            "block_renderers": block_renderers,
            "inline_renderers": inline_renderers,
        });

        let hash = Md5::digest(format!("{CACHE_BUCKET}{markdown}{settings}").as_bytes());
        hex::encode(hash)
    }
}
