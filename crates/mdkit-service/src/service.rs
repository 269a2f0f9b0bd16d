//! Shared markdown service and template registration.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use mdkit_cache::{Cache, CacheManager, FileCache, MemoryCache, NullCache};
use mdkit_config::{
    CacheConfig, CacheStoreSetting, Config, ConfigOverrides, MarkdownConfig, StoreConfig,
};
use mdkit_renderer::{BlockKind, CommonMarkOptions, InlineKind, Registry};
use minijinja::value::{Kwargs, Value};
use minijinja::{ErrorKind, State};

use crate::component::{DEFAULT_VIEW, MarkdownComponent, VIEW_NAME};
use crate::{MarkdownError, MarkdownRenderer};

/// Version written into file cache stores; entries from other versions are discarded.
const CACHE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings a renderer is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct RendererSettings {
    pub commonmark_options: serde_json::Map<String, serde_json::Value>,
    pub highlight_code: bool,
    pub highlight_theme: String,
    pub cache_store: CacheStoreSetting,
    pub render_anchors: bool,
}

impl RendererSettings {
    pub fn from_config(config: &MarkdownConfig) -> Self {
        Self {
            commonmark_options: config.commonmark_options.clone(),
            highlight_code: config.code_highlighting.enabled,
            highlight_theme: config.code_highlighting.theme.clone(),
            cache_store: config.cache_store.clone(),
            render_anchors: config.add_anchors_to_headings,
        }
    }
}

/// Builds a renderer for a set of settings.
///
/// Replacing the factory swaps the renderer used by the template component
/// and by [`MarkdownService::renderer`].
pub type RendererFactory = Arc<
    dyn Fn(&MarkdownService, RendererSettings) -> Result<MarkdownRenderer, MarkdownError>
        + Send
        + Sync,
>;

/// Markdown rendering bound to a configuration.
///
/// Shared behind an `Arc`; every call to [`renderer`](Self::renderer) builds
/// a fresh [`MarkdownRenderer`] so callers can adjust it freely.
pub struct MarkdownService {
    config: MarkdownConfig,
    caches: Arc<CacheManager>,
    registry: Registry,
    factory: RendererFactory,
}

impl MarkdownService {
    /// Create a service from markdown settings and cache stores.
    ///
    /// Extensions and renderers are resolved from the bundled registry.
    pub fn new(config: MarkdownConfig, caches: Arc<CacheManager>) -> Self {
        Self {
            config,
            caches,
            registry: Registry::with_builtins(),
            factory: Arc::new(|service: &Self, settings: RendererSettings| {
                service.build_renderer(settings)
            }),
        }
    }

    /// Create a service from a loaded configuration.
    ///
    /// Fails when the configuration names an unknown extension, renderer,
    /// node kind or theme, or carries invalid CommonMark options.
    pub fn from_config(config: &Config) -> Result<Self, MarkdownError> {
        let caches = Arc::new(cache_manager(&config.cache_resolved));
        let service = Self::new(config.markdown.clone(), caches);
        service.renderer()?.environment()?;

        tracing::info!(
            extensions = ?service.config.extensions,
            cache_store = ?service.config.cache_store,
            "Markdown service configured"
        );
        Ok(service)
    }

    /// Load configuration and create a service from it.
    ///
    /// See [`Config::load`] for how the configuration file is found.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, MarkdownError> {
        let config = Config::load(config_path, overrides)?;
        Self::from_config(&config)
    }

    /// Use a different registry for resolving configured names.
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Use a different renderer factory.
    #[must_use]
    pub fn with_renderer_factory(mut self, factory: RendererFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn config(&self) -> &MarkdownConfig {
        &self.config
    }

    pub fn caches(&self) -> &Arc<CacheManager> {
        &self.caches
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Renderer settings taken from configuration.
    pub fn settings(&self) -> RendererSettings {
        RendererSettings::from_config(&self.config)
    }

    /// A fresh renderer built from configuration.
    pub fn renderer(&self) -> Result<MarkdownRenderer, MarkdownError> {
        self.renderer_with(self.settings())
    }

    /// A fresh renderer built by the factory from `settings`.
    pub fn renderer_with(
        &self,
        settings: RendererSettings,
    ) -> Result<MarkdownRenderer, MarkdownError> {
        (self.factory)(self, settings)
    }

    /// The default factory: configured extensions and renderers resolved
    /// through the registry.
    pub fn build_renderer(
        &self,
        settings: RendererSettings,
    ) -> Result<MarkdownRenderer, MarkdownError> {
        let options: CommonMarkOptions =
            serde_json::from_value(serde_json::Value::Object(settings.commonmark_options))
                .map_err(MarkdownError::Options)?;

        let mut renderer = MarkdownRenderer::new(Arc::clone(&self.caches))
            .with_commonmark_options(options)
            .with_highlighting(settings.highlight_code)
            .with_highlight_theme(settings.highlight_theme)
            .with_cache_store(settings.cache_store)
            .with_anchors(settings.render_anchors);

        for name in &self.config.extensions {
            renderer = renderer.with_extension(self.registry.extension(name)?);
        }
        for binding in &self.config.block_renderers {
            let kind: BlockKind = binding.node.parse()?;
            renderer =
                renderer.with_block_renderer(kind, self.registry.renderer(&binding.renderer)?);
        }
        for binding in &self.config.inline_renderers {
            let kind: InlineKind = binding.node.parse()?;
            renderer =
                renderer.with_inline_renderer(kind, self.registry.renderer(&binding.renderer)?);
        }

        Ok(renderer)
    }

    /// Register the markdown view, filter and function with `env`.
    ///
    /// - `markdown::markdown`: view wrapping the HTML, unless `env` already
    ///   has a template by that name
    /// - `markdown` filter: `{{ text | markdown(theme="github-dark") }}`
    ///   renders through the view
    /// - `markdown` function: `{{ markdown(text, anchors=false) }}` returns
    ///   the bare HTML
    ///
    /// Both accept the `highlight_code`, `theme`, `anchors` and `options`
    /// keyword arguments.
    pub fn register_template_component(
        self: &Arc<Self>,
        env: &mut minijinja::Environment<'static>,
    ) -> Result<(), MarkdownError> {
        if env.get_template(VIEW_NAME).is_err() {
            env.add_template(VIEW_NAME, DEFAULT_VIEW)?;
        }

        let service = Arc::clone(self);
        env.add_filter(
            "markdown",
            move |state: &State,
                  markdown: String,
                  kwargs: Kwargs|
                  -> Result<Value, minijinja::Error> {
                let component = component_from_kwargs(&kwargs)?;
                let html = component
                    .render(&service, state.env(), &markdown)
                    .map_err(template_error)?;
                Ok(Value::from_safe_string(html))
            },
        );

        let service = Arc::clone(self);
        env.add_function(
            "markdown",
            move |markdown: String, kwargs: Kwargs| -> Result<Value, minijinja::Error> {
                let component = component_from_kwargs(&kwargs)?;
                let html = component
                    .to_html(&service, &markdown)
                    .map_err(template_error)?;
                Ok(Value::from_safe_string(html))
            },
        );

        tracing::debug!("Registered markdown template component");
        Ok(())
    }
}

impl fmt::Debug for MarkdownService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkdownService")
            .field("config", &self.config)
            .field("default_store", &self.caches.default_store())
            .finish_non_exhaustive()
    }
}

/// Build the cache stores described by `[cache]`.
pub fn cache_manager(config: &CacheConfig) -> CacheManager {
    let mut manager = CacheManager::new(config.default.clone());
    for (name, store) in &config.stores {
        let cache: Arc<dyn Cache> = match store {
            StoreConfig::Memory => Arc::new(MemoryCache::new()),
            StoreConfig::File { path } => Arc::new(FileCache::new(path.clone(), CACHE_VERSION)),
            StoreConfig::Null => Arc::new(NullCache),
        };
        manager.register(name.clone(), cache);
    }
    manager
}

fn component_from_kwargs(kwargs: &Kwargs) -> Result<MarkdownComponent, minijinja::Error> {
    let mut component = MarkdownComponent::new();
    component.highlight_code = kwargs.get::<Option<bool>>("highlight_code")?;
    component.theme = kwargs.get::<Option<String>>("theme")?;
    component.anchors = kwargs.get::<Option<bool>>("anchors")?;

    if let Some(options) = kwargs.get::<Option<Value>>("options")? {
        let options = serde_json::to_value(&options).map_err(|err| {
            minijinja::Error::new(ErrorKind::InvalidOperation, "invalid markdown options")
                .with_source(err)
        })?;
        let serde_json::Value::Object(options) = options else {
            return Err(minijinja::Error::new(
                ErrorKind::InvalidOperation,
                "markdown options must be a map",
            ));
        };
        component.commonmark_options = Some(options);
    }

    kwargs.assert_all_used()?;
    Ok(component)
}

fn template_error(err: MarkdownError) -> minijinja::Error {
    minijinja::Error::new(ErrorKind::InvalidOperation, "markdown rendering failed").with_source(err)
}
