//! Markdown rendering service for mdkit.
//!
//! Binds the `mdkit-renderer` pipeline to configuration, a cache store and a
//! `minijinja` environment:
//!
//! - [`MarkdownRenderer`]: pipeline assembly with cached conversion
//! - [`MarkdownComponent`]: per-use attribute overrides for templates
//! - [`MarkdownService`]: shared configuration, registry and renderer factory
//!
//! # Example
//!
//! ```
//! use mdkit_config::Config;
//! use minijinja::{Environment, context};
//!
//! let mut env = Environment::new();
//! let service = mdkit_service::register(&Config::default(), &mut env).unwrap();
//!
//! let html = env
//!     .render_str("{{ markdown(text, anchors=false) }}", context! { text => "# Hi" })
//!     .unwrap();
//! assert_eq!(html, "<h1>Hi</h1>\n");
//! assert!(service.renderer().unwrap().render_anchors());
//! ```

mod component;
mod error;
mod renderer;
mod service;

use std::sync::Arc;

use mdkit_config::Config;

pub use component::{DEFAULT_VIEW, MarkdownComponent, VIEW_NAME};
pub use error::MarkdownError;
pub use renderer::{CACHE_BUCKET, DEFAULT_THEME, MarkdownRenderer};
pub use service::{MarkdownService, RendererFactory, RendererSettings, cache_manager};

/// Create the shared service for `config` and register its template
/// component with `env`.
pub fn register(
    config: &Config,
    env: &mut minijinja::Environment<'static>,
) -> Result<Arc<MarkdownService>, MarkdownError> {
    let service = Arc::new(MarkdownService::from_config(config)?);
    service.register_template_component(env)?;
    Ok(service)
}
