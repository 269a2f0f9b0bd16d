//! Template component: per-use attributes over the configured settings.

use minijinja::context;
use minijinja::value::Value;

use crate::{MarkdownError, MarkdownService, RendererSettings};

/// Name of the view wrapping component output.
pub const VIEW_NAME: &str = "markdown::markdown";

/// View registered when the environment does not publish its own.
pub const DEFAULT_VIEW: &str = "<div>{{ html }}</div>";

/// Markdown rendered from a template with optional attribute overrides.
///
/// Attributes left as `None` fall back to the service configuration.
/// `commonmark_options` is merged key by key over the configured options.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkdownComponent {
    pub commonmark_options: Option<serde_json::Map<String, serde_json::Value>>,
    pub highlight_code: Option<bool>,
    pub theme: Option<String>,
    pub anchors: Option<bool>,
}

impl MarkdownComponent {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_commonmark_options(
        mut self,
        options: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.commonmark_options = Some(options);
        self
    }

    #[must_use]
    pub fn with_highlighting(mut self, enabled: bool) -> Self {
        self.highlight_code = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    #[must_use]
    pub fn with_anchors(mut self, enabled: bool) -> Self {
        self.anchors = Some(enabled);
        self
    }

    /// The service settings with this component's attributes applied.
    pub fn settings(&self, service: &MarkdownService) -> RendererSettings {
        let mut settings = service.settings();

        if let Some(options) = &self.commonmark_options {
            for (key, value) in options {
                settings.commonmark_options.insert(key.clone(), value.clone());
            }
        }
        if let Some(enabled) = self.highlight_code {
            settings.highlight_code = enabled;
        }
        if let Some(theme) = &self.theme {
            settings.highlight_theme.clone_from(theme);
        }
        if let Some(enabled) = self.anchors {
            settings.render_anchors = enabled;
        }

        settings
    }

    /// Convert `markdown` with a renderer built for the merged settings.
    pub fn to_html(
        &self,
        service: &MarkdownService,
        markdown: &str,
    ) -> Result<String, MarkdownError> {
        service.renderer_with(self.settings(service))?.to_html(markdown)
    }

    /// Convert `markdown` and wrap it in the `markdown::markdown` view.
    pub fn render(
        &self,
        service: &MarkdownService,
        env: &minijinja::Environment<'_>,
        markdown: &str,
    ) -> Result<String, MarkdownError> {
        let html = self.to_html(service, markdown)?;
        let view = env.get_template(VIEW_NAME)?;
        Ok(view.render(context! { html => Value::from_safe_string(html) })?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mdkit_config::{Config, MarkdownConfig};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::cache_manager;

    fn service() -> MarkdownService {
        let mut markdown = MarkdownConfig::default();
        markdown.add_anchors_to_headings = false;
        markdown.commonmark_options = json!({"soft_break": "<br />\n", "html_input": "escape"})
            .as_object()
            .cloned()
            .unwrap();
        let caches = Arc::new(cache_manager(&Config::default().cache_resolved));
        MarkdownService::new(markdown, caches)
    }

    #[test]
    fn test_unset_attributes_use_config() {
        let service = service();

        assert_eq!(MarkdownComponent::new().settings(&service), service.settings());
    }

    #[test]
    fn test_attributes_override_config() {
        let service = service();
        let component = MarkdownComponent::new()
            .with_highlighting(false)
            .with_theme("github-dark")
            .with_anchors(true);

        let settings = component.settings(&service);

        assert!(!settings.highlight_code);
        assert_eq!(settings.highlight_theme, "github-dark");
        assert!(settings.render_anchors);
    }

    #[test]
    fn test_options_merge_key_by_key() {
        let service = service();
        let component = MarkdownComponent::new().with_commonmark_options(
            json!({"html_input": "strip", "allow_unsafe_links": false})
                .as_object()
                .cloned()
                .unwrap(),
        );

        let settings = component.settings(&service);

        assert_eq!(
            serde_json::Value::Object(settings.commonmark_options),
            json!({
                "soft_break": "<br />\n",
                "html_input": "strip",
                "allow_unsafe_links": false,
            })
        );
    }

    #[test]
    fn test_to_html() {
        let service = service();

        let html = MarkdownComponent::new()
            .to_html(&service, "a\nb <i>c</i>")
            .unwrap();

        assert_eq!(html, "<p>a<br />\nb &lt;i&gt;c&lt;/i&gt;</p>\n");
    }

    #[test]
    fn test_render_wraps_html_in_view() {
        let service = service();
        let mut env = minijinja::Environment::new();
        env.add_template(VIEW_NAME, DEFAULT_VIEW).unwrap();

        let html = MarkdownComponent::new()
            .with_anchors(true)
            .render(&service, &env, "## Usage")
            .unwrap();

        assert_eq!(
            html,
            "<div><h2 id=\"usage\">Usage<a href=\"#usage\" class=\"heading-permalink\" aria-hidden=\"true\">#</a></h2>\n</div>"
        );
    }

    #[test]
    fn test_render_without_view_fails() {
        let service = service();
        let env = minijinja::Environment::new();

        let err = MarkdownComponent::new()
            .render(&service, &env, "x")
            .unwrap_err();

        assert!(matches!(err, MarkdownError::Template(_)));
    }
}
