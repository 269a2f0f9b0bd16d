//! Syntax highlighting of fenced code blocks with `syntect`.

use std::sync::{Arc, LazyLock};

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::environment::{EnvironmentBuilder, PRIORITY_DEFAULT};
use crate::extension::{Extension, NodeRenderer, RenderContext};
use crate::state::escape_html;
use crate::{BlockKind, Node, RenderError};

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Friendly theme names mapped to bundled `syntect` themes.
const THEME_ALIASES: [(&str, &str); 4] = [
    ("github-light", "InspiredGitHub"),
    ("github-dark", "base16-ocean.dark"),
    ("solarized-light", "Solarized (light)"),
    ("solarized-dark", "Solarized (dark)"),
];

/// Resolve a theme alias or bundled theme name.
fn resolve_theme(name: &str) -> Result<Theme, RenderError> {
    let bundled = THEME_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, bundled)| *bundled);

    THEMES
        .themes
        .get(bundled)
        .cloned()
        .ok_or_else(|| RenderError::UnknownTheme {
            name: name.to_owned(),
            available: available_themes().join(", "),
        })
}

/// Every accepted theme name: aliases first, then bundled names.
pub fn available_themes() -> Vec<String> {
    THEME_ALIASES
        .iter()
        .map(|(alias, _)| (*alias).to_owned())
        .chain(THEMES.themes.keys().cloned())
        .collect()
}

/// Highlights fenced code blocks whose language `syntect` knows.
///
/// Blocks without a language are left to the core rules. Blocks with an
/// unknown language are too, with a warning.
pub struct HighlightCodeExtension {
    theme: String,
}

impl HighlightCodeExtension {
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
        }
    }
}

impl Extension for HighlightCodeExtension {
    fn name(&self) -> &str {
        "highlight_code"
    }

    fn register(&self, environment: &mut EnvironmentBuilder) -> Result<(), RenderError> {
        let theme = resolve_theme(&self.theme)?;
        environment.add_block_renderer(
            BlockKind::CodeBlock,
            Arc::new(CodeHighlighter { theme }),
            PRIORITY_DEFAULT,
        );
        Ok(())
    }
}

struct CodeHighlighter {
    theme: Theme,
}

impl NodeRenderer for CodeHighlighter {
    fn render(&self, node: &Node<'_>, context: &mut RenderContext<'_>) -> Option<String> {
        let language = node.language()?;
        let Some(syntax) = SYNTAXES.find_syntax_by_token(language) else {
            context.warn(format!("no syntax highlighting for language [{language}]"));
            return None;
        };

        match highlighted_html_for_string(node.text(), &SYNTAXES, syntax, &self.theme) {
            Ok(html) => Some(html.replacen(
                "<pre ",
                &format!("<pre class=\"language-{}\" ", escape_html(language)),
                1,
            )),
            Err(e) => {
                tracing::warn!(language, error = %e, "syntax highlighting failed");
                context.warn(format!("highlighting [{language}] failed: {e}"));
                None
            }
        }
    }

    fn name(&self) -> &str {
        "highlight_code"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve() {
        for (alias, _) in THEME_ALIASES {
            assert!(resolve_theme(alias).is_ok(), "alias {alias} should resolve");
        }
    }

    #[test]
    fn test_bundled_name_resolves() {
        assert!(resolve_theme("base16-ocean.light").is_ok());
    }

    #[test]
    fn test_unknown_theme_lists_available() {
        let err = resolve_theme("monokai-pro").unwrap_err();

        assert!(matches!(&err, RenderError::UnknownTheme { name, .. } if name == "monokai-pro"));
        let msg = err.to_string();
        assert!(msg.contains("github-light"), "got: {msg}");
        assert!(msg.contains("InspiredGitHub"), "got: {msg}");
    }
}
