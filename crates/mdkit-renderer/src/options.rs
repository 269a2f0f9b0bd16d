//! CommonMark output options.

/// How raw HTML found in the source document is emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum HtmlInput {
    /// Emit raw HTML unchanged.
    #[default]
    Allow,
    /// Emit raw HTML as escaped text.
    Escape,
    /// Drop raw HTML.
    Strip,
}

/// Options applied by the core HTML rules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct CommonMarkOptions {
    /// Handling of HTML blocks and inline HTML.
    pub html_input: HtmlInput,
    /// Whether `javascript:`, `vbscript:`, `file:` and non-image `data:` URLs
    /// are kept in links and images.
    pub allow_unsafe_links: bool,
    /// Output for a soft line break.
    pub soft_break: String,
}

impl Default for CommonMarkOptions {
    fn default() -> Self {
        Self {
            html_input: HtmlInput::Allow,
            allow_unsafe_links: true,
            soft_break: "\n".to_owned(),
        }
    }
}
