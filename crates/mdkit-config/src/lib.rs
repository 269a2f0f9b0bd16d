//! Configuration management for mdkit.
//!
//! Parses `mdkit.toml` with serde and discovers it in the current directory or
//! its parents. CLI flags are applied on top through [`ConfigOverrides`].
//!
//! ## Environment Variable Expansion
//!
//! These values support `${VAR}` and `${VAR:-default}`:
//! - `markdown.code_highlighting.theme`
//! - `cache.stores.<name>.path`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "mdkit.toml";

/// Name of the store used when `[cache]` defines none.
const DEFAULT_STORE: &str = "memory";

/// The default configuration file written by `mdkit init`.
pub const DEFAULT_CONFIG: &str = r#"# mdkit configuration

[markdown]
# Add an id and a permalink anchor to every heading.
add_anchors_to_headings = true

# Cache store for rendered HTML: a store name, or `false` to disable caching.
# When omitted, the default store from [cache] is used.
# cache_store = "memory"

# Extensions by name: gfm, table, strikethrough, task_list,
# smart_punctuation, heading_attributes, external_link.
extensions = []

[markdown.commonmark_options]
html_input = "allow"
allow_unsafe_links = true

[markdown.code_highlighting]
enabled = true
theme = "github-light"

# Custom renderers bound to node kinds.
# [[markdown.block_renderers]]
# node = "heading"
# renderer = "anchor_heading"
#
# [[markdown.inline_renderers]]
# node = "image"
# renderer = "lazy_image"

[cache]
default = "memory"

[cache.stores.memory]
driver = "memory"

# [cache.stores.disk]
# driver = "file"
# path = ".mdkit/cache"
"#;

/// CLI settings that override configuration file values.
///
/// Only `Some` fields override the loaded config.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    /// Override `markdown.code_highlighting.enabled`.
    pub highlight_code: Option<bool>,
    /// Override `markdown.code_highlighting.theme`.
    pub theme: Option<String>,
    /// Override `markdown.add_anchors_to_headings`.
    pub anchors: Option<bool>,
    /// Override `markdown.cache_store`.
    pub cache_store: Option<CacheStoreSetting>,
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Markdown rendering configuration.
    pub markdown: MarkdownConfig,
    /// Cache stores as parsed from TOML (paths are relative strings).
    cache: CacheConfigRaw,

    /// Resolved cache configuration (set after loading).
    #[serde(skip)]
    pub cache_resolved: CacheConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markdown: MarkdownConfig::default(),
            cache: CacheConfigRaw::default(),
            cache_resolved: CacheConfig::default(),
            config_path: None,
        }
    }
}

/// Markdown rendering configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// CommonMark options, kept untyped so per-use attributes can be merged
    /// over them key by key before they are interpreted.
    pub commonmark_options: serde_json::Map<String, serde_json::Value>,
    /// Syntax highlighting of fenced code blocks.
    pub code_highlighting: CodeHighlightingConfig,
    /// Whether headings get ids and permalink anchors.
    pub add_anchors_to_headings: bool,
    /// Which cache store memoizes rendered HTML.
    pub cache_store: CacheStoreSetting,
    /// Extension names, applied in order.
    pub extensions: Vec<String>,
    /// Renderers bound to block node kinds.
    pub block_renderers: Vec<RendererBinding>,
    /// Renderers bound to inline node kinds.
    pub inline_renderers: Vec<RendererBinding>,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            commonmark_options: serde_json::Map::new(),
            code_highlighting: CodeHighlightingConfig::default(),
            add_anchors_to_headings: true,
            cache_store: CacheStoreSetting::Default,
            extensions: Vec::new(),
            block_renderers: Vec::new(),
            inline_renderers: Vec::new(),
        }
    }
}

/// Code highlighting configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodeHighlightingConfig {
    /// Whether fenced code blocks are highlighted.
    pub enabled: bool,
    /// Theme name or alias.
    pub theme: String,
}

impl Default for CodeHighlightingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: "github-light".to_owned(),
        }
    }
}

/// A renderer bound to a node kind, both by name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RendererBinding {
    /// Node kind in `snake_case`, e.g. `heading` or `image`.
    pub node: String,
    /// Registered renderer name.
    pub renderer: String,
}

/// Which cache store, if any, memoizes rendered HTML.
///
/// In TOML, `false` disables caching, `true` selects the default store and a
/// string names a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "CacheStoreSettingRaw")]
pub enum CacheStoreSetting {
    /// Caching is disabled.
    Disabled,
    /// Use the default store.
    #[default]
    Default,
    /// Use the named store.
    Named(String),
}

impl CacheStoreSetting {
    /// Whether rendered HTML is cached at all.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// The explicit store name, if one is set.
    pub fn store_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Disabled | Self::Default => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CacheStoreSettingRaw {
    Flag(bool),
    Name(String),
}

impl From<CacheStoreSettingRaw> for CacheStoreSetting {
    fn from(raw: CacheStoreSettingRaw) -> Self {
        match raw {
            CacheStoreSettingRaw::Flag(false) => Self::Disabled,
            CacheStoreSettingRaw::Flag(true) => Self::Default,
            CacheStoreSettingRaw::Name(name) => Self::Named(name),
        }
    }
}

/// Raw cache configuration as parsed from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CacheConfigRaw {
    default: Option<String>,
    stores: BTreeMap<String, StoreConfigRaw>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "driver", rename_all = "lowercase")]
enum StoreConfigRaw {
    Memory,
    File {
        #[serde(default)]
        path: String,
    },
    Null,
}

/// Resolved cache configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Name of the default store.
    pub default: String,
    /// Stores by name.
    pub stores: BTreeMap<String, StoreConfig>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_STORE.to_owned(),
            stores: BTreeMap::from([(DEFAULT_STORE.to_owned(), StoreConfig::Memory)]),
        }
    }
}

/// A resolved cache store definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Process-local memory store.
    Memory,
    /// On-disk store rooted at an absolute path.
    File {
        /// Cache root directory.
        path: PathBuf,
    },
    /// Store that never keeps anything.
    Null,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`markdown.code_highlighting.theme`").
        field: String,
        /// Error message (e.g., "${`MDKIT_THEME`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI overrides.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `mdkit.toml` in the current directory and its parents, falling back
    /// to defaults when none exists.
    ///
    /// Overrides are applied after loading and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing fails
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// Relative store paths resolve against `config_dir`.
    ///
    /// # Errors
    ///
    /// Returns error on invalid TOML, unset environment variables or failed
    /// validation.
    pub fn parse(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(config_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        let markdown = &mut self.markdown;
        if let Some(enabled) = overrides.highlight_code {
            markdown.code_highlighting.enabled = enabled;
        }
        if let Some(theme) = &overrides.theme {
            markdown.code_highlighting.theme.clone_from(theme);
        }
        if let Some(anchors) = overrides.anchors {
            markdown.add_anchors_to_headings = anchors;
        }
        if let Some(cache_store) = &overrides.cache_store {
            markdown.cache_store.clone_from(cache_store);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::parse(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_markdown()?;
        self.validate_cache()?;
        Ok(())
    }

    fn validate_markdown(&self) -> Result<(), ConfigError> {
        require_non_empty(
            &self.markdown.code_highlighting.theme,
            "markdown.code_highlighting.theme",
        )?;

        let bindings = [
            ("markdown.block_renderers", &self.markdown.block_renderers),
            ("markdown.inline_renderers", &self.markdown.inline_renderers),
        ];
        for (field, list) in bindings {
            for binding in list {
                require_non_empty(&binding.node, &format!("{field}.node"))?;
                require_non_empty(&binding.renderer, &format!("{field}.renderer"))?;
            }
        }

        if let Some(name) = self.markdown.cache_store.store_name()
            && !self.cache_resolved.stores.contains_key(name)
        {
            return Err(ConfigError::Validation(format!(
                "markdown.cache_store refers to undefined store [{name}]"
            )));
        }

        Ok(())
    }

    fn validate_cache(&self) -> Result<(), ConfigError> {
        let cache = &self.cache_resolved;
        if !cache.stores.contains_key(&cache.default) {
            return Err(ConfigError::Validation(format!(
                "cache.default refers to undefined store [{}]",
                cache.default
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let highlighting = &mut self.markdown.code_highlighting;
        highlighting.theme =
            expand::expand_env(&highlighting.theme, "markdown.code_highlighting.theme")?;

        for (name, store) in &mut self.cache.stores {
            if let StoreConfigRaw::File { path } = store {
                *path = expand::expand_env(path, &format!("cache.stores.{name}.path"))?;
            }
        }

        Ok(())
    }

    /// Resolve the cache section, making file store paths absolute.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let mut stores = BTreeMap::new();
        for (name, raw) in &self.cache.stores {
            let store = match raw {
                StoreConfigRaw::Memory => StoreConfig::Memory,
                StoreConfigRaw::Null => StoreConfig::Null,
                StoreConfigRaw::File { path } => {
                    require_non_empty(path, &format!("cache.stores.{name}.path"))?;
                    StoreConfig::File {
                        path: config_dir.join(path),
                    }
                }
            };
            stores.insert(name.clone(), store);
        }
        if stores.is_empty() {
            stores.insert(DEFAULT_STORE.to_owned(), StoreConfig::Memory);
        }

        self.cache_resolved = CacheConfig {
            default: self
                .cache
                .default
                .clone()
                .unwrap_or_else(|| DEFAULT_STORE.to_owned()),
            stores,
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        Config::parse(toml, Path::new("/project"))
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(result: Result<Config, ConfigError>, expected: &[&str]) {
        let err = result.expect_err("expected validation to fail");
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected {
            assert!(msg.contains(s), "Expected error to contain '{s}', got: {msg}");
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.markdown.code_highlighting.enabled);
        assert_eq!(config.markdown.code_highlighting.theme, "github-light");
        assert!(config.markdown.add_anchors_to_headings);
        assert_eq!(config.markdown.cache_store, CacheStoreSetting::Default);
        assert!(config.markdown.extensions.is_empty());
        assert!(config.markdown.commonmark_options.is_empty());
        assert_eq!(config.cache_resolved, CacheConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_empty_config_matches_defaults() {
        let config = parse("").unwrap();

        assert_eq!(config.cache_resolved.default, "memory");
        assert_eq!(
            config.cache_resolved.stores,
            BTreeMap::from([("memory".to_owned(), StoreConfig::Memory)])
        );
        assert!(config.markdown.add_anchors_to_headings);
    }

    #[test]
    fn test_default_config_file_parses() {
        let config = parse(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.markdown.code_highlighting.theme, "github-light");
        assert_eq!(config.markdown.cache_store, CacheStoreSetting::Default);
        assert_eq!(
            serde_json::Value::Object(config.markdown.commonmark_options),
            json!({"html_input": "allow", "allow_unsafe_links": true})
        );
        assert_eq!(config.cache_resolved, CacheConfig::default());
    }

    #[test]
    fn test_parse_markdown_section() {
        let config = parse(
            r#"
[markdown]
add_anchors_to_headings = false
extensions = ["gfm", "external_link"]

[markdown.commonmark_options]
html_input = "escape"
soft_break = "<br />"

[markdown.code_highlighting]
enabled = false
theme = "solarized-dark"

[[markdown.block_renderers]]
node = "heading"
renderer = "anchor_heading"

[[markdown.inline_renderers]]
node = "image"
renderer = "lazy_image"
"#,
        )
        .unwrap();

        let markdown = &config.markdown;
        assert!(!markdown.add_anchors_to_headings);
        assert_eq!(markdown.extensions, ["gfm", "external_link"]);
        assert_eq!(
            markdown.commonmark_options.get("html_input"),
            Some(&json!("escape"))
        );
        assert!(!markdown.code_highlighting.enabled);
        assert_eq!(markdown.code_highlighting.theme, "solarized-dark");
        assert_eq!(
            markdown.block_renderers,
            [RendererBinding {
                node: "heading".to_owned(),
                renderer: "anchor_heading".to_owned(),
            }]
        );
        assert_eq!(markdown.inline_renderers[0].renderer, "lazy_image");
    }

    #[test]
    fn test_cache_store_setting_forms() {
        let disabled = parse("[markdown]\ncache_store = false").unwrap();
        assert_eq!(disabled.markdown.cache_store, CacheStoreSetting::Disabled);
        assert!(!disabled.markdown.cache_store.is_enabled());

        let default = parse("[markdown]\ncache_store = true").unwrap();
        assert_eq!(default.markdown.cache_store, CacheStoreSetting::Default);
        assert_eq!(default.markdown.cache_store.store_name(), None);

        let named = parse("[markdown]\ncache_store = \"memory\"").unwrap();
        assert_eq!(
            named.markdown.cache_store,
            CacheStoreSetting::Named("memory".to_owned())
        );
        assert_eq!(named.markdown.cache_store.store_name(), Some("memory"));
    }

    #[test]
    fn test_parse_cache_stores_resolves_paths() {
        let config = parse(
            r#"
[cache]
default = "disk"

[cache.stores.disk]
driver = "file"
path = ".mdkit/cache"

[cache.stores.off]
driver = "null"
"#,
        )
        .unwrap();

        assert_eq!(config.cache_resolved.default, "disk");
        assert_eq!(
            config.cache_resolved.stores,
            BTreeMap::from([
                (
                    "disk".to_owned(),
                    StoreConfig::File {
                        path: PathBuf::from("/project/.mdkit/cache")
                    }
                ),
                ("off".to_owned(), StoreConfig::Null),
            ])
        );
    }

    #[test]
    fn test_absolute_store_path_kept() {
        let config = parse(
            r#"
[cache]
default = "disk"

[cache.stores.disk]
driver = "file"
path = "/var/cache/mdkit"
"#,
        )
        .unwrap();

        assert_eq!(
            config.cache_resolved.stores["disk"],
            StoreConfig::File {
                path: PathBuf::from("/var/cache/mdkit")
            }
        );
    }

    #[test]
    fn test_unknown_driver_rejected() {
        let result = parse("[cache.stores.remote]\ndriver = \"redis\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = parse("[markdown]\nhighlight = true");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_empty_theme() {
        assert_validation_error(
            parse("[markdown.code_highlighting]\ntheme = \"\""),
            &["markdown.code_highlighting.theme", "empty"],
        );
    }

    #[test]
    fn test_validate_undefined_default_store() {
        assert_validation_error(
            parse("[cache]\ndefault = \"redis\""),
            &["cache.default", "[redis]"],
        );
    }

    #[test]
    fn test_validate_default_store_missing_from_custom_stores() {
        assert_validation_error(
            parse("[cache.stores.disk]\ndriver = \"file\"\npath = \"cache\""),
            &["cache.default", "[memory]"],
        );
    }

    #[test]
    fn test_validate_undefined_markdown_store() {
        assert_validation_error(
            parse("[markdown]\ncache_store = \"disk\""),
            &["markdown.cache_store", "[disk]"],
        );
    }

    #[test]
    fn test_validate_file_store_requires_path() {
        assert_validation_error(
            parse("[cache]\ndefault = \"disk\"\n[cache.stores.disk]\ndriver = \"file\""),
            &["cache.stores.disk.path"],
        );
    }

    #[test]
    fn test_validate_empty_renderer_binding() {
        assert_validation_error(
            parse("[[markdown.inline_renderers]]\nnode = \"image\"\nrenderer = \"\""),
            &["markdown.inline_renderers.renderer"],
        );
    }

    #[test]
    fn test_expand_env_vars_theme_and_path() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDKIT_CONFIG_TEST_THEME", "github-dark");
            std::env::set_var("MDKIT_CONFIG_TEST_DIR", "/tmp/mdkit");
        }

        let config = parse(
            r#"
[markdown.code_highlighting]
theme = "${MDKIT_CONFIG_TEST_THEME}"

[cache]
default = "disk"

[cache.stores.disk]
driver = "file"
path = "${MDKIT_CONFIG_TEST_DIR}/cache"
"#,
        )
        .unwrap();

        assert_eq!(config.markdown.code_highlighting.theme, "github-dark");
        assert_eq!(
            config.cache_resolved.stores["disk"],
            StoreConfig::File {
                path: PathBuf::from("/tmp/mdkit/cache")
            }
        );

        unsafe {
            std::env::remove_var("MDKIT_CONFIG_TEST_THEME");
            std::env::remove_var("MDKIT_CONFIG_TEST_DIR");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDKIT_CONFIG_TEST_MISSING");
        }

        let err = parse("[markdown.code_highlighting]\ntheme = \"${MDKIT_CONFIG_TEST_MISSING}\"")
            .unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("markdown.code_highlighting.theme"));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        config.apply_overrides(&ConfigOverrides {
            highlight_code: Some(false),
            theme: Some("github-dark".to_owned()),
            anchors: Some(false),
            cache_store: Some(CacheStoreSetting::Disabled),
        });

        assert!(!config.markdown.code_highlighting.enabled);
        assert_eq!(config.markdown.code_highlighting.theme, "github-dark");
        assert!(!config.markdown.add_anchors_to_headings);
        assert_eq!(config.markdown.cache_store, CacheStoreSetting::Disabled);
    }

    #[test]
    fn test_apply_overrides_empty_keeps_values() {
        let mut config = Config::default();
        config.apply_overrides(&ConfigOverrides::default());

        assert!(config.markdown.code_highlighting.enabled);
        assert_eq!(config.markdown.code_highlighting.theme, "github-light");
        assert!(config.markdown.add_anchors_to_headings);
        assert_eq!(config.markdown.cache_store, CacheStoreSetting::Default);
    }

    #[test]
    fn test_load_explicit_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[markdown]\ncache_store = \"disk\"\n\n[cache.stores.memory]\ndriver = \"memory\"\n\n[cache.stores.disk]\ndriver = \"file\"\npath = \"cache\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            config.cache_resolved.stores["disk"],
            StoreConfig::File {
                path: tmp.path().join("cache")
            }
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/mdkit.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_rejects_override_naming_undefined_store() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let overrides = ConfigOverrides {
            cache_store: Some(CacheStoreSetting::Named("disk".to_owned())),
            ..Default::default()
        };
        let result = Config::load(Some(&path), Some(&overrides));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
