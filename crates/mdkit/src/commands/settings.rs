//! Configuration flags shared by the rendering commands.

use std::path::PathBuf;

use clap::Args;
use mdkit_config::{CacheStoreSetting, ConfigOverrides};
use mdkit_service::MarkdownService;

use crate::error::CliError;

/// Configuration file and override flags.
#[derive(Args, Debug, Default)]
pub(crate) struct SettingsArgs {
    /// Path to configuration file (default: auto-discover mdkit.toml).
    #[arg(short, long, env = "MDKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Code highlighting theme (overrides config).
    #[arg(long)]
    theme: Option<String>,

    /// Disable code highlighting.
    #[arg(long)]
    no_highlight: bool,

    /// Disable heading anchors.
    #[arg(long)]
    no_anchors: bool,

    /// Disable caching of rendered HTML.
    #[arg(long, conflicts_with = "cache_store")]
    no_cache: bool,

    /// Cache store to use (overrides config).
    #[arg(long)]
    cache_store: Option<String>,
}

impl SettingsArgs {
    /// Resolve flags into configuration overrides.
    pub(crate) fn overrides(&self) -> ConfigOverrides {
        let cache_store = if self.no_cache {
            Some(CacheStoreSetting::Disabled)
        } else {
            self.cache_store.clone().map(CacheStoreSetting::Named)
        };

        ConfigOverrides {
            highlight_code: self.no_highlight.then_some(false),
            theme: self.theme.clone(),
            anchors: self.no_anchors.then_some(false),
            cache_store,
        }
    }

    /// Load configuration and create the markdown service.
    pub(crate) fn load_service(&self) -> Result<MarkdownService, CliError> {
        let service = MarkdownService::load(self.config.as_deref(), Some(&self.overrides()))?;
        Ok(service)
    }
}
