//! `mdkit template` command implementation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use mdkit_service::VIEW_NAME;

use super::settings::SettingsArgs;
use crate::error::CliError;
use crate::output::write_document;

/// Arguments for the template command.
#[derive(Args)]
pub(crate) struct TemplateArgs {
    /// Template file to render. Includes resolve relative to its directory.
    template: PathBuf,

    /// Template variable as KEY=VALUE (repeatable).
    #[arg(short = 'V', long = "var", value_parser = parse_var)]
    vars: Vec<(String, String)>,

    /// Template used as the markdown view instead of the default `<div>` wrapper.
    #[arg(long)]
    view: Option<PathBuf>,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl TemplateArgs {
    /// Execute the template command.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be loaded or rendered.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let service = Arc::new(self.settings.load_service()?);

        let (dir, name) = split_template_path(&self.template)?;
        let mut env = minijinja::Environment::new();
        env.set_loader(minijinja::path_loader(dir));
        if let Some(view) = &self.view {
            env.add_template_owned(VIEW_NAME, std::fs::read_to_string(view)?)?;
        }
        service.register_template_component(&mut env)?;

        let context: BTreeMap<String, String> = self.vars.into_iter().collect();
        let output = env.get_template(&name)?.render(&context)?;

        tracing::info!(template = %name, "Rendered template");
        write_document(&output)?;
        Ok(())
    }
}

/// Split a template path into the loader directory and template name.
fn split_template_path(path: &Path) -> Result<(PathBuf, String), CliError> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CliError::Validation(format!("Invalid template path: {}", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, name.to_owned()))
}

fn parse_var(value: &str) -> Result<(String, String), String> {
    let (key, value) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{value}`"))?;
    if key.is_empty() {
        return Err("variable name cannot be empty".to_owned());
    }
    Ok((key.to_owned(), value.to_owned()))
}
