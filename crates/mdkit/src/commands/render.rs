//! `mdkit render` command implementation.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use mdkit_service::MarkdownComponent;

use super::settings::SettingsArgs;
use crate::error::CliError;
use crate::output::write_document;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: read stdin).
    file: Option<PathBuf>,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Wrap the HTML in the markdown view.
    #[arg(long)]
    wrap: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, configuration is invalid
    /// or rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let markdown = read_input(self.file.as_deref())?;
        let service = Arc::new(self.settings.load_service()?);

        let html = if self.wrap {
            let mut env = minijinja::Environment::new();
            service.register_template_component(&mut env)?;
            MarkdownComponent::new().render(&service, &env, &markdown)?
        } else {
            service.renderer()?.to_html(&markdown)?
        };

        tracing::info!(bytes = html.len(), "Rendered markdown");
        write_document(&html)?;
        Ok(())
    }
}

/// Read markdown from `file`, or from stdin when no file is given.
fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            CliError::Validation(format!("Failed to read {}: {e}", path.display()))
        }),
        None => {
            let mut markdown = String::new();
            io::stdin().read_to_string(&mut markdown)?;
            Ok(markdown)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Title\n").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "# Title\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.md");

        let err = read_input(Some(&path)).unwrap_err();

        assert!(err.to_string().starts_with("Failed to read "));
    }
}
