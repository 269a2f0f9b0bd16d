//! `mdkit init` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mdkit_config::{CONFIG_FILENAME, DEFAULT_CONFIG};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the init command.
#[derive(Args)]
pub(crate) struct InitArgs {
    /// Directory to create the configuration in.
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Overwrite an existing configuration file.
    #[arg(short, long)]
    force: bool,
}

impl InitArgs {
    /// Execute the init command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists (without `--force`) or cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let existed = self.dir.join(CONFIG_FILENAME).exists();
        let path = write_config(&self.dir, self.force)?;
        if existed {
            output.warning(&format!("Overwrote {}", path.display()));
        } else {
            output.success(&format!("Created {}", path.display()));
        }
        Ok(())
    }
}

fn write_config(dir: &Path, force: bool) -> Result<PathBuf, CliError> {
    let path = dir.join(CONFIG_FILENAME);
    if path.exists() && !force {
        return Err(CliError::Validation(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, DEFAULT_CONFIG)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use mdkit_config::Config;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_write_config() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_config(dir.path(), false).unwrap();

        assert_eq!(path, dir.path().join("mdkit.toml"));
        let config = Config::load(Some(&path), None).unwrap();
        assert!(config.markdown.add_anchors_to_headings);
    }

    #[test]
    fn test_existing_config_requires_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdkit.toml");
        std::fs::write(&path, "# custom\n").unwrap();

        assert!(write_config(dir.path(), false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# custom\n");

        write_config(dir.path(), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
