//! Config command implementation.
//!
//! The `rentbot-launcher config` command shows resolved configuration.

use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::{load_config, ConfigPaths};
use crate::error::{LauncherError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: ConfigArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match load_config(&self.project_root, self.config_path.as_deref()) {
            Ok(c) => c,
            Err(e) => {
                ui.error(&e.to_string());
                if let Some(hint) = e.hint() {
                    ui.show_hint(hint);
                }
                return Ok(CommandResult::failure(1));
            }
        };

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&config).map_err(|e| LauncherError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        // Source files as YAML comments so the output stays valid YAML
        let paths = ConfigPaths::discover(&self.project_root, self.config_path.as_deref());
        let sources = paths.all();
        if sources.is_empty() {
            ui.message("# built-in defaults");
        }
        for path in sources {
            ui.message(&format!("# {}", path.display()));
        }

        let yaml = serde_yaml::to_string(&config).map_err(|e| LauncherError::Other(e.into()))?;
        ui.message(yaml.trim_end());

        Ok(CommandResult::success())
    }
}
