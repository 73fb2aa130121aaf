//! Run command implementation.
//!
//! The `rentbot-launcher run` command prepares the environment and starts
//! the application. It is also what runs when no subcommand is given.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::load_config;
use crate::error::{LauncherError, Result};
use crate::launcher::{LaunchOptions, Launcher, ACK_PROMPT};
use crate::shell::{ProcessRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
    guard_interrupts: bool,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
            guard_interrupts: false,
        }
    }

    /// Swallow Ctrl+C in the launcher while the application runs.
    pub fn with_interrupt_guard(mut self, enabled: bool) -> Self {
        self.guard_interrupts = enabled;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    fn options(&self) -> LaunchOptions {
        LaunchOptions {
            skip_install: self.args.skip_install,
            reinstall: self.args.reinstall,
        }
    }

    /// Run the bootstrap sequence with the given process runner.
    ///
    /// Every path ends with an acknowledgment wait. Setup failures exit 1;
    /// anything that reached the application launch exits 0.
    pub fn execute_with(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let config = match load_config(&self.project_root, self.config_path.as_deref()) {
            Ok(c) => c,
            Err(e) => return Ok(abort(ui, &e)),
        };

        let outcome = Launcher::new(&config, &self.project_root, self.options(), runner)
            .with_interrupt_guard(self.guard_interrupts)
            .run(ui);

        match outcome {
            Ok(report) => {
                tracing::debug!(
                    "Launch finished: created={}, installed={}, exit={:?}",
                    report.environment_created,
                    report.dependencies_installed,
                    report.app_exit
                );
                ui.wait_for_ack(ACK_PROMPT);
                Ok(CommandResult::success())
            }
            Err(e) => Ok(abort(ui, &e)),
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut runner = SystemRunner::new();
        self.execute_with(&mut runner, ui)
    }
}

/// Report a setup failure, wait for acknowledgment, exit 1.
fn abort(ui: &mut dyn UserInterface, error: &LauncherError) -> CommandResult {
    tracing::debug!("Aborting ({:?}): {:?}", error.kind(), error);
    ui.error(&error.to_string());
    if let Some(hint) = error.hint() {
        ui.show_hint(hint);
    }
    ui.wait_for_ack(ACK_PROMPT);
    CommandResult::failure(1)
}
