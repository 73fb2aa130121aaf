//! Status command implementation.
//!
//! The `rentbot-launcher status` command reports each checkpoint of the
//! bootstrap sequence without creating or installing anything.

use std::path::{Path, PathBuf};

use crate::cli::args::StatusArgs;
use crate::config::load_config;
use crate::error::{LauncherError, Result};
use crate::launcher::readiness::{assess, CheckState, ReadinessReport};
use crate::shell::{ProcessRunner, SystemRunner};
use crate::ui::{should_use_colors, LauncherTheme, StatusKind, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: StatusArgs) -> Self {
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
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }

    /// Run the assessment with the given process runner.
    pub fn execute_with(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
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

        let report = assess(runner, &config, &self.project_root);

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| LauncherError::Other(e.into()))?;
            ui.message(&json);
        } else {
            ui.show_header(&format!("{} - Status", config.app_name));
            show_report(ui, &report);
            ui.message("");
            if report.is_ready() {
                ui.message("Ready to launch.");
            } else {
                ui.message("Not ready: `rentbot-launcher run` will set up what is missing.");
            }
        }

        if report.is_ready() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut runner = SystemRunner::new();
        self.execute_with(&mut runner, ui)
    }
}

/// Print each check as one status line on stdout.
///
/// Terminals get icons, everything else gets bracketed markers.
fn show_report(ui: &mut dyn UserInterface, report: &ReadinessReport) {
    let theme = if should_use_colors() {
        LauncherTheme::new()
    } else {
        LauncherTheme::plain()
    };
    let interactive = ui.is_interactive();

    for check in &report.checks {
        let kind = StatusKind::from(check.state);
        let line = format!("{:<13} {}", format!("{}:", check.name), check.detail);
        let rendered = if interactive {
            kind.format(&theme, &line)
        } else {
            kind.format_plain(&line)
        };
        ui.message(&format!("  {}", rendered));
    }
    tracing::debug!(
        "{} of {} checks ok",
        report
            .checks
            .iter()
            .filter(|c| c.state == CheckState::Ok)
            .count(),
        report.checks.len()
    );
}
