//! Bootstrap sequence.
//!
//! [`Launcher::run`] walks five checkpoints in order and aborts on the
//! first failure:
//!
//! 1. Interpreter check (`python --version`)
//! 2. Virtual environment existence, creating it if missing
//! 3. Activation
//! 4. Marker-package probe, installing the manifest if the marker is absent
//! 5. Application launch, blocking until the application exits
//!
//! Once the application has been started, its exit status never turns into
//! a launcher failure. Acknowledgment and the process exit code belong to
//! the caller (see [`RunCommand`](crate::cli::commands::run::RunCommand)).

pub mod interrupt;
pub mod readiness;

use std::path::Path;

use crate::config::{missing_keys, EnvFileParser, LauncherConfig};
use crate::environment::{
    detect_interpreter, install_manifest, probe_marker, ActivatedEnvironment, Interpreter,
    MarkerStatus, VirtualEnv,
};
use crate::error::Result;
use crate::shell::{CommandResult, CommandSpec, ProcessRunner};
use crate::ui::UserInterface;

pub use interrupt::install_interrupt_guard;
pub use readiness::{assess, CheckResult, ReadinessReport};

/// Line printed after the application exits.
pub const CLOSING_MESSAGE: &str = "Application stopped";

/// Prompt shown while waiting for acknowledgment.
pub const ACK_PROMPT: &str = "Press any key to exit...";

/// Switches that alter the dependency step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Never run the installer.
    pub skip_install: bool,
    /// Run the installer even when the marker is present.
    pub reinstall: bool,
}

/// How the application run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppExit {
    /// The application ran and exited with this code (None if signalled).
    Exited(Option<i32>),
    /// The application could not be started.
    FailedToStart(String),
}

/// What a completed launch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub interpreter: Interpreter,
    pub environment_created: bool,
    pub dependencies_installed: bool,
    pub app_exit: AppExit,
}

/// Runs the bootstrap sequence for one project.
pub struct Launcher<'a> {
    config: &'a LauncherConfig,
    project_root: &'a Path,
    options: LaunchOptions,
    runner: &'a mut dyn ProcessRunner,
    guard_interrupts: bool,
}

impl<'a> Launcher<'a> {
    /// Create a launcher.
    pub fn new(
        config: &'a LauncherConfig,
        project_root: &'a Path,
        options: LaunchOptions,
        runner: &'a mut dyn ProcessRunner,
    ) -> Self {
        Self {
            config,
            project_root,
            options,
            runner,
            guard_interrupts: false,
        }
    }

    /// Swallow Ctrl+C in the launcher while the application runs.
    pub fn with_interrupt_guard(mut self, enabled: bool) -> Self {
        self.guard_interrupts = enabled;
        self
    }

    /// Run every checkpoint, then the application.
    pub fn run(&mut self, ui: &mut dyn UserInterface) -> Result<LaunchReport> {
        ui.show_header(&self.config.app_name);

        let interpreter = self.check_interpreter(ui)?;
        let venv = VirtualEnv::new(self.project_root, &self.config.venv_dir);
        let environment_created = self.ensure_environment(ui, &venv, &interpreter)?;
        let env = self.activate(ui, &venv)?;
        let dependencies_installed = self.ensure_dependencies(ui, &env)?;
        self.check_env_file(ui);
        let app_exit = self.launch_app(ui, &env);

        Ok(LaunchReport {
            interpreter,
            environment_created,
            dependencies_installed,
            app_exit,
        })
    }

    fn check_interpreter(&mut self, ui: &mut dyn UserInterface) -> Result<Interpreter> {
        let interpreter = detect_interpreter(
            &mut Echo::new(&mut *self.runner, &mut *ui),
            &self.config.interpreter,
        )?;
        ui.success(&format!("Python found: {}", interpreter.describe()));
        Ok(interpreter)
    }

    /// Returns whether the environment was created.
    fn ensure_environment(
        &mut self,
        ui: &mut dyn UserInterface,
        venv: &VirtualEnv,
        interpreter: &Interpreter,
    ) -> Result<bool> {
        if venv.exists() {
            tracing::debug!("Reusing virtual environment at {}", venv.root().display());
            ui.skipped(&format!(
                "Virtual environment found ({})",
                self.config.venv_dir
            ));
            return Ok(false);
        }

        ui.message(&format!(
            "Creating virtual environment in {}...",
            self.config.venv_dir
        ));
        venv.create(
            &mut Echo::new(&mut *self.runner, &mut *ui),
            interpreter,
            self.project_root,
        )?;
        ui.success("Virtual environment created");
        Ok(true)
    }

    fn activate(
        &mut self,
        ui: &mut dyn UserInterface,
        venv: &VirtualEnv,
    ) -> Result<ActivatedEnvironment> {
        let env = venv.activate()?;
        ui.success("Virtual environment activated");
        Ok(env)
    }

    /// Returns whether the installer ran.
    fn ensure_dependencies(
        &mut self,
        ui: &mut dyn UserInterface,
        env: &ActivatedEnvironment,
    ) -> Result<bool> {
        let marker = &self.config.marker_package;

        let mut spinner = ui.start_spinner("Checking installed packages...");
        let status = probe_marker(&mut Echo::new(&mut *self.runner, &mut *ui), env, marker);
        spinner.finish_and_clear();
        tracing::debug!("Marker package {}: {:?}", marker, status);

        match &status {
            MarkerStatus::Installed(version) if !self.options.reinstall => {
                ui.skipped(&format!(
                    "Dependencies already installed ({} {})",
                    marker, version
                ));
                return Ok(false);
            }
            MarkerStatus::Unknown(reason) => {
                ui.warning(&format!("Could not list installed packages: {}", reason));
            }
            _ => {}
        }

        if self.options.skip_install {
            ui.warning(&format!(
                "{} is not installed; skipping installation (--skip-install)",
                marker
            ));
            return Ok(false);
        }

        ui.message(&format!(
            "Installing dependencies from {}...",
            self.config.manifest
        ));
        install_manifest(
            &mut Echo::new(&mut *self.runner, &mut *ui),
            env,
            self.project_root,
            &self.config.manifest,
        )?;
        ui.success("Dependencies installed");
        Ok(true)
    }

    fn check_env_file(&self, ui: &mut dyn UserInterface) {
        if self.config.required_env.is_empty() {
            return;
        }

        let file_vars = EnvFileParser::load_optional(&self.project_root.join(".env"));
        let missing = missing_keys(&self.config.required_env, &file_vars, |key| {
            std::env::var(key).ok()
        });
        for key in missing {
            ui.warning(&format!(
                "{} is not set in .env or the environment; the application will use its built-in default",
                key
            ));
        }
    }

    fn launch_app(&mut self, ui: &mut dyn UserInterface, env: &ActivatedEnvironment) -> AppExit {
        let config = self.config;
        ui.message("");
        ui.message(&format!("Starting {}...", config.app_name));
        ui.key_value("Web panel", &config.panel_url);
        ui.key_value("Login", &config.credentials.username);
        ui.key_value("Password", &config.credentials.password);
        ui.message(&config.bot_hint);
        ui.message("Press Ctrl+C to stop");
        ui.message("");

        let spec = env
            .python_command()
            .arg(&config.entry_point)
            .current_dir(self.project_root)
            .inherit_output();

        if self.guard_interrupts {
            install_interrupt_guard();
        }
        let outcome = Echo::new(&mut *self.runner, &mut *ui).run(&spec);
        let app_exit = match outcome {
            Ok(result) => {
                if !result.success {
                    ui.warning(&format!("Application exited with {}", result.failure_reason()));
                }
                AppExit::Exited(result.exit_code)
            }
            Err(e) => {
                ui.error(&format!("Failed to start {}: {}", config.entry_point, e));
                AppExit::FailedToStart(e.to_string())
            }
        };

        ui.message("");
        ui.message(CLOSING_MESSAGE);
        app_exit
    }
}

/// Prints each command line before running it when the UI is verbose.
struct Echo<'s> {
    runner: &'s mut dyn ProcessRunner,
    ui: &'s mut dyn UserInterface,
}

impl<'s> Echo<'s> {
    fn new(runner: &'s mut dyn ProcessRunner, ui: &'s mut dyn UserInterface) -> Self {
        Self { runner, ui }
    }
}

impl ProcessRunner for Echo<'_> {
    fn run(&mut self, spec: &CommandSpec) -> Result<CommandResult> {
        if self.ui.output_mode().shows_commands() {
            self.ui.message(&format!("$ {}", spec.display()));
        }
        self.runner.run(spec)
    }
}
