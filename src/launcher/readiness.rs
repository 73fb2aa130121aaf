//! Read-only readiness assessment.
//!
//! Inspects each checkpoint the bootstrap sequence would pass through
//! without creating, installing or launching anything.

use std::path::Path;

use serde::Serialize;

use crate::config::{missing_keys, EnvFileParser, LauncherConfig};
use crate::environment::{detect_interpreter, probe_marker, MarkerStatus, VirtualEnv};
use crate::shell::{find_on_path, ProcessRunner};
use crate::ui::StatusKind;

/// Outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    /// Ready.
    Ok,
    /// `run` would act here (create, install) or abort.
    Missing,
    /// Not checked because an earlier check failed.
    Skipped,
    /// Works, with a caveat.
    Warning,
}

impl From<CheckState> for StatusKind {
    fn from(state: CheckState) -> Self {
        match state {
            CheckState::Ok => Self::Success,
            CheckState::Missing => Self::Failed,
            CheckState::Skipped => Self::Skipped,
            CheckState::Warning => Self::Warning,
        }
    }
}

/// One line of the readiness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Short label, e.g. `interpreter`.
    pub name: &'static str,
    pub state: CheckState,
    /// Human-readable detail.
    pub detail: String,
}

impl CheckResult {
    fn new(name: &'static str, state: CheckState, detail: impl Into<String>) -> Self {
        Self {
            name,
            state,
            detail: detail.into(),
        }
    }
}

/// All checks, in bootstrap order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessReport {
    pub checks: Vec<CheckResult>,
}

impl ReadinessReport {
    /// Whether `run` would go straight to launching the application.
    pub fn is_ready(&self) -> bool {
        self.checks
            .iter()
            .all(|c| matches!(c.state, CheckState::Ok | CheckState::Warning))
    }

    /// Look up a check by name.
    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

/// Assess every checkpoint for `project_root`.
pub fn assess<R: ProcessRunner + ?Sized>(
    runner: &mut R,
    config: &LauncherConfig,
    project_root: &Path,
) -> ReadinessReport {
    let mut checks = Vec::new();

    let interpreter = match detect_interpreter(runner, &config.interpreter) {
        Ok(interp) => {
            let path_entries: Vec<_> = std::env::var_os("PATH")
                .map(|p| std::env::split_paths(&p).collect())
                .unwrap_or_default();
            let location = find_on_path(&config.interpreter, &path_entries)
                .map(|p| format!(" at {}", p.display()))
                .unwrap_or_default();
            checks.push(CheckResult::new(
                "interpreter",
                CheckState::Ok,
                format!("{}{}", interp.describe(), location),
            ));
            true
        }
        Err(e) => {
            checks.push(CheckResult::new(
                "interpreter",
                CheckState::Missing,
                e.to_string(),
            ));
            false
        }
    };

    let venv = VirtualEnv::new(project_root, &config.venv_dir);
    let venv_exists = venv.exists();
    checks.push(if venv_exists {
        CheckResult::new("environment", CheckState::Ok, venv.root().display().to_string())
    } else if interpreter {
        CheckResult::new(
            "environment",
            CheckState::Missing,
            format!("{} does not exist; run would create it", config.venv_dir),
        )
    } else {
        CheckResult::new(
            "environment",
            CheckState::Missing,
            format!("{} does not exist", config.venv_dir),
        )
    });

    let activated = if venv_exists {
        match venv.activate() {
            Ok(env) => {
                checks.push(CheckResult::new(
                    "activation",
                    CheckState::Ok,
                    env.python.display().to_string(),
                ));
                Some(env)
            }
            Err(e) => {
                checks.push(CheckResult::new("activation", CheckState::Missing, e.to_string()));
                None
            }
        }
    } else {
        checks.push(CheckResult::new(
            "activation",
            CheckState::Skipped,
            "no environment",
        ));
        None
    };

    checks.push(match &activated {
        Some(env) => match probe_marker(runner, env, &config.marker_package) {
            MarkerStatus::Installed(version) => CheckResult::new(
                "dependencies",
                CheckState::Ok,
                format!("{} {}", config.marker_package, version),
            ),
            MarkerStatus::Missing => CheckResult::new(
                "dependencies",
                CheckState::Missing,
                format!("{} is not installed", config.marker_package),
            ),
            MarkerStatus::Unknown(reason) => {
                CheckResult::new("dependencies", CheckState::Missing, reason)
            }
        },
        None => CheckResult::new("dependencies", CheckState::Skipped, "environment not usable"),
    });

    let manifest = project_root.join(&config.manifest);
    checks.push(if manifest.is_file() {
        CheckResult::new("manifest", CheckState::Ok, config.manifest.clone())
    } else {
        CheckResult::new(
            "manifest",
            CheckState::Missing,
            format!("{} not found", config.manifest),
        )
    });

    let entry_point = project_root.join(&config.entry_point);
    checks.push(if entry_point.is_file() {
        CheckResult::new("entry point", CheckState::Ok, config.entry_point.clone())
    } else {
        CheckResult::new(
            "entry point",
            CheckState::Missing,
            format!("{} not found", config.entry_point),
        )
    });

    let file_vars = EnvFileParser::load_optional(&project_root.join(".env"));
    let missing = missing_keys(&config.required_env, &file_vars, |key| std::env::var(key).ok());
    checks.push(if missing.is_empty() {
        CheckResult::new("app settings", CheckState::Ok, "all required keys set")
    } else {
        CheckResult::new(
            "app settings",
            CheckState::Warning,
            format!("defaults in use for {}", missing.join(", ")),
        )
    });

    ReadinessReport { checks }
}
