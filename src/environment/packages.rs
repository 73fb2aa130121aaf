//! Installed-package probing and dependency installation.
//!
//! The probe asks pip for a JSON listing and compares normalized project
//! names, so `flask`, `Flask` and `FLASK` all match the marker while
//! `Flask-Login` does not.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{LauncherError, Result};
use crate::shell::{ProcessRunner, StdioMode};

use super::venv::ActivatedEnvironment;

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("SEPARATOR_RUN must compile"));

/// One entry of `pip list --format=json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
}

/// Normalize a project name the way package indexes do (PEP 503).
pub fn normalize_name(name: &str) -> String {
    SEPARATOR_RUN
        .replace_all(name.trim(), "-")
        .to_lowercase()
}

/// Parse `pip list --format=json` output.
pub fn parse_pip_list(output: &str) -> std::result::Result<Vec<InstalledPackage>, serde_json::Error> {
    // Some pip versions print a notice line after the JSON array.
    let json = output
        .lines()
        .find(|line| line.trim_start().starts_with('['))
        .unwrap_or(output);
    serde_json::from_str(json)
}

/// Find `marker` among `packages` by normalized name.
pub fn find_package<'a>(
    packages: &'a [InstalledPackage],
    marker: &str,
) -> Option<&'a InstalledPackage> {
    let wanted = normalize_name(marker);
    packages.iter().find(|p| normalize_name(&p.name) == wanted)
}

/// List packages installed in the environment.
pub fn list_installed<R: ProcessRunner + ?Sized>(
    runner: &mut R,
    env: &ActivatedEnvironment,
) -> anyhow::Result<Vec<InstalledPackage>> {
    let spec = env.pip_command(["list", "--format=json", "--disable-pip-version-check"]);
    let result = runner.run(&spec)?;
    if !result.success {
        anyhow::bail!("pip list failed: {}", result.failure_reason());
    }
    Ok(parse_pip_list(&result.stdout)?)
}

/// Outcome of probing for the marker package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerStatus {
    /// Marker installed at this version.
    Installed(String),
    /// Listing succeeded and the marker is not in it.
    Missing,
    /// Listing could not be obtained; treated as missing.
    Unknown(String),
}


/// Probe the environment for `marker`.
pub fn probe_marker<R: ProcessRunner + ?Sized>(
    runner: &mut R,
    env: &ActivatedEnvironment,
    marker: &str,
) -> MarkerStatus {
    match list_installed(runner, env) {
        Ok(packages) => match find_package(&packages, marker) {
            Some(pkg) => MarkerStatus::Installed(pkg.version.clone()),
            None => MarkerStatus::Missing,
        },
        Err(e) => {
            tracing::warn!("Could not list installed packages: {:#}", e);
            MarkerStatus::Unknown(e.to_string())
        }
    }
}

/// Run `pip install -r <manifest>` with output streamed to the console.
pub fn install_manifest<R: ProcessRunner + ?Sized>(
    runner: &mut R,
    env: &ActivatedEnvironment,
    project_root: &Path,
    manifest: &str,
) -> Result<()> {
    let manifest_path = project_root.join(manifest);
    let failed = |message: String| LauncherError::DependencyInstallFailed {
        manifest: manifest_path.clone(),
        message,
    };

    let mut spec = env
        .pip_command(["install", "-r"])
        .arg(manifest)
        .current_dir(project_root);
    spec.stdio = StdioMode::Inherit;

    let result = runner.run(&spec).map_err(|e| failed(e.to_string()))?;
    if !result.success {
        return Err(failed(result.failure_reason()));
    }
    Ok(())
}
