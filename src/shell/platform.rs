//! Platform and terminal detection.

use std::io::IsTerminal;

/// Variables whose presence marks a CI run.
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    is_ci_with(|key| std::env::var_os(key).is_some())
}

/// [`is_ci`] against an explicit variable lookup.
pub fn is_ci_with<F>(is_set: F) -> bool
where
    F: Fn(&str) -> bool,
{
    CI_VARS.iter().any(|var| is_set(var))
}

/// Whether stdin is attached to a terminal a user could press a key in.
pub fn stdin_is_terminal() -> bool {
    std::io::stdin().is_terminal()
}

/// Interpreter name tried when none is configured.
///
/// Windows installers register `python`; most Unix systems only ship
/// `python3`.
pub fn default_interpreter() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}
