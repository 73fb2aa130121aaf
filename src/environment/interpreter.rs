//! Interpreter detection.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LauncherError, Result};
use crate::shell::{CommandSpec, ProcessRunner};

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Python\s+(\d+\.\d+(?:\.\d+)?(?:[a-z]+\d*)?)").expect("VERSION_RE must compile")
});

/// A working interpreter found on the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    /// Program name or path as configured.
    pub program: String,

    /// Version string, e.g. `3.11.4`, when it could be parsed.
    pub version: Option<String>,
}

impl Interpreter {
    /// `Python 3.11.4`, or the program name when the version is unknown.
    pub fn describe(&self) -> String {
        match &self.version {
            Some(v) => format!("Python {}", v),
            None => self.program.clone(),
        }
    }
}

/// Extract the version number from `python --version` output.
///
/// Python 2 and early 3.x print to stderr, so callers pass both streams.
pub fn parse_version(output: &str) -> Option<String> {
    VERSION_RE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Run `<program> --version` with output suppressed.
///
/// Spawn failure and non-zero exit both mean the interpreter is missing.
pub fn detect_interpreter<R: ProcessRunner + ?Sized>(
    runner: &mut R,
    program: &str,
) -> Result<Interpreter> {
    let spec = CommandSpec::new(program).arg("--version");

    let result = runner
        .run(&spec)
        .map_err(|e| LauncherError::InterpreterNotFound {
            interpreter: program.to_string(),
            message: e.to_string(),
        })?;

    if !result.success {
        return Err(LauncherError::InterpreterNotFound {
            interpreter: program.to_string(),
            message: result.failure_reason(),
        });
    }

    let version = parse_version(&result.stdout).or_else(|| parse_version(&result.stderr));
    if version.is_none() {
        tracing::warn!(
            "Could not parse version from '{} --version' output",
            program
        );
    }

    Ok(Interpreter {
        program: program.to_string(),
        version,
    })
}
