//! Child process execution.
//!
//! Every external program the launcher touches (the interpreter, pip, the
//! application entry point) is described by a [`CommandSpec`] and run to
//! completion through a [`ProcessRunner`]. Programs are spawned directly,
//! never through a shell, so paths with spaces need no quoting.

use crate::error::{LauncherError, Result};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// How a child's stdout/stderr are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// Capture output for inspection; nothing reaches the console.
    #[default]
    Capture,
    /// Child writes straight to the launcher's console.
    Inherit,
}

/// Description of a single program invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// Program to run (bare name resolved via PATH, or a path).
    pub program: PathBuf,

    /// Arguments, in order.
    pub args: Vec<OsString>,

    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables set on top of the inherited environment.
    pub env: HashMap<String, OsString>,

    /// Environment variables removed from the inherited environment.
    pub env_remove: Vec<String>,

    /// Output wiring.
    pub stdio: StdioMode,
}

impl CommandSpec {
    /// Start a spec for the given program.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Wire stdout/stderr to the console.
    pub fn inherit_output(mut self) -> Self {
        self.stdio = StdioMode::Inherit;
        self
    }

    /// Human-readable command line, for logs and error messages.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// Result of running a child process to completion.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Captured standard output (empty when inherited).
    pub stdout: String,

    /// Captured standard error (empty when inherited).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the process exited with status 0.
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Short description of why the process failed.
    pub fn failure_reason(&self) -> String {
        let tail = self
            .stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .map(str::trim);
        match (self.exit_code, tail) {
            (Some(code), Some(line)) => format!("exit code {}: {}", code, line),
            (Some(code), None) => format!("exit code {}", code),
            (None, Some(line)) => format!("terminated by signal: {}", line),
            (None, None) => "terminated by signal".to_string(),
        }
    }
}

/// Runs child processes to completion.
///
/// The launcher never talks to `std::process` directly; tests substitute
/// [`MockRunner`](super::MockRunner).
pub trait ProcessRunner {
    /// Spawn the process described by `spec` and wait for it to exit.
    ///
    /// Returns `Err` only when the process could not be spawned or waited
    /// on. A non-zero exit is an `Ok` result with `success == false`.
    fn run(&mut self, spec: &CommandSpec) -> Result<CommandResult>;
}

/// [`ProcessRunner`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<CommandResult> {
        let start = Instant::now();
        tracing::debug!("Running: {}", spec.display());

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);

        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }

        for key in &spec.env_remove {
            cmd.env_remove(key);
        }

        for (key, value) in &spec.env {
            cmd.env(key, value);
        }

        let spawn_error = |e: std::io::Error| {
            tracing::debug!("Failed to spawn {}: {}", spec.display(), e);
            LauncherError::CommandFailed {
                command: spec.display(),
                source: e,
            }
        };

        let (status, stdout, stderr) = match spec.stdio {
            StdioMode::Capture => {
                cmd.stdin(Stdio::null());
                cmd.stdout(Stdio::piped());
                cmd.stderr(Stdio::piped());
                let output = cmd.output().map_err(spawn_error)?;
                (
                    output.status,
                    String::from_utf8_lossy(&output.stdout).to_string(),
                    String::from_utf8_lossy(&output.stderr).to_string(),
                )
            }
            StdioMode::Inherit => {
                cmd.stdin(Stdio::inherit());
                cmd.stdout(Stdio::inherit());
                cmd.stderr(Stdio::inherit());
                let status = cmd.status().map_err(spawn_error)?;
                (status, String::new(), String::new())
            }
        };

        let duration = start.elapsed();
        tracing::debug!(
            "{} exited with {:?} after {:?}",
            spec.display(),
            status.code(),
            duration
        );

        if status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            Ok(CommandResult::failure(
                status.code(),
                stdout,
                stderr,
                duration,
            ))
        }
    }
}

/// Resolve a bare program name against PATH entries.
///
/// Returns `None` for names that already contain a path separator.
pub fn find_on_path(program: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    if Path::new(program).components().count() > 1 {
        return None;
    }

    let candidates: Vec<String> = if cfg!(windows) && Path::new(program).extension().is_none() {
        vec![format!("{}.exe", program), program.to_string()]
    } else {
        vec![program.to_string()]
    };

    for dir in path_entries {
        for name in &candidates {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}
