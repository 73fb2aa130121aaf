//! Scripted process runner for tests.
//!
//! `MockRunner` implements [`ProcessRunner`] without spawning anything. Each
//! invocation is recorded; the response comes from the first registered rule
//! whose pattern is a substring of the command line.
//!
//! # Example
//!
//! ```
//! use rentbot_launcher::shell::{CommandSpec, MockResponse, MockRunner, ProcessRunner};
//!
//! let mut runner = MockRunner::new();
//! runner.respond("--version", MockResponse::stdout("Python 3.12.1\n"));
//!
//! let result = runner.run(&CommandSpec::new("python3").arg("--version")).unwrap();
//! assert!(result.stdout.contains("3.12.1"));
//! assert_eq!(runner.count_matching("--version"), 1);
//! ```

use std::time::Duration;

use crate::error::{LauncherError, Result};

use super::command::{CommandResult, CommandSpec, ProcessRunner};

type Effect = Box<dyn Fn(&CommandSpec)>;

/// Canned outcome for a matched invocation.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Exit 0 with the given stdout and stderr.
    Success { stdout: String, stderr: String },
    /// Exit with a non-zero code and the given stderr.
    Failure { code: i32, stderr: String },
    /// The program could not be spawned.
    SpawnError,
}

impl MockResponse {
    /// Exit 0 with the given stdout.
    pub fn stdout(out: &str) -> Self {
        Self::Success {
            stdout: out.to_string(),
            stderr: String::new(),
        }
    }

    /// Exit 0 with no output.
    pub fn ok() -> Self {
        Self::stdout("")
    }

    /// Exit with `code` and the given stderr.
    pub fn fail(code: i32, stderr: &str) -> Self {
        Self::Failure {
            code,
            stderr: stderr.to_string(),
        }
    }
}

struct Rule {
    pattern: String,
    response: MockResponse,
    effect: Option<Effect>,
}

/// Process runner that records invocations and replays canned responses.
///
/// Unmatched invocations succeed with empty output.
#[derive(Default)]
pub struct MockRunner {
    rules: Vec<Rule>,
    invocations: Vec<CommandSpec>,
}

impl MockRunner {
    /// Create a runner with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to command lines containing `pattern`.
    pub fn respond(&mut self, pattern: &str, response: MockResponse) {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            response,
            effect: None,
        });
    }

    /// Respond to `pattern` and run `effect` first (e.g. create a directory
    /// the real program would have created).
    pub fn respond_with<F>(&mut self, pattern: &str, response: MockResponse, effect: F)
    where
        F: Fn(&CommandSpec) + 'static,
    {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            response,
            effect: Some(Box::new(effect)),
        });
    }

    /// All recorded invocations, in order.
    pub fn invocations(&self) -> &[CommandSpec] {
        &self.invocations
    }

    /// Recorded command lines, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations.iter().map(CommandSpec::display).collect()
    }

    /// Number of invocations whose command line contains `pattern`.
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.invocations
            .iter()
            .filter(|spec| spec.display().contains(pattern))
            .count()
    }

    /// First invocation whose command line contains `pattern`.
    pub fn find(&self, pattern: &str) -> Option<&CommandSpec> {
        self.invocations
            .iter()
            .find(|spec| spec.display().contains(pattern))
    }
}

impl std::fmt::Debug for MockRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRunner")
            .field("rules", &self.rules.len())
            .field("invocations", &self.command_lines())
            .finish()
    }
}

impl ProcessRunner for MockRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<CommandResult> {
        self.invocations.push(spec.clone());
        let line = spec.display();

        let Some(rule) = self.rules.iter().find(|r| line.contains(&r.pattern)) else {
            return Ok(CommandResult::success(
                String::new(),
                String::new(),
                Duration::ZERO,
            ));
        };

        if let Some(effect) = &rule.effect {
            effect(spec);
        }

        match &rule.response {
            MockResponse::Success { stdout, stderr } => Ok(CommandResult::success(
                stdout.clone(),
                stderr.clone(),
                Duration::ZERO,
            )),
            MockResponse::Failure { code, stderr } => Ok(CommandResult::failure(
                Some(*code),
                String::new(),
                stderr.clone(),
                Duration::ZERO,
            )),
            MockResponse::SpawnError => Err(LauncherError::CommandFailed {
                command: line,
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "No such file or directory",
                ),
            }),
        }
    }
}
