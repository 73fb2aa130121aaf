//! Error types for launcher operations.
//!
//! This module defines [`LauncherError`], the primary error type used throughout
//! the launcher, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every bootstrap failure is fatal: the command layer reports it, waits
//!   for acknowledgment, and exits with status 1
//! - [`LauncherError::kind`] groups variants into the coarse [`ErrorKind`]
//!   taxonomy used for hints and exit reporting
//! - Use `anyhow::Error` (via `LauncherError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for launcher operations.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// The Python interpreter could not be run.
    #[error("Python interpreter '{interpreter}' not found: {message}")]
    InterpreterNotFound {
        interpreter: String,
        message: String,
    },

    /// Creating the virtual environment failed.
    #[error("Failed to create virtual environment at {path}: {message}")]
    EnvironmentCreateFailed { path: PathBuf, message: String },

    /// The virtual environment exists but cannot be activated.
    #[error("Failed to activate virtual environment at {path}: {message}")]
    ActivationFailed { path: PathBuf, message: String },

    /// Installing dependencies from the manifest failed.
    #[error("Failed to install dependencies from {manifest}: {message}")]
    DependencyInstallFailed { manifest: PathBuf, message: String },

    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A child process could not be spawned or waited on.
    #[error("Failed to run {command}: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of launcher failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable interpreter on the search path.
    EnvironmentMissing,
    /// Environment creation, activation, or dependency installation failed.
    SetupFailure,
    /// Configuration could not be loaded or is invalid.
    Configuration,
    /// Anything else (IO, spawn errors outside a bootstrap step).
    Internal,
}

impl LauncherError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InterpreterNotFound { .. } => ErrorKind::EnvironmentMissing,
            Self::EnvironmentCreateFailed { .. }
            | Self::ActivationFailed { .. }
            | Self::DependencyInstallFailed { .. } => ErrorKind::SetupFailure,
            Self::ConfigNotFound { .. }
            | Self::ConfigParseError { .. }
            | Self::ConfigValidationError { .. } => ErrorKind::Configuration,
            Self::CommandFailed { .. } | Self::Io(_) | Self::Other(_) => ErrorKind::Internal,
        }
    }

    /// A short follow-up hint for the operator, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InterpreterNotFound { .. } => Some(
                "Install Python 3 from https://www.python.org/downloads/ and make sure it is added to PATH",
            ),
            Self::EnvironmentCreateFailed { .. } => {
                Some("Check that the venv module is available (e.g. python3-venv) and the directory is writable")
            }
            Self::ActivationFailed { .. } => {
                Some("Delete the virtual environment directory and run the launcher again to recreate it")
            }
            Self::DependencyInstallFailed { .. } => {
                Some("Check your network connection and the contents of the manifest file")
            }
            _ => None,
        }
    }
}

/// Result type alias for launcher operations.
pub type Result<T> = std::result::Result<T, LauncherError>;
