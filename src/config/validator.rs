//! Configuration validation.

use std::path::Path;

use crate::config::schema::LauncherConfig;
use crate::error::{LauncherError, Result};

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collect every problem in `config`.
pub fn validate_config(config: &LauncherConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let required = [
        ("interpreter", &config.interpreter),
        ("venv_dir", &config.venv_dir),
        ("manifest", &config.manifest),
        ("marker_package", &config.marker_package),
        ("entry_point", &config.entry_point),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError {
                field,
                message: "must not be empty".to_string(),
            });
        }
    }

    if Path::new(&config.venv_dir).is_absolute() {
        errors.push(ValidationError {
            field: "venv_dir",
            message: format!(
                "must be relative to the project root, got '{}'",
                config.venv_dir
            ),
        });
    }

    if config.required_env.iter().any(|k| k.trim().is_empty()) {
        errors.push(ValidationError {
            field: "required_env",
            message: "entries must not be empty".to_string(),
        });
    }

    errors
}

/// Validate `config`, folding all problems into one error.
pub fn validate(config: &LauncherConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(LauncherError::ConfigValidationError { message })
}
