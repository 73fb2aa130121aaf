//! Configuration file discovery and loading.
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. Project config (`launcher.yml`)
//! 3. Local overrides (`launcher.local.yml`, meant to stay out of git)
//! 4. Explicit `--config <FILE>`
//! 5. `RENTBOT_*` environment variables

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::config::merger::merge_layers;
use crate::config::schema::LauncherConfig;
use crate::config::validator::validate;
use crate::error::{LauncherError, Result};

/// Project config file name.
pub const PROJECT_CONFIG: &str = "launcher.yml";

/// Local override file name.
pub const LOCAL_CONFIG: &str = "launcher.local.yml";

/// Environment variables that override single config fields.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("RENTBOT_INTERPRETER", "interpreter"),
    ("RENTBOT_VENV_DIR", "venv_dir"),
    ("RENTBOT_MANIFEST", "manifest"),
    ("RENTBOT_MARKER_PACKAGE", "marker_package"),
    ("RENTBOT_ENTRY_POINT", "entry_point"),
    ("RENTBOT_PANEL_URL", "panel_url"),
];

/// Config files found for a project, in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// `launcher.yml`, if present.
    pub project: Option<PathBuf>,

    /// `launcher.local.yml`, if present.
    pub project_local: Option<PathBuf>,

    /// `--config` argument (must exist).
    pub explicit: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path, explicit: Option<&Path>) -> Self {
        let existing = |name: &str| {
            let path = project_root.join(name);
            path.is_file().then_some(path)
        };

        Self {
            project: existing(PROJECT_CONFIG),
            project_local: existing(LOCAL_CONFIG),
            explicit: explicit.map(|p| {
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    project_root.join(p)
                }
            }),
        }
    }

    /// All config paths in merge order.
    pub fn all(&self) -> Vec<&PathBuf> {
        [&self.project, &self.project_local, &self.explicit]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Parse one config file into a YAML value.
///
/// An empty file is an empty mapping.
pub fn load_config_value(path: &Path) -> Result<Value> {
    if !path.is_file() {
        return Err(LauncherError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| LauncherError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let value: Value =
        serde_yaml::from_str(&content).map_err(|e| LauncherError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        Value::Mapping(_) => Ok(value),
        _ => Err(LauncherError::ConfigParseError {
            path: path.to_path_buf(),
            message: "top level must be a mapping".to_string(),
        }),
    }
}

/// Build the override layer from `RENTBOT_*` variables.
pub fn env_override_layer<F>(env_fn: F) -> Value
where
    F: Fn(&str) -> Option<String>,
{
    let mut layer = Mapping::new();
    for (var, field) in ENV_OVERRIDES {
        if let Some(value) = env_fn(var).filter(|v| !v.is_empty()) {
            tracing::debug!("Config override from {}: {}={}", var, field, value);
            layer.insert(Value::from(*field), Value::from(value));
        }
    }
    Value::Mapping(layer)
}

/// Load, merge and validate configuration using an explicit env lookup.
pub fn load_config_with_env<F>(
    project_root: &Path,
    explicit: Option<&Path>,
    env_fn: F,
) -> Result<LauncherConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let paths = ConfigPaths::discover(project_root, explicit);

    let mut layers = Vec::new();
    for path in paths.all() {
        tracing::debug!("Loading config layer {}", path.display());
        layers.push(load_config_value(path)?);
    }
    layers.push(env_override_layer(env_fn));

    let merged = merge_layers(&layers);
    let origin = paths
        .all()
        .last()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| project_root.join(PROJECT_CONFIG));
    let config: LauncherConfig =
        serde_yaml::from_value(merged).map_err(|e| LauncherError::ConfigParseError {
            path: origin,
            message: e.to_string(),
        })?;

    validate(&config)?;
    Ok(config)
}

/// Load, merge and validate configuration for `project_root`.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<LauncherConfig> {
    load_config_with_env(project_root, explicit, |key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn no_files_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config_with_env(temp.path(), None, no_env).unwrap();
        assert_eq!(config, LauncherConfig::default());
    }

    #[test]
    fn project_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), "venv_dir: .venv\n").unwrap();

        let config = load_config_with_env(temp.path(), None, no_env).unwrap();
        assert_eq!(config.venv_dir, ".venv");
        assert_eq!(config.manifest, "requirements.txt");
    }

    #[test]
    fn local_file_overrides_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG),
            "interpreter: python3.11\nentry_point: main.py\n",
        )
        .unwrap();
        fs::write(temp.path().join(LOCAL_CONFIG), "interpreter: python3.12\n").unwrap();

        let config = load_config_with_env(temp.path(), None, no_env).unwrap();
        assert_eq!(config.interpreter, "python3.12");
        assert_eq!(config.entry_point, "main.py");
    }

    #[test]
    fn explicit_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let err =
            load_config_with_env(temp.path(), Some(Path::new("missing.yml")), no_env).unwrap_err();
        assert!(matches!(err, LauncherError::ConfigNotFound { .. }));
    }

    #[test]
    fn explicit_file_is_relative_to_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("alt.yml"), "marker_package: telebot\n").unwrap();

        let config =
            load_config_with_env(temp.path(), Some(Path::new("alt.yml")), no_env).unwrap();
        assert_eq!(config.marker_package, "telebot");
    }

    #[test]
    fn env_overrides_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), "venv_dir: .venv\n").unwrap();

        let env = |key: &str| match key {
            "RENTBOT_VENV_DIR" => Some("env".to_string()),
            "RENTBOT_PANEL_URL" => Some(String::new()),
            _ => None,
        };
        let config = load_config_with_env(temp.path(), None, env).unwrap();
        assert_eq!(config.venv_dir, "env");
        assert_eq!(config.panel_url, "http://localhost:5000");
    }

    #[test]
    fn empty_file_is_accepted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), "").unwrap();
        assert!(load_config_with_env(temp.path(), None, no_env).is_ok());
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), "venv_dir: [unclosed\n").unwrap();

        let err = load_config_with_env(temp.path(), None, no_env).unwrap_err();
        assert!(matches!(err, LauncherError::ConfigParseError { .. }));
    }

    #[test]
    fn unreadable_file_is_configuration_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), [0xff, 0xfe, 0x00, 0x9f]).unwrap();

        let err = load_config_with_env(temp.path(), None, no_env).unwrap_err();
        assert!(matches!(err, LauncherError::ConfigParseError { .. }));
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
        assert!(err.to_string().contains(PROJECT_CONFIG));
    }

    #[test]
    fn non_mapping_is_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), "- a\n- b\n").unwrap();

        let err = load_config_with_env(temp.path(), None, no_env).unwrap_err();
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn unknown_field_is_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), "venv: .venv\n").unwrap();

        let err = load_config_with_env(temp.path(), None, no_env).unwrap_err();
        assert!(matches!(err, LauncherError::ConfigParseError { .. }));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), "entry_point: ''\n").unwrap();

        let err = load_config_with_env(temp.path(), None, no_env).unwrap_err();
        assert!(matches!(err, LauncherError::ConfigValidationError { .. }));
    }

    #[test]
    fn discover_lists_paths_in_merge_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), "").unwrap();
        fs::write(temp.path().join(LOCAL_CONFIG), "").unwrap();

        let paths = ConfigPaths::discover(temp.path(), None);
        let all = paths.all();
        assert_eq!(all.len(), 2);
        assert!(all[0].ends_with(PROJECT_CONFIG));
        assert!(all[1].ends_with(LOCAL_CONFIG));
    }
}
