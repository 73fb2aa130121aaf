//! Launcher configuration.
//!
//! - Schema and defaults in [`schema`]
//! - File discovery, layering and env overrides in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//! - The application's `.env` file in [`env_file`]
//!
//! # Example
//!
//! ```
//! use rentbot_launcher::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("launcher.yml"), "venv_dir: .venv").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.venv_dir, ".venv");
//! assert_eq!(config.entry_point, "run.py");
//! ```

pub mod env_file;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use env_file::{missing_keys, EnvFileParser};
pub use loader::{
    env_override_layer, load_config, load_config_value, load_config_with_env, ConfigPaths,
    ENV_OVERRIDES, LOCAL_CONFIG, PROJECT_CONFIG,
};
pub use merger::{deep_merge, merge_layers};
pub use schema::{Credentials, LauncherConfig};
pub use validator::{validate, validate_config, ValidationError};
