//! Configuration schema.
//!
//! Every field has a default matching the stock PlayStation Rental Bot
//! checkout, so an empty or absent `launcher.yml` is a valid configuration.
//!
//! # Example
//!
//! ```yaml
//! interpreter: python3.12
//! venv_dir: .venv
//! marker_package: pyTelegramBotAPI
//! panel_url: http://localhost:8080
//! ```

use serde::{Deserialize, Serialize};

use crate::shell::default_interpreter;

/// Resolved launcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Display name used in headers.
    pub app_name: String,

    /// Interpreter used to bootstrap the environment (name on PATH or path).
    pub interpreter: String,

    /// Virtual environment directory, relative to the project root.
    pub venv_dir: String,

    /// Dependency manifest passed to `pip install -r`.
    pub manifest: String,

    /// Package whose presence means dependencies are installed.
    pub marker_package: String,

    /// Application entry point script.
    pub entry_point: String,

    /// URL the web panel is expected to bind.
    pub panel_url: String,

    /// Login shown to the operator. Never validated here.
    pub credentials: Credentials,

    /// Closing line of the launch banner.
    pub bot_hint: String,

    /// Variables the application expects from `.env` or the environment.
    pub required_env: Vec<String>,
}

/// Web panel login displayed in the launch banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            app_name: "PlayStation Rental Bot".to_string(),
            interpreter: default_interpreter().to_string(),
            venv_dir: "venv".to_string(),
            manifest: "requirements.txt".to_string(),
            marker_package: "Flask".to_string(),
            entry_point: "run.py".to_string(),
            panel_url: "http://localhost:5000".to_string(),
            credentials: Credentials::default(),
            bot_hint: "Find your bot in Telegram and send /start".to_string(),
            required_env: vec![
                "TELEGRAM_BOT_TOKEN".to_string(),
                "ADMIN_TELEGRAM_ID".to_string(),
                "SECRET_KEY".to_string(),
            ],
        }
    }
}
