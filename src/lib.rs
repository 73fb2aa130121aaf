//! rentbot-launcher - bootstrap launcher for the PlayStation Rental Bot.
//!
//! Checks for a Python interpreter, creates and activates the project's
//! virtual environment, installs dependencies when a marker package is
//! missing, then starts the application and waits for acknowledgment
//! after it exits.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layered YAML configuration and the application's `.env`
//! - [`environment`] - Interpreter, virtual environment and packages
//! - [`error`] - Error types and result aliases
//! - [`launcher`] - The bootstrap sequence and read-only status checks
//! - [`shell`] - Child process execution
//! - [`ui`] - Status lines, spinners and the acknowledgment wait
//!
//! # Example
//!
//! ```
//! use rentbot_launcher::environment::{normalize_name, parse_version};
//!
//! assert_eq!(normalize_name("Flask_SQLAlchemy"), "flask-sqlalchemy");
//! assert_eq!(parse_version("Python 3.12.1").as_deref(), Some("3.12.1"));
//! ```
//!
//! For end-to-end runs against a fake interpreter, see the integration tests.

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod launcher;
pub mod shell;
pub mod ui;

pub use error::{LauncherError, Result};
