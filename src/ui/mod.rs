//! Console user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI, pipes and `--no-pause`
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use rentbot_launcher::ui::{create_ui, OutputMode};
//!
//! // Non-interactive UIs never block on acknowledgment
//! let mut ui = create_ui(false, OutputMode::Quiet, false);
//! ui.show_header("PlayStation Rental Bot");
//! ui.success("Python 3.12.1");
//! ui.wait_for_ack("Press any key to exit...");
//! ```

pub mod icons;
pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use icons::StatusKind;
pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, LauncherTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a skipped-step message.
    fn skipped(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every output mode.
    fn error(&mut self, msg: &str);

    /// Display a follow-up hint below an error or warning.
    fn show_hint(&mut self, hint: &str);

    /// Show a header/banner title.
    fn show_header(&mut self, title: &str);

    /// Show an aligned `key: value` line.
    fn key_value(&mut self, key: &str, value: &str);

    /// Start a spinner for a quiet operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Wait for the operator to press a key.
    ///
    /// Returns immediately when nobody could press one.
    fn wait_for_ack(&mut self, prompt: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Stop and remove the spinner line.
    fn finish_and_clear(&mut self);
}
