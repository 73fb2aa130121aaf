//! Non-interactive UI for CI, pipes and `--no-pause`.

use super::theme::LauncherTheme;
use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Output is plain text with no spinners, and acknowledgment never blocks
/// since there is no one to press a key.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: LauncherTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: LauncherTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_important() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn skipped(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_skipped(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_important() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_important() {
            eprintln!("{}", self.theme.format_hint(hint));
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_important() {
            println!("\n{}\n", self.theme.format_header(title));
        }
    }

    fn key_value(&mut self, key: &str, value: &str) {
        if self.mode.shows_important() {
            println!("{}", self.theme.format_key_value(key, value));
        }
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(NoopSpinner)
    }

    fn wait_for_ack(&mut self, _prompt: &str) {
        tracing::debug!("Skipping acknowledgment in non-interactive mode");
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn finish_and_clear(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_never_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn keeps_output_mode() {
        let ui = NonInteractiveUI::new(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
