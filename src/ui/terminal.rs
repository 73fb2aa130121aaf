//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use super::{
    should_use_colors, LauncherTheme, NonInteractiveUI, OutputMode, ProgressSpinner,
    SpinnerHandle, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: LauncherTheme,
    mode: OutputMode,
    pause: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    ///
    /// When `pause` is false, [`UserInterface::wait_for_ack`] returns
    /// without reading a key.
    pub fn new(mode: OutputMode, pause: bool) -> Self {
        let theme = if should_use_colors() {
            LauncherTheme::new()
        } else {
            LauncherTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
            pause,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_important() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn skipped(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_skipped(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_important() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        let mut err = Term::stderr();
        writeln!(err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_important() {
            writeln!(self.term, "{}", self.theme.format_hint(hint)).ok();
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_important() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn key_value(&mut self, key: &str, value: &str) {
        if self.mode.shows_important() {
            writeln!(self.term, "{}", self.theme.format_key_value(key, value)).ok();
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn wait_for_ack(&mut self, prompt: &str) {
        if !self.pause {
            return;
        }
        writeln!(self.term, "\n{}", self.theme.dim.apply_to(prompt)).ok();
        if let Err(e) = self.term.read_key() {
            tracing::debug!("Could not read key: {}", e);
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI for the current environment.
///
/// `interactive` selects the styled terminal UI when stdout is a terminal;
/// `pause` controls whether [`UserInterface::wait_for_ack`] blocks.
pub fn create_ui(interactive: bool, mode: OutputMode, pause: bool) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode, pause))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_creation() {
        let ui = TerminalUI::new(OutputMode::Normal, false);
        assert_eq!(ui.output_mode(), OutputMode::Normal);
    }

    #[test]
    fn create_ui_non_interactive() {
        let ui = create_ui(false, OutputMode::Normal, true);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn create_ui_respects_mode() {
        let ui = create_ui(false, OutputMode::Silent, false);
        assert_eq!(ui.output_mode(), OutputMode::Silent);
    }
}
