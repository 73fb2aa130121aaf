//! Visual theme and styling.

use console::Style;

/// The launcher's visual theme.
#[derive(Debug, Clone)]
pub struct LauncherTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
    /// Style for contextual hints (cyan dim).
    pub hint: Style,
}

impl Default for LauncherTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl LauncherTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            key: Style::new().bold(),
            hint: Style::new().cyan().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            key: Style::new(),
            hint: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a skipped message (icon + text in dim).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a warning message.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a hint line.
    pub fn format_hint(&self, hint: &str) -> String {
        format!("  {}", self.hint.apply_to(format!("→ {}", hint)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("🎮"),
            self.highlight.apply_to(title)
        )
    }

    /// Format an aligned key-value line.
    pub fn format_key_value(&self, key: &str, value: &str) -> String {
        format!(
            "  {} {}",
            self.key.apply_to(format!("{:<10}", format!("{}:", key))),
            value
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let msg = LauncherTheme::plain().format_success("Python 3.12.1");
        assert_eq!(msg, "✓ Python 3.12.1");
    }

    #[test]
    fn theme_formats_skipped() {
        let msg = LauncherTheme::plain().format_skipped("Virtual environment found");
        assert!(msg.starts_with("○"));
    }

    #[test]
    fn theme_formats_error() {
        let msg = LauncherTheme::plain().format_error("Python not found");
        assert_eq!(msg, "✗ Python not found");
    }

    #[test]
    fn theme_formats_warning_and_hint() {
        let theme = LauncherTheme::plain();
        assert!(theme.format_warning("careful").contains("⚠"));
        assert_eq!(theme.format_hint("do this"), "  → do this");
    }

    #[test]
    fn theme_formats_header() {
        let msg = LauncherTheme::plain().format_header("PlayStation Rental Bot");
        assert!(msg.contains("PlayStation Rental Bot"));
    }

    #[test]
    fn key_values_align() {
        let theme = LauncherTheme::plain();
        let a = theme.format_key_value("Panel", "http://localhost:5000");
        let b = theme.format_key_value("Password", "admin123");
        assert_eq!(a.find("http"), b.find("admin123"));
    }
}
