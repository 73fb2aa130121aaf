//! Status vocabulary for report-style output.

use super::theme::LauncherTheme;

/// Status of one line in a readiness report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Check passed.
    Success,
    /// Check failed; launching would abort or act here.
    Failed,
    /// Check not applicable (an earlier check failed).
    Skipped,
    /// Non-fatal problem.
    Warning,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Skipped => "○",
            Self::Warning => "⚠",
        }
    }

    /// Bracketed text for non-TTY output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Success => "[ok]",
            Self::Failed => "[FAIL]",
            Self::Skipped => "[skip]",
            Self::Warning => "[warn]",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &LauncherTheme) -> String {
        let icon = self.icon();
        match self {
            Self::Success => theme.success.apply_to(icon).to_string(),
            Self::Failed => theme.error.apply_to(icon).to_string(),
            Self::Skipped => theme.dim.apply_to(icon).to_string(),
            Self::Warning => theme.warning.apply_to(icon).to_string(),
        }
    }

    /// Format a status line: styled icon + message.
    pub fn format(self, theme: &LauncherTheme, msg: &str) -> String {
        format!("{} {}", self.styled(theme), msg)
    }

    /// Format a status line for non-TTY: bracketed + message.
    pub fn format_plain(self, msg: &str) -> String {
        format!("{} {}", self.bracketed(), msg)
    }
}
