//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Status lines plus debug-level detail such as full command lines.
    Verbose,
    /// Status lines.
    #[default]
    Normal,
    /// Only warnings, errors and the launch banner.
    Quiet,
    /// Errors only.
    Silent,
}

impl OutputMode {
    /// Check if this mode shows command lines before running them.
    pub fn shows_commands(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows routine status messages.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows warnings and the launch banner.
    pub fn shows_important(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
