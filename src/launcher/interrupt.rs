//! Ctrl+C handling while the application runs.
//!
//! The terminal delivers Ctrl+C to the whole foreground process group, so
//! the application and the launcher both receive it. The launcher swallows
//! it so it can report the shutdown and wait for acknowledgment after the
//! application exits.

use std::sync::Once;

static INSTALL: Once = Once::new();

/// Install the handler once per process. Failure is logged, not fatal.
pub fn install_interrupt_guard() {
    INSTALL.call_once(|| {
        let result = ctrlc::set_handler(|| {
            tracing::debug!("Interrupt received; waiting for the application to exit");
        });
        if let Err(e) = result {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
        }
    });
}
