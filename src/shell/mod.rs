//! Child process execution and platform detection.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{
    find_on_path, CommandResult, CommandSpec, ProcessRunner, StdioMode, SystemRunner,
};
pub use mock::{MockResponse, MockRunner};
pub use platform::{default_interpreter, is_ci, is_ci_with, stdin_is_terminal};
