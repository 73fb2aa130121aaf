//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Running with no subcommand is the
//! same as `rentbot-launcher run`.

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod run;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
