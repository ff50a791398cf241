//! Tooling: the command-line surface over the library.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands, ConfigCommands};
