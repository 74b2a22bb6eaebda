//! Process execution.

pub mod command;

pub use command::{display_argv, execute_argv, CommandResult};
