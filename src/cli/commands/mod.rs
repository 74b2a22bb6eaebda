//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Registry-backed commands share a
//! [`CommandContext`] that loads config, opens the data directory and scans.

pub mod completions;
pub mod context;
pub mod dispatcher;
pub mod display;
pub mod launch;
pub mod list;
pub mod mods;
pub mod profile;
pub mod select;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::{CliRegistry, CommandContext, SpinnerEvents};
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
