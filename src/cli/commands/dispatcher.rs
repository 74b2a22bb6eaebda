//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands, ListArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::CommandContext;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher from the global options.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Build a dispatcher from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(CommandContext::new(cli.config.clone(), cli.data_dir.clone()))
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Select(args)) => {
                let cmd = super::select::SelectCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Mods(args)) => {
                let cmd = super::mods::ModsCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Profile(args)) => {
                let cmd = super::profile::ProfileCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Launch) => {
                let cmd = super::launch::LaunchCommand::new(self.context.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to listing installations
                let cmd = super::list::ListCommand::new(self.context.clone(), ListArgs::default());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::Sandbox;
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn from_cli_carries_paths() {
        let cli = Cli::try_parse_from(["pioneer", "--data-dir", "/data", "launch"]).unwrap();
        let dispatcher = CommandDispatcher::from_cli(&cli);
        assert_eq!(
            dispatcher.context().data_dir(),
            Some(std::path::Path::new("/data"))
        );
    }

    #[test]
    fn no_subcommand_lists_installations() {
        let sandbox = Sandbox::new();
        sandbox.add_steam_install("appmanifest_526870.acf", "Satisfactory", None, 365306);

        let cli = Cli::try_parse_from(["pioneer"]).unwrap();
        let dispatcher = CommandDispatcher::new(sandbox.context());
        let mut ui = MockUI::new();
        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Early Access"));
    }
}
