//! Select command implementation.
//!
//! `pioneer select [PATH]` picks the installation later commands act on.
//! Without a path, the user chooses from the discovered installations.

use std::path::PathBuf;

use crate::cli::args::SelectArgs;
use crate::error::{PioneerError, Result};
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};
use super::display::{install_prompt, install_summary};

/// The select command implementation.
pub struct SelectCommand {
    context: CommandContext,
    args: SelectArgs,
}

impl SelectCommand {
    /// Create a new select command.
    pub fn new(context: CommandContext, args: SelectArgs) -> Self {
        Self { context, args }
    }
}

impl Command for SelectCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut registry = self.context.scanned_registry(ui)?;

        if registry.installations().is_empty() {
            ui.error("No installations found.");
            return Ok(CommandResult::failure(1));
        }

        let path = match &self.args.path {
            // Registry paths are canonical; unresolvable paths cannot match anyway.
            Some(path) => path.canonicalize().unwrap_or_else(|_| path.clone()),
            None => {
                let prompt = install_prompt(registry.installations(), registry.selected());
                PathBuf::from(ui.prompt(&prompt)?)
            }
        };

        match registry.select_install(&path) {
            Ok(()) => {
                if let Some(info) = registry.selected() {
                    ui.success(&format!("Selected {}", install_summary(info)));
                }
                Ok(CommandResult::success())
            }
            Err(PioneerError::InstallNotFound { path }) => {
                ui.error(&format!("No installation found at {}", path.display()));
                Ok(CommandResult::failure(1))
            }
            Err(e @ PioneerError::ValidationFailed { .. }) => {
                ui.error(&e.to_string());
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}
