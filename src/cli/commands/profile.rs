//! Profile command implementation.
//!
//! `pioneer profile <NAME>` assigns a mod profile to the selected installation.

use crate::cli::args::ProfileArgs;
use crate::error::{PioneerError, Result};
use crate::profiles::ProfileManager;
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// The profile command implementation.
pub struct ProfileCommand {
    context: CommandContext,
    args: ProfileArgs,
}

impl ProfileCommand {
    /// Create a new profile command.
    pub fn new(context: CommandContext, args: ProfileArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ProfileCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut registry = self.context.scanned_registry(ui)?;

        match registry.set_profile(&self.args.name) {
            Ok(()) => {
                ui.success(&format!("Profile set to {}", self.args.name));
                Ok(CommandResult::success())
            }
            Err(PioneerError::NoInstallSelected) => {
                ui.error("No installation selected. Run 'pioneer select' first.");
                Ok(CommandResult::failure(1))
            }
            Err(e @ PioneerError::ProfileNotFound { .. }) => {
                ui.error(&e.to_string());
                ui.message(&format!(
                    "Available profiles: {}",
                    registry.profiles().profile_names().join(", ")
                ));
                Ok(CommandResult::failure(1))
            }
            Err(e @ PioneerError::ValidationFailed { .. }) => {
                ui.error(&format!("Profile set to {}, but {}", self.args.name, e));
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}
