//! Mods command implementation.
//!
//! `pioneer mods on|off` toggles mod loading for the selected installation.

use crate::cli::args::ModsArgs;
use crate::error::{PioneerError, Result};
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};
use super::display::mods_label;

/// The mods command implementation.
pub struct ModsCommand {
    context: CommandContext,
    args: ModsArgs,
}

impl ModsCommand {
    /// Create a new mods command.
    pub fn new(context: CommandContext, args: ModsArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ModsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut registry = self.context.scanned_registry(ui)?;
        let enabled = self.args.state.enabled();

        match registry.set_mods_enabled(enabled) {
            Ok(()) => {
                ui.success(&format!("Mods {}", mods_label(enabled)));
                Ok(CommandResult::success())
            }
            Err(PioneerError::NoInstallSelected) => {
                ui.error("No installation selected. Run 'pioneer select' first.");
                Ok(CommandResult::failure(1))
            }
            Err(e @ PioneerError::ValidationFailed { .. }) => {
                ui.error(&format!("Mods {}, but {}", mods_label(enabled), e));
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::ModsState;
    use crate::cli::commands::test_support::Sandbox;
    use crate::ui::MockUI;

    #[test]
    fn turning_mods_off_persists() {
        let sandbox = Sandbox::new();
        let install = sandbox.add_steam_install("appmanifest_526870.acf", "Satisfactory", None, 1);

        let cmd = ModsCommand::new(
            sandbox.context(),
            ModsArgs {
                state: ModsState::Off,
            },
        );
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_success("Mods off"));
        let key = install.display().to_string();
        assert_eq!(sandbox.settings()["modsEnabled"][key.as_str()], false);
    }

    #[test]
    fn vanilla_skips_validation() {
        let sandbox = Sandbox::new();
        sandbox.add_steam_install("appmanifest_526870.acf", "Satisfactory", None, 1);
        sandbox.write_profiles(&[("Default", &[("SML", "^3.6.0")])]);

        let cmd = ModsCommand::new(
            sandbox.context(),
            ModsArgs {
                state: ModsState::Off,
            },
        );
        let mut ui = MockUI::new();
        assert!(cmd.execute(&mut ui).unwrap().success);
    }

    #[test]
    fn enabling_reports_validation_failure_but_saves() {
        let sandbox = Sandbox::new();
        let install = sandbox.add_steam_install("appmanifest_526870.acf", "Satisfactory", None, 1);
        sandbox.write_profiles(&[("Default", &[("SML", "^3.6.0")])]);
        sandbox.write_lock_file(&install, &[("FicsitRemoteMonitoring", "1.0.0")]);

        let cmd = ModsCommand::new(
            sandbox.context(),
            ModsArgs {
                state: ModsState::On,
            },
        );
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("SML"));
        let key = install.display().to_string();
        assert_eq!(sandbox.settings()["modsEnabled"][key.as_str()], true);
    }

    #[test]
    fn no_installations_means_nothing_selected() {
        let sandbox = Sandbox::new();

        let cmd = ModsCommand::new(
            sandbox.context(),
            ModsArgs {
                state: ModsState::On,
            },
        );
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("No installation selected"));
    }
}
