//! Launch command implementation.

use crate::error::Result;
use crate::shell::display_argv;
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};
use super::display::install_summary;

/// The launch command implementation.
pub struct LaunchCommand {
    context: CommandContext,
}

impl LaunchCommand {
    /// Create a new launch command.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for LaunchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = self.context.scanned_registry(ui)?;

        let Some(info) = registry.selected() else {
            ui.error("No installation selected. Run 'pioneer select' first.");
            return Ok(CommandResult::failure(1));
        };

        ui.message(&format!("Launching {}", install_summary(info)));
        if ui.output_mode().shows_details() {
            ui.message(&format!(
                "  {}",
                display_argv(&info.installation.launch_path)
            ));
        }

        // Launch failures are logged by the registry, not surfaced.
        registry.launch_game();
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::Sandbox;
    use crate::ui::{MockUI, OutputMode};

    #[test]
    fn launches_selected_install() {
        let sandbox = Sandbox::new();
        sandbox.add_steam_install("appmanifest_526870.acf", "Satisfactory", None, 1);

        let cmd = LaunchCommand::new(sandbox.context());
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Launching Steam"));
        assert!(ui.has_message("true steam://rungameid/526870"));
    }

    #[test]
    fn nothing_selected_fails() {
        let sandbox = Sandbox::new();

        let cmd = LaunchCommand::new(sandbox.context());
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("No installation selected"));
    }
}
