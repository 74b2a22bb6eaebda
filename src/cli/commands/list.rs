//! List command implementation.
//!
//! The `pioneer list` command shows every discovered installation.

use serde::Serialize;
use std::path::Path;

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::game::Installation;
use crate::ui::{PioneerTheme, UserInterface};

use super::context::{CliRegistry, CommandContext};
use super::dispatcher::{Command, CommandResult};
use super::display::show_installation;

/// The list command implementation.
pub struct ListCommand {
    context: CommandContext,
    args: ListArgs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InstallationEntry<'a> {
    #[serde(flatten)]
    installation: &'a Installation,
    profile: &'a str,
    mods_enabled: bool,
    selected: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOutput<'a> {
    installations: Vec<InstallationEntry<'a>>,
    selected: Option<&'a Path>,
    invalid_installs: Vec<&'a Path>,
    errors: Vec<String>,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(context: CommandContext, args: ListArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }

    fn render_json(&self, registry: &CliRegistry, ui: &mut dyn UserInterface) -> Result<()> {
        let selected = registry.selected().map(|info| info.path());
        let output = ListOutput {
            installations: registry
                .installations()
                .iter()
                .map(|info| InstallationEntry {
                    installation: &info.installation,
                    profile: info.profile(),
                    mods_enabled: info.mods_enabled(),
                    selected: selected == Some(info.path()),
                })
                .collect(),
            selected,
            invalid_installs: registry.invalid_installs(),
            errors: registry
                .find_errors()
                .iter()
                .map(ToString::to_string)
                .collect(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(anyhow::Error::from)?;
        ui.message(&json);
        Ok(())
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = self.context.scanned_registry(ui)?;

        if self.args.json {
            self.render_json(&registry, ui)?;
            return Ok(CommandResult::success());
        }

        let theme = PioneerTheme::detect();

        if registry.installations().is_empty() {
            ui.message("No installations found.");
        } else {
            ui.show_header("Installations");
            let selected = registry.selected().map(|info| info.path().to_path_buf());
            for info in registry.installations() {
                let is_selected = selected.as_deref() == Some(info.path());
                show_installation(ui, &theme, info, is_selected);
            }
        }

        let invalid = registry.invalid_installs();
        if !invalid.is_empty() {
            ui.show_header("Invalid installations");
            for path in invalid {
                ui.message(&format!("  {}", theme.dim.apply_to(path.display())));
            }
        }

        for error in registry
            .find_errors()
            .iter()
            .filter(|error| error.invalid_install().is_none())
        {
            ui.warning(&error.to_string());
        }

        Ok(CommandResult::success())
    }
}
