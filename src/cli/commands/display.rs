//! Shared display helpers for installation formatting.
//!
//! Used by `list`, `select` and the prompt that picks an installation.

use crate::installs::InstallationInfo;
use crate::shell::display_argv;
use crate::ui::{PioneerTheme, Prompt, PromptOption, UserInterface};

/// Prompt key for choosing an installation.
pub const INSTALL_PROMPT_KEY: &str = "install";

/// One-line summary: launcher, branch, type and build.
pub fn install_summary(info: &InstallationInfo) -> String {
    let installation = &info.installation;
    format!(
        "{} · {} · {} · build {}",
        installation.launcher, installation.branch, installation.install_type, installation.version
    )
}

/// "on" or "off".
pub fn mods_label(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Print one installation as a block of lines.
pub fn show_installation(
    ui: &mut dyn UserInterface,
    theme: &PioneerTheme,
    info: &InstallationInfo,
    selected: bool,
) {
    let marker = if selected { "▸" } else { " " };
    ui.message(&format!(
        "{} {}",
        theme.info.apply_to(marker),
        theme.highlight.apply_to(install_summary(info))
    ));
    ui.message(&format!("    {}", theme.dim.apply_to(info.path().display())));
    ui.message(&format!(
        "    {} {}  {} {}",
        theme.key.apply_to("profile:"),
        info.profile(),
        theme.key.apply_to("mods:"),
        mods_label(info.mods_enabled())
    ));

    if ui.output_mode().shows_details() {
        ui.message(&format!(
            "    {} {}",
            theme.key.apply_to("launch:"),
            theme.dim.apply_to(display_argv(&info.installation.launch_path))
        ));
    }
}

/// Prompt listing every installation, defaulting to the current selection.
pub fn install_prompt(
    installations: &[InstallationInfo],
    current: Option<&InstallationInfo>,
) -> Prompt {
    Prompt {
        key: INSTALL_PROMPT_KEY.to_string(),
        question: "Select an installation".to_string(),
        options: installations
            .iter()
            .map(|info| PromptOption {
                label: format!("{} ({})", install_summary(info), info.path().display()),
                value: info.path().display().to_string(),
            })
            .collect(),
        default: current.map(|info| info.path().display().to_string()),
    }
}
