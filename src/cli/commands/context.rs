//! State shared by every registry-backed command.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{load_config, resolve_data_dir};
use crate::error::Result;
use crate::installs::{InstallationRegistry, Progress, RegistryEvents, StateView};
use crate::launchers::default_probes;
use crate::profiles::LocalProfiles;
use crate::state::SettingsStore;
use crate::ui::{OutputMode, ProgressSpinner, SpinnerHandle, UserInterface};

/// The registry type the CLI works with.
pub type CliRegistry = InstallationRegistry<LocalProfiles, SpinnerEvents>;

/// Global options every command resolves its files from.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Self {
        Self {
            config_path,
            data_dir,
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Build the registry from config and run a scan.
    pub fn scanned_registry(&self, ui: &mut dyn UserInterface) -> Result<CliRegistry> {
        let config = load_config(self.config_path())?;
        let data_dir = resolve_data_dir(self.data_dir(), &config)?;
        debug!("Using data directory {}", data_dir.display());

        let profiles = LocalProfiles::open(&data_dir)?;
        let settings = SettingsStore::open(&data_dir)?;
        let events = SpinnerEvents::new(ui.output_mode(), ui.is_interactive());
        let mut registry =
            InstallationRegistry::new(default_probes(&config), profiles, settings, events);

        let mut spinner = ui.start_spinner("Looking for installations...");
        let scanned = registry.scan();
        spinner.finish_clear();
        scanned?;

        Ok(registry)
    }
}

/// Shows the registry's status slot as a spinner.
pub struct SpinnerEvents {
    show_spinner: bool,
    spinner: Option<ProgressSpinner>,
    history: Vec<String>,
}

impl SpinnerEvents {
    pub fn new(mode: OutputMode, interactive: bool) -> Self {
        Self {
            show_spinner: interactive && mode.shows_spinners(),
            spinner: None,
            history: Vec::new(),
        }
    }

    /// Every status message shown so far.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl RegistryEvents for SpinnerEvents {
    fn state_changed(&mut self, state: StateView<'_>) {
        debug!(
            "{} installation(s), selected: {:?}",
            state.installations.len(),
            state.selected.map(|s| s.path())
        );
    }

    fn progress_changed(&mut self, progress: Option<&Progress>) {
        match progress {
            Some(progress) => {
                debug!("{}: {}", progress.item, progress.message);
                self.history.push(progress.message.clone());
                if !self.show_spinner {
                    return;
                }
                match &mut self.spinner {
                    Some(spinner) => spinner.set_message(&progress.message),
                    None => self.spinner = Some(ProgressSpinner::new(&progress.message)),
                }
            }
            None => {
                if let Some(mut spinner) = self.spinner.take() {
                    spinner.finish_clear();
                }
            }
        }
    }
}
