//! Installation registry.

use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::events::{
    NoopEvents, Progress, RegistryEvents, StateView, SELECT_INSTALL_ITEM, SET_PROFILE_ITEM,
    TOGGLE_MODS_ITEM,
};
use super::InstallationInfo;
use crate::error::{PioneerError, Result};
use crate::game::Installation;
use crate::launchers::{find_installations, paths_equal, DiscoveryError, LauncherProbe};
use crate::profiles::{fallback_profile, ProfileManager, DEFAULT_PROFILE};
use crate::shell::{display_argv, execute_argv};
use crate::state::{Settings, SettingsStore};

/// Discovered installations and the user's choices about them.
///
/// Mutating operations take `&mut self`; share a registry across threads
/// behind a `Mutex`.
pub struct InstallationRegistry<P: ProfileManager, E: RegistryEvents = NoopEvents> {
    probes: Vec<Box<dyn LauncherProbe>>,
    profiles: P,
    settings: SettingsStore,
    events: E,
    installations: Vec<InstallationInfo>,
    find_errors: Vec<DiscoveryError>,
    selected: Option<usize>,
    progress: Option<Progress>,
}

impl<P: ProfileManager, E: RegistryEvents> InstallationRegistry<P, E> {
    /// Create an empty registry. Call [`scan`](Self::scan) to populate it.
    pub fn new(
        probes: Vec<Box<dyn LauncherProbe>>,
        profiles: P,
        settings: SettingsStore,
        events: E,
    ) -> Self {
        Self {
            probes,
            profiles,
            settings,
            events,
            installations: Vec::new(),
            find_errors: Vec::new(),
            selected: None,
            progress: None,
        }
    }

    /// Run every probe and rebuild the installation list.
    ///
    /// Duplicate paths keep their first occurrence. The list is ordered by
    /// launcher, then branch. Saved profiles, mods toggles and the saved
    /// selection are applied to whatever reappears.
    ///
    /// # Errors
    ///
    /// Fails when the profile manager cannot take on a new installation.
    /// The previous list and selection are kept in that case.
    pub fn scan(&mut self) -> Result<()> {
        let outcome = find_installations(&self.probes);

        let mut found: Vec<Installation> = Vec::with_capacity(outcome.installations.len());
        for installation in outcome.installations {
            if found
                .iter()
                .any(|known| paths_equal(&known.path, &installation.path))
            {
                debug!(
                    "{}: {} already found, skipping",
                    installation.launcher,
                    installation.path.display()
                );
                continue;
            }
            found.push(installation);
        }
        found.sort_by(|a, b| a.launcher.cmp(&b.launcher).then(a.branch.cmp(&b.branch)));

        let fallback = fallback_profile(&self.profiles);
        let mut installations = Vec::with_capacity(found.len());
        for installation in found {
            let mut handle = match self.profiles.installation(&installation.path) {
                Some(handle) => handle,
                None => {
                    let profile =
                        fallback
                            .as_deref()
                            .ok_or_else(|| PioneerError::ProfileNotFound {
                                name: DEFAULT_PROFILE.to_string(),
                            })?;
                    self.profiles.add_installation(&installation.path, profile)?
                }
            };

            let saved = self.settings.settings();
            let saved_profile = saved.profile_for(&installation.path).map(str::to_string);
            let saved_enabled = saved.mods_enabled_for(&installation.path);

            if let Some(profile) = saved_profile.filter(|p| *p != handle.profile) {
                if let Err(e) = self.profiles.set_profile(&mut handle, &profile) {
                    warn!(
                        "Keeping profile '{}' for {}: saved profile '{}' is unavailable: {}",
                        handle.profile,
                        installation.path.display(),
                        profile,
                        e
                    );
                }
            }
            if let Some(enabled) = saved_enabled.filter(|enabled| *enabled == handle.vanilla) {
                if let Err(e) = self.profiles.set_vanilla(&mut handle, !enabled) {
                    warn!(
                        "Could not restore mods {} for {}: {}",
                        if enabled { "on" } else { "off" },
                        installation.path.display(),
                        e
                    );
                }
            }

            installations.push(InstallationInfo {
                installation,
                handle,
            });
        }

        let mut selected = if installations.is_empty() {
            None
        } else {
            Some(0)
        };
        if let Some(saved) = self.settings.settings().selected_install() {
            if let Some(index) = installations
                .iter()
                .position(|info| paths_equal(info.path(), &saved))
            {
                selected = Some(index);
            }
        }

        debug!(
            "Scan found {} installation(s) and {} problem(s)",
            installations.len(),
            outcome.errors.len()
        );

        self.installations = installations;
        self.find_errors = outcome.errors;
        self.selected = selected;
        self.notify_state();

        Ok(())
    }

    /// Select the installation at `path` and validate its mods.
    ///
    /// Selecting the current selection does nothing.
    ///
    /// # Errors
    ///
    /// `InstallNotFound` if no installation has that path; the selection is
    /// unchanged. `ValidationFailed` if the new selection's mods are not
    /// usable; the selection still moves.
    pub fn select_install(&mut self, path: &Path) -> Result<()> {
        if self
            .selected()
            .is_some_and(|current| paths_equal(current.path(), path))
        {
            return Ok(());
        }

        let index = self
            .installations
            .iter()
            .position(|info| paths_equal(info.path(), path))
            .ok_or_else(|| PioneerError::InstallNotFound {
                path: path.to_path_buf(),
            })?;

        self.selected = Some(index);
        self.notify_state();

        let selected_path = self.installations[index].path().to_path_buf();
        self.settings
            .settings_mut()
            .set_selected_install(&selected_path);
        self.persist_settings();

        self.validate_with_progress(index, SELECT_INSTALL_ITEM, "Validating install")
    }

    /// Turn mods on or off for the selected installation and validate.
    ///
    /// The toggle is saved whether or not validation passes.
    pub fn set_mods_enabled(&mut self, enabled: bool) -> Result<()> {
        let index = self.selected.ok_or(PioneerError::NoInstallSelected)?;

        self.profiles
            .set_vanilla(&mut self.installations[index].handle, !enabled)?;
        self.notify_state();

        let message = if enabled {
            "Enabling mods"
        } else {
            "Disabling mods"
        };
        let result = self.validate_with_progress(index, TOGGLE_MODS_ITEM, message);

        let path = self.installations[index].path().to_path_buf();
        self.settings
            .settings_mut()
            .set_mods_enabled_for(&path, enabled);
        self.persist_settings();

        result
    }

    /// Assign profile `name` to the selected installation and validate.
    pub fn set_profile(&mut self, name: &str) -> Result<()> {
        let index = self.selected.ok_or(PioneerError::NoInstallSelected)?;
        if self.profiles.profile(name).is_none() {
            return Err(PioneerError::ProfileNotFound {
                name: name.to_string(),
            });
        }

        self.profiles
            .set_profile(&mut self.installations[index].handle, name)?;
        self.notify_state();

        let path = self.installations[index].path().to_path_buf();
        self.settings.settings_mut().set_profile_for(&path, name);
        self.persist_settings();

        self.validate_with_progress(index, SET_PROFILE_ITEM, "Switching profile")
    }

    /// Start the selected installation through its launcher.
    ///
    /// Failures are logged. Does nothing when nothing is selected.
    pub fn launch_game(&self) {
        let Some(info) = self.selected() else {
            error!("Cannot launch: no installation selected");
            return;
        };

        let launch_path = &info.installation.launch_path;
        info!("Launching {}", display_argv(launch_path));
        match execute_argv(launch_path) {
            Ok(result) if result.success => {
                debug!("Launch output: {}", result.combined_output().trim());
            }
            Ok(result) => {
                error!(
                    "Launch command exited with code {:?}: {}",
                    result.exit_code,
                    result.combined_output().trim()
                );
            }
            Err(e) => error!("Failed to launch game: {}", e),
        }
    }

    /// Paths of recognized installations that could not be classified.
    pub fn invalid_installs(&self) -> Vec<&Path> {
        self.find_errors
            .iter()
            .filter_map(DiscoveryError::invalid_install)
            .collect()
    }

    pub fn installations(&self) -> &[InstallationInfo] {
        &self.installations
    }

    pub fn installation(&self, path: &Path) -> Option<&InstallationInfo> {
        self.installations
            .iter()
            .find(|info| paths_equal(info.path(), path))
    }

    pub fn selected(&self) -> Option<&InstallationInfo> {
        self.selected.and_then(|index| self.installations.get(index))
    }

    /// Whether mods are enabled on the selected installation.
    pub fn mods_enabled(&self) -> Option<bool> {
        self.selected().map(InstallationInfo::mods_enabled)
    }

    /// Every problem recorded by the last scan.
    pub fn find_errors(&self) -> &[DiscoveryError] {
        &self.find_errors
    }

    pub fn progress(&self) -> Option<&Progress> {
        self.progress.as_ref()
    }

    pub fn profiles(&self) -> &P {
        &self.profiles
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn settings(&self) -> &Settings {
        self.settings.settings()
    }

    /// Path the settings are written to.
    pub fn settings_path(&self) -> PathBuf {
        self.settings.path().to_path_buf()
    }

    fn validate_with_progress(&mut self, index: usize, item: &str, message: &str) -> Result<()> {
        self.set_progress(Some(Progress::indeterminate(item, message)));
        let result = self.profiles.validate(&self.installations[index].handle);
        self.set_progress(None);

        result.map_err(|source| {
            let path = self.installations[index].path().to_path_buf();
            error!("Failed to validate install {}: {}", path.display(), source);
            PioneerError::ValidationFailed {
                path,
                source: Box::new(source),
            }
        })
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings.save() {
            warn!(
                "Failed to save settings to {}: {}",
                self.settings.path().display(),
                e
            );
        }
    }

    fn set_progress(&mut self, progress: Option<Progress>) {
        self.progress = progress;
        self.events.progress_changed(self.progress.as_ref());
    }

    fn notify_state(&mut self) {
        let selected = self.selected.and_then(|index| self.installations.get(index));
        self.events.state_changed(StateView {
            installations: &self.installations,
            selected,
        });
    }
}
