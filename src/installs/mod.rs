//! The installation registry.
//!
//! [`InstallationRegistry`] runs every launcher probe, pairs each
//! installation found with its profile handle, and applies the choices
//! saved in `settings.json`. It then serves selection, mods toggle, profile
//! and launch operations against that list.

pub mod events;
pub mod registry;

use std::path::Path;

use crate::game::Installation;
use crate::profiles::InstallHandle;

pub use events::{
    NoopEvents, Progress, RegistryEvents, StateView, SELECT_INSTALL_ITEM, SET_PROFILE_ITEM,
    TOGGLE_MODS_ITEM,
};
pub use registry::InstallationRegistry;

/// An installation paired with its profile handle. Rebuilt on every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationInfo {
    pub installation: Installation,
    pub handle: InstallHandle,
}

impl InstallationInfo {
    pub fn path(&self) -> &Path {
        &self.installation.path
    }

    pub fn profile(&self) -> &str {
        &self.handle.profile
    }

    pub fn mods_enabled(&self) -> bool {
        !self.handle.vanilla
    }
}
