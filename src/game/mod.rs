//! Game installation model and classification.
//!
//! An [`Installation`] is one classified copy of the game found by a
//! launcher probe. The [`classify`] module decides what kind of install a
//! directory holds and which build it is.
//!
//! # Modules
//!
//! - [`classify`] - Ordered executable/version-file rules and the classifier
//! - [`version`] - The engine's `.version` descriptor format

pub mod classify;
pub mod version;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub use classify::{classify, ClassifyError, InstallRule, INSTALL_RULES};
pub use version::GameVersionFile;

/// What kind of game build a directory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstallType {
    LinuxServer,
    WindowsServer,
    WindowsClient,
}

impl InstallType {
    pub fn as_str(self) -> &'static str {
        match self {
            InstallType::LinuxServer => "linux-server",
            InstallType::WindowsServer => "windows-server",
            InstallType::WindowsClient => "windows-client",
        }
    }
}

impl fmt::Display for InstallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release channel an installation follows.
///
/// Declaration order is the registry's secondary sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Branch {
    EarlyAccess,
    Experimental,
}

impl Branch {
    pub fn as_str(self) -> &'static str {
        match self {
            Branch::EarlyAccess => "Early Access",
            Branch::Experimental => "Experimental",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered, classified copy of the game.
///
/// `path` is canonical and is the identity of the installation everywhere
/// else in the crate (registry lookups, persisted settings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    pub path: PathBuf,
    /// Build changelist from the version descriptor.
    pub version: u64,
    #[serde(rename = "type")]
    pub install_type: InstallType,
    pub branch: Branch,
    /// Identifier of the launcher that owns this copy (e.g. "Steam").
    pub launcher: String,
    /// Command followed by its arguments.
    pub launch_path: Vec<String>,
}
