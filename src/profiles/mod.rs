//! Mod profiles.
//!
//! A profile is a named set of mods. Each installation is assigned one
//! profile and can be switched to vanilla, which ignores the profile
//! entirely. The registry only talks to profiles through [`ProfileManager`];
//! [`LocalProfiles`] is the JSON-file implementation the CLI uses.

pub mod local;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use local::LocalProfiles;

/// Name of the profile new installations prefer.
pub const DEFAULT_PROFILE: &str = "Default";

/// A mod requested by a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMod {
    /// Version requirement, e.g. `>=3.6.0`.
    pub version: String,
}

/// A named mod set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip)]
    pub name: String,

    #[serde(default)]
    pub mods: BTreeMap<String, ProfileMod>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mods: BTreeMap::new(),
        }
    }

    pub fn with_mod(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.mods.insert(
            name.into(),
            ProfileMod {
                version: version.into(),
            },
        );
        self
    }
}

/// A resolved mod in an installation's lockfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedMod {
    pub version: String,

    /// Dependency name to version requirement.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

/// The mods resolved for an installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFile {
    #[serde(default)]
    pub mods: BTreeMap<String, LockedMod>,
}

/// Per-installation state owned by the profile manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallHandle {
    pub path: PathBuf,
    pub profile: String,
    /// Mods disabled for this installation.
    pub vanilla: bool,
}

impl InstallHandle {
    pub fn new(path: impl Into<PathBuf>, profile: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            profile: profile.into(),
            vanilla: false,
        }
    }
}

/// Profile storage and mod validation.
pub trait ProfileManager {
    fn profile(&self, name: &str) -> Option<Profile>;

    /// Every profile name, in enumeration order.
    fn profile_names(&self) -> Vec<String>;

    /// The handle for an installation this manager already knows.
    fn installation(&self, path: &Path) -> Option<InstallHandle>;

    /// Start tracking an installation with `profile` assigned.
    fn add_installation(&mut self, path: &Path, profile: &str) -> Result<InstallHandle>;

    /// Assign a different profile.
    fn set_profile(&mut self, handle: &mut InstallHandle, name: &str) -> Result<()>;

    /// Turn mods off (`true`) or back on for an installation.
    fn set_vanilla(&mut self, handle: &mut InstallHandle, vanilla: bool) -> Result<()>;

    /// The installation's lockfile, if it has one.
    fn lock_file(&self, handle: &InstallHandle) -> Result<Option<LockFile>>;

    /// Check the installation's mod set is usable.
    fn validate(&self, handle: &InstallHandle) -> Result<()>;
}

/// Profile a newly seen installation should start with.
///
/// Prefers [`DEFAULT_PROFILE`], then the first profile the manager lists.
pub fn fallback_profile<P: ProfileManager + ?Sized>(profiles: &P) -> Option<String> {
    let names = profiles.profile_names();
    if names.iter().any(|name| name == DEFAULT_PROFILE) {
        return Some(DEFAULT_PROFILE.to_string());
    }
    names.into_iter().next()
}
