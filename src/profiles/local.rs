//! Profiles stored in `profiles.json`.
//!
//! ```json
//! {
//!   "profiles": {
//!     "Default": { "mods": {} },
//!     "Speedrun": { "mods": { "SML": { "version": "^3.6.0" } } }
//!   }
//! }
//! ```
//!
//! Each installation's resolved mods are read from
//! `<install>/FactoryGame/Mods/.smm/lock.json`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{InstallHandle, LockFile, Profile, ProfileManager, DEFAULT_PROFILE};
use crate::error::{PioneerError, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfilesFile {
    #[serde(default)]
    profiles: BTreeMap<String, Profile>,
}

/// JSON-backed profile manager.
#[derive(Debug, Clone)]
pub struct LocalProfiles {
    profiles: BTreeMap<String, Profile>,
    installations: HashMap<PathBuf, InstallHandle>,
}

impl LocalProfiles {
    /// Profiles file name inside the data directory.
    pub const FILE_NAME: &'static str = "profiles.json";

    /// Load `profiles.json` from `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self> {
        Self::load(&data_dir.join(Self::FILE_NAME))
    }

    /// Load profiles from `path`. A missing file yields one empty
    /// `Default` profile.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no profiles at {}, using {}", path.display(), DEFAULT_PROFILE);
            return Ok(Self::from_profiles(vec![Profile::new(DEFAULT_PROFILE)]));
        }

        let content = fs::read_to_string(path)?;
        let file: ProfilesFile =
            serde_json::from_str(&content).map_err(|e| PioneerError::StateParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self::from_profiles(file.profiles.into_iter().map(
            |(name, profile)| Profile { name, ..profile },
        )))
    }

    pub fn from_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.name.clone(), profile))
                .collect(),
            installations: HashMap::new(),
        }
    }

    /// Lockfile location for an installation.
    pub fn lock_file_path(install: &Path) -> PathBuf {
        install
            .join("FactoryGame")
            .join("Mods")
            .join(".smm")
            .join("lock.json")
    }

    fn require_profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| PioneerError::ProfileNotFound {
                name: name.to_string(),
            })
    }
}

impl ProfileManager for LocalProfiles {
    fn profile(&self, name: &str) -> Option<Profile> {
        self.profiles.get(name).cloned()
    }

    fn profile_names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    fn installation(&self, path: &Path) -> Option<InstallHandle> {
        self.installations.get(path).cloned()
    }

    fn add_installation(&mut self, path: &Path, profile: &str) -> Result<InstallHandle> {
        self.require_profile(profile)?;

        let handle = InstallHandle::new(path, profile);
        self.installations
            .insert(path.to_path_buf(), handle.clone());
        Ok(handle)
    }

    fn set_profile(&mut self, handle: &mut InstallHandle, name: &str) -> Result<()> {
        self.require_profile(name)?;

        handle.profile = name.to_string();
        self.installations
            .insert(handle.path.clone(), handle.clone());
        Ok(())
    }

    fn set_vanilla(&mut self, handle: &mut InstallHandle, vanilla: bool) -> Result<()> {
        handle.vanilla = vanilla;
        self.installations
            .insert(handle.path.clone(), handle.clone());
        Ok(())
    }

    fn lock_file(&self, handle: &InstallHandle) -> Result<Option<LockFile>> {
        let path = Self::lock_file_path(&handle.path);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let lock = serde_json::from_str(&content).map_err(|e| PioneerError::StateParseError {
            path,
            message: e.to_string(),
        })?;
        Ok(Some(lock))
    }

    fn validate(&self, handle: &InstallHandle) -> Result<()> {
        if handle.vanilla {
            return Ok(());
        }

        let profile = self.require_profile(&handle.profile)?;
        if profile.mods.is_empty() {
            return Ok(());
        }

        let lock = self
            .lock_file(handle)?
            .ok_or_else(|| PioneerError::LockfileMissing {
                path: Self::lock_file_path(&handle.path),
            })?;

        for name in profile.mods.keys() {
            if !lock.mods.contains_key(name) {
                return Err(PioneerError::ModNotLocked {
                    name: name.clone(),
                    profile: profile.name.clone(),
                });
            }
        }

        for (name, locked) in &lock.mods {
            for dependency in locked.dependencies.keys() {
                if !lock.mods.contains_key(dependency) {
                    return Err(PioneerError::DependencyNotLocked {
                        name: name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
