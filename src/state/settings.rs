//! Persisted installation choices.
//!
//! `settings.json` lives in the data directory and may be shared with other
//! tools, so fields this crate does not know about are carried through
//! every rewrite untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PioneerError, Result};

/// The settings record.
///
/// Per-install maps are keyed by the installation's canonical path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_install: Option<String>,

    #[serde(default)]
    pub selected_profile: BTreeMap<String, String>,

    #[serde(default)]
    pub mods_enabled: BTreeMap<String, bool>,

    /// Fields owned by other tools.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl Settings {
    pub fn selected_install(&self) -> Option<PathBuf> {
        self.selected_install.as_ref().map(PathBuf::from)
    }

    pub fn set_selected_install(&mut self, path: &Path) {
        self.selected_install = Some(key(path));
    }

    pub fn profile_for(&self, path: &Path) -> Option<&str> {
        self.selected_profile.get(&key(path)).map(|s| s.as_str())
    }

    pub fn set_profile_for(&mut self, path: &Path, profile: &str) {
        self.selected_profile.insert(key(path), profile.to_string());
    }

    pub fn mods_enabled_for(&self, path: &Path) -> Option<bool> {
        self.mods_enabled.get(&key(path)).copied()
    }

    pub fn set_mods_enabled_for(&mut self, path: &Path, enabled: bool) {
        self.mods_enabled.insert(key(path), enabled);
    }
}

/// Settings bound to their file on disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Settings file name inside the data directory.
    pub const FILE_NAME: &'static str = "settings.json";

    /// A store that starts from defaults and writes to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: Settings::default(),
        }
    }

    /// Load `settings.json` from `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self> {
        Self::load(data_dir.join(Self::FILE_NAME))
    }

    /// Load settings from `path`. A missing file yields defaults.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Ok(Self::new(path));
        }

        let content = fs::read_to_string(&path)?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(|e| PioneerError::StateParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { path, settings })
    }

    /// Save settings to disk using atomic write.
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            PioneerError::ConfigValidationError {
                message: format!("Failed to serialize settings: {}", e),
            }
        })?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_returns_default() {
        let temp = TempDir::new().unwrap();
        let store = SettingsStore::open(temp.path()).unwrap();
        assert_eq!(store.settings(), &Settings::default());
        assert_eq!(store.path(), temp.path().join("settings.json"));
    }

    #[test]
    fn save_and_load() {
        let temp = TempDir::new().unwrap();
        let game = Path::new("/games/Satisfactory");

        let mut store = SettingsStore::open(temp.path()).unwrap();
        store.settings_mut().set_selected_install(game);
        store.settings_mut().set_profile_for(game, "Speedrun");
        store.settings_mut().set_mods_enabled_for(game, false);
        store.save().unwrap();

        let loaded = SettingsStore::open(temp.path()).unwrap();
        let settings = loaded.settings();
        assert_eq!(settings.selected_install(), Some(game.to_path_buf()));
        assert_eq!(settings.profile_for(game), Some("Speedrun"));
        assert_eq!(settings.mods_enabled_for(game), Some(false));
        assert_eq!(settings.mods_enabled_for(Path::new("/other")), None);
    }

    #[test]
    fn uses_camel_case_keys() {
        let mut settings = Settings::default();
        settings.set_selected_install(Path::new("/g"));
        settings.set_mods_enabled_for(Path::new("/g"), true);

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["selectedInstall"], "/g");
        assert_eq!(json["modsEnabled"]["/g"], true);
        assert!(json.get("selectedProfile").is_some());
    }

    #[test]
    fn unknown_fields_survive_rewrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(
            &path,
            r#"{"selectedInstall":"/g","windowSize":{"width":800},"konami":true}"#,
        )
        .unwrap();

        let mut store = SettingsStore::load(&path).unwrap();
        store
            .settings_mut()
            .set_profile_for(Path::new("/g"), "Default");
        store.save().unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["windowSize"]["width"], 800);
        assert_eq!(raw["konami"], true);
        assert_eq!(raw["selectedProfile"]["/g"], "Default");
    }

    #[test]
    fn corrupt_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, "{ nope").unwrap();

        let result = SettingsStore::load(&path);
        assert!(matches!(result, Err(PioneerError::StateParseError { .. })));
    }

    #[test]
    fn save_uses_atomic_write() {
        let temp = TempDir::new().unwrap();
        let store = SettingsStore::open(&temp.path().join("nested")).unwrap();
        store.save().unwrap();

        assert!(temp.path().join("nested/settings.json").exists());
        assert!(!temp.path().join("nested/settings.json.tmp").exists());
    }
}
