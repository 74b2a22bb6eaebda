//! Scratch launcher trees for command tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::context::CommandContext;
use crate::profiles::LocalProfiles;

/// A temp directory holding a Steam root, a config file and a data dir.
pub struct Sandbox {
    _temp: TempDir,
    pub steam_root: PathBuf,
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        let steam_root = root.join("Steam");
        let data_dir = root.join("data");
        let config_path = root.join("config.yml");

        fs::create_dir_all(steam_root.join("steamapps")).unwrap();
        fs::write(
            steam_root.join("steamapps").join("libraryfolders.vdf"),
            "\"libraryfolders\"\n{\n}\n",
        )
        .unwrap();
        fs::write(
            &config_path,
            format!(
                "detect_launchers: false\nsteam:\n  - root: {}\n    launch: [\"true\"]\n",
                steam_root.display()
            ),
        )
        .unwrap();

        Self {
            _temp: temp,
            steam_root,
            data_dir,
            config_path,
        }
    }

    /// Write a Windows client install and its manifest. Returns the install path.
    pub fn add_steam_install(
        &self,
        manifest: &str,
        install_dir: &str,
        beta_key: Option<&str>,
        changelist: u64,
    ) -> PathBuf {
        let steamapps = self.steam_root.join("steamapps");
        let install = steamapps.join("common").join(install_dir);
        let binaries = install.join("Engine").join("Binaries").join("Win64");
        fs::create_dir_all(&binaries).unwrap();
        fs::write(install.join("FactoryGame.exe"), "").unwrap();
        fs::write(
            binaries.join("FactoryGame-Win64-Shipping.version"),
            format!("{{\"Changelist\": {}}}", changelist),
        )
        .unwrap();

        let user_config = beta_key
            .map(|key| format!("\t\"UserConfig\"\n\t{{\n\t\t\"BetaKey\"\t\t\"{}\"\n\t}}\n", key))
            .unwrap_or_default();
        fs::write(
            steamapps.join(manifest),
            format!(
                "\"AppState\"\n{{\n\t\"appid\"\t\t\"526870\"\n\t\"installdir\"\t\t\"{}\"\n{}}}\n",
                install_dir, user_config
            ),
        )
        .unwrap();

        install
    }

    /// Write `profiles.json` with the given `(profile, [(mod, version)])` entries.
    pub fn write_profiles(&self, profiles: &[(&str, &[(&str, &str)])]) {
        let mut document = serde_json::Map::new();
        for (name, mods) in profiles {
            let mods: serde_json::Map<String, serde_json::Value> = mods
                .iter()
                .map(|(m, v)| (m.to_string(), serde_json::json!({ "version": v })))
                .collect();
            document.insert(name.to_string(), serde_json::json!({ "mods": mods }));
        }
        fs::create_dir_all(&self.data_dir).unwrap();
        fs::write(
            self.data_dir.join(LocalProfiles::FILE_NAME),
            serde_json::to_string_pretty(&serde_json::json!({ "profiles": document })).unwrap(),
        )
        .unwrap();
    }

    /// Write a lock file inside `install` locking `(mod, version)` pairs.
    pub fn write_lock_file(&self, install: &Path, mods: &[(&str, &str)]) {
        let path = LocalProfiles::lock_file_path(install);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let locked: serde_json::Map<String, serde_json::Value> = mods
            .iter()
            .map(|(m, v)| {
                (
                    m.to_string(),
                    serde_json::json!({ "version": v, "dependencies": {} }),
                )
            })
            .collect();
        fs::write(
            path,
            serde_json::to_string(&serde_json::json!({ "mods": locked })).unwrap(),
        )
        .unwrap();
    }

    pub fn settings(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.data_dir.join("settings.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    pub fn context(&self) -> CommandContext {
        CommandContext::new(Some(self.config_path.clone()), Some(self.data_dir.clone()))
    }
}
