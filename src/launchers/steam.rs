//! Steam library discovery.
//!
//! Steam lists its library folders in `steamapps/libraryfolders.vdf` under
//! the client root. Each library keeps one `appmanifest_<appid>.acf` per
//! installed app in its own `steamapps/` directory, and the app's files in
//! `steamapps/common/<installdir>`.
//!
//! The game has been published under two app ids: the main app and the
//! standalone Experimental app that existed before Experimental became a
//! beta branch of the main one.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::keyvalues::{KeyValues, Value};
use super::{canonical_path, paths_equal, DiscoveryError, FindError, LauncherProbe, ProbeOutcome};
use crate::game::{classify, Branch, Installation};

/// App id used to launch the game through the client.
pub const STEAM_APP_ID: &str = "526870";

/// Manifests that may describe an install of the game.
pub const APP_MANIFESTS: &[&str] = &["appmanifest_526870.acf", "appmanifest_1690800.acf"];

const EXPERIMENTAL_BETA_KEY: &str = "experimental";

/// Probe for one Steam client installation.
#[derive(Debug, Clone)]
pub struct SteamProbe {
    root: PathBuf,
    launcher: String,
    launch_command: Vec<String>,
}

impl SteamProbe {
    /// Create a probe for the Steam client rooted at `root`.
    ///
    /// `launch_command` is the command prefix used to hand a `steam://` URI
    /// to the client, e.g. `["steam"]` or `["cmd", "/C", "start", ""]`.
    pub fn new(
        root: impl Into<PathBuf>,
        launcher: impl Into<String>,
        launch_command: Vec<String>,
    ) -> Self {
        Self {
            root: root.into().components().collect(),
            launcher: launcher.into(),
            launch_command,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the client's library folders descriptor.
    pub fn library_folders_path(&self) -> PathBuf {
        self.root.join("steamapps").join("libraryfolders.vdf")
    }

    /// Every library root: the client root first, then each listed folder.
    pub fn library_folders(&self) -> Result<Vec<PathBuf>, DiscoveryError> {
        let path = self.library_folders_path();
        let fatal = |message: String| DiscoveryError::LibraryFolders {
            launcher: self.launcher.clone(),
            path: path.clone(),
            message,
        };

        let content = fs::read_to_string(&path).map_err(|e| fatal(e.to_string()))?;
        let descriptor = KeyValues::parse(&content).map_err(|e| fatal(e.to_string()))?;
        let folders = descriptor
            .get_block("libraryfolders")
            .ok_or_else(|| fatal("no libraryfolders section".to_string()))?;

        let mut entries: Vec<(u32, &Value)> = folders
            .iter()
            .filter_map(|(key, value)| key.parse::<u32>().ok().map(|index| (index, value)))
            .collect();
        entries.sort_by_key(|(index, _)| *index);

        let mut libraries = vec![self.root.clone()];
        for (key, value) in entries {
            // Older clients stored the path directly as the entry's value.
            let library = match value {
                Value::String(path) => Some(path.as_str()),
                Value::Block(entry) => entry.get_str("path"),
            };
            let Some(library) = library.filter(|p| !p.is_empty()) else {
                debug!("{}: library folder {} has no path", self.launcher, key);
                continue;
            };

            let library = PathBuf::from(library);
            if !libraries.iter().any(|known| paths_equal(known, &library)) {
                libraries.push(library);
            }
        }

        Ok(libraries)
    }

    /// Read one app manifest from `library`.
    ///
    /// Returns `Ok(None)` when the manifest does not exist.
    fn probe_manifest(
        &self,
        library: &Path,
        manifest_name: &str,
    ) -> Result<Option<Installation>, DiscoveryError> {
        let manifest_path = library.join("steamapps").join(manifest_name);
        if !manifest_path.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&manifest_path).map_err(|source| DiscoveryError::ManifestRead {
                path: manifest_path.clone(),
                source,
            })?;
        let manifest =
            KeyValues::parse(&content).map_err(|e| DiscoveryError::ManifestParse {
                path: manifest_path.clone(),
                message: e.to_string(),
            })?;

        let app_state =
            manifest
                .get_block("appstate")
                .ok_or_else(|| DiscoveryError::ManifestMissingKey {
                    path: manifest_path.clone(),
                    key: "AppState",
                })?;
        let install_dir =
            app_state
                .get_str("installdir")
                .ok_or_else(|| DiscoveryError::ManifestMissingKey {
                    path: manifest_path.clone(),
                    key: "installdir",
                })?;

        let install_path = library.join("steamapps").join("common").join(install_dir);
        let (install_type, version) = classify(&install_path).map_err(|source| FindError {
            path: install_path.clone(),
            source,
        })?;

        let beta_key = app_state
            .get_block("userconfig")
            .and_then(|config| config.get_str("betakey"));
        let branch = match beta_key {
            // The client writes an empty or "public" key for the default branch.
            None | Some("") | Some("public") => Branch::EarlyAccess,
            Some(EXPERIMENTAL_BETA_KEY) => Branch::Experimental,
            Some(other) => {
                return Err(DiscoveryError::UnknownBranch {
                    path: manifest_path,
                    key: other.to_string(),
                })
            }
        };

        let mut launch_path = self.launch_command.clone();
        launch_path.push(format!("steam://rungameid/{}", STEAM_APP_ID));

        Ok(Some(Installation {
            path: canonical_path(&install_path),
            version,
            install_type,
            branch,
            launcher: self.launcher.clone(),
            launch_path,
        }))
    }
}

impl LauncherProbe for SteamProbe {
    fn launcher(&self) -> &str {
        &self.launcher
    }

    fn find_installations(&self) -> ProbeOutcome {
        let libraries = match self.library_folders() {
            Ok(libraries) => libraries,
            Err(err) => return ProbeOutcome::fatal(err),
        };

        let mut outcome = ProbeOutcome::default();
        for library in &libraries {
            for manifest_name in APP_MANIFESTS {
                match self.probe_manifest(library, manifest_name) {
                    Ok(Some(installation)) => outcome.installations.push(installation),
                    Ok(None) => {}
                    Err(err) => {
                        debug!("{}: {}", self.launcher, err);
                        outcome.errors.push(err);
                    }
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::InstallType;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn write_library_folders(root: &Path, libraries: &[&Path]) {
        let mut content = String::from("\"libraryfolders\"\n{\n");
        for (i, library) in libraries.iter().enumerate() {
            let escaped = library.to_string_lossy().replace('\\', "\\\\");
            content.push_str(&format!(
                "\t\"{}\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t}}\n",
                i, escaped
            ));
        }
        content.push_str("}\n");
        write(&root.join("steamapps/libraryfolders.vdf"), &content);
    }

    fn write_manifest(library: &Path, app_id: &str, install_dir: &str, beta_key: Option<&str>) {
        let user_config = match beta_key {
            Some(key) => format!("\t\t\"BetaKey\"\t\t\"{}\"\n", key),
            None => String::new(),
        };
        let content = format!(
            "\"AppState\"\n{{\n\t\"appid\"\t\t\"{}\"\n\t\"installdir\"\t\t\"{}\"\n\t\"UserConfig\"\n\t{{\n\t\t\"language\"\t\t\"english\"\n{}\t}}\n}}\n",
            app_id, install_dir, user_config
        );
        write(
            &library.join(format!("steamapps/appmanifest_{}.acf", app_id)),
            &content,
        );
    }

    fn write_game(library: &Path, install_dir: &str, changelist: u64) -> PathBuf {
        let dir = library.join("steamapps/common").join(install_dir);
        write(&dir.join("FactoryGame.exe"), "");
        write(
            &dir.join("Engine/Binaries/Win64/FactoryGame-Win64-Shipping.version"),
            &format!("{{\"Changelist\":{}}}", changelist),
        );
        dir
    }

    fn probe(root: &Path) -> SteamProbe {
        SteamProbe::new(root, "Steam", vec!["steam".to_string()])
    }

    #[test]
    fn finds_early_access_and_experimental_apps() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_library_folders(root, &[root]);
        write_manifest(root, "526870", "Satisfactory", None);
        write_manifest(
            root,
            "1690800",
            "SatisfactoryExperimental",
            Some("experimental"),
        );
        write_game(root, "Satisfactory", 365306);
        write_game(root, "SatisfactoryExperimental", 366000);

        let outcome = probe(root).find_installations();

        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        assert_eq!(outcome.installations.len(), 2);
        let early = &outcome.installations[0];
        let experimental = &outcome.installations[1];
        assert_eq!(early.launcher, experimental.launcher);
        assert_eq!(early.branch, Branch::EarlyAccess);
        assert_eq!(early.version, 365306);
        assert_eq!(early.install_type, InstallType::WindowsClient);
        assert_eq!(experimental.branch, Branch::Experimental);
        assert_eq!(experimental.version, 366000);
    }

    #[test]
    fn launch_path_appends_run_uri_to_template() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_library_folders(root, &[]);
        write_manifest(root, "526870", "Satisfactory", None);
        write_game(root, "Satisfactory", 1);

        let outcome = probe(root).find_installations();
        assert_eq!(
            outcome.installations[0].launch_path,
            vec!["steam".to_string(), "steam://rungameid/526870".to_string()]
        );
    }

    #[test]
    fn installation_path_is_canonical() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_library_folders(root, &[]);
        write_manifest(root, "526870", "Satisfactory", None);
        let dir = write_game(root, "Satisfactory", 1);

        let outcome = probe(root).find_installations();
        assert_eq!(outcome.installations[0].path, canonical_path(&dir));
    }

    #[test]
    fn missing_library_folders_is_fatal() {
        let temp = TempDir::new().unwrap();
        // A manifest exists but is never reached.
        write_manifest(temp.path(), "526870", "Satisfactory", None);
        write_game(temp.path(), "Satisfactory", 1);

        let outcome = probe(temp.path()).find_installations();
        assert!(outcome.installations.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            outcome.errors[0],
            DiscoveryError::LibraryFolders { .. }
        ));
    }

    #[test]
    fn unparsable_library_folders_is_fatal() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join("steamapps/libraryfolders.vdf"),
            "\"libraryfolders\" {",
        );

        let outcome = probe(temp.path()).find_installations();
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn legacy_library_folders_format() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Steam");
        let extra = temp.path().join("SteamLibrary");
        let content = format!(
            "\"LibraryFolders\"\n{{\n\t\"TimeNextStatsReport\"\t\t\"1700000000\"\n\t\"ContentStatsID\"\t\t\"-123\"\n\t\"1\"\t\t\"{}\"\n}}\n",
            extra.to_string_lossy().replace('\\', "\\\\")
        );
        write(&root.join("steamapps/libraryfolders.vdf"), &content);

        let libraries = probe(&root).library_folders().unwrap();
        assert_eq!(libraries.len(), 2);
        assert!(paths_equal(&libraries[0], &root));
        assert!(paths_equal(&libraries[1], &extra));
    }

    #[test]
    fn library_folders_follow_numeric_index() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Steam");
        let libraries: Vec<PathBuf> = (0..11)
            .map(|i| temp.path().join(format!("Library{}", i)))
            .collect();
        let refs: Vec<&Path> = libraries.iter().map(PathBuf::as_path).collect();
        write_library_folders(&root, &refs);

        let found = probe(&root).library_folders().unwrap();
        assert_eq!(found.len(), 12);
        assert!(paths_equal(&found[0], &root));
        for (i, library) in libraries.iter().enumerate() {
            assert!(paths_equal(&found[i + 1], library));
        }
    }

    #[test]
    fn root_listed_in_descriptor_is_not_duplicated() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let root_with_slash = PathBuf::from(format!("{}/", root.display()));
        write_library_folders(root, &[root, &root_with_slash]);
        write_manifest(root, "526870", "Satisfactory", None);
        write_game(root, "Satisfactory", 1);

        let probe = probe(root);
        assert_eq!(probe.library_folders().unwrap().len(), 1);

        let outcome = probe.find_installations();
        assert_eq!(outcome.installations.len(), 1);
    }

    #[test]
    fn installs_across_libraries() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Steam");
        let extra = temp.path().join("Games");
        write_library_folders(&root, &[&root, &extra]);
        write_manifest(&extra, "526870", "Satisfactory", None);
        write_game(&extra, "Satisfactory", 42);

        let outcome = probe(&root).find_installations();
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.installations.len(), 1);
        assert_eq!(outcome.installations[0].version, 42);
    }

    #[test]
    fn corrupt_manifest_does_not_stop_other_manifests() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_library_folders(root, &[]);
        write(
            &root.join("steamapps/appmanifest_526870.acf"),
            "\"AppState\" { \"installdir\" ",
        );
        write_manifest(root, "1690800", "SatisfactoryExperimental", Some("experimental"));
        write_game(root, "SatisfactoryExperimental", 7);

        let outcome = probe(root).find_installations();
        assert_eq!(outcome.installations.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            outcome.errors[0],
            DiscoveryError::ManifestParse { .. }
        ));
    }

    #[test]
    fn manifest_without_app_state_is_reported() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_library_folders(root, &[]);
        write(
            &root.join("steamapps/appmanifest_526870.acf"),
            "\"Other\" { }",
        );

        let outcome = probe(root).find_installations();
        assert!(matches!(
            outcome.errors[0],
            DiscoveryError::ManifestMissingKey {
                key: "AppState",
                ..
            }
        ));
    }

    #[test]
    fn unknown_beta_key_is_reported_and_skipped() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_library_folders(root, &[]);
        write_manifest(root, "526870", "Satisfactory", Some("qa-internal"));
        write_game(root, "Satisfactory", 1);

        let outcome = probe(root).find_installations();
        assert!(outcome.installations.is_empty());
        match &outcome.errors[0] {
            DiscoveryError::UnknownBranch { key, .. } => assert_eq!(key, "qa-internal"),
            other => panic!("expected UnknownBranch, got {other:?}"),
        }
    }

    #[test]
    fn public_beta_key_is_early_access() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_library_folders(root, &[]);
        write_manifest(root, "526870", "Satisfactory", Some("public"));
        write_game(root, "Satisfactory", 1);

        let outcome = probe(root).find_installations();
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.installations[0].branch, Branch::EarlyAccess);
    }

    #[test]
    fn unclassifiable_directory_is_find_error() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write_library_folders(root, &[]);
        write_manifest(root, "526870", "Satisfactory", None);
        let dir = root.join("steamapps/common/Satisfactory");
        write(&dir.join("FactoryGame.exe"), "");

        let outcome = probe(root).find_installations();
        assert!(outcome.installations.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].invalid_install(), Some(dir.as_path()));
    }

    #[test]
    fn missing_manifests_are_not_errors() {
        let temp = TempDir::new().unwrap();
        write_library_folders(temp.path(), &[]);

        let outcome = probe(temp.path()).find_installations();
        assert!(outcome.installations.is_empty());
        assert!(outcome.errors.is_empty());
    }
}
