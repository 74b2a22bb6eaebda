//! Epic Games Launcher discovery.
//!
//! The launcher writes one JSON `.item` file per installed app into its
//! `Data/Manifests` directory. The game's items live in the `crab` catalog
//! namespace, with one app name per release branch.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{canonical_path, DiscoveryError, FindError, LauncherProbe, ProbeOutcome};
use crate::game::{classify, Branch, Installation};

const CATALOG_NAMESPACE: &str = "crab";
const EARLY_ACCESS_APP: &str = "CrabEA";
const EXPERIMENTAL_APP: &str = "CrabTest";

/// The fields of an `.item` manifest the probe needs.
///
/// Keys are lowercased before deserializing; launcher versions disagree on
/// `CatalogItemId` vs `CatalogItemID`.
#[derive(Debug, Deserialize)]
struct ItemManifest {
    #[serde(rename = "appname")]
    app_name: Option<String>,
    #[serde(rename = "catalognamespace")]
    catalog_namespace: Option<String>,
    #[serde(rename = "catalogitemid")]
    catalog_item_id: Option<String>,
    #[serde(rename = "installlocation")]
    install_location: Option<String>,
}

/// Probe for one Epic Games Launcher manifests directory.
#[derive(Debug, Clone)]
pub struct EpicProbe {
    manifests_dir: PathBuf,
    launcher: String,
    launch_command: Vec<String>,
}

impl EpicProbe {
    pub fn new(
        manifests_dir: impl Into<PathBuf>,
        launcher: impl Into<String>,
        launch_command: Vec<String>,
    ) -> Self {
        Self {
            manifests_dir: manifests_dir.into(),
            launcher: launcher.into(),
            launch_command,
        }
    }

    pub fn manifests_dir(&self) -> &Path {
        &self.manifests_dir
    }

    /// All `.item` files in the manifests directory, sorted by name.
    fn item_files(&self) -> Result<Vec<PathBuf>, DiscoveryError> {
        let entries =
            fs::read_dir(&self.manifests_dir).map_err(|e| DiscoveryError::LibraryFolders {
                launcher: self.launcher.clone(),
                path: self.manifests_dir.clone(),
                message: e.to_string(),
            })?;

        let mut items: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "item"))
            .collect();
        items.sort();
        Ok(items)
    }

    /// Read one item manifest. `Ok(None)` means it belongs to another title.
    fn probe_item(&self, item_path: &Path) -> Result<Option<Installation>, DiscoveryError> {
        let content =
            fs::read_to_string(item_path).map_err(|source| DiscoveryError::ManifestRead {
                path: item_path.to_path_buf(),
                source,
            })?;
        let parse_error = |message: String| DiscoveryError::ManifestParse {
            path: item_path.to_path_buf(),
            message,
        };
        let raw: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
        let manifest: ItemManifest = serde_json::from_value(lowercase_keys(raw))
            .map_err(|e| parse_error(e.to_string()))?;

        if manifest.catalog_namespace.as_deref() != Some(CATALOG_NAMESPACE) {
            return Ok(None);
        }

        let missing = |key: &'static str| DiscoveryError::ManifestMissingKey {
            path: item_path.to_path_buf(),
            key,
        };
        let install_location = manifest
            .install_location
            .ok_or_else(|| missing("InstallLocation"))?;
        let app_name = manifest.app_name.ok_or_else(|| missing("AppName"))?;
        let catalog_item_id = manifest
            .catalog_item_id
            .ok_or_else(|| missing("CatalogItemId"))?;

        let install_path = PathBuf::from(&install_location);
        let (install_type, version) = classify(&install_path).map_err(|source| FindError {
            path: install_path.clone(),
            source,
        })?;

        let branch = match app_name.as_str() {
            EARLY_ACCESS_APP => Branch::EarlyAccess,
            EXPERIMENTAL_APP => Branch::Experimental,
            other => {
                return Err(DiscoveryError::UnknownBranch {
                    path: item_path.to_path_buf(),
                    key: other.to_string(),
                })
            }
        };

        let mut launch_path = self.launch_command.clone();
        launch_path.push(format!(
            "com.epicgames.launcher://apps/{}%3A{}%3A{}?action=launch&silent=true",
            CATALOG_NAMESPACE, catalog_item_id, app_name
        ));

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

impl LauncherProbe for EpicProbe {
    fn launcher(&self) -> &str {
        &self.launcher
    }

    fn find_installations(&self) -> ProbeOutcome {
        let items = match self.item_files() {
            Ok(items) => items,
            Err(err) => return ProbeOutcome::fatal(err),
        };

        let mut outcome = ProbeOutcome::default();
        for item in &items {
            match self.probe_item(item) {
                Ok(Some(installation)) => outcome.installations.push(installation),
                Ok(None) => {}
                Err(err) => {
                    debug!("{}: {}", self.launcher, err);
                    outcome.errors.push(err);
                }
            }
        }

        outcome
    }
}

/// Lowercase the keys of a top-level JSON object.
fn lowercase_keys(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect(),
        ),
        other => other,
    }
}
