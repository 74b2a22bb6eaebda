//! Launcher probes.
//!
//! Each distribution launcher keeps its own manifests describing which
//! titles it installed and where. A [`LauncherProbe`] reads one launcher's
//! manifests, classifies every candidate directory, and reports both the
//! installations it found and every problem it hit along the way. Only a
//! failure to read the launcher's top-level descriptor stops a probe early.
//!
//! # Modules
//!
//! - [`keyvalues`] - Valve KeyValues documents read by the Steam probe
//! - [`steam`] - Steam library folders and app manifests
//! - [`epic`] - Epic Games Launcher `.item` manifests
//! - [`locate`] - Well-known launcher locations per platform

pub mod epic;
pub mod keyvalues;
pub mod locate;
pub mod steam;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::game::{ClassifyError, Installation};

pub use epic::EpicProbe;
pub use keyvalues::{KeyValues, KeyValuesError};
pub use locate::{default_probes, LauncherKind, LauncherLocation};
pub use steam::SteamProbe;

/// A recognized-but-broken installation directory.
#[derive(Debug, Error)]
#[error("invalid installation at {}: {source}", path.display())]
pub struct FindError {
    pub path: PathBuf,
    #[source]
    pub source: ClassifyError,
}

/// A problem recorded while probing a launcher.
///
/// None of these abort a scan. `LibraryFolders` ends the probe that raised
/// it; every other variant only skips one manifest or directory.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Find(#[from] FindError),

    /// The launcher's top-level descriptor is unreadable or malformed.
    #[error("{launcher}: failed to read {}: {message}", path.display())]
    LibraryFolders {
        launcher: String,
        path: PathBuf,
        message: String,
    },

    #[error("failed to read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    #[error("manifest {} has no {key}", path.display())]
    ManifestMissingKey { path: PathBuf, key: &'static str },

    #[error("unknown branch key '{key}' in {}", path.display())]
    UnknownBranch { path: PathBuf, key: String },
}

impl DiscoveryError {
    /// Path of the installation directory, for errors that name one.
    pub fn invalid_install(&self) -> Option<&Path> {
        match self {
            DiscoveryError::Find(err) => Some(&err.path),
            _ => None,
        }
    }
}

/// Everything one or more probes produced.
#[derive(Debug, Default)]
pub struct ProbeOutcome {
    pub installations: Vec<Installation>,
    pub errors: Vec<DiscoveryError>,
}

impl ProbeOutcome {
    /// Outcome of a probe that could not start.
    pub fn fatal(error: DiscoveryError) -> Self {
        Self {
            installations: Vec::new(),
            errors: vec![error],
        }
    }

    pub fn extend(&mut self, other: ProbeOutcome) {
        self.installations.extend(other.installations);
        self.errors.extend(other.errors);
    }
}

/// Finds game installations owned by one launcher.
pub trait LauncherProbe {
    /// Launcher identifier stamped on every installation (e.g. "Steam").
    fn launcher(&self) -> &str;

    /// Read the launcher's manifests and classify what they point at.
    fn find_installations(&self) -> ProbeOutcome;
}

/// Run every probe in order and collect their results.
pub fn find_installations(probes: &[Box<dyn LauncherProbe>]) -> ProbeOutcome {
    let mut outcome = ProbeOutcome::default();

    for probe in probes {
        let found = probe.find_installations();
        debug!(
            "{}: {} installation(s), {} error(s)",
            probe.launcher(),
            found.installations.len(),
            found.errors.len()
        );
        outcome.extend(found);
    }

    outcome
}

/// Compare two paths the way the host file system does.
///
/// Windows paths are compared case-insensitively with either separator.
#[cfg(windows)]
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    let a: PathBuf = a.components().collect();
    let b: PathBuf = b.components().collect();
    a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}

/// Compare two paths the way the host file system does.
#[cfg(not(windows))]
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    a.components().eq(b.components())
}

/// Resolve symlinks and relative parts, falling back to a lexical cleanup
/// when the path cannot be resolved.
pub fn canonical_path(path: &Path) -> PathBuf {
    match fs::canonicalize(path) {
        Ok(resolved) => strip_verbatim(resolved),
        Err(_) => path.components().collect(),
    }
}

#[cfg(windows)]
fn strip_verbatim(path: PathBuf) -> PathBuf {
    let text = path.to_string_lossy();
    match text.strip_prefix(r"\\?\") {
        Some(rest) if !rest.starts_with("UNC\\") => PathBuf::from(rest),
        _ => path,
    }
}

#[cfg(not(windows))]
fn strip_verbatim(path: PathBuf) -> PathBuf {
    path
}
