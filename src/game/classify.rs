//! Installation directory classification.
//!
//! The game has shipped its binaries under several naming generations. A
//! directory is classified by walking [`INSTALL_RULES`] in order: the first
//! rule whose executable exists decides the outcome.
//!
//! Each rule evaluation has three outcomes:
//!
//! - executable absent: not this generation, try the next rule
//! - executable present, descriptor absent or broken: stop with an error
//! - descriptor parsed: the directory is classified
//!
//! # Example
//!
//! ```no_run
//! use pioneer::game::classify;
//! use std::path::Path;
//!
//! let (install_type, changelist) = classify(Path::new("/srv/satisfactory")).unwrap();
//! println!("{} build {}", install_type, changelist);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::version::GameVersionFile;
use super::InstallType;

/// One naming generation of one install type.
#[derive(Debug)]
pub struct InstallRule {
    /// Executable expected at the install root.
    pub executable: &'static str,
    /// Version descriptor location, relative to the install root.
    pub version_path: &'static [&'static str],
    pub install_type: InstallType,
}

impl InstallRule {
    /// Absolute path of this rule's version descriptor under `root`.
    pub fn version_file(&self, root: &Path) -> PathBuf {
        self.version_path
            .iter()
            .fold(root.to_path_buf(), |path, part| path.join(part))
    }
}

/// Classification rules, oldest naming generation first.
///
/// Order matters: unmigrated installs must still match the older entries,
/// so new generations are only ever appended.
pub const INSTALL_RULES: &[InstallRule] = &[
    InstallRule {
        executable: "FactoryServer.sh",
        version_path: &[
            "Engine",
            "Binaries",
            "Linux",
            "UnrealServer-Linux-Shipping.version",
        ],
        install_type: InstallType::LinuxServer,
    },
    InstallRule {
        executable: "FactoryServer.exe",
        version_path: &[
            "Engine",
            "Binaries",
            "Win64",
            "UnrealServer-Win64-Shipping.version",
        ],
        install_type: InstallType::WindowsServer,
    },
    InstallRule {
        executable: "FactoryGame.exe",
        version_path: &[
            "Engine",
            "Binaries",
            "Win64",
            "FactoryGame-Win64-Shipping.version",
        ],
        install_type: InstallType::WindowsClient,
    },
    // Update 9 renamed the server binaries.
    InstallRule {
        executable: "FactoryServer.sh",
        version_path: &[
            "Engine",
            "Binaries",
            "Linux",
            "FactoryServer-Linux-Shipping.version",
        ],
        install_type: InstallType::LinuxServer,
    },
    InstallRule {
        executable: "FactoryServer.exe",
        version_path: &[
            "Engine",
            "Binaries",
            "Win64",
            "FactoryServer-Win64-Shipping.version",
        ],
        install_type: InstallType::WindowsServer,
    },
];

/// Why a directory could not be classified.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// A known executable is present but its version descriptor is not.
    #[error("found {executable} but its version file {} is missing", version_file.display())]
    MetadataMissing {
        executable: &'static str,
        version_file: PathBuf,
    },

    #[error("failed to read version file {}: {source}", path.display())]
    ReadVersion {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse version file {}: {source}", path.display())]
    ParseVersion {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No rule's executable exists in the directory.
    #[error("{} is not a recognized game installation", path.display())]
    Unrecognized { path: PathBuf },
}

/// Classify `root` using [`INSTALL_RULES`].
pub fn classify(root: &Path) -> Result<(InstallType, u64), ClassifyError> {
    classify_with(root, INSTALL_RULES)
}

/// Classify `root` against an explicit rule list.
pub fn classify_with(
    root: &Path,
    rules: &[InstallRule],
) -> Result<(InstallType, u64), ClassifyError> {
    for rule in rules {
        let executable = root.join(rule.executable);
        if !executable.exists() {
            debug!(
                "{} not of type {}: {} missing",
                root.display(),
                rule.install_type,
                rule.executable
            );
            continue;
        }

        let version_file = rule.version_file(root);
        if !version_file.exists() {
            return Err(ClassifyError::MetadataMissing {
                executable: rule.executable,
                version_file,
            });
        }

        let content =
            fs::read_to_string(&version_file).map_err(|source| ClassifyError::ReadVersion {
                path: version_file.clone(),
                source,
            })?;
        let version = GameVersionFile::from_json(&content).map_err(|source| {
            ClassifyError::ParseVersion {
                path: version_file.clone(),
                source,
            }
        })?;

        return Ok((rule.install_type, version.changelist));
    }

    Err(ClassifyError::Unrecognized {
        path: root.to_path_buf(),
    })
}
