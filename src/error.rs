//! Error types for Pioneer operations.
//!
//! This module defines [`PioneerError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Discovery problems never surface here: probes accumulate them as
//!   [`DiscoveryError`](crate::launchers::DiscoveryError) values instead
//! - Use `PioneerError` for user-facing failures that need distinct handling
//! - Use `anyhow::Error` (via `PioneerError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Pioneer operations.
#[derive(Debug, Error)]
pub enum PioneerError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the configuration file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to parse a settings, profiles or lockfile.
    #[error("Failed to read state file {path}: {message}")]
    StateParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// No discovered installation has the requested path.
    #[error("Installation \"{path}\" not found")]
    InstallNotFound { path: PathBuf },

    /// An operation needs a selected installation but none is selected.
    #[error("No installation selected")]
    NoInstallSelected,

    /// The named profile does not exist.
    #[error("Profile \"{name}\" not found")]
    ProfileNotFound { name: String },

    /// The selected installation's mod set is not usable.
    #[error("Failed to validate install {path}: {source}")]
    ValidationFailed {
        path: PathBuf,
        #[source]
        source: Box<PioneerError>,
    },

    /// A profile has mods but the installation has no lockfile.
    #[error("Lockfile not found: {path}")]
    LockfileMissing { path: PathBuf },

    /// A mod required by the profile is absent from the lockfile.
    #[error("Mod '{name}' from profile '{profile}' is not in the lockfile")]
    ModNotLocked { name: String, profile: String },

    /// A locked mod depends on a mod that is not locked.
    #[error("Mod '{name}' depends on '{dependency}', which is not in the lockfile")]
    DependencyNotLocked { name: String, dependency: String },

    /// Process exited unsuccessfully, or there was nothing to run.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Process could not be started.
    #[error("Failed to start {command}: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Pioneer operations.
pub type Result<T> = std::result::Result<T, PioneerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = PioneerError::ConfigNotFound {
            path: PathBuf::from("/foo/config.yml"),
        };
        assert!(err.to_string().contains("/foo/config.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = PioneerError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn state_parse_error_names_state_file() {
        let err = PioneerError::StateParseError {
            path: PathBuf::from("/data/settings.json"),
            message: "expected value".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read state file /data/settings.json: expected value"
        );
    }

    #[test]
    fn command_spawn_keeps_io_cause() {
        let err = PioneerError::CommandSpawn {
            command: "steam steam://rungameid/526870".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        assert!(err.to_string().contains("No such file"));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn install_not_found_displays_path() {
        let err = PioneerError::InstallNotFound {
            path: PathBuf::from("/no/such/path"),
        };
        assert!(err.to_string().contains("/no/such/path"));
    }

    #[test]
    fn profile_not_found_displays_name() {
        let err = PioneerError::ProfileNotFound {
            name: "Speedrun".into(),
        };
        assert!(err.to_string().contains("Speedrun"));
    }

    #[test]
    fn validation_failed_wraps_cause() {
        let err = PioneerError::ValidationFailed {
            path: PathBuf::from("/games/Satisfactory"),
            source: Box::new(PioneerError::LockfileMissing {
                path: PathBuf::from("/games/Satisfactory/lock.json"),
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("/games/Satisfactory"));
        assert!(msg.contains("Lockfile not found"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn dependency_not_locked_displays_both_mods() {
        let err = PioneerError::DependencyNotLocked {
            name: "RefinedPower".into(),
            dependency: "SML".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("RefinedPower"));
        assert!(msg.contains("SML"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = PioneerError::CommandFailed {
            command: "steam steam://rungameid/526870".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("steam://rungameid/526870"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PioneerError = io_err.into();
        assert!(matches!(err, PioneerError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(PioneerError::NoInstallSelected)
        }
        assert!(returns_error().is_err());
    }
}
