//! Configuration file discovery and loading.

use crate::config::schema::PioneerConfig;
use crate::error::{PioneerError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config and data directories.
pub const APP_DIR: &str = "pioneer";

/// Default config location: `<config dir>/pioneer/config.yml`.
pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_DIR).join("config.yml"))
}

/// Load a single config file and parse it into PioneerConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PioneerConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PioneerError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PioneerError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into PioneerConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PioneerConfig> {
    if content.trim().is_empty() {
        return Ok(PioneerConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| PioneerError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit path must exist. Without one, the default location is read
/// when present and the defaults are used otherwise.
pub fn load_config(config_override: Option<&Path>) -> Result<PioneerConfig> {
    let config = match config_override {
        Some(path) => load_config_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => load_config_file(&path)?,
            _ => PioneerConfig::default(),
        },
    };

    validate(&config)?;
    Ok(config)
}

/// Check values serde cannot reject on its own.
pub fn validate(config: &PioneerConfig) -> Result<()> {
    let launches = config
        .steam
        .iter()
        .map(|s| (&s.root, &s.launch))
        .chain(config.epic.iter().map(|e| (&e.manifests, &e.launch)));

    for (path, launch) in launches {
        if launch.as_ref().is_some_and(|argv| argv.is_empty()) {
            return Err(PioneerError::ConfigValidationError {
                message: format!("launch command for {} is empty", path.display()),
            });
        }
    }

    Ok(())
}

/// Resolve the data directory.
///
/// Precedence: explicit override (`--data-dir` / `PIONEER_DATA_DIR`), then
/// `data_dir` from the config file, then `<data dir>/pioneer`.
pub fn resolve_data_dir(cli_override: Option<&Path>, config: &PioneerConfig) -> Result<PathBuf> {
    if let Some(dir) = cli_override {
        return Ok(expand_home(dir));
    }
    if let Some(dir) = &config.data_dir {
        return Ok(expand_home(dir));
    }

    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| PioneerError::ConfigValidationError {
            message: "could not determine a data directory; set data_dir or --data-dir"
                .to_string(),
        })
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SteamRoot;
    use tempfile::TempDir;

    #[test]
    fn load_config_file_reads_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "detect_launchers: false\n").unwrap();

        let config = load_config_file(&path).unwrap();
        assert!(!config.detect_launchers);
    }

    #[test]
    fn load_config_file_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_config_file(&temp.path().join("nope.yml"));
        assert!(matches!(result, Err(PioneerError::ConfigNotFound { .. })));
    }

    #[test]
    fn explicit_missing_config_is_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config(Some(&temp.path().join("nope.yml")));
        assert!(matches!(result, Err(PioneerError::ConfigNotFound { .. })));
    }

    #[test]
    fn parse_config_reports_path_on_error() {
        let result = parse_config("steam: [unclosed", Path::new("/etc/pioneer.yml"));
        match result {
            Err(PioneerError::ConfigParseError { path, .. }) => {
                assert_eq!(path, PathBuf::from("/etc/pioneer.yml"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("  \n", Path::new("config.yml")).unwrap();
        assert_eq!(config, PioneerConfig::default());
    }

    #[test]
    fn empty_launch_command_is_rejected() {
        let config = PioneerConfig {
            steam: vec![SteamRoot {
                root: PathBuf::from("/steam"),
                name: None,
                launch: Some(vec![]),
            }],
            ..Default::default()
        };
        assert!(matches!(
            validate(&config),
            Err(PioneerError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn cli_data_dir_wins_over_config() {
        let config = PioneerConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let dir = resolve_data_dir(Some(Path::new("/from/cli")), &config).unwrap();
        assert_eq!(dir, PathBuf::from("/from/cli"));

        let dir = resolve_data_dir(None, &config).unwrap();
        assert_eq!(dir, PathBuf::from("/from/config"));
    }

    #[test]
    fn expand_home_leaves_other_paths_alone() {
        assert_eq!(expand_home(Path::new("/abs/path")), PathBuf::from("/abs/path"));
        assert_eq!(expand_home(Path::new("rel/~")), PathBuf::from("rel/~"));
    }

    #[test]
    fn expand_home_replaces_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/games")), home.join("games"));
        }
    }
}
