//! Configuration loading for Pioneer.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading and validation in [`loader`]
//!
//! # Example
//!
//! ```
//! use pioneer::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "steam:\n  - root: /games/Steam\n").unwrap();
//!
//! let config = load_config(Some(&path)).unwrap();
//! assert_eq!(config.steam.len(), 1);
//! assert!(config.detect_launchers);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    default_config_path, expand_home, load_config, load_config_file, parse_config,
    resolve_data_dir, validate, APP_DIR,
};
pub use schema::{EpicRoot, PioneerConfig, SteamRoot};
