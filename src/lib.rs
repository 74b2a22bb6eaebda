//! Pioneer - find Satisfactory installations and manage their mods.
//!
//! Pioneer probes the Steam and Epic Games launchers for copies of the game,
//! classifies each one (client or dedicated server, build number, branch) and
//! keeps track of which installation is selected, which mod profile it uses
//! and whether mods are enabled.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types and result aliases
//! - [`game`] - Installation classification
//! - [`installs`] - The installation registry
//! - [`launchers`] - Steam and Epic discovery
//! - [`profiles`] - Mod profiles and lockfile validation
//! - [`shell`] - Launch command execution
//! - [`state`] - Persisted user settings
//! - [`ui`] - Prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use pioneer::config::parse_config;
//!
//! let yaml = "detect_launchers: false\nsteam:\n  - root: /mnt/games/Steam\n";
//! let config = parse_config(yaml, Path::new("config.yml")).unwrap();
//! assert!(!config.detect_launchers);
//! assert_eq!(config.steam[0].root, Path::new("/mnt/games/Steam"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod installs;
pub mod launchers;
pub mod profiles;
pub mod shell;
pub mod state;
pub mod ui;

pub use error::{PioneerError, Result};
