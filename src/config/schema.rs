//! Configuration schema types.
//!
//! ```yaml
//! data_dir: ~/.local/share/pioneer
//! detect_launchers: true
//! steam:
//!   - root: /mnt/games/Steam
//!     name: Steam (games drive)
//! epic:
//!   - manifests: /mnt/windows/ProgramData/Epic/EpicGamesLauncher/Data/Manifests
//!     launch: ["heroic"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `config.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PioneerConfig {
    /// Directory holding `settings.json` and `profiles.json`.
    pub data_dir: Option<PathBuf>,

    /// Probe the well-known launcher locations for this platform.
    pub detect_launchers: bool,

    /// Extra Steam roots to probe.
    pub steam: Vec<SteamRoot>,

    /// Extra Epic Games Launcher manifest directories to probe.
    pub epic: Vec<EpicRoot>,
}

impl Default for PioneerConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            detect_launchers: true,
            steam: Vec::new(),
            epic: Vec::new(),
        }
    }
}

/// A user-configured Steam installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteamRoot {
    /// The Steam root directory (the one containing `steamapps/`).
    pub root: PathBuf,

    /// Launcher name shown next to installations. Defaults to "Steam".
    #[serde(default)]
    pub name: Option<String>,

    /// Command prefix used to launch the game.
    #[serde(default)]
    pub launch: Option<Vec<String>>,
}

/// A user-configured Epic Games Launcher manifests directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpicRoot {
    /// Directory containing `.item` manifests.
    pub manifests: PathBuf,

    /// Launcher name shown next to installations. Defaults to "Epic Games".
    #[serde(default)]
    pub name: Option<String>,

    /// Command prefix used to launch the game.
    #[serde(default)]
    pub launch: Option<Vec<String>>,
}
