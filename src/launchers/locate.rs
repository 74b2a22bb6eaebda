//! Well-known launcher locations.
//!
//! Launchers install to a handful of fixed places per platform. The probes
//! for this machine are the known locations that exist plus whatever the
//! user lists in `config.yml`.

use std::path::PathBuf;
use tracing::debug;

use super::{canonical_path, paths_equal, EpicProbe, LauncherProbe, SteamProbe};
use crate::config::{expand_home, PioneerConfig};

/// Which probe handles a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherKind {
    Steam,
    Epic,
}

impl LauncherKind {
    fn default_name(self) -> &'static str {
        match self {
            LauncherKind::Steam => "Steam",
            LauncherKind::Epic => "Epic Games",
        }
    }
}

/// A launcher directory to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherLocation {
    pub kind: LauncherKind,
    /// Steam root, or Epic manifests directory.
    pub path: PathBuf,
    pub name: String,
    pub launch: Vec<String>,
}

impl LauncherLocation {
    pub fn into_probe(self) -> Box<dyn LauncherProbe> {
        match self.kind {
            LauncherKind::Steam => Box::new(SteamProbe::new(self.path, self.name, self.launch)),
            LauncherKind::Epic => Box::new(EpicProbe::new(self.path, self.name, self.launch)),
        }
    }
}

/// Where a known location is rooted.
#[derive(Clone, Copy)]
enum Base {
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    Home,
    #[cfg(windows)]
    ProgramData,
    #[cfg(windows)]
    Absolute,
}

struct KnownLocation {
    kind: LauncherKind,
    base: Base,
    path: &'static str,
    name: &'static str,
    launch: &'static [&'static str],
}

#[cfg(target_os = "linux")]
const KNOWN_LOCATIONS: &[KnownLocation] = &[
    KnownLocation {
        kind: LauncherKind::Steam,
        base: Base::Home,
        path: ".steam/steam",
        name: "Steam",
        launch: &["steam"],
    },
    KnownLocation {
        kind: LauncherKind::Steam,
        base: Base::Home,
        path: ".local/share/Steam",
        name: "Steam",
        launch: &["steam"],
    },
    KnownLocation {
        kind: LauncherKind::Steam,
        base: Base::Home,
        path: ".var/app/com.valvesoftware.Steam/.local/share/Steam",
        name: "Steam (Flatpak)",
        launch: &["flatpak", "run", "com.valvesoftware.Steam"],
    },
];

#[cfg(windows)]
const KNOWN_LOCATIONS: &[KnownLocation] = &[
    KnownLocation {
        kind: LauncherKind::Steam,
        base: Base::Absolute,
        path: r"C:\Program Files (x86)\Steam",
        name: "Steam",
        launch: &["cmd", "/C", "start", ""],
    },
    KnownLocation {
        kind: LauncherKind::Epic,
        base: Base::ProgramData,
        path: r"Epic\EpicGamesLauncher\Data\Manifests",
        name: "Epic Games",
        launch: &["cmd", "/C", "start", ""],
    },
];

#[cfg(target_os = "macos")]
const KNOWN_LOCATIONS: &[KnownLocation] = &[KnownLocation {
    kind: LauncherKind::Steam,
    base: Base::Home,
    path: "Library/Application Support/Steam",
    name: "Steam",
    launch: &["open"],
}];

#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
const KNOWN_LOCATIONS: &[KnownLocation] = &[];

/// Default launch prefix for user-configured launchers on this platform.
fn platform_launch(kind: LauncherKind) -> Vec<String> {
    let argv: &[&str] = if cfg!(windows) {
        &["cmd", "/C", "start", ""]
    } else if cfg!(target_os = "macos") {
        &["open"]
    } else {
        match kind {
            LauncherKind::Steam => &["steam"],
            LauncherKind::Epic => &["xdg-open"],
        }
    };
    argv.iter().map(|s| s.to_string()).collect()
}

/// Known locations for this platform that exist on disk.
pub fn well_known_locations() -> Vec<LauncherLocation> {
    KNOWN_LOCATIONS
        .iter()
        .filter_map(|known| {
            let base = match known.base {
                #[cfg(any(target_os = "linux", target_os = "macos"))]
                Base::Home => dirs::home_dir()?,
                #[cfg(windows)]
                Base::ProgramData => PathBuf::from(std::env::var_os("PROGRAMDATA")?),
                #[cfg(windows)]
                Base::Absolute => PathBuf::new(),
            };
            let path = base.join(known.path);
            if !path.is_dir() {
                debug!("{} not found at {}", known.name, path.display());
                return None;
            }
            Some(LauncherLocation {
                kind: known.kind,
                path,
                name: known.name.to_string(),
                launch: known.launch.iter().map(|s| s.to_string()).collect(),
            })
        })
        .collect()
}

/// Locations listed in the config file. These are probed even when missing
/// so a typo shows up as a discovery error.
pub fn configured_locations(config: &PioneerConfig) -> Vec<LauncherLocation> {
    let steam = config.steam.iter().map(|s| LauncherLocation {
        kind: LauncherKind::Steam,
        path: expand_home(&s.root),
        name: s
            .name
            .clone()
            .unwrap_or_else(|| LauncherKind::Steam.default_name().to_string()),
        launch: s
            .launch
            .clone()
            .unwrap_or_else(|| platform_launch(LauncherKind::Steam)),
    });
    let epic = config.epic.iter().map(|e| LauncherLocation {
        kind: LauncherKind::Epic,
        path: expand_home(&e.manifests),
        name: e
            .name
            .clone()
            .unwrap_or_else(|| LauncherKind::Epic.default_name().to_string()),
        launch: e
            .launch
            .clone()
            .unwrap_or_else(|| platform_launch(LauncherKind::Epic)),
    });

    steam.chain(epic).collect()
}

/// All locations to probe, with duplicates removed.
///
/// `~/.steam/steam` is usually a symlink to `~/.local/share/Steam`, so
/// locations are compared after resolving links. The first one listed wins.
pub fn launcher_locations(config: &PioneerConfig) -> Vec<LauncherLocation> {
    let mut candidates = Vec::new();
    if config.detect_launchers {
        candidates.extend(well_known_locations());
    }
    candidates.extend(configured_locations(config));

    let mut seen: Vec<(LauncherKind, PathBuf)> = Vec::new();
    let mut locations = Vec::new();
    for location in candidates {
        let resolved = canonical_path(&location.path);
        if seen
            .iter()
            .any(|(kind, path)| *kind == location.kind && paths_equal(path, &resolved))
        {
            debug!(
                "{}: {} already probed",
                location.name,
                location.path.display()
            );
            continue;
        }
        seen.push((location.kind, resolved));
        locations.push(location);
    }

    locations
}

/// Build the probes for this machine.
pub fn default_probes(config: &PioneerConfig) -> Vec<Box<dyn LauncherProbe>> {
    launcher_locations(config)
        .into_iter()
        .map(LauncherLocation::into_probe)
        .collect()
}
