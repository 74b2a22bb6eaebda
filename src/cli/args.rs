//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Pioneer - find Satisfactory installations and manage their mods.
#[derive(Debug, Parser)]
#[command(name = "pioneer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides <config dir>/pioneer/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for settings.json and profiles.json
    #[arg(long, global = true, env = "PIONEER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List discovered installations (default if no command specified)
    List(ListArgs),

    /// Select the installation to manage
    Select(SelectArgs),

    /// Enable or disable mods on the selected installation
    Mods(ModsArgs),

    /// Assign a mod profile to the selected installation
    Profile(ProfileArgs),

    /// Launch the selected installation
    Launch,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `select` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SelectArgs {
    /// Installation directory (prompts when omitted)
    pub path: Option<PathBuf>,
}

/// Mods toggle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModsState {
    On,
    Off,
}

impl ModsState {
    pub fn enabled(self) -> bool {
        self == ModsState::On
    }
}

/// Arguments for the `mods` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ModsArgs {
    /// Whether mods should be loaded
    #[arg(value_enum)]
    pub state: ModsState,
}

/// Arguments for the `profile` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ProfileArgs {
    /// Profile name
    pub name: String,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
