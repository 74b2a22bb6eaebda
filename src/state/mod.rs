//! Persistent state.
//!
//! Pioneer keeps a single settings record across runs: which installation
//! is selected, and each installation's profile and mods toggle.

pub mod settings;

pub use settings::{Settings, SettingsStore};
