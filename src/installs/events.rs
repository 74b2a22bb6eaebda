//! Registry change notifications.

use super::InstallationInfo;

/// Progress item for validation after a selection change.
pub const SELECT_INSTALL_ITEM: &str = "__select_install__";

/// Progress item for validation after toggling mods.
pub const TOGGLE_MODS_ITEM: &str = "__toggle_mods__";

/// Progress item for validation after switching profiles.
pub const SET_PROFILE_ITEM: &str = "__set_profile__";

/// The registry's current long-running operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub item: String,
    pub message: String,
    /// Completion between 0 and 1, or negative when unknown.
    pub progress: f64,
}

impl Progress {
    /// An operation with no measurable completion.
    pub fn indeterminate(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            message: message.into(),
            progress: -1.0,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        self.progress < 0.0
    }
}

/// Borrowed view of the registry passed to observers.
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    pub installations: &'a [InstallationInfo],
    pub selected: Option<&'a InstallationInfo>,
}

/// Observer for registry changes.
///
/// Both methods default to doing nothing.
pub trait RegistryEvents {
    /// The installation list, the selection, or an installation's profile
    /// or mods toggle changed.
    fn state_changed(&mut self, _state: StateView<'_>) {}

    /// The status slot was set or cleared.
    fn progress_changed(&mut self, _progress: Option<&Progress>) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEvents;

impl RegistryEvents for NoopEvents {}
