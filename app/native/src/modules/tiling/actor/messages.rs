//! Message types for the tiling actor.
//!
//! All communication with the tiling actor happens through messages:
//! - `WindowEvent` - window-system notifications, translated by the platform layer
//! - `TilingMessage` - events, keystrokes and commands sent to the actor
//! - `TilingQuery` - requests for state data (with response channel)
//! - `QueryResult` - responses from queries

use tokio::sync::oneshot;

use crate::modules::switcher::{KeyDisposition, KeyEvent, SwitcherState};
use crate::modules::tiling::restrictions::SizeRestriction;
use crate::modules::tiling::state::{GroupId, SplitGroup, WindowDescriptor, WindowHandle};

// ============================================================================
// Window Events
// ============================================================================

/// Notifications from the window system.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// A window appeared.
    WindowCreated(WindowDescriptor),

    /// A window went away.
    WindowDestroyed(WindowHandle),

    /// Keyboard focus moved (`None` when nothing has focus).
    FocusChanged(Option<WindowHandle>),

    /// An application started.
    AppLaunched { owner: String },

    /// An application quit.
    AppTerminated { owner: String },
}

// ============================================================================
// Tiling Messages
// ============================================================================

/// Messages sent to the tiling actor.
#[derive(Debug)]
pub enum TilingMessage {
    /// A window-system notification.
    Window(WindowEvent),

    /// A keystroke from the global event tap.
    ///
    /// The disposition is sent back when a responder is attached; the tap
    /// blocks on it to decide whether to swallow the key.
    Key {
        event: KeyEvent,
        respond_to: Option<oneshot::Sender<KeyDisposition>>,
    },

    /// Tile windows side by side as a group.
    Split(Vec<WindowHandle>),

    /// Take a window out of its split group.
    RemoveMember(WindowHandle),

    /// Shrink windows that overlap the taskbar.
    PreventOverlap,

    /// Run a rebalance pass now.
    Rebalance,

    /// Read state.
    Query {
        query: TilingQuery,
        respond_to: oneshot::Sender<QueryResult>,
    },

    /// Stop the actor.
    Shutdown,
}

impl TilingMessage {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Window(WindowEvent::WindowCreated(_)) => "WindowCreated",
            Self::Window(WindowEvent::WindowDestroyed(_)) => "WindowDestroyed",
            Self::Window(WindowEvent::FocusChanged(_)) => "FocusChanged",
            Self::Window(WindowEvent::AppLaunched { .. }) => "AppLaunched",
            Self::Window(WindowEvent::AppTerminated { .. }) => "AppTerminated",
            Self::Key { .. } => "Key",
            Self::Split(_) => "Split",
            Self::RemoveMember(_) => "RemoveMember",
            Self::PreventOverlap => "PreventOverlap",
            Self::Rebalance => "Rebalance",
            Self::Query { .. } => "Query",
            Self::Shutdown => "Shutdown",
        }
    }
}

// ============================================================================
// Queries
// ============================================================================

/// State the UI layer can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilingQuery {
    /// Every split group.
    Groups,
    /// The group a window belongs to.
    GroupOf(WindowHandle),
    /// The size restriction recorded for a window.
    Restriction(WindowHandle),
    /// The switcher's mode.
    SwitcherState,
    /// The switcher's shortcut keys.
    Assignments,
}

/// Answer to a [`TilingQuery`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Groups(Vec<SplitGroup>),
    GroupOf(Option<GroupId>),
    Restriction(Option<SizeRestriction>),
    SwitcherState(SwitcherState),
    Assignments(Vec<(char, WindowHandle)>),
}

impl QueryResult {
    /// Extracts groups from the result.
    #[must_use]
    pub fn into_groups(self) -> Option<Vec<SplitGroup>> {
        match self {
            Self::Groups(groups) => Some(groups),
            _ => None,
        }
    }

    /// Extracts a group id from the result.
    #[must_use]
    pub fn into_group_of(self) -> Option<Option<GroupId>> {
        match self {
            Self::GroupOf(group) => Some(group),
            _ => None,
        }
    }

    /// Extracts a restriction from the result.
    #[must_use]
    pub fn into_restriction(self) -> Option<Option<SizeRestriction>> {
        match self {
            Self::Restriction(restriction) => Some(restriction),
            _ => None,
        }
    }

    /// Extracts the switcher state from the result.
    #[must_use]
    pub fn into_switcher_state(self) -> Option<SwitcherState> {
        match self {
            Self::SwitcherState(state) => Some(state),
            _ => None,
        }
    }

    /// Extracts shortcut assignments from the result.
    #[must_use]
    pub fn into_assignments(self) -> Option<Vec<(char, WindowHandle)>> {
        match self {
            Self::Assignments(assignments) => Some(assignments),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names() {
        assert_eq!(TilingMessage::Rebalance.name(), "Rebalance");
        assert_eq!(
            TilingMessage::Window(WindowEvent::FocusChanged(None)).name(),
            "FocusChanged"
        );
    }

    #[test]
    fn test_query_result_accessors() {
        assert_eq!(QueryResult::Groups(Vec::new()).into_groups(), Some(Vec::new()));
        assert_eq!(QueryResult::Groups(Vec::new()).into_switcher_state(), None);
        assert_eq!(
            QueryResult::SwitcherState(SwitcherState::Close).into_switcher_state(),
            Some(SwitcherState::Close)
        );
    }
}
