//! Focus synchronizer.
//!
//! When focus lands on a member of a split group, the other members should
//! come forward with it. This happens once per continuous stay in the group:
//! moving focus between members of the same group does nothing, leaving the
//! group and coming back brings it forward again.

use smallvec::SmallVec;

use super::state::{GroupId, GroupMembers, SplitGroups, WindowHandle};

/// Focus-sync state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusState {
    /// Focus is outside every group.
    #[default]
    NoActiveGroup,
    /// Focus is inside `group`.
    ActiveGroup {
        group: GroupId,
        brought_to_front: bool,
    },
}

impl FocusState {
    /// The group focus is currently in.
    #[must_use]
    pub const fn active_group(&self) -> Option<GroupId> {
        match self {
            Self::NoActiveGroup => None,
            Self::ActiveGroup { group, .. } => Some(*group),
        }
    }
}

/// Windows to activate, in order; the focused window comes last.
pub type ActivationOrder = SmallVec<[WindowHandle; 4]>;

/// Tracks which group focus is in and whether it was brought forward.
#[derive(Debug, Default)]
pub struct FocusSync {
    state: FocusState,
}

impl FocusSync {
    /// Creates a synchronizer with no active group.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> FocusState { self.state }

    /// Updates the state for a focus change.
    ///
    /// Returns the activation order when the group has to be brought forward.
    pub fn on_focus_changed(
        &mut self,
        focused: Option<WindowHandle>,
        groups: &SplitGroups,
    ) -> Option<ActivationOrder> {
        let Some(handle) = focused else {
            self.state = FocusState::NoActiveGroup;
            return None;
        };
        let Some(group_id) = groups.group_of(handle) else {
            self.state = FocusState::NoActiveGroup;
            return None;
        };

        if self.state.active_group() != Some(group_id) {
            self.state = FocusState::ActiveGroup {
                group: group_id,
                brought_to_front: false,
            };
        }

        if let FocusState::ActiveGroup { brought_to_front: true, .. } = self.state {
            return None;
        }

        let members: &GroupMembers = &groups.get(group_id)?.members;
        let mut order: ActivationOrder = members.iter().copied().filter(|h| *h != handle).collect();
        order.push(handle);

        self.state = FocusState::ActiveGroup {
            group: group_id,
            brought_to_front: true,
        };
        Some(order)
    }

    /// Marks `group` as already brought forward.
    pub fn prime(&mut self, group: GroupId) {
        self.state = FocusState::ActiveGroup {
            group,
            brought_to_front: true,
        };
    }

    /// Resets to no active group if `group` was the active one.
    pub fn forget_group(&mut self, group: GroupId) {
        if self.state.active_group() == Some(group) {
            self.state = FocusState::NoActiveGroup;
        }
    }
}
