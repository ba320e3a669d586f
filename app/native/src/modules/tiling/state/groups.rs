//! Split-group registry.
//!
//! A split group is a set of windows sharing the screen side by side. The
//! registry keeps the group set and the handle → group membership map in
//! lockstep: every handle belongs to at most one group, and a group that
//! falls below two members is dissolved along with its membership entries.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;
use uuid::Uuid;

use super::types::WindowHandle;

/// Inline capacity for group members.
pub const GROUP_INLINE_CAP: usize = 4;

/// Members of a split group, in slot order at creation time.
pub type GroupMembers = SmallVec<[WindowHandle; GROUP_INLINE_CAP]>;

/// Stable identifier of a split group.
///
/// Identifiers are time-ordered, so iterating groups by id visits them in
/// creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupId(Uuid);

impl GroupId {
    fn new() -> Self { Self(Uuid::now_v7()) }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// A set of windows tiled side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitGroup {
    pub id: GroupId,
    pub members: GroupMembers,
}

impl SplitGroup {
    /// Returns `true` if `handle` is a member.
    #[must_use]
    pub fn contains(&self, handle: WindowHandle) -> bool { self.members.contains(&handle) }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize { self.members.len() }

    /// Returns `true` if the group has no members left.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.members.is_empty() }
}

/// Outcome of removing a handle from its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// Group the handle was removed from.
    pub group: GroupId,
    /// Whether the group was dissolved as a result.
    pub dissolved: bool,
    /// Members released by dissolution (excluding the removed handle).
    pub released: GroupMembers,
}

/// Registry of split groups and their membership.
#[derive(Debug, Default)]
pub struct SplitGroups {
    groups: BTreeMap<GroupId, SplitGroup>,
    membership: HashMap<WindowHandle, GroupId>,
}

impl SplitGroups {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers a group of `members`.
    ///
    /// Duplicates are dropped. Returns `None` when fewer than two distinct
    /// handles remain or when one of them already belongs to a group; callers
    /// detach windows from their previous group first.
    pub fn create(&mut self, members: &[WindowHandle]) -> Option<GroupId> {
        let mut unique = GroupMembers::new();
        for &handle in members {
            if !unique.contains(&handle) {
                unique.push(handle);
            }
        }

        if unique.len() < 2 || unique.iter().any(|h| self.membership.contains_key(h)) {
            return None;
        }

        let id = GroupId::new();
        for &handle in &unique {
            self.membership.insert(handle, id);
        }
        self.groups.insert(id, SplitGroup { id, members: unique });
        Some(id)
    }

    /// Removes `handle` from its group.
    ///
    /// When fewer than two members remain and `dissolve_if_under_two` is set,
    /// the group is dissolved and its remaining members are released. An empty
    /// group is always dropped. Returns `None` if `handle` was not grouped.
    pub fn remove(&mut self, handle: WindowHandle, dissolve_if_under_two: bool) -> Option<Removal> {
        let group_id = self.membership.remove(&handle)?;
        let group = self.groups.get_mut(&group_id)?;
        group.members.retain(|h| *h != handle);

        let dissolve = group.is_empty() || (dissolve_if_under_two && group.len() < 2);
        if !dissolve {
            return Some(Removal {
                group: group_id,
                dissolved: false,
                released: GroupMembers::new(),
            });
        }

        let released = self.dissolve(group_id);
        Some(Removal {
            group: group_id,
            dissolved: true,
            released,
        })
    }

    /// Dissolves a group, purging every membership entry.
    ///
    /// Returns the members that were released.
    pub fn dissolve(&mut self, id: GroupId) -> GroupMembers {
        let Some(group) = self.groups.remove(&id) else {
            return GroupMembers::new();
        };
        for handle in &group.members {
            self.membership.remove(handle);
        }
        group.members
    }

    /// Returns the group `handle` belongs to.
    #[must_use]
    pub fn group_of(&self, handle: WindowHandle) -> Option<GroupId> {
        self.membership.get(&handle).copied()
    }

    /// Returns a group by id.
    #[must_use]
    pub fn get(&self, id: GroupId) -> Option<&SplitGroup> { self.groups.get(&id) }

    /// Iterates groups in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &SplitGroup> { self.groups.values() }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize { self.groups.len() }

    /// Returns `true` if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.groups.is_empty() }
}
