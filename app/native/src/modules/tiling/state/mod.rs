//! Tiling state.
//!
//! Value types shared across the tiling modules and the split-group registry.

pub mod groups;
pub mod types;

pub use groups::{GroupId, GroupMembers, Removal, SplitGroup, SplitGroups};
pub use types::{Point, Rect, Size, WindowDescriptor, WindowHandle};
