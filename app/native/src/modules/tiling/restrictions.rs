//! Size restriction tracking.
//!
//! Some windows refuse to reach the size they are asked for (fixed-size
//! dialogs, apps with a maximum content size). When a resize undershoots,
//! the engine records what the window actually achieved so later placements
//! can go straight to a size the window accepts.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::state::{Size, WindowHandle};

/// Achievable size range observed for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRestriction {
    pub handle: WindowHandle,
    /// Largest size observed.
    pub max_size: Size,
    /// Smallest size observed.
    pub min_size: Size,
    pub owner: String,
    #[serde(skip)]
    pub detected_at: Instant,
}

impl SizeRestriction {
    /// Returns `true` if the window was seen at more than one size.
    #[must_use]
    pub fn can_resize(&self) -> bool { self.max_size.exceeds(self.min_size) }
}

/// Restrictions by window, expiring after a retention window.
#[derive(Debug)]
pub struct SizeRestrictionTracker {
    entries: HashMap<WindowHandle, SizeRestriction>,
    retention: Duration,
}

impl SizeRestrictionTracker {
    /// Creates a tracker that keeps entries for `retention`.
    #[must_use]
    pub fn new(retention: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            retention,
        }
    }

    /// Records (or replaces) the restriction for its window.
    pub fn record(&mut self, restriction: SizeRestriction) {
        tracing::debug!(
            handle = %restriction.handle,
            owner = %restriction.owner,
            max = %restriction.max_size,
            min = %restriction.min_size,
            can_resize = restriction.can_resize(),
            "recorded size restriction"
        );
        self.entries.insert(restriction.handle, restriction);
    }

    /// Returns the restriction recorded for `handle`.
    #[must_use]
    pub fn get(&self, handle: WindowHandle) -> Option<&SizeRestriction> { self.entries.get(&handle) }

    /// Forgets the restriction for `handle`.
    pub fn remove(&mut self, handle: WindowHandle) -> Option<SizeRestriction> {
        self.entries.remove(&handle)
    }

    /// Drops restrictions older than the retention window. Returns how many were dropped.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let retention = self.retention;
        self.entries
            .retain(|_, r| now.saturating_duration_since(r.detected_at) < retention);
        let pruned = before - self.entries.len();
        if pruned > 0 {
            tracing::debug!(pruned, "pruned expired size restrictions");
        }
        pruned
    }

    /// Drops every restriction belonging to `owner`.
    pub fn forget_owner(&mut self, owner: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, r| r.owner != owner);
        before - self.entries.len()
    }

    /// Number of recorded restrictions.
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Returns `true` if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restriction(raw: u64, owner: &str, at: Instant) -> SizeRestriction {
        SizeRestriction {
            handle: WindowHandle::from_raw(raw),
            max_size: Size::new(800.0, 600.0),
            min_size: Size::new(800.0, 600.0),
            owner: owner.to_string(),
            detected_at: at,
        }
    }

    #[test]
    fn test_can_resize() {
        let mut r = restriction(1, "App", Instant::now());
        assert!(!r.can_resize());
        r.max_size = Size::new(900.0, 600.0);
        assert!(r.can_resize());
    }

    #[test]
    fn test_prune_drops_expired() {
        let start = Instant::now();
        let mut tracker = SizeRestrictionTracker::new(Duration::from_secs(60));
        tracker.record(restriction(1, "App", start));
        tracker.record(restriction(2, "App", start + Duration::from_secs(30)));

        assert_eq!(tracker.prune(start + Duration::from_secs(59)), 0);
        assert_eq!(tracker.prune(start + Duration::from_secs(60)), 1);
        assert!(tracker.get(WindowHandle::from_raw(1)).is_none());
        assert!(tracker.get(WindowHandle::from_raw(2)).is_some());
    }

    #[test]
    fn test_forget_owner() {
        let now = Instant::now();
        let mut tracker = SizeRestrictionTracker::new(Duration::from_secs(60));
        tracker.record(restriction(1, "Calculator", now));
        tracker.record(restriction(2, "Calculator", now));
        tracker.record(restriction(3, "Editor", now));

        assert_eq!(tracker.forget_owner("Calculator"), 2);
        assert_eq!(tracker.len(), 1);
    }
}
