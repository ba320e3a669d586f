//! Split rebalancer.
//!
//! Users resize panes of a split group by hand. Each pass compares member
//! frames with the frames seen on the previous pass; when a member shrank on
//! its own, the space it freed is handed to a neighbor so the group keeps
//! covering its slot area. Windows the rebalancer just resized are ignored
//! for a cooldown, so its own adjustments are never mistaken for user input.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use smallvec::SmallVec;

use super::state::{Rect, SplitGroups, WindowHandle};
use super::surface::WindowSurface;
use crate::config::RebalanceConfig;

#[derive(Debug, Clone, Copy)]
struct Tracked {
    bounds: Rect,
    adjusted_at: Option<Instant>,
}

/// Which neighbor absorbs a freed gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Periodic pass that redistributes space inside split groups.
#[derive(Debug)]
pub struct Rebalancer {
    tolerance: f64,
    cooldown: Duration,
    tracking: HashMap<WindowHandle, Tracked>,
}

impl Rebalancer {
    /// Creates a rebalancer from its configuration.
    #[must_use]
    pub fn new(config: &RebalanceConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            cooldown: Duration::from_millis(config.cooldown_ms),
            tracking: HashMap::new(),
        }
    }

    /// Forgets everything known about `handle`.
    pub fn forget(&mut self, handle: WindowHandle) { self.tracking.remove(&handle); }

    /// Last frame recorded for `handle`.
    #[must_use]
    pub fn tracked_bounds(&self, handle: WindowHandle) -> Option<Rect> {
        self.tracking.get(&handle).map(|t| t.bounds)
    }

    fn recently_adjusted(&self, handle: WindowHandle, now: Instant) -> bool {
        self.tracking
            .get(&handle)
            .and_then(|t| t.adjusted_at)
            .is_some_and(|at| now.saturating_duration_since(at) < self.cooldown)
    }

    fn user_resized(&self, handle: WindowHandle, bounds: Rect, now: Instant) -> bool {
        let Some(previous) = self.tracking.get(&handle) else {
            return false;
        };
        let changed = (bounds.width - previous.bounds.width).abs() > self.tolerance
            || (bounds.height - previous.bounds.height).abs() > self.tolerance;
        changed && !self.recently_adjusted(handle, now)
    }

    /// Runs one pass over every group. Returns the number of neighbors resized.
    pub fn run(
        &mut self,
        groups: &SplitGroups,
        surface: &dyn WindowSurface,
        padding: f64,
        now: Instant,
    ) -> usize {
        let mut adjusted = 0;
        for group in groups.iter() {
            let mut frames: SmallVec<[(WindowHandle, Rect); 4]> = group
                .members
                .iter()
                .filter_map(|&h| surface.bounds(h).map(|b| (h, b)))
                .collect();
            if frames.len() < 2 {
                tracing::trace!(group = %group.id, "skipping group with fewer than two readable members");
                continue;
            }
            frames.sort_by(|a, b| a.1.x.total_cmp(&b.1.x));

            let candidates: SmallVec<[usize; 4]> = frames
                .iter()
                .enumerate()
                .filter(|(_, (h, b))| self.user_resized(*h, *b, now))
                .map(|(i, _)| i)
                .collect();

            for index in candidates {
                // An earlier candidate may have resized this one during the pass
                if self.recently_adjusted(frames[index].0, now) {
                    continue;
                }
                if let Some(neighbor) = self.absorb_gap(&mut frames, index, surface, padding, now) {
                    tracing::debug!(
                        group = %group.id,
                        resized = %frames[index].0,
                        neighbor = %frames[neighbor].0,
                        "rebalanced split neighbor"
                    );
                    adjusted += 1;
                }
            }

            for (handle, bounds) in frames {
                let adjusted_at = self.tracking.get(&handle).and_then(|t| t.adjusted_at);
                self.tracking.insert(handle, Tracked { bounds, adjusted_at });
            }
        }
        adjusted
    }

    /// Expands the chosen neighbor of `frames[index]` into the gap next to it.
    fn absorb_gap(
        &mut self,
        frames: &mut [(WindowHandle, Rect)],
        index: usize,
        surface: &dyn WindowSurface,
        padding: f64,
        now: Instant,
    ) -> Option<usize> {
        let own = frames[index].1;
        let left_gap = index
            .checked_sub(1)
            .map(|i| (own.x - frames[i].1.right() - padding).max(0.0));
        let right_gap = frames
            .get(index + 1)
            .map(|(_, r)| (r.x - own.right() - padding).max(0.0));

        let (side, gap) = match (left_gap, right_gap) {
            (Some(left), Some(right)) if frames.len() > 2 && left > right => (Side::Left, left),
            (_, Some(right)) => (Side::Right, right),
            (Some(left), None) => (Side::Left, left),
            (None, None) => return None,
        };
        if gap <= self.tolerance {
            return None;
        }

        let neighbor = match side {
            Side::Left => index - 1,
            Side::Right => index + 1,
        };
        let (handle, current) = frames[neighbor];
        let expanded = match side {
            Side::Right => Rect::new(current.x - gap, current.y, current.width + gap, current.height),
            Side::Left => Rect::new(current.x, current.y, current.width + gap, current.height),
        };

        if side == Side::Right {
            if let Err(err) = surface.move_to(handle, expanded.origin()) {
                tracing::warn!(%handle, %err, "failed to move split neighbor");
                return None;
            }
        }
        if let Err(err) = surface.resize(handle, expanded.size()) {
            tracing::warn!(%handle, %err, "failed to resize split neighbor");
            return None;
        }

        frames[neighbor].1 = expanded;
        self.tracking.insert(handle, Tracked {
            bounds: expanded,
            adjusted_at: Some(now),
        });
        Some(neighbor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::tiling::testing::FakeSurface;

    const PAD: f64 = 8.0;

    fn rebalancer() -> Rebalancer { Rebalancer::new(&RebalanceConfig::default()) }

    fn columns(surface: &FakeSurface, frames: &[Rect]) -> (SplitGroups, Vec<WindowHandle>) {
        let handles: Vec<_> = frames
            .iter()
            .enumerate()
            .map(|(i, f)| surface.add_window("App", &format!("w{i}"), *f))
            .collect();
        let mut groups = SplitGroups::new();
        groups.create(&handles).unwrap();
        (groups, handles)
    }

    #[test]
    fn test_first_pass_only_seeds() {
        let surface = FakeSurface::full_hd();
        let (groups, handles) = columns(&surface, &[
            Rect::new(8.0, 8.0, 948.0, 1016.0),
            Rect::new(964.0, 8.0, 948.0, 1016.0),
        ]);
        let mut rebalancer = rebalancer();

        assert_eq!(rebalancer.run(&groups, &surface, PAD, Instant::now()), 0);
        assert!(surface.calls().is_empty());
        assert_eq!(
            rebalancer.tracked_bounds(handles[0]),
            Some(Rect::new(8.0, 8.0, 948.0, 1016.0))
        );
    }

    #[test]
    fn test_two_members_shrinking_left_grows_right() {
        let surface = FakeSurface::full_hd();
        let (groups, handles) = columns(&surface, &[
            Rect::new(8.0, 8.0, 948.0, 1016.0),
            Rect::new(964.0, 8.0, 948.0, 1016.0),
        ]);
        let mut rebalancer = rebalancer();
        let start = Instant::now();
        rebalancer.run(&groups, &surface, PAD, start);

        surface.set_bounds(handles[0], Rect::new(8.0, 8.0, 748.0, 1016.0));
        let later = start + Duration::from_secs(2);
        assert_eq!(rebalancer.run(&groups, &surface, PAD, later), 1);

        // Left shrank by 200, so the right pane grows by exactly 200
        let right = surface.bounds(handles[1]).unwrap();
        assert_eq!(right, Rect::new(764.0, 8.0, 1148.0, 1016.0));
        assert_eq!(right.width - 948.0, 200.0);
        assert_eq!(surface.bounds(handles[0]), Some(Rect::new(8.0, 8.0, 748.0, 1016.0)));
    }

    #[test]
    fn test_two_members_shrinking_right_grows_left() {
        let surface = FakeSurface::full_hd();
        let (groups, handles) = columns(&surface, &[
            Rect::new(8.0, 8.0, 948.0, 1016.0),
            Rect::new(964.0, 8.0, 948.0, 1016.0),
        ]);
        let mut rebalancer = rebalancer();
        let start = Instant::now();
        rebalancer.run(&groups, &surface, PAD, start);

        // Dragging the left edge of the right pane
        surface.set_bounds(handles[1], Rect::new(1164.0, 8.0, 748.0, 1016.0));
        rebalancer.run(&groups, &surface, PAD, start + Duration::from_secs(2));

        assert_eq!(surface.bounds(handles[0]), Some(Rect::new(8.0, 8.0, 1148.0, 1016.0)));
    }

    #[test]
    fn test_adjusted_neighbor_is_not_a_candidate_during_cooldown() {
        let surface = FakeSurface::full_hd();
        let (groups, handles) = columns(&surface, &[
            Rect::new(8.0, 8.0, 948.0, 1016.0),
            Rect::new(964.0, 8.0, 948.0, 1016.0),
        ]);
        let mut rebalancer = rebalancer();
        let start = Instant::now();
        rebalancer.run(&groups, &surface, PAD, start);
        surface.set_bounds(handles[0], Rect::new(8.0, 8.0, 748.0, 1016.0));
        rebalancer.run(&groups, &surface, PAD, start + Duration::from_secs(2));
        surface.clear_calls();

        // Nothing changed since; the grown neighbor must not push back
        assert_eq!(rebalancer.run(&groups, &surface, PAD, start + Duration::from_secs(4)), 0);
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn test_three_members_larger_gap_wins() {
        let surface = FakeSurface::full_hd();
        let (groups, handles) = columns(&surface, &[
            Rect::new(8.0, 8.0, 624.0, 1016.0),
            Rect::new(640.0, 8.0, 624.0, 1016.0),
            Rect::new(1272.0, 8.0, 640.0, 1016.0),
        ]);
        let mut rebalancer = rebalancer();
        let start = Instant::now();
        rebalancer.run(&groups, &surface, PAD, start);

        // Middle pane shrinks from the left edge only: left gap 100, right gap 0
        surface.set_bounds(handles[1], Rect::new(740.0, 8.0, 524.0, 1016.0));
        rebalancer.run(&groups, &surface, PAD, start + Duration::from_secs(2));

        assert_eq!(surface.bounds(handles[0]), Some(Rect::new(8.0, 8.0, 724.0, 1016.0)));
        assert_eq!(surface.bounds(handles[2]), Some(Rect::new(1272.0, 8.0, 640.0, 1016.0)));
    }

    #[test]
    fn test_three_members_tie_goes_right() {
        let surface = FakeSurface::full_hd();
        let (groups, handles) = columns(&surface, &[
            Rect::new(8.0, 8.0, 624.0, 1016.0),
            Rect::new(640.0, 8.0, 624.0, 1016.0),
            Rect::new(1272.0, 8.0, 640.0, 1016.0),
        ]);
        let mut rebalancer = rebalancer();
        let start = Instant::now();
        rebalancer.run(&groups, &surface, PAD, start);

        surface.set_bounds(handles[1], Rect::new(690.0, 8.0, 524.0, 1016.0));
        rebalancer.run(&groups, &surface, PAD, start + Duration::from_secs(2));

        assert_eq!(surface.bounds(handles[2]), Some(Rect::new(1222.0, 8.0, 690.0, 1016.0)));
        assert_eq!(surface.bounds(handles[0]), Some(Rect::new(8.0, 8.0, 624.0, 1016.0)));
    }

    #[test]
    fn test_no_member_shrinks_across_passes() {
        let surface = FakeSurface::full_hd();
        let (groups, handles) = columns(&surface, &[
            Rect::new(8.0, 8.0, 624.0, 1016.0),
            Rect::new(640.0, 8.0, 624.0, 1016.0),
            Rect::new(1272.0, 8.0, 640.0, 1016.0),
        ]);
        let mut rebalancer = rebalancer();
        let mut now = Instant::now();
        rebalancer.run(&groups, &surface, PAD, now);

        let drags = [
            (0, Rect::new(8.0, 8.0, 500.0, 1016.0)),
            (2, Rect::new(1400.0, 8.0, 512.0, 1016.0)),
            (1, Rect::new(700.0, 8.0, 400.0, 1016.0)),
        ];
        for (index, frame) in drags {
            surface.set_bounds(handles[index], frame);
            let before: Vec<_> = handles.iter().map(|h| surface.bounds(*h).unwrap()).collect();
            now += Duration::from_secs(3);
            rebalancer.run(&groups, &surface, PAD, now);
            for (h, prior) in handles.iter().zip(&before) {
                assert!(surface.bounds(*h).unwrap().width >= prior.width, "{h} shrank");
            }
        }
    }

    #[test]
    fn test_unreadable_member_is_skipped_for_the_pass() {
        let surface = FakeSurface::full_hd();
        let (groups, handles) = columns(&surface, &[
            Rect::new(8.0, 8.0, 948.0, 1016.0),
            Rect::new(964.0, 8.0, 948.0, 1016.0),
        ]);
        let mut rebalancer = rebalancer();
        let start = Instant::now();
        rebalancer.run(&groups, &surface, PAD, start);

        surface.set_bounds(handles[0], Rect::new(8.0, 8.0, 748.0, 1016.0));
        surface.set_bounds_readable(handles[1], false);
        assert_eq!(rebalancer.run(&groups, &surface, PAD, start + Duration::from_secs(2)), 0);

        surface.set_bounds_readable(handles[1], true);
        assert_eq!(rebalancer.run(&groups, &surface, PAD, start + Duration::from_secs(4)), 1);
    }
}
