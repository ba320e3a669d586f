//! Window placement with verification and size probing.
//!
//! A placement is a move followed by a resize. The window system may apply
//! either partially or not at all, so a placement is verified by reading the
//! frame back after a settle delay. When a fullscreen placement falls short,
//! the window is probed with a fixed set of candidate sizes to find the
//! largest size it accepts, and re-centered at that size.

use std::time::Duration;

use smallvec::SmallVec;

use super::TilingEngine;
use crate::modules::tiling::constants::{probe, timing};
use crate::modules::tiling::error::{TilingError, TilingResult};
use crate::modules::tiling::restrictions::SizeRestriction;
use crate::modules::tiling::scheduler::ScheduledTask;
use crate::modules::tiling::state::{Rect, Size, WindowHandle};

/// What a placement is for; decides how a size mismatch is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// Whole available area; a mismatch starts a probe.
    Fullscreen,
    /// One slot of a split; a mismatch is only recorded.
    Slot,
}

/// Progress of a size probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeState {
    pub handle: WindowHandle,
    /// Frame the window was originally asked to fill.
    pub target: Rect,
    candidates: SmallVec<[Size; 5]>,
    next: usize,
    largest: Size,
    smallest: Size,
}

impl ProbeState {
    /// Starts a probe for a window currently at `current`.
    ///
    /// Candidates are fractions of the target followed by growth steps from
    /// the current size.
    #[must_use]
    pub fn new(handle: WindowHandle, target: Rect, current: Size) -> Self {
        let candidates = probe::TARGET_FACTORS
            .iter()
            .map(|f| target.size().scaled(*f))
            .chain(probe::CURRENT_FACTORS.iter().map(|f| current.scaled(*f)))
            .collect();
        Self {
            handle,
            target,
            candidates,
            next: 0,
            largest: current,
            smallest: current,
        }
    }

    /// Takes the next size to try.
    pub fn next_candidate(&mut self) -> Option<Size> {
        let candidate = self.candidates.get(self.next).copied()?;
        self.next += 1;
        Some(candidate)
    }

    /// Records a size the window was seen at.
    pub fn observe(&mut self, size: Size) {
        if size.area() > self.largest.area() {
            self.largest = size;
        }
        if size.area() < self.smallest.area() {
            self.smallest = size;
        }
    }

    /// Largest size observed so far.
    #[must_use]
    pub const fn largest(&self) -> Size { self.largest }

    /// Smallest size observed so far.
    #[must_use]
    pub const fn smallest(&self) -> Size { self.smallest }
}

impl TilingEngine {
    /// Places `handle` at `target`.
    ///
    /// Hard surface failures abort with an error. A failed or short resize is
    /// handled according to `mode` and is not an error.
    pub(super) fn place(
        &mut self,
        handle: WindowHandle,
        target: Rect,
        mode: PlacementMode,
    ) -> TilingResult<()> {
        let known_max = self.restrictions.get(handle).map(|r| r.max_size);
        if let Some(max_size) = known_max.filter(|max| target.size().exceeds(*max)) {
            let frame = target.centered(max_size);
            tracing::debug!(%handle, %frame, "placing restricted window at its known maximum");
            return self.apply_frame(handle, frame);
        }

        match self.surface.move_to(handle, target.origin()) {
            Ok(()) => {}
            Err(err) if err.is_hard() => return Err(TilingError::from_surface(handle, err)),
            Err(err) => tracing::warn!(%handle, %err, "move failed, resizing anyway"),
        }

        match self.surface.resize(handle, target.size()) {
            Ok(()) => {
                tracing::debug!(%handle, %target, ?mode, "window placed");
                self.schedule(
                    timing::SETTLE_DELAY_MS,
                    ScheduledTask::VerifyPlacement { handle, target, mode },
                );
                Ok(())
            }
            Err(err) if err.is_hard() => Err(TilingError::from_surface(handle, err)),
            Err(err) => {
                tracing::warn!(%handle, %err, "resize failed");
                self.on_size_mismatch(handle, target, mode);
                Ok(())
            }
        }
    }

    /// Moves and resizes without verification.
    pub(super) fn apply_frame(&mut self, handle: WindowHandle, frame: Rect) -> TilingResult<()> {
        match self.surface.move_to(handle, frame.origin()) {
            Ok(()) => {}
            Err(err) if err.is_hard() => return Err(TilingError::from_surface(handle, err)),
            Err(err) => tracing::warn!(%handle, %err, "move failed"),
        }
        match self.surface.resize(handle, frame.size()) {
            Ok(()) => Ok(()),
            Err(err) if err.is_hard() => Err(TilingError::from_surface(handle, err)),
            Err(err) => {
                tracing::warn!(%handle, %err, "resize failed");
                Ok(())
            }
        }
    }

    /// Compares a settled window against its target.
    pub(super) fn verify_placement(&mut self, handle: WindowHandle, target: Rect, mode: PlacementMode) {
        let Some(actual) = self.surface.bounds(handle) else {
            tracing::debug!(%handle, "window gone before verification");
            return;
        };
        if actual.size().approx_eq(target.size(), self.config.verify_tolerance) {
            tracing::trace!(%handle, "placement verified");
            return;
        }
        tracing::debug!(%handle, expected = %target.size(), actual = %actual.size(), "window did not reach target size");
        self.on_size_mismatch(handle, target, mode);
    }

    fn on_size_mismatch(&mut self, handle: WindowHandle, target: Rect, mode: PlacementMode) {
        let Some(current) = self.surface.bounds(handle) else {
            return;
        };
        match mode {
            PlacementMode::Fullscreen => {
                tracing::debug!(%handle, "probing achievable size");
                self.advance_probe(ProbeState::new(handle, target, current.size()));
            }
            PlacementMode::Slot => {
                let size = current.size();
                self.record_restriction(handle, size, size);
            }
        }
    }

    /// Reads back the last candidate and continues the probe.
    pub(super) fn probe_step(&mut self, mut probe: ProbeState) {
        let Some(observed) = self.surface.bounds(probe.handle) else {
            tracing::debug!(handle = %probe.handle, "window gone during probe");
            return;
        };
        probe.observe(observed.size());
        self.advance_probe(probe);
    }

    fn advance_probe(&mut self, mut probe: ProbeState) {
        let Some(candidate) = probe.next_candidate() else {
            self.finish_probe(&probe);
            return;
        };
        match self.surface.resize(probe.handle, candidate) {
            Err(err) if err.is_hard() => {
                tracing::warn!(handle = %probe.handle, %err, "probe aborted");
            }
            result => {
                if let Err(err) = result {
                    tracing::trace!(handle = %probe.handle, %err, %candidate, "probe candidate rejected");
                }
                self.schedule(timing::PROBE_STEP_DELAY_MS, ScheduledTask::ProbeStep(probe));
            }
        }
    }

    fn finish_probe(&mut self, probe: &ProbeState) {
        let handle = probe.handle;
        self.record_restriction(handle, probe.largest(), probe.smallest());

        let frame = probe.target.centered(probe.largest());
        if let Err(err) = self.apply_frame(handle, frame) {
            tracing::warn!(%handle, %err, "failed to re-center probed window");
        }
    }

    pub(super) fn record_restriction(&mut self, handle: WindowHandle, max_size: Size, min_size: Size) {
        let owner = self.owner_of(handle);
        let detected_at = self.clock.now();
        self.restrictions.record(SizeRestriction {
            handle,
            max_size,
            min_size,
            owner,
            detected_at,
        });
    }

    pub(super) fn schedule(&mut self, delay_ms: u64, task: ScheduledTask) {
        let now = self.clock.now();
        self.scheduler.schedule_after(now, Duration::from_millis(delay_ms), task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_candidates() {
        let target = Rect::new(8.0, 8.0, 1000.0, 500.0);
        let mut probe = ProbeState::new(WindowHandle::from_raw(1), target, Size::new(400.0, 300.0));
        let candidates: Vec<_> = std::iter::from_fn(|| probe.next_candidate()).collect();
        assert_eq!(candidates, vec![
            Size::new(900.0, 450.0),
            Size::new(800.0, 400.0),
            Size::new(700.0, 350.0),
            Size::new(480.0, 360.0),
            Size::new(440.0, 330.0),
        ]);
    }

    #[test]
    fn test_probe_tracks_extremes() {
        let target = Rect::new(0.0, 0.0, 1000.0, 500.0);
        let mut probe = ProbeState::new(WindowHandle::from_raw(1), target, Size::new(600.0, 400.0));
        probe.observe(Size::new(800.0, 400.0));
        probe.observe(Size::new(500.0, 400.0));
        probe.observe(Size::new(700.0, 400.0));
        assert_eq!(probe.largest(), Size::new(800.0, 400.0));
        assert_eq!(probe.smallest(), Size::new(500.0, 400.0));
    }
}
