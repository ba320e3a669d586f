//! The tiling engine.
//!
//! [`TilingEngine`] owns every piece of tiling state: split groups, size
//! restrictions, rebalance tracking, focus-sync state and the queue of
//! deferred continuations. All mutations go through its methods, which the
//! actor calls one message at a time.
//!
//! # Operations
//!
//! - [`handle_new_window`](TilingEngine::handle_new_window): fullscreen a new window
//! - [`execute_split`](TilingEngine::execute_split): tile windows side by side as a group
//! - [`remove_member`](TilingEngine::remove_member): take a window out of its group
//! - [`prevent_overlap`](TilingEngine::prevent_overlap): keep windows off the taskbar
//! - [`rebalance`](TilingEngine::rebalance): hand freed space to split neighbors
//! - [`on_focus_changed`](TilingEngine::on_focus_changed): bring focused groups forward

pub mod overlap;
pub mod placement;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub use overlap::overlap_adjustment;
pub use placement::{PlacementMode, ProbeState};
use regex::Regex;
use smallvec::SmallVec;

use super::actor::WindowEvent;
use super::constants::timing;
use super::error::{TilingError, TilingResult};
use super::focus_sync::{FocusState, FocusSync};
use super::layout::LayoutGeometry;
use super::rebalance::Rebalancer;
use super::restrictions::{SizeRestriction, SizeRestrictionTracker};
use super::scheduler::{ScheduledTask, Scheduler};
use super::state::{GroupId, Rect, SplitGroup, SplitGroups, WindowDescriptor, WindowHandle};
use super::surface::WindowSurface;
use crate::config::{RebalanceConfig, SwitchbarConfig, TilingConfig};
use crate::utils::clock::Clock;

/// Window placement and split-group lifecycle.
pub struct TilingEngine {
    surface: Arc<dyn WindowSurface>,
    clock: Arc<dyn Clock>,
    config: TilingConfig,
    rebalance_config: RebalanceConfig,
    skip_titles: Vec<Regex>,
    groups: SplitGroups,
    restrictions: SizeRestrictionTracker,
    rebalancer: Rebalancer,
    focus: FocusSync,
    scheduler: Scheduler,
    /// Windows the engine has admitted, with their owner.
    tracked: HashMap<WindowHandle, String>,
}

impl TilingEngine {
    /// Creates an engine driving `surface`.
    #[must_use]
    pub fn new(surface: Arc<dyn WindowSurface>, config: &SwitchbarConfig, clock: Arc<dyn Clock>) -> Self {
        let skip_titles = config
            .tiling
            .skip_titles
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    tracing::warn!(%pattern, %err, "ignoring invalid skip title pattern");
                    None
                }
            })
            .collect();

        Self {
            surface,
            clock,
            skip_titles,
            groups: SplitGroups::new(),
            restrictions: SizeRestrictionTracker::new(Duration::from_secs(
                config.tiling.restriction_retention_secs,
            )),
            rebalancer: Rebalancer::new(&config.rebalance),
            focus: FocusSync::new(),
            scheduler: Scheduler::new(),
            tracked: HashMap::new(),
            config: config.tiling.clone(),
            rebalance_config: config.rebalance.clone(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Current split groups.
    #[must_use]
    pub const fn groups(&self) -> &SplitGroups { &self.groups }

    /// Snapshot of every group, in creation order.
    #[must_use]
    pub fn group_snapshot(&self) -> Vec<SplitGroup> { self.groups.iter().cloned().collect() }

    /// Group `handle` belongs to.
    #[must_use]
    pub fn group_of(&self, handle: WindowHandle) -> Option<GroupId> { self.groups.group_of(handle) }

    /// Size restriction recorded for `handle`.
    #[must_use]
    pub fn restriction(&self, handle: WindowHandle) -> Option<&SizeRestriction> {
        self.restrictions.get(handle)
    }

    /// Focus-sync state.
    #[must_use]
    pub const fn focus_state(&self) -> FocusState { self.focus.state() }

    /// Earliest deadline among deferred continuations.
    #[must_use]
    pub fn next_deadline(&self) -> Option<std::time::Instant> { self.scheduler.next_deadline() }

    /// Number of deferred continuations waiting.
    #[must_use]
    pub fn pending_tasks(&self) -> usize { self.scheduler.len() }

    /// Tiling configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &TilingConfig { &self.config }

    /// Rebalance configuration in effect.
    #[must_use]
    pub const fn rebalance_config(&self) -> &RebalanceConfig { &self.rebalance_config }

    /// Visible windows the user can switch to.
    #[must_use]
    pub fn switchable_windows(&self) -> Vec<WindowDescriptor> {
        self.surface
            .query_windows(true)
            .into_iter()
            .filter(|w| self.identity_skip_reason(w).is_none())
            .collect()
    }

    fn geometry(&self) -> TilingResult<LayoutGeometry> {
        LayoutGeometry::from_config(self.surface.screen_frame(), &self.config)
    }

    fn owner_of(&self, handle: WindowHandle) -> String {
        if let Some(owner) = self.tracked.get(&handle) {
            return owner.clone();
        }
        self.surface
            .query_windows(false)
            .into_iter()
            .find(|w| w.handle == handle)
            .map(|w| w.owner_name)
            .unwrap_or_default()
    }

    // ========================================================================
    // Skip rules
    // ========================================================================

    fn identity_skip_reason(&self, window: &WindowDescriptor) -> Option<&'static str> {
        if window.owner_name == self.config.own_process_name {
            return Some("own window");
        }
        if self.config.skip_owners.iter().any(|o| *o == window.owner_name) {
            return Some("skipped owner");
        }
        if self.skip_titles.iter().any(|r| r.is_match(&window.display_name)) {
            return Some("skipped title");
        }
        None
    }

    /// Returns why `window` (currently at `bounds`) must not be tiled.
    fn skip_reason(
        &self,
        window: &WindowDescriptor,
        bounds: Rect,
        screen: Option<Rect>,
    ) -> Option<&'static str> {
        if let Some(reason) = self.identity_skip_reason(window) {
            return Some(reason);
        }

        let min = self.config.min_window_size;
        if bounds.width < min.width || bounds.height < min.height {
            return Some("too small");
        }

        let oversized_owner = self.config.oversized_skip_owners.iter().any(|o| *o == window.owner_name);
        if oversized_owner {
            let tolerance = self.config.verify_tolerance;
            let screen_sized = screen.is_some_and(|s| {
                bounds.width >= s.width - tolerance && bounds.height >= s.height - tolerance
            });
            if screen_sized {
                return Some("oversized window");
            }
        }
        None
    }

    // ========================================================================
    // New windows
    // ========================================================================

    /// Tiles a newly created window to fullscreen.
    ///
    /// Skipped windows are ignored. A window whose frame cannot be read yet is
    /// retried after a delay, a bounded number of times.
    ///
    /// # Errors
    ///
    /// Returns an error when the screen geometry is unusable or the surface
    /// refused to touch the window.
    pub fn handle_new_window(&mut self, descriptor: WindowDescriptor) -> TilingResult<()> {
        self.admit_window(descriptor, 0)
    }

    fn admit_window(&mut self, descriptor: WindowDescriptor, attempt: u8) -> TilingResult<()> {
        let handle = descriptor.handle;
        if !self.config.enabled || !self.config.auto_fullscreen {
            tracing::trace!(%handle, "auto fullscreen disabled");
            return Ok(());
        }
        if let Some(reason) = self.identity_skip_reason(&descriptor) {
            tracing::debug!(%handle, owner = %descriptor.owner_name, reason, "skipping window");
            return Ok(());
        }

        let Some(bounds) = self.surface.bounds(handle) else {
            if attempt < timing::CREATION_RETRY_ATTEMPTS {
                tracing::debug!(%handle, attempt, "bounds not readable yet, retrying");
                self.schedule(timing::CREATION_RETRY_DELAY_MS, ScheduledTask::RetryNewWindow {
                    descriptor,
                    attempt: attempt + 1,
                });
            } else {
                tracing::debug!(%handle, "bounds never became readable, giving up");
            }
            return Ok(());
        };

        let screen = self.surface.screen_frame();
        if let Some(reason) = self.skip_reason(&descriptor, bounds, screen) {
            tracing::debug!(%handle, owner = %descriptor.owner_name, reason, "skipping window");
            return Ok(());
        }

        self.tracked.insert(handle, descriptor.owner_name);
        if self.groups.group_of(handle).is_some() {
            return Ok(());
        }

        let geometry = self.geometry()?;
        self.place(handle, geometry.fullscreen_bounds(), PlacementMode::Fullscreen)
    }

    /// Retiles a window to fullscreen, logging failures.
    fn retile(&mut self, handle: WindowHandle) {
        if self.surface.bounds(handle).is_none() {
            return;
        }
        let result = self
            .geometry()
            .and_then(|geometry| self.place(handle, geometry.fullscreen_bounds(), PlacementMode::Fullscreen));
        if let Err(err) = result {
            tracing::warn!(%handle, %err, "failed to retile window");
        }
    }

    // ========================================================================
    // Split groups
    // ========================================================================

    /// Tiles `windows` left to right in equal columns and groups them.
    ///
    /// Duplicates are dropped. Windows leave any group they were in first.
    /// A group is only registered for two or more windows. After a short
    /// delay every member is brought forward and the previously focused
    /// window gets focus back.
    ///
    /// Returns the new group, or `None` when no group was registered.
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::GeometryUnavailable`] when the screen frame is
    /// unusable; no window is touched in that case.
    pub fn execute_split(&mut self, windows: &[WindowHandle]) -> TilingResult<Option<GroupId>> {
        let mut members: SmallVec<[WindowHandle; 4]> = SmallVec::new();
        for &handle in windows {
            if !members.contains(&handle) {
                members.push(handle);
            }
        }
        if members.is_empty() {
            tracing::debug!("split requested with no windows");
            return Ok(None);
        }

        let frames = self
            .geometry()?
            .split_bounds(members.len())
            .ok_or(TilingError::GeometryUnavailable)?;
        let restore = self.surface.focused_handle();

        let mut vacated: SmallVec<[WindowHandle; 4]> = SmallVec::new();
        for &handle in &members {
            if let Some(removal) = self.groups.remove(handle, true) {
                if removal.dissolved {
                    self.focus.forget_group(removal.group);
                    vacated.extend(removal.released.into_iter().filter(|h| !members.contains(h)));
                }
            }
        }

        let group = if members.len() >= 2 { self.groups.create(&members) } else { None };
        for &handle in &members {
            self.rebalancer.forget(handle);
        }

        for (&handle, &frame) in members.iter().zip(frames.iter()) {
            if let Err(err) = self.place(handle, frame, PlacementMode::Slot) {
                tracing::warn!(%handle, %err, "failed to place split member");
            }
        }
        for handle in vacated {
            self.retile(handle);
        }

        if let Some(group) = group {
            tracing::debug!(%group, members = members.len(), "split group created");
            self.schedule(timing::FRONT_BRING_DELAY_MS, ScheduledTask::BringGroupForward {
                group,
                restore,
            });
        }
        Ok(group)
    }

    /// Removes `handle` from its split group.
    ///
    /// The removed window is retiled to fullscreen. When fewer than two
    /// members remain and `dissolve_if_under_two` is set, the group is
    /// dissolved and the last member is retiled as well. Returns `false` if
    /// `handle` was not grouped.
    pub fn remove_member(&mut self, handle: WindowHandle, dissolve_if_under_two: bool) -> bool {
        self.detach_member(handle, dissolve_if_under_two, true)
    }

    fn detach_member(
        &mut self,
        handle: WindowHandle,
        dissolve_if_under_two: bool,
        retile_removed: bool,
    ) -> bool {
        let Some(removal) = self.groups.remove(handle, dissolve_if_under_two) else {
            return false;
        };
        self.rebalancer.forget(handle);
        tracing::debug!(%handle, group = %removal.group, dissolved = removal.dissolved, "removed split member");

        if retile_removed {
            self.retile(handle);
        }
        if removal.dissolved {
            self.focus.forget_group(removal.group);
            for released in removal.released {
                self.rebalancer.forget(released);
                self.retile(released);
            }
        }
        true
    }

    fn bring_group_forward(&mut self, group: GroupId, restore: Option<WindowHandle>) {
        let Some(members) = self.groups.get(group).map(|g| g.members.clone()) else {
            tracing::debug!(%group, "group dissolved before it was brought forward");
            return;
        };
        for handle in &members {
            if let Err(err) = self.surface.activate(*handle) {
                tracing::warn!(%handle, %err, "failed to activate split member");
            }
        }

        let Some(restore) = restore else {
            return;
        };
        if let Err(err) = self.surface.activate(restore) {
            tracing::warn!(handle = %restore, %err, "failed to restore focus");
            return;
        }
        if members.contains(&restore) {
            self.focus.prime(group);
        }
    }

    // ========================================================================
    // Focus, rebalance, lifecycle
    // ========================================================================

    /// Brings the focused window's group forward on entry into it.
    ///
    /// Returns `true` if members were activated.
    pub fn on_focus_changed(&mut self, focused: Option<WindowHandle>) -> bool {
        let Some(order) = self.focus.on_focus_changed(focused, &self.groups) else {
            return false;
        };
        tracing::debug!(count = order.len(), "bringing split group forward");
        for handle in order {
            if let Err(err) = self.surface.activate(handle) {
                tracing::warn!(%handle, %err, "failed to activate split member");
            }
        }
        true
    }

    /// Runs one rebalance pass. Returns the number of neighbors resized.
    pub fn rebalance(&mut self) -> usize {
        if !self.rebalance_config.enabled {
            return 0;
        }
        let now = self.clock.now();
        self.rebalancer
            .run(&self.groups, self.surface.as_ref(), self.config.padding, now)
    }

    /// Drops expired size restrictions.
    pub fn prune_restrictions(&mut self) -> usize { self.restrictions.prune(self.clock.now()) }

    /// Activates a window on behalf of the switcher.
    pub fn activate_window(&self, handle: WindowHandle) {
        if let Err(err) = self.surface.activate(handle) {
            tracing::warn!(%handle, %err, "failed to activate window");
        }
    }

    /// Closes a window on behalf of the switcher.
    pub fn close_window(&self, handle: WindowHandle) {
        if let Err(err) = self.surface.close(handle) {
            tracing::warn!(%handle, %err, "failed to close window");
        }
    }

    /// Forgets everything about a window that no longer exists.
    fn purge_window(&mut self, handle: WindowHandle) {
        self.detach_member(handle, true, false);
        self.rebalancer.forget(handle);
        self.restrictions.remove(handle);
        self.tracked.remove(&handle);
        self.scheduler.cancel_for(handle);
    }

    /// Applies a window-system event.
    pub fn handle_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::WindowCreated(descriptor) => {
                let handle = descriptor.handle;
                if let Err(err) = self.handle_new_window(descriptor) {
                    tracing::warn!(%handle, %err, "failed to tile new window");
                }
            }
            WindowEvent::WindowDestroyed(handle) => {
                tracing::debug!(%handle, "window destroyed");
                self.purge_window(handle);
            }
            WindowEvent::FocusChanged(focused) => {
                self.on_focus_changed(focused);
            }
            WindowEvent::AppLaunched { owner } => {
                tracing::debug!(%owner, "application launched");
                self.schedule(timing::APP_LAUNCH_SCAN_DELAY_MS, ScheduledTask::AppLaunchScan { owner });
            }
            WindowEvent::AppTerminated { owner } => {
                let handles: Vec<_> = self
                    .tracked
                    .iter()
                    .filter(|(_, o)| **o == owner)
                    .map(|(h, _)| *h)
                    .collect();
                tracing::debug!(%owner, windows = handles.len(), "application terminated");
                for handle in handles {
                    self.purge_window(handle);
                }
                self.restrictions.forget_owner(&owner);
            }
        }
    }

    fn scan_owner(&mut self, owner: &str) {
        let fresh: Vec<_> = self
            .surface
            .query_windows(true)
            .into_iter()
            .filter(|w| w.owner_name == owner && !self.tracked.contains_key(&w.handle))
            .collect();
        for descriptor in fresh {
            let handle = descriptor.handle;
            if let Err(err) = self.handle_new_window(descriptor) {
                tracing::warn!(%handle, %err, "failed to tile launched window");
            }
        }
    }

    // ========================================================================
    // Deferred continuations
    // ========================================================================

    /// Runs every continuation whose deadline has passed.
    ///
    /// Returns the number of tasks run.
    pub fn run_due_tasks(&mut self) -> usize {
        let now = self.clock.now();
        let mut ran = 0;
        while let Some(task) = self.scheduler.pop_due(now) {
            tracing::trace!(task = task.name(), "running deferred task");
            self.run_task(task);
            ran += 1;
        }
        ran
    }

    fn run_task(&mut self, task: ScheduledTask) {
        match task {
            ScheduledTask::VerifyPlacement { handle, target, mode } => {
                self.verify_placement(handle, target, mode);
            }
            ScheduledTask::ProbeStep(probe) => self.probe_step(probe),
            ScheduledTask::BringGroupForward { group, restore } => {
                self.bring_group_forward(group, restore);
            }
            ScheduledTask::RetryNewWindow { descriptor, attempt } => {
                let handle = descriptor.handle;
                if let Err(err) = self.admit_window(descriptor, attempt) {
                    tracing::warn!(%handle, %err, "failed to tile new window");
                }
            }
            ScheduledTask::AppLaunchScan { owner } => self.scan_owner(&owner),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
