//! Deadline-ordered continuation queue.
//!
//! Work that has to wait for the window system to settle is queued as a
//! [`ScheduledTask`] instead of sleeping. The actor loop wakes at
//! [`Scheduler::next_deadline`] and asks the engine to run whatever is due.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use super::engine::placement::{PlacementMode, ProbeState};
use super::state::{GroupId, Rect, WindowDescriptor, WindowHandle};

/// A continuation waiting for its deadline.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledTask {
    /// Re-read a window's frame after a placement and compare to the target.
    VerifyPlacement {
        handle: WindowHandle,
        target: Rect,
        mode: PlacementMode,
    },
    /// Read back the result of one probe candidate and issue the next.
    ProbeStep(ProbeState),
    /// Activate every member of a freshly built group, then restore focus.
    BringGroupForward {
        group: GroupId,
        restore: Option<WindowHandle>,
    },
    /// Retry a new window whose frame could not be read yet.
    RetryNewWindow {
        descriptor: WindowDescriptor,
        attempt: u8,
    },
    /// Look for windows of a just-launched application.
    AppLaunchScan { owner: String },
}

impl ScheduledTask {
    /// Returns the window this task is about, if any.
    #[must_use]
    pub fn window(&self) -> Option<WindowHandle> {
        match self {
            Self::VerifyPlacement { handle, .. } => Some(*handle),
            Self::ProbeStep(probe) => Some(probe.handle),
            Self::RetryNewWindow { descriptor, .. } => Some(descriptor.handle),
            Self::BringGroupForward { .. } | Self::AppLaunchScan { .. } => None,
        }
    }

    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::VerifyPlacement { .. } => "VerifyPlacement",
            Self::ProbeStep(_) => "ProbeStep",
            Self::BringGroupForward { .. } => "BringGroupForward",
            Self::RetryNewWindow { .. } => "RetryNewWindow",
            Self::AppLaunchScan { .. } => "AppLaunchScan",
        }
    }
}

#[derive(Debug)]
struct Entry {
    deadline: Instant,
    seq: u64,
    task: ScheduledTask,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool { self.deadline == other.deadline && self.seq == other.seq }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline.cmp(&other.deadline).then(self.seq.cmp(&other.seq))
    }
}

/// Min-heap of tasks keyed by deadline; equal deadlines run in insertion order.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Queues `task` to run at `deadline`.
    pub fn schedule(&mut self, deadline: Instant, task: ScheduledTask) {
        tracing::trace!(task = task.name(), "scheduling task");
        self.seq += 1;
        self.queue.push(Reverse(Entry {
            deadline,
            seq: self.seq,
            task,
        }));
    }

    /// Queues `task` to run `delay` after `now`.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, task: ScheduledTask) {
        self.schedule(now + delay, task);
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> { self.queue.peek().map(|e| e.0.deadline) }

    /// Pops the next task whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<ScheduledTask> {
        if self.next_deadline()? > now {
            return None;
        }
        self.queue.pop().map(|e| e.0.task)
    }

    /// Drops every pending task about `handle`.
    pub fn cancel_for(&mut self, handle: WindowHandle) {
        self.queue.retain(|e| e.0.task.window() != Some(handle));
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize { self.queue.len() }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.queue.is_empty() }
}
