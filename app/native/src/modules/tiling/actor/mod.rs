//! Tiling actor.
//!
//! The actor owns the [`TilingEngine`] and the [`Switcher`] and processes
//! messages one at a time on a single tokio task, so no tiling state is ever
//! shared or locked. Besides messages, the loop wakes for:
//!
//! - the earliest deferred continuation of the engine
//! - the switcher's inactivity timeout
//! - the periodic rebalance pass
//! - the periodic size-restriction sweep
//!
//! # Panic Recovery
//!
//! A panic while handling one message is caught and logged; the actor keeps
//! processing subsequent messages.

mod handle;
mod messages;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use handle::{ActorError, TilingHandle};
pub use messages::{QueryResult, TilingMessage, TilingQuery, WindowEvent};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use super::constants::timing;
use super::engine::TilingEngine;
use super::state::WindowHandle;
use crate::modules::switcher::{KeyDisposition, KeyEvent, Switcher, SwitcherAction};
use crate::utils::clock::Clock;

/// Channel buffer size for the tiling actor.
const CHANNEL_BUFFER_SIZE: usize = 256;

/// The actor that owns all tiling state.
pub struct TilingActor {
    engine: TilingEngine,
    switcher: Switcher,
    clock: Arc<dyn Clock>,
    receiver: mpsc::Receiver<TilingMessage>,
}

impl TilingActor {
    /// Spawns the actor on the current tokio runtime.
    ///
    /// `clock` must be the clock the engine was built with.
    #[must_use]
    pub fn spawn(engine: TilingEngine, switcher: Switcher, clock: Arc<dyn Clock>) -> TilingHandle {
        tracing::debug!("spawning tiling actor");
        let (sender, receiver) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let actor = Self {
            engine,
            switcher,
            clock,
            receiver,
        };
        tokio::spawn(actor.run());
        TilingHandle::new(sender)
    }

    async fn run(mut self) {
        tracing::trace!("tiling actor loop starting");

        let mut rebalance = tokio::time::interval(Duration::from_millis(
            self.engine.rebalance_config().interval_ms.max(1),
        ));
        rebalance.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut prune =
            tokio::time::interval(Duration::from_secs(timing::RESTRICTION_PRUNE_INTERVAL_SECS));
        prune.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Both intervals complete their first tick immediately
        rebalance.tick().await;
        prune.tick().await;

        loop {
            let wake = self.next_wake();
            let timer = async move {
                match wake {
                    Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                msg = self.receiver.recv() => {
                    let Some(msg) = msg else {
                        break;
                    };
                    if matches!(msg, TilingMessage::Shutdown) {
                        tracing::debug!("tiling actor received shutdown message");
                        return;
                    }
                    self.dispatch(msg);
                }
                _ = rebalance.tick() => {
                    let adjusted = self.engine.rebalance();
                    tracing::trace!(adjusted, "rebalance pass");
                }
                _ = prune.tick() => {
                    self.engine.prune_restrictions();
                }
                () = timer => {}
            }

            self.engine.run_due_tasks();
            self.switcher.tick(self.clock.now());
        }

        tracing::debug!("tiling actor channel closed, exiting");
    }

    fn next_wake(&self) -> Option<Instant> {
        match (self.engine.next_deadline(), self.switcher.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Handles a message, recovering from panics.
    fn dispatch(&mut self, msg: TilingMessage) {
        let name = msg.name();
        let result = catch_unwind(AssertUnwindSafe(|| self.handle_message(msg)));
        if let Err(panic_info) = result {
            let panic_msg = panic_info
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic_info.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(message = name, panic = %panic_msg, "tiling actor recovered from panic");
        }
    }

    fn handle_message(&mut self, msg: TilingMessage) {
        match msg {
            TilingMessage::Window(event) => self.engine.handle_event(event),
            TilingMessage::Key { event, respond_to } => {
                let disposition = self.on_key(&event);
                if let Some(tx) = respond_to {
                    let _ = tx.send(disposition);
                }
            }
            TilingMessage::Split(windows) => self.split(&windows),
            TilingMessage::RemoveMember(handle) => {
                self.engine.remove_member(handle, true);
            }
            TilingMessage::PreventOverlap => {
                if let Err(err) = self.engine.prevent_overlap() {
                    tracing::warn!(%err, "overlap prevention skipped");
                }
            }
            TilingMessage::Rebalance => {
                self.engine.rebalance();
            }
            TilingMessage::Query { query, respond_to } => {
                let _ = respond_to.send(self.answer(query));
            }
            TilingMessage::Shutdown => {}
        }
    }

    fn on_key(&mut self, event: &KeyEvent) -> KeyDisposition {
        let engine = &self.engine;
        let outcome = self.switcher.on_key(event, || engine.switchable_windows());
        match outcome.action {
            Some(SwitcherAction::Activate(handle)) => self.engine.activate_window(handle),
            Some(SwitcherAction::Close(handle)) => self.engine.close_window(handle),
            Some(SwitcherAction::Split(windows)) => self.split(&windows),
            None => {}
        }
        outcome.disposition
    }

    fn split(&mut self, windows: &[WindowHandle]) {
        if let Err(err) = self.engine.execute_split(windows) {
            tracing::warn!(%err, "split failed");
        }
    }

    fn answer(&self, query: TilingQuery) -> QueryResult {
        match query {
            TilingQuery::Groups => QueryResult::Groups(self.engine.group_snapshot()),
            TilingQuery::GroupOf(handle) => QueryResult::GroupOf(self.engine.group_of(handle)),
            TilingQuery::Restriction(handle) => {
                QueryResult::Restriction(self.engine.restriction(handle).cloned())
            }
            TilingQuery::SwitcherState => QueryResult::SwitcherState(self.switcher.state()),
            TilingQuery::Assignments => {
                QueryResult::Assignments(self.switcher.assignments().to_vec())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
