//! Tiling engine.
//!
//! Keeps windows placed fullscreen or in side-by-side split groups on a
//! single screen, out of the way of the taskbar band.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Platform event sources                      │
//! │  (window created/destroyed, focus, app launch, key tap)     │
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │ TilingHandle
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Tiling Actor                            │
//! │  - Owns the engine and the switcher                         │
//! │  - Processes messages sequentially                          │
//! │  - Wakes for deferred continuations and periodic passes     │
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │ &dyn WindowSurface
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Window Surface                           │
//! │  - Read/write window frames, activate, close                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never blocks: every delayed step (placement verification,
//! size probing, bringing a group forward, creation retries) is a
//! [`scheduler::ScheduledTask`] that the actor runs once its deadline passes.

pub mod actor;
pub mod constants;
pub mod engine;
pub mod error;
pub mod focus_sync;
pub mod layout;
pub mod rebalance;
pub mod restrictions;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod testing;

pub use actor::{
    ActorError, QueryResult, TilingActor, TilingHandle, TilingMessage, TilingQuery, WindowEvent,
};
pub use engine::TilingEngine;
pub use error::{SurfaceError, TilingError, TilingResult};
pub use state::{
    GroupId, Point, Rect, Size, SplitGroup, SplitGroups, WindowDescriptor, WindowHandle,
};
pub use surface::{SurfaceResult, WindowSurface};
