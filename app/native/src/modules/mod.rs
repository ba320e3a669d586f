//! Feature modules for Switchbar.
//!
//! - [`switcher`] - Keyboard-driven window switcher state machine
//! - [`tiling`] - Tiling engine, split groups and the actor that drives them

pub mod switcher;
pub mod tiling;
