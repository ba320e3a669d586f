//! Switchbar - window arrangement core.
//!
//! Keeps application windows fullscreen or in side-by-side split groups on a
//! single screen, away from the taskbar band, and drives a keyboard-only
//! window switcher. The window system itself is reached through the
//! [`modules::tiling::WindowSurface`] trait; this crate ships an in-memory
//! implementation for tests and the command-line tooling.

pub mod cli;
pub mod config;
pub mod error;
pub mod modules;
pub mod utils;
