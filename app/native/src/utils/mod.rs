//! Shared utilities.
//!
//! - [`clock`] - Monotonic time sources, including a manual clock for tests
//! - [`path`] - Tilde expansion for user-supplied paths

pub mod clock;
pub mod path;
