//! The window-system capability set the core depends on.
//!
//! Everything OS-specific (accessibility APIs, window-server calls,
//! notification observers) lives behind [`WindowSurface`]. The core never
//! touches a native primitive, which keeps it testable against the in-memory
//! surface in [`testing`](super::testing).

use super::error::SurfaceError;
use super::state::{Point, Rect, Size, WindowDescriptor, WindowHandle};

/// Result of a single surface call.
pub type SurfaceResult = Result<(), SurfaceError>;

/// Move/resize/activate/query operations on opaque window handles.
///
/// Calls are synchronous from the core's point of view but their effect may
/// be delayed, partial, or silently ignored by the window system; callers
/// verify by reading [`bounds`](Self::bounds) back after a settle delay.
pub trait WindowSurface: Send + Sync {
    /// Lists windows on the current space.
    fn query_windows(&self, visible_only: bool) -> Vec<WindowDescriptor>;

    /// Reads the current frame of a window.
    fn bounds(&self, handle: WindowHandle) -> Option<Rect>;

    /// Moves a window's origin.
    ///
    /// # Errors
    ///
    /// Returns the surface failure if the window could not be moved.
    fn move_to(&self, handle: WindowHandle, origin: Point) -> SurfaceResult;

    /// Resizes a window.
    ///
    /// # Errors
    ///
    /// Returns the surface failure if the window could not be resized.
    fn resize(&self, handle: WindowHandle, size: Size) -> SurfaceResult;

    /// Raises and focuses a window.
    ///
    /// # Errors
    ///
    /// Returns the surface failure if the window could not be activated.
    fn activate(&self, handle: WindowHandle) -> SurfaceResult;

    /// Asks a window to close.
    ///
    /// # Errors
    ///
    /// Returns the surface failure if the close request was rejected.
    fn close(&self, handle: WindowHandle) -> SurfaceResult;

    /// Returns the window that currently has keyboard focus.
    fn focused_handle(&self) -> Option<WindowHandle>;

    /// Returns the frame of the main screen, if known.
    fn screen_frame(&self) -> Option<Rect>;
}
