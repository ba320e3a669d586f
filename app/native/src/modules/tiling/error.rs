//! Error types for the tiling core.
//!
//! # Error Categories
//!
//! - **Permission errors**: the surface refused the call; never retried
//! - **Lookup errors**: the window disappeared mid-operation
//! - **Operation errors**: the window system rejected or ignored a request
//! - **Geometry errors**: no usable screen information; layout is aborted
//!
//! Failures are always local to one window. Batch operations log and keep
//! going, so nothing in here is ever fatal to the process.

use thiserror::Error;

use super::state::WindowHandle;

/// Result type alias for tiling operations.
pub type TilingResult<T> = Result<T, TilingError>;

/// Failure reported by a [`WindowSurface`](super::surface::WindowSurface) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The process lacks the capability needed for this call.
    #[error("permission denied")]
    PermissionDenied,

    /// The window no longer exists.
    #[error("window not found")]
    WindowNotFound,

    /// The surface attempted the call but the window system rejected it.
    #[error("{0}")]
    Failed(String),
}

impl SurfaceError {
    /// Creates a soft failure with the given reason.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self { Self::Failed(reason.into()) }

    /// Returns `true` if the operation should be abandoned for this window.
    ///
    /// Soft failures leave room for a follow-up step (a move that fails can
    /// still be followed by a resize); the other variants cannot.
    #[must_use]
    pub const fn is_hard(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::WindowNotFound)
    }
}

/// Errors that can occur during tiling operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TilingError {
    /// The surface denied access to the window.
    #[error("Permission denied for window {0}")]
    PermissionDenied(WindowHandle),

    /// A window vanished while it was being processed.
    #[error("Window {0} not found")]
    WindowNotFound(WindowHandle),

    /// The window system rejected or ignored the request.
    #[error("Window operation failed: {0}")]
    OperationFailed(String),

    /// Screen geometry is missing or has no usable area.
    #[error("Screen geometry unavailable")]
    GeometryUnavailable,
}

impl TilingError {
    /// Lifts a surface failure into the tiling taxonomy for `handle`.
    #[must_use]
    pub fn from_surface(handle: WindowHandle, err: SurfaceError) -> Self {
        match err {
            SurfaceError::PermissionDenied => Self::PermissionDenied(handle),
            SurfaceError::WindowNotFound => Self::WindowNotFound(handle),
            SurfaceError::Failed(reason) => Self::OperationFailed(format!("{handle}: {reason}")),
        }
    }

    /// Returns `true` if a window could not be found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool { matches!(self, Self::WindowNotFound(_)) }

    /// Returns `true` if this error is caused by missing permissions.
    #[must_use]
    pub const fn is_permission_error(&self) -> bool { matches!(self, Self::PermissionDenied(_)) }

    /// Returns `true` if the whole layout operation had to be abandoned.
    #[must_use]
    pub const fn aborts_layout(&self) -> bool { matches!(self, Self::GeometryUnavailable) }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let handle = WindowHandle::from_raw(7);
        assert_eq!(
            TilingError::PermissionDenied(handle).to_string(),
            "Permission denied for window #7"
        );
        assert_eq!(TilingError::WindowNotFound(handle).to_string(), "Window #7 not found");
        assert_eq!(
            TilingError::GeometryUnavailable.to_string(),
            "Screen geometry unavailable"
        );
    }

    #[test]
    fn test_from_surface() {
        let handle = WindowHandle::from_raw(3);
        assert!(TilingError::from_surface(handle, SurfaceError::PermissionDenied).is_permission_error());
        assert!(TilingError::from_surface(handle, SurfaceError::WindowNotFound).is_not_found());

        let err = TilingError::from_surface(handle, SurfaceError::failed("clamped"));
        assert_eq!(err.to_string(), "Window operation failed: #3: clamped");
    }

    #[test]
    fn test_error_predicates() {
        assert!(SurfaceError::PermissionDenied.is_hard());
        assert!(SurfaceError::WindowNotFound.is_hard());
        assert!(!SurfaceError::failed("busy").is_hard());

        assert!(TilingError::GeometryUnavailable.aborts_layout());
        assert!(!TilingError::OperationFailed("x".into()).aborts_layout());
    }
}
