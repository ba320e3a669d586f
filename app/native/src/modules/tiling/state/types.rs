//! Core value types shared by the tiling modules.
//!
//! Geometry uses a top-left origin with `y` growing downwards, matching the
//! coordinate space reported by window servers.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Geometric Types
// ============================================================================

/// A point in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self { Self { width, height } }

    /// Scales both axes by `factor`, rounding to whole units.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            width: (self.width * factor).round(),
            height: (self.height * factor).round(),
        }
    }

    /// Returns `true` if both axes are within `tolerance` of `other`.
    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }

    /// Returns `true` if either axis is larger than `other`.
    #[must_use]
    pub fn exceeds(self, other: Self) -> bool {
        self.width > other.width || self.height > other.height
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }

    /// Returns the area covered by this size.
    #[must_use]
    pub fn area(self) -> f64 { self.width * self.height }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangle defined by origin point and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the origin (top-left corner).
    pub x: f64,
    /// Y coordinate of the origin (top-left corner).
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the origin point of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> Point { Point { x: self.x, y: self.y } }

    /// Returns the size of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Size { Size { width: self.width, height: self.height } }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f64 { self.x + self.width }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 { self.y + self.height }

    /// Returns the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Returns whether the rectangle has a positive area.
    #[must_use]
    pub fn is_usable(&self) -> bool { self.width > 0.0 && self.height > 0.0 }

    /// Returns whether this rectangle overlaps `other` (touching edges do not count).
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Returns a rectangle of `size` centered inside `self`.
    ///
    /// A size larger than `self` is clamped so the result stays within bounds.
    #[must_use]
    pub fn centered(&self, size: Size) -> Self {
        let width = size.width.min(self.width);
        let height = size.height.min(self.height);
        Self {
            x: (self.x + (self.width - width) / 2.0).round(),
            y: (self.y + (self.height - height) / 2.0).round(),
            width,
            height,
        }
    }

    /// Returns the area of the rectangle.
    #[must_use]
    pub fn area(&self) -> f64 { self.width * self.height }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

// ============================================================================
// Windows
// ============================================================================

/// Opaque identifier of a window, issued by the window surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(u64);

impl WindowHandle {
    /// Wraps a raw surface identifier.
    ///
    /// Only surface implementations should mint handles.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self { Self(raw) }

    /// Returns the raw surface identifier.
    #[must_use]
    pub const fn raw(self) -> u64 { self.0 }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// Snapshot of a window as reported by the surface.
///
/// This is a value copy taken at query time, not live state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowDescriptor {
    /// Handle of the window.
    pub handle: WindowHandle,
    /// Name of the owning application.
    pub owner_name: String,
    /// Title shown for the window.
    pub display_name: String,
    /// Frame at query time.
    pub bounds: Rect,
    /// Whether the window had focus at query time.
    pub is_active: bool,
}

impl WindowDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(
        handle: WindowHandle,
        owner_name: impl Into<String>,
        display_name: impl Into<String>,
        bounds: Rect,
    ) -> Self {
        Self {
            handle,
            owner_name: owner_name.into(),
            display_name: display_name.into(),
            bounds,
            is_active: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_rect_intersects_ignores_touching_edges() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(100.0, 0.0, 100.0, 100.0);
        let c = Rect::new(99.0, 99.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_rect_centered_clamps_oversized() {
        let area = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let centered = area.centered(Size::new(400.0, 200.0));
        assert_eq!(centered, Rect::new(300.0, 300.0, 400.0, 200.0));

        let clamped = area.centered(Size::new(2000.0, 200.0));
        assert_eq!(clamped.x, 0.0);
        assert_eq!(clamped.width, 1000.0);
    }

    #[test]
    fn test_size_helpers() {
        let size = Size::new(1000.0, 500.0);
        assert_eq!(size.scaled(0.9), Size::new(900.0, 450.0));
        assert!(size.approx_eq(Size::new(1009.0, 491.0), 10.0));
        assert!(!size.approx_eq(Size::new(1011.0, 500.0), 10.0));
        assert!(Size::new(1001.0, 10.0).exceeds(size));
        assert!(!Size::new(1000.0, 500.0).exceeds(size));
    }

    #[test]
    fn test_window_handle_display() {
        assert_eq!(WindowHandle::from_raw(42).to_string(), "#42");
        assert_eq!(WindowHandle::from_raw(42).raw(), 42);
    }
}
