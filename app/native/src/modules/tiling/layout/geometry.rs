//! Target rectangles for fullscreen and split placement.
//!
//! Both layouts are computed from the screen frame minus the reserved
//! taskbar band, with `padding` on every outer edge and between neighbors.
//! Nothing here is cached: callers build a fresh [`LayoutGeometry`] from the
//! current screen frame each time they lay windows out.

use smallvec::SmallVec;

use crate::config::{TaskbarConfig, TaskbarPosition, TilingConfig};
use crate::modules::tiling::error::{TilingError, TilingResult};
use crate::modules::tiling::state::Rect;

/// Inline capacity for split layouts.
///
/// Splits wider than four windows are rare enough to spill to the heap.
pub const SPLIT_INLINE_CAP: usize = 4;

/// Frames of a split layout, left to right.
pub type LayoutResult = SmallVec<[Rect; SPLIT_INLINE_CAP]>;

/// Screen geometry with the taskbar band and padding applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    screen: Rect,
    taskbar: TaskbarConfig,
    padding: f64,
}

impl LayoutGeometry {
    /// Creates the geometry for a screen.
    ///
    /// Returns `None` if the screen leaves no usable area once the band and
    /// padding are removed.
    #[must_use]
    pub fn new(screen: Rect, taskbar: TaskbarConfig, padding: f64) -> Option<Self> {
        let geometry = Self {
            screen,
            taskbar,
            padding: padding.max(0.0),
        };
        geometry.fullscreen_bounds().is_usable().then_some(geometry)
    }

    /// Creates the geometry from an optional screen frame and the tiling config.
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::GeometryUnavailable`] if the screen is unknown or unusable.
    pub fn from_config(screen: Option<Rect>, config: &TilingConfig) -> TilingResult<Self> {
        screen
            .and_then(|frame| Self::new(frame, config.taskbar, config.padding))
            .ok_or(TilingError::GeometryUnavailable)
    }

    /// Padding applied around and between windows.
    #[must_use]
    pub const fn padding(&self) -> f64 { self.padding }

    /// The screen frame this geometry was built from.
    #[must_use]
    pub const fn screen(&self) -> Rect { self.screen }

    /// The reserved taskbar band.
    #[must_use]
    pub fn taskbar_band(&self) -> Rect {
        let height = self.taskbar.height.clamp(0.0, self.screen.height);
        match self.taskbar.position {
            TaskbarPosition::Top => {
                Rect::new(self.screen.x, self.screen.y, self.screen.width, height)
            }
            TaskbarPosition::Bottom => Rect::new(
                self.screen.x,
                self.screen.bottom() - height,
                self.screen.width,
                height,
            ),
        }
    }

    /// Edge the taskbar is docked to.
    #[must_use]
    pub const fn taskbar_position(&self) -> TaskbarPosition { self.taskbar.position }

    /// The screen minus the taskbar band, without padding.
    #[must_use]
    pub fn available_area(&self) -> Rect {
        let band = self.taskbar_band();
        match self.taskbar.position {
            TaskbarPosition::Top => Rect::new(
                self.screen.x,
                band.bottom(),
                self.screen.width,
                self.screen.height - band.height,
            ),
            TaskbarPosition::Bottom => Rect::new(
                self.screen.x,
                self.screen.y,
                self.screen.width,
                self.screen.height - band.height,
            ),
        }
    }

    /// One rectangle filling the available area, padded on all sides.
    #[must_use]
    pub fn fullscreen_bounds(&self) -> Rect {
        let area = self.available_area();
        Rect::new(
            area.x + self.padding,
            area.y + self.padding,
            area.width - 2.0 * self.padding,
            area.height - 2.0 * self.padding,
        )
    }

    /// `count` equal-width columns across the available area, left to right.
    ///
    /// Columns are separated by `padding` and inset by `padding` from the
    /// screen edges. Edges are rounded to whole units, so widths differ by at
    /// most one unit while the outermost edges stay exact.
    ///
    /// Returns `None` for `count == 0` or when the columns would have no width.
    #[allow(clippy::cast_precision_loss)] // Window counts won't exceed f64 precision
    #[must_use]
    pub fn split_bounds(&self, count: usize) -> Option<LayoutResult> {
        if count == 0 {
            return None;
        }

        let full = self.fullscreen_bounds();
        let gaps = self.padding * (count - 1) as f64;
        let column = (full.width - gaps) / count as f64;
        if column < 1.0 {
            return None;
        }

        let frames = (0..count)
            .map(|i| {
                let start = full.x + i as f64 * (column + self.padding);
                let left = start.round();
                let right = if i == count - 1 { full.right() } else { (start + column).round() };
                Rect::new(left, full.y, right - left, full.height)
            })
            .collect();

        Some(frames)
    }
}

// ============================================================================
// Tests
// ============================================================================
