//! Taskbar overlap prevention.

use super::TilingEngine;
use crate::config::TaskbarPosition;
use crate::modules::tiling::constants::window_size::MIN_OVERLAP_HEIGHT;
use crate::modules::tiling::error::{TilingError, TilingResult};
use crate::modules::tiling::state::{Point, Rect};

/// Frame that keeps `bounds` clear of the taskbar `band`.
///
/// The edge facing the band is pulled back so it sits `padding` away from
/// it; the height never drops below [`MIN_OVERLAP_HEIGHT`] and never grows
/// past the current height. Returns `None` when the window does not overlap
/// the band or cannot shrink any further.
#[must_use]
pub fn overlap_adjustment(
    bounds: Rect,
    band: Rect,
    position: TaskbarPosition,
    padding: f64,
) -> Option<Rect> {
    if !bounds.intersects(&band) {
        return None;
    }
    let adjusted = match position {
        TaskbarPosition::Bottom => {
            let height = (band.y - padding - bounds.y)
                .max(MIN_OVERLAP_HEIGHT)
                .min(bounds.height);
            Rect::new(bounds.x, bounds.y, bounds.width, height)
        }
        TaskbarPosition::Top => {
            let y = band.bottom() + padding;
            let height = (bounds.bottom() - y).max(MIN_OVERLAP_HEIGHT).min(bounds.height);
            Rect::new(bounds.x, y, bounds.width, height)
        }
    };
    (adjusted != bounds).then_some(adjusted)
}

impl TilingEngine {
    /// Shrinks every visible, tileable window that overlaps the taskbar.
    ///
    /// Returns the number of windows adjusted.
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::GeometryUnavailable`] when the screen frame is
    /// unusable; no window is touched in that case.
    pub fn prevent_overlap(&mut self) -> TilingResult<usize> {
        let geometry = self.geometry()?;
        let band = geometry.taskbar_band();
        let screen = geometry.screen();
        let mut adjusted = 0;

        for window in self.surface.query_windows(true) {
            let handle = window.handle;
            if let Some(reason) = self.skip_reason(&window, window.bounds, Some(screen)) {
                tracing::trace!(%handle, reason, "overlap check skipped");
                continue;
            }
            let Some(frame) =
                overlap_adjustment(window.bounds, band, geometry.taskbar_position(), geometry.padding())
            else {
                continue;
            };

            if frame.y != window.bounds.y {
                if let Err(err) = self.surface.move_to(handle, Point::new(frame.x, frame.y)) {
                    tracing::warn!(%handle, %err, "failed to move window off the taskbar");
                    continue;
                }
            }
            match self.surface.resize(handle, frame.size()) {
                Ok(()) => {
                    tracing::debug!(%handle, %frame, "cleared taskbar overlap");
                    adjusted += 1;
                }
                Err(err) if err.is_hard() => {
                    let err = TilingError::from_surface(handle, err);
                    tracing::warn!(%handle, %err, "failed to clear taskbar overlap");
                }
                Err(err) => {
                    tracing::warn!(%handle, %err, "window refused to shrink off the taskbar");
                    let size = window.bounds.size();
                    self.record_restriction(handle, size, size);
                }
            }
        }
        Ok(adjusted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTTOM_BAND: Rect = Rect::new(0.0, 1032.0, 1920.0, 48.0);
    const TOP_BAND: Rect = Rect::new(0.0, 0.0, 1920.0, 48.0);

    #[test]
    fn test_bottom_band_shrinks_height() {
        let bounds = Rect::new(100.0, 100.0, 800.0, 1000.0);
        let adjusted = overlap_adjustment(bounds, BOTTOM_BAND, TaskbarPosition::Bottom, 8.0);
        assert_eq!(adjusted, Some(Rect::new(100.0, 100.0, 800.0, 924.0)));
    }

    #[test]
    fn test_bottom_band_keeps_minimum_height() {
        let bounds = Rect::new(100.0, 900.0, 800.0, 300.0);
        let adjusted = overlap_adjustment(bounds, BOTTOM_BAND, TaskbarPosition::Bottom, 8.0);
        assert_eq!(adjusted, Some(Rect::new(100.0, 900.0, 800.0, MIN_OVERLAP_HEIGHT)));
    }

    #[test]
    fn test_short_window_never_grows() {
        let bounds = Rect::new(100.0, 950.0, 800.0, 120.0);
        assert_eq!(overlap_adjustment(bounds, BOTTOM_BAND, TaskbarPosition::Bottom, 8.0), None);

        let top = Rect::new(0.0, 20.0, 800.0, 120.0);
        let adjusted = overlap_adjustment(top, TOP_BAND, TaskbarPosition::Top, 8.0).unwrap();
        assert!(adjusted.height <= top.height);
    }

    #[test]
    fn test_top_band_moves_below() {
        let bounds = Rect::new(0.0, 20.0, 800.0, 600.0);
        let adjusted = overlap_adjustment(bounds, TOP_BAND, TaskbarPosition::Top, 8.0);
        assert_eq!(adjusted, Some(Rect::new(0.0, 56.0, 800.0, 564.0)));
    }

    #[test]
    fn test_clear_window_is_untouched() {
        let bounds = Rect::new(8.0, 8.0, 1904.0, 1016.0);
        assert_eq!(overlap_adjustment(bounds, BOTTOM_BAND, TaskbarPosition::Bottom, 8.0), None);
    }
}
