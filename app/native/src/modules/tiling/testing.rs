//! In-memory window surface.
//!
//! [`FakeSurface`] models just enough window-system behavior to exercise the
//! engine: windows that clamp, reject or silently ignore resizes, frames that
//! cannot be read yet, and a focus pointer. Every mutating call is recorded so
//! tests can assert on what the engine asked for.

use parking_lot::Mutex;

use super::error::SurfaceError;
use super::state::{Point, Rect, Size, WindowDescriptor, WindowHandle};
use super::surface::{SurfaceResult, WindowSurface};

/// How a fake window reacts to resize requests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ResizeBehavior {
    /// Takes any size, clamped to its min/max constraints.
    #[default]
    Normal,
    /// Fails every resize.
    Reject,
    /// Reports success but keeps its size.
    Ignore,
}

/// A mutating call made against the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCall {
    Move(WindowHandle, Point),
    Resize(WindowHandle, Size),
    Activate(WindowHandle),
    Close(WindowHandle),
}

#[derive(Debug, Clone)]
struct FakeWindow {
    handle: WindowHandle,
    owner: String,
    title: String,
    bounds: Rect,
    visible: bool,
    readable: bool,
    min_size: Option<Size>,
    max_size: Option<Size>,
    resize: ResizeBehavior,
    move_error: Option<SurfaceError>,
}

#[derive(Debug, Default)]
struct Inner {
    windows: Vec<FakeWindow>,
    screen: Option<Rect>,
    focused: Option<WindowHandle>,
    next_id: u64,
    calls: Vec<SurfaceCall>,
}

impl Inner {
    fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut FakeWindow> {
        self.windows.iter_mut().find(|w| w.handle == handle)
    }
}

/// A window surface backed by plain memory.
#[derive(Debug, Default)]
pub struct FakeSurface {
    inner: Mutex<Inner>,
}

impl FakeSurface {
    /// Creates a surface with the given main screen frame.
    #[must_use]
    pub fn new(screen: Rect) -> Self {
        Self {
            inner: Mutex::new(Inner {
                screen: Some(screen),
                next_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// Creates a 1920x1080 surface.
    #[must_use]
    pub fn full_hd() -> Self { Self::new(Rect::new(0.0, 0.0, 1920.0, 1080.0)) }

    /// Adds a visible window and returns its handle.
    pub fn add_window(&self, owner: &str, title: &str, bounds: Rect) -> WindowHandle {
        let mut inner = self.inner.lock();
        let handle = WindowHandle::from_raw(inner.next_id);
        inner.next_id += 1;
        inner.windows.push(FakeWindow {
            handle,
            owner: owner.to_string(),
            title: title.to_string(),
            bounds,
            visible: true,
            readable: true,
            min_size: None,
            max_size: None,
            resize: ResizeBehavior::Normal,
            move_error: None,
        });
        handle
    }

    /// Removes a window as if it had been closed by its owner.
    pub fn remove_window(&self, handle: WindowHandle) {
        let mut inner = self.inner.lock();
        inner.windows.retain(|w| w.handle != handle);
        if inner.focused == Some(handle) {
            inner.focused = None;
        }
    }

    /// Returns the descriptor the surface would report for `handle`.
    #[must_use]
    pub fn descriptor(&self, handle: WindowHandle) -> Option<WindowDescriptor> {
        let inner = self.inner.lock();
        let focused = inner.focused;
        inner.windows.iter().find(|w| w.handle == handle).map(|w| describe(w, focused))
    }

    /// Returns `true` if the window still exists.
    #[must_use]
    pub fn has_window(&self, handle: WindowHandle) -> bool {
        self.inner.lock().windows.iter().any(|w| w.handle == handle)
    }

    /// Overwrites a window's frame, bypassing constraints (a user drag).
    pub fn set_bounds(&self, handle: WindowHandle, bounds: Rect) {
        if let Some(window) = self.inner.lock().window_mut(handle) {
            window.bounds = bounds;
        }
    }

    /// Caps the size a window accepts.
    pub fn set_max_size(&self, handle: WindowHandle, size: Size) {
        if let Some(window) = self.inner.lock().window_mut(handle) {
            window.max_size = Some(size);
        }
    }

    /// Sets the smallest size a window accepts.
    pub fn set_min_size(&self, handle: WindowHandle, size: Size) {
        if let Some(window) = self.inner.lock().window_mut(handle) {
            window.min_size = Some(size);
        }
    }

    /// Pins a window to exactly `size`, whatever is requested.
    pub fn set_fixed_size(&self, handle: WindowHandle, size: Size) {
        if let Some(window) = self.inner.lock().window_mut(handle) {
            window.min_size = Some(size);
            window.max_size = Some(size);
        }
    }

    /// Sets how a window reacts to resizes.
    pub fn set_resize_behavior(&self, handle: WindowHandle, behavior: ResizeBehavior) {
        if let Some(window) = self.inner.lock().window_mut(handle) {
            window.resize = behavior;
        }
    }

    /// Makes every move of a window fail with `error`.
    pub fn set_move_error(&self, handle: WindowHandle, error: Option<SurfaceError>) {
        if let Some(window) = self.inner.lock().window_mut(handle) {
            window.move_error = error;
        }
    }

    /// Controls whether a window's frame can be read.
    pub fn set_bounds_readable(&self, handle: WindowHandle, readable: bool) {
        if let Some(window) = self.inner.lock().window_mut(handle) {
            window.readable = readable;
        }
    }

    /// Hides or shows a window.
    pub fn set_visible(&self, handle: WindowHandle, visible: bool) {
        if let Some(window) = self.inner.lock().window_mut(handle) {
            window.visible = visible;
        }
    }

    /// Replaces the screen frame.
    pub fn set_screen(&self, screen: Option<Rect>) { self.inner.lock().screen = screen; }

    /// Moves keyboard focus without recording a call.
    pub fn set_focused(&self, handle: Option<WindowHandle>) { self.inner.lock().focused = handle; }

    /// Returns every recorded call.
    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> { self.inner.lock().calls.clone() }

    /// Returns the handles passed to `activate`, in order.
    #[must_use]
    pub fn activations(&self) -> Vec<WindowHandle> {
        self.filter_calls(|call| match call {
            SurfaceCall::Activate(h) => Some(*h),
            _ => None,
        })
    }

    /// Returns the handles passed to `close`, in order.
    #[must_use]
    pub fn closes(&self) -> Vec<WindowHandle> {
        self.filter_calls(|call| match call {
            SurfaceCall::Close(h) => Some(*h),
            _ => None,
        })
    }

    /// Returns the sizes requested for `handle`, in order.
    #[must_use]
    pub fn resizes_of(&self, handle: WindowHandle) -> Vec<Size> {
        self.filter_calls(|call| match call {
            SurfaceCall::Resize(h, size) if *h == handle => Some(*size),
            _ => None,
        })
    }

    /// Forgets recorded calls.
    pub fn clear_calls(&self) { self.inner.lock().calls.clear(); }

    fn filter_calls<T>(&self, f: impl FnMut(&SurfaceCall) -> Option<T>) -> Vec<T> {
        self.inner.lock().calls.iter().filter_map(f).collect()
    }
}

fn describe(window: &FakeWindow, focused: Option<WindowHandle>) -> WindowDescriptor {
    WindowDescriptor {
        handle: window.handle,
        owner_name: window.owner.clone(),
        display_name: window.title.clone(),
        bounds: window.bounds,
        is_active: focused == Some(window.handle),
    }
}

fn clamp_size(size: Size, min: Option<Size>, max: Option<Size>) -> Size {
    let size = min.map_or(size, |min| size.max(min));
    max.map_or(size, |max| size.min(max))
}

impl WindowSurface for FakeSurface {
    fn query_windows(&self, visible_only: bool) -> Vec<WindowDescriptor> {
        let inner = self.inner.lock();
        inner
            .windows
            .iter()
            .filter(|w| w.visible || !visible_only)
            .map(|w| describe(w, inner.focused))
            .collect()
    }

    fn bounds(&self, handle: WindowHandle) -> Option<Rect> {
        let inner = self.inner.lock();
        inner
            .windows
            .iter()
            .find(|w| w.handle == handle && w.readable)
            .map(|w| w.bounds)
    }

    fn move_to(&self, handle: WindowHandle, origin: Point) -> SurfaceResult {
        let mut inner = self.inner.lock();
        inner.calls.push(SurfaceCall::Move(handle, origin));
        let window = inner.window_mut(handle).ok_or(SurfaceError::WindowNotFound)?;
        if let Some(err) = window.move_error.clone() {
            return Err(err);
        }
        window.bounds.x = origin.x;
        window.bounds.y = origin.y;
        Ok(())
    }

    fn resize(&self, handle: WindowHandle, size: Size) -> SurfaceResult {
        let mut inner = self.inner.lock();
        inner.calls.push(SurfaceCall::Resize(handle, size));
        let window = inner.window_mut(handle).ok_or(SurfaceError::WindowNotFound)?;
        match window.resize {
            ResizeBehavior::Reject => Err(SurfaceError::failed("resize rejected")),
            ResizeBehavior::Ignore => Ok(()),
            ResizeBehavior::Normal => {
                let size = clamp_size(size, window.min_size, window.max_size);
                window.bounds.width = size.width;
                window.bounds.height = size.height;
                Ok(())
            }
        }
    }

    fn activate(&self, handle: WindowHandle) -> SurfaceResult {
        let mut inner = self.inner.lock();
        inner.calls.push(SurfaceCall::Activate(handle));
        if inner.window_mut(handle).is_none() {
            return Err(SurfaceError::WindowNotFound);
        }
        inner.focused = Some(handle);
        Ok(())
    }

    fn close(&self, handle: WindowHandle) -> SurfaceResult {
        let mut inner = self.inner.lock();
        inner.calls.push(SurfaceCall::Close(handle));
        let before = inner.windows.len();
        inner.windows.retain(|w| w.handle != handle);
        if inner.windows.len() == before {
            return Err(SurfaceError::WindowNotFound);
        }
        if inner.focused == Some(handle) {
            inner.focused = None;
        }
        Ok(())
    }

    fn focused_handle(&self) -> Option<WindowHandle> { self.inner.lock().focused }

    fn screen_frame(&self) -> Option<Rect> { self.inner.lock().screen }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_respects_constraints() {
        let surface = FakeSurface::full_hd();
        let h = surface.add_window("Editor", "main.rs", Rect::new(0.0, 0.0, 800.0, 600.0));
        surface.set_max_size(h, Size::new(1000.0, 700.0));

        surface.resize(h, Size::new(1904.0, 1016.0)).unwrap();
        assert_eq!(surface.bounds(h).unwrap().size(), Size::new(1000.0, 700.0));
    }

    #[test]
    fn test_ignored_resize_reports_success() {
        let surface = FakeSurface::full_hd();
        let h = surface.add_window("Editor", "main.rs", Rect::new(0.0, 0.0, 800.0, 600.0));
        surface.set_resize_behavior(h, ResizeBehavior::Ignore);

        assert!(surface.resize(h, Size::new(1000.0, 1000.0)).is_ok());
        assert_eq!(surface.bounds(h).unwrap().size(), Size::new(800.0, 600.0));
        assert_eq!(surface.resizes_of(h), vec![Size::new(1000.0, 1000.0)]);
    }

    #[test]
    fn test_close_removes_window_and_focus() {
        let surface = FakeSurface::full_hd();
        let h = surface.add_window("Terminal", "zsh", Rect::new(0.0, 0.0, 800.0, 600.0));
        surface.activate(h).unwrap();
        assert_eq!(surface.focused_handle(), Some(h));

        surface.close(h).unwrap();
        assert!(!surface.has_window(h));
        assert_eq!(surface.focused_handle(), None);
        assert_eq!(surface.close(h), Err(SurfaceError::WindowNotFound));
        assert_eq!(surface.closes(), vec![h, h]);
    }

    #[test]
    fn test_query_filters_hidden_windows() {
        let surface = FakeSurface::full_hd();
        let a = surface.add_window("A", "a", Rect::new(0.0, 0.0, 800.0, 600.0));
        let b = surface.add_window("B", "b", Rect::new(0.0, 0.0, 800.0, 600.0));
        surface.set_visible(b, false);

        let visible: Vec<_> = surface.query_windows(true).into_iter().map(|w| w.handle).collect();
        assert_eq!(visible, vec![a]);
        assert_eq!(surface.query_windows(false).len(), 2);
    }
}
