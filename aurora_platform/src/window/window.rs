/// Window trait, configuration and native handle

use std::num::NonZeroUsize;
use raw_window_handle::RawWindowHandle;
use crate::input::Input;

/// Opaque native window handle (HWND, X11 window id, surface pointer, ...)
///
/// The null handle is represented explicitly so APIs can reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle(Option<NonZeroUsize>);

impl WindowHandle {
    pub const NULL: WindowHandle = WindowHandle(None);

    /// Wrap a raw handle value; zero yields [`WindowHandle::NULL`]
    pub fn from_raw(raw: usize) -> Self {
        Self(NonZeroUsize::new(raw))
    }

    /// Raw handle value (0 for null)
    pub fn as_raw(&self) -> usize {
        self.0.map_or(0, NonZeroUsize::get)
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

impl From<RawWindowHandle> for WindowHandle {
    fn from(raw: RawWindowHandle) -> Self {
        match raw {
            RawWindowHandle::Win32(handle) => Self::from_raw(handle.hwnd.get() as usize),
            RawWindowHandle::Xlib(handle) => Self::from_raw(handle.window as usize),
            RawWindowHandle::Xcb(handle) => Self::from_raw(handle.window.get() as usize),
            RawWindowHandle::Wayland(handle) => Self::from_raw(handle.surface.as_ptr() as usize),
            RawWindowHandle::AppKit(handle) => Self::from_raw(handle.ns_view.as_ptr() as usize),
            _ => Self::NULL,
        }
    }
}

/// Window creation parameters
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Initial position; `None` lets the platform choose
    pub position: Option<(i32, i32)>,
    pub resizable: bool,
    pub fullscreen: bool,
    pub maximized: bool,
    pub vsync: bool,
    pub min_size: Option<(u32, u32)>,
    pub max_size: Option<(u32, u32)>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Aurora Application".to_string(),
            width: 1280,
            height: 720,
            position: None,
            resizable: true,
            fullscreen: false,
            maximized: false,
            vsync: true,
            min_size: None,
            max_size: None,
        }
    }
}

impl WindowConfig {
    /// Clamp a client size to the configured min/max bounds
    pub fn clamp_size(&self, width: u32, height: u32) -> (u32, u32) {
        let (mut width, mut height) = (width, height);
        if let Some((min_w, min_h)) = self.min_size {
            width = width.max(min_w);
            height = height.max(min_h);
        }
        if let Some((max_w, max_h)) = self.max_size {
            width = width.min(max_w);
            height = height.min(max_h);
        }
        (width, height)
    }
}

/// Called with the new client size
pub type ResizeCallback = Box<dyn FnMut(u32, u32) + Send>;

/// Called when the window is asked to close
pub type CloseCallback = Box<dyn FnMut() + Send>;

/// Called with `true` on focus gain, `false` on focus loss
pub type FocusCallback = Box<dyn FnMut(bool) + Send>;

/// Native window with an attached input system
pub trait Window {
    /// Pump queued platform messages, then latch the input frame
    fn update(&mut self);

    fn native_handle(&self) -> WindowHandle;

    // ===== GEOMETRY =====

    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, width: u32, height: u32);
    fn position(&self) -> (i32, i32);
    fn set_position(&mut self, x: i32, y: i32);

    // ===== STATE =====

    fn title(&self) -> &str;
    fn set_title(&mut self, title: &str);
    fn show(&mut self);
    fn hide(&mut self);
    fn is_visible(&self) -> bool;
    fn minimize(&mut self);
    fn maximize(&mut self);
    fn restore(&mut self);
    fn is_minimized(&self) -> bool;
    fn is_maximized(&self) -> bool;
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn is_fullscreen(&self) -> bool;
    fn set_vsync(&mut self, vsync: bool);
    fn vsync(&self) -> bool;
    fn has_focus(&self) -> bool;

    /// True once a close was requested by the user or the application
    fn should_close(&self) -> bool;
    fn request_close(&mut self);

    // ===== INPUT =====

    fn input(&self) -> &dyn Input;
    fn input_mut(&mut self) -> &mut dyn Input;

    // ===== CALLBACKS =====

    fn set_resize_callback(&mut self, callback: ResizeCallback);
    fn set_close_callback(&mut self, callback: CloseCallback);
    fn set_focus_callback(&mut self, callback: FocusCallback);
    fn clear_callbacks(&mut self);

    /// Destroy the native window. Idempotent.
    fn shutdown(&mut self);
}
