/// InputRouter - routes raw platform events into `InputState` and callbacks

use glam::IVec2;
use crate::error::{Error, Result};
use crate::input::cursor::{CursorControl, HeadlessCursor};
use crate::input::input::{
    Input, KeyCallback, MouseButtonCallback, MouseMoveCallback, MouseScrollCallback,
};
use crate::input::input_state::InputState;
use crate::input::key::{Key, MouseButton};
use crate::input::platform_event::{wheel_notches, PlatformEvent};
use crate::window::WindowHandle;
use crate::{platform_debug, platform_error, platform_info, platform_trace};

const SOURCE: &str = "aurora::Input";

/// Default `Input` implementation
///
/// Events and queries before `initialize` (or after `shutdown`) are ignored
/// and return default values.
pub struct InputRouter {
    window: WindowHandle,
    state: InputState,
    cursor: Box<dyn CursorControl>,
    cursor_visible: bool,
    mouse_captured: bool,
    key_callback: Option<KeyCallback>,
    mouse_button_callback: Option<MouseButtonCallback>,
    mouse_move_callback: Option<MouseMoveCallback>,
    mouse_scroll_callback: Option<MouseScrollCallback>,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputRouter {
    /// Router driving a [`HeadlessCursor`]
    pub fn new() -> Self {
        Self::with_cursor(Box::new(HeadlessCursor::new()))
    }

    /// Router driving a platform cursor
    pub fn with_cursor(cursor: Box<dyn CursorControl>) -> Self {
        Self {
            window: WindowHandle::NULL,
            state: InputState::new(),
            cursor,
            cursor_visible: true,
            mouse_captured: false,
            key_callback: None,
            mouse_button_callback: None,
            mouse_move_callback: None,
            mouse_scroll_callback: None,
        }
    }

    /// Window this router is bound to (`WindowHandle::NULL` when uninitialized)
    pub fn window(&self) -> WindowHandle {
        self.window
    }

    /// Read-only access to the underlying state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    fn handle_key(&mut self, vk_code: u32, pressed: bool) {
        let key = Key::from_virtual_key(vk_code);
        if key == Key::Unknown {
            platform_trace!(SOURCE, "Ignoring unmapped key code 0x{:X}", vk_code);
            return;
        }
        if !self.state.set_key(key, pressed) {
            return;
        }
        if let Some(callback) = self.key_callback.as_mut() {
            callback(key, pressed);
        }
    }

    fn handle_mouse_button(&mut self, code: u32, pressed: bool, x: i32, y: i32) {
        let Some(button) = MouseButton::from_native(code) else {
            platform_trace!(SOURCE, "Ignoring untracked mouse button {}", code);
            return;
        };
        self.state.set_position(IVec2::new(x, y));
        if !self.state.set_mouse_button(button, pressed) {
            return;
        }
        if let Some(callback) = self.mouse_button_callback.as_mut() {
            callback(button, pressed, x, y);
        }
    }

    fn handle_mouse_move(&mut self, x: i32, y: i32) {
        self.state.set_position(IVec2::new(x, y));
        if let Some(callback) = self.mouse_move_callback.as_mut() {
            callback(x, y);
        }
    }

    fn handle_mouse_wheel(&mut self, raw_delta: i32) {
        let notches = wheel_notches(raw_delta);
        self.state.add_wheel_delta(raw_delta);
        if let Some(callback) = self.mouse_scroll_callback.as_mut() {
            callback(notches);
        }
    }

    /// Drop the window binding, release capture and restore the cursor.
    /// Callbacks are left in place.
    fn release_window(&mut self) {
        self.capture_mouse(false);
        self.show_cursor(true);
        self.state = InputState::new();
        self.window = WindowHandle::NULL;
    }
}

impl Input for InputRouter {
    fn initialize(&mut self, window: WindowHandle) -> Result<()> {
        if window.is_null() {
            platform_error!(SOURCE, "Cannot initialize input with a null window handle");
            return Err(Error::InvalidHandle);
        }
        if self.is_initialized() {
            platform_debug!(SOURCE, "Rebinding input from {:?} to {:?}", self.window, window);
            self.release_window();
        }

        let start = self.cursor.position().unwrap_or(IVec2::ZERO);
        self.window = window;
        self.state.reset_to(start);
        platform_info!(SOURCE, "Input initialized for window {:?}", window);
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.is_initialized() {
            return;
        }
        self.release_window();
        self.clear_callbacks();
        platform_info!(SOURCE, "Input shut down");
    }

    fn is_initialized(&self) -> bool {
        !self.window.is_null()
    }

    fn update(&mut self) {
        if !self.is_initialized() {
            return;
        }
        let sampled = self.cursor.position();
        self.state.latch(sampled);
    }

    fn reset_state(&mut self) {
        if !self.is_initialized() {
            return;
        }
        let position = self.state.mouse_position();
        self.state.reset_to(position);
        platform_debug!(SOURCE, "Input state reset");
    }

    fn process_platform_event(&mut self, event: PlatformEvent) {
        if !self.is_initialized() {
            return;
        }
        match event {
            PlatformEvent::Key { vk_code, pressed } => self.handle_key(vk_code, pressed),
            PlatformEvent::MouseButton { button, pressed, x, y } => {
                self.handle_mouse_button(button, pressed, x, y)
            }
            PlatformEvent::MouseMove { x, y } => self.handle_mouse_move(x, y),
            PlatformEvent::MouseWheel { raw_delta } => self.handle_mouse_wheel(raw_delta),
        }
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.is_initialized() && self.state.is_key_down(key)
    }

    fn was_key_pressed(&self, key: Key) -> bool {
        self.is_initialized() && self.state.was_key_pressed(key)
    }

    fn was_key_released(&self, key: Key) -> bool {
        self.is_initialized() && self.state.was_key_released(key)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.is_initialized() && self.state.is_mouse_button_down(button)
    }

    fn was_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.is_initialized() && self.state.was_mouse_button_pressed(button)
    }

    fn was_mouse_button_released(&self, button: MouseButton) -> bool {
        self.is_initialized() && self.state.was_mouse_button_released(button)
    }

    fn mouse_position(&self) -> IVec2 {
        self.state.mouse_position()
    }

    fn mouse_delta(&self) -> IVec2 {
        self.state.mouse_delta()
    }

    fn wheel_delta(&self) -> i32 {
        self.state.wheel_delta()
    }

    fn set_mouse_position(&mut self, position: IVec2) {
        if !self.is_initialized() {
            return;
        }
        self.cursor.set_position(position);
        self.state.set_position(position);
    }

    fn capture_mouse(&mut self, capture: bool) {
        if !self.is_initialized() || self.mouse_captured == capture {
            return;
        }
        self.cursor.set_captured(capture);
        self.mouse_captured = capture;
    }

    fn show_cursor(&mut self, show: bool) {
        if !self.is_initialized() || self.cursor_visible == show {
            return;
        }
        self.cursor.set_visible(show);
        self.cursor_visible = show;
    }

    fn is_mouse_captured(&self) -> bool {
        self.mouse_captured
    }

    fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn set_key_callback(&mut self, callback: KeyCallback) {
        self.key_callback = Some(callback);
    }

    fn set_mouse_button_callback(&mut self, callback: MouseButtonCallback) {
        self.mouse_button_callback = Some(callback);
    }

    fn set_mouse_move_callback(&mut self, callback: MouseMoveCallback) {
        self.mouse_move_callback = Some(callback);
    }

    fn set_mouse_scroll_callback(&mut self, callback: MouseScrollCallback) {
        self.mouse_scroll_callback = Some(callback);
    }

    fn clear_callbacks(&mut self) {
        self.key_callback = None;
        self.mouse_button_callback = None;
        self.mouse_move_callback = None;
        self.mouse_scroll_callback = None;
    }
}

impl Drop for InputRouter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "input_router_tests.rs"]
mod tests;
