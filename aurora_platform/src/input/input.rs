/// Input trait - polled and callback-driven keyboard/mouse access for a window

use glam::IVec2;
use crate::error::Result;
use crate::input::key::{Key, MouseButton};
use crate::input::platform_event::PlatformEvent;
use crate::window::WindowHandle;

/// Called on key edges with `(key, pressed)`
pub type KeyCallback = Box<dyn FnMut(Key, bool) + Send>;

/// Called on mouse button edges with `(button, pressed, x, y)`
pub type MouseButtonCallback = Box<dyn FnMut(MouseButton, bool, i32, i32) + Send>;

/// Called on every cursor move with `(x, y)`
pub type MouseMoveCallback = Box<dyn FnMut(i32, i32) + Send>;

/// Called on every wheel event with the signed notch count
pub type MouseScrollCallback = Box<dyn FnMut(i32) + Send>;

/// Input system bound to one native window
///
/// Call [`Input::update`] once per tick before polling. Edge queries
/// (`was_*`) compare the state latched by the last two updates; level queries
/// (`is_*`) read the live state.
pub trait Input: Send {
    // ===== LIFECYCLE =====

    /// Bind to a native window. Fails with `Error::InvalidHandle` on a null
    /// handle, leaving the system uninitialized.
    ///
    /// Calling it again on an initialized system rebinds to the new window:
    /// capture and cursor visibility are released and state is reset, but
    /// registered callbacks are kept.
    fn initialize(&mut self, window: WindowHandle) -> Result<()>;

    /// Release capture, restore the cursor, clear callbacks and state.
    /// Safe to call repeatedly.
    fn shutdown(&mut self);

    fn is_initialized(&self) -> bool;

    /// Latch the current frame. Never invokes callbacks.
    fn update(&mut self);

    /// Zero all key, button, cursor and wheel state
    fn reset_state(&mut self);

    // ===== RAW EVENTS =====

    /// Feed one raw platform event
    fn process_platform_event(&mut self, event: PlatformEvent);

    fn on_key_event(&mut self, vk_code: u32, pressed: bool) {
        self.process_platform_event(PlatformEvent::Key { vk_code, pressed });
    }

    fn on_mouse_button_event(&mut self, button: u32, pressed: bool, x: i32, y: i32) {
        self.process_platform_event(PlatformEvent::MouseButton { button, pressed, x, y });
    }

    fn on_mouse_move_event(&mut self, x: i32, y: i32) {
        self.process_platform_event(PlatformEvent::MouseMove { x, y });
    }

    fn on_mouse_wheel_event(&mut self, raw_delta: i32) {
        self.process_platform_event(PlatformEvent::MouseWheel { raw_delta });
    }

    // ===== KEYBOARD =====

    fn is_key_down(&self, key: Key) -> bool;

    fn is_key_up(&self, key: Key) -> bool {
        !self.is_key_down(key)
    }

    fn was_key_pressed(&self, key: Key) -> bool;
    fn was_key_released(&self, key: Key) -> bool;

    // ===== MOUSE =====

    fn is_mouse_button_down(&self, button: MouseButton) -> bool;

    fn is_mouse_button_up(&self, button: MouseButton) -> bool {
        !self.is_mouse_button_down(button)
    }

    fn was_mouse_button_pressed(&self, button: MouseButton) -> bool;
    fn was_mouse_button_released(&self, button: MouseButton) -> bool;

    fn mouse_position(&self) -> IVec2;
    fn mouse_delta(&self) -> IVec2;
    fn wheel_delta(&self) -> i32;

    /// Warp the cursor to a client-space position
    fn set_mouse_position(&mut self, position: IVec2);

    /// Confine the cursor to the window. Repeated calls with the same value
    /// do nothing.
    fn capture_mouse(&mut self, capture: bool);

    /// Show or hide the cursor. Repeated calls with the same value do nothing.
    fn show_cursor(&mut self, show: bool);

    fn is_mouse_captured(&self) -> bool;
    fn is_cursor_visible(&self) -> bool;

    // ===== CALLBACKS =====

    fn set_key_callback(&mut self, callback: KeyCallback);
    fn set_mouse_button_callback(&mut self, callback: MouseButtonCallback);
    fn set_mouse_move_callback(&mut self, callback: MouseMoveCallback);
    fn set_mouse_scroll_callback(&mut self, callback: MouseScrollCallback);

    /// Remove all four callbacks
    fn clear_callbacks(&mut self);
}
