/// Translation from `winit` window events to platform messages
///
/// Key codes are converted into the virtual-key code space used by
/// `Key::from_virtual_key`, so events coming from winit go through the same
/// lookup tables as native messages.

use glam::IVec2;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use crate::input::key::vk;
use crate::input::platform_event::{PlatformEvent, WHEEL_DELTA};
use crate::window::WindowMessage;

/// Pixel scroll distance treated as one wheel notch
const PIXELS_PER_NOTCH: f64 = 20.0;

/// Translate one winit event.
///
/// `cursor` holds the last cursor position seen; it is updated by
/// `CursorMoved` and attached to button events, which winit reports without
/// coordinates. Returns `None` for events with no platform message.
pub fn translate_winit_event(event: &WindowEvent, cursor: &mut IVec2) -> Option<WindowMessage> {
    match event {
        WindowEvent::KeyboardInput { event: key_event, .. } => {
            let PhysicalKey::Code(code) = key_event.physical_key else {
                return None;
            };
            let vk_code = map_keycode_to_vk(code)?;
            Some(WindowMessage::Input(PlatformEvent::Key {
                vk_code,
                pressed: key_event.state == ElementState::Pressed,
            }))
        }
        WindowEvent::CursorMoved { position, .. } => {
            *cursor = IVec2::new(position.x as i32, position.y as i32);
            Some(WindowMessage::Input(PlatformEvent::MouseMove {
                x: cursor.x,
                y: cursor.y,
            }))
        }
        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button)?;
            Some(WindowMessage::Input(PlatformEvent::MouseButton {
                button,
                pressed: *state == ElementState::Pressed,
                x: cursor.x,
                y: cursor.y,
            }))
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let raw_delta = map_scroll_delta(*delta);
            if raw_delta == 0 {
                return None;
            }
            Some(WindowMessage::Input(PlatformEvent::MouseWheel { raw_delta }))
        }
        WindowEvent::Resized(size) => Some(WindowMessage::Resize {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::CloseRequested => Some(WindowMessage::Close),
        WindowEvent::Focused(focused) => Some(WindowMessage::Focus(*focused)),
        _ => None,
    }
}

/// Map a physical winit key to its virtual-key code
pub fn map_keycode_to_vk(code: KeyCode) -> Option<u32> {
    let letter = |c: char| Some(c as u32);
    match code {
        KeyCode::KeyA => letter('A'),
        KeyCode::KeyB => letter('B'),
        KeyCode::KeyC => letter('C'),
        KeyCode::KeyD => letter('D'),
        KeyCode::KeyE => letter('E'),
        KeyCode::KeyF => letter('F'),
        KeyCode::KeyG => letter('G'),
        KeyCode::KeyH => letter('H'),
        KeyCode::KeyI => letter('I'),
        KeyCode::KeyJ => letter('J'),
        KeyCode::KeyK => letter('K'),
        KeyCode::KeyL => letter('L'),
        KeyCode::KeyM => letter('M'),
        KeyCode::KeyN => letter('N'),
        KeyCode::KeyO => letter('O'),
        KeyCode::KeyP => letter('P'),
        KeyCode::KeyQ => letter('Q'),
        KeyCode::KeyR => letter('R'),
        KeyCode::KeyS => letter('S'),
        KeyCode::KeyT => letter('T'),
        KeyCode::KeyU => letter('U'),
        KeyCode::KeyV => letter('V'),
        KeyCode::KeyW => letter('W'),
        KeyCode::KeyX => letter('X'),
        KeyCode::KeyY => letter('Y'),
        KeyCode::KeyZ => letter('Z'),
        KeyCode::Digit0 => letter('0'),
        KeyCode::Digit1 => letter('1'),
        KeyCode::Digit2 => letter('2'),
        KeyCode::Digit3 => letter('3'),
        KeyCode::Digit4 => letter('4'),
        KeyCode::Digit5 => letter('5'),
        KeyCode::Digit6 => letter('6'),
        KeyCode::Digit7 => letter('7'),
        KeyCode::Digit8 => letter('8'),
        KeyCode::Digit9 => letter('9'),
        KeyCode::F1 => Some(vk::F1),
        KeyCode::F2 => Some(vk::F1 + 1),
        KeyCode::F3 => Some(vk::F1 + 2),
        KeyCode::F4 => Some(vk::F1 + 3),
        KeyCode::F5 => Some(vk::F1 + 4),
        KeyCode::F6 => Some(vk::F1 + 5),
        KeyCode::F7 => Some(vk::F1 + 6),
        KeyCode::F8 => Some(vk::F1 + 7),
        KeyCode::F9 => Some(vk::F1 + 8),
        KeyCode::F10 => Some(vk::F1 + 9),
        KeyCode::F11 => Some(vk::F1 + 10),
        KeyCode::F12 => Some(vk::F1 + 11),
        KeyCode::Space => Some(vk::SPACE),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(vk::RETURN),
        KeyCode::Escape => Some(vk::ESCAPE),
        KeyCode::Tab => Some(vk::TAB),
        KeyCode::Backspace => Some(vk::BACK),
        KeyCode::Delete => Some(vk::DELETE),
        KeyCode::Insert => Some(vk::INSERT),
        KeyCode::Home => Some(vk::HOME),
        KeyCode::End => Some(vk::END),
        KeyCode::PageUp => Some(vk::PRIOR),
        KeyCode::PageDown => Some(vk::NEXT),
        KeyCode::ArrowLeft => Some(vk::LEFT),
        KeyCode::ArrowUp => Some(vk::UP),
        KeyCode::ArrowRight => Some(vk::RIGHT),
        KeyCode::ArrowDown => Some(vk::DOWN),
        KeyCode::ShiftLeft => Some(vk::LSHIFT),
        KeyCode::ShiftRight => Some(vk::RSHIFT),
        KeyCode::ControlLeft => Some(vk::LCONTROL),
        KeyCode::ControlRight => Some(vk::RCONTROL),
        KeyCode::AltLeft => Some(vk::LMENU),
        KeyCode::AltRight => Some(vk::RMENU),
        _ => None,
    }
}

/// Map a winit mouse button to its native button code. Side and extra
/// buttons are not tracked.
pub fn map_mouse_button(button: WinitMouseButton) -> Option<u32> {
    match button {
        WinitMouseButton::Left => Some(0),
        WinitMouseButton::Right => Some(1),
        WinitMouseButton::Middle => Some(2),
        _ => None,
    }
}

/// Convert a winit scroll delta to raw wheel units (vertical axis only)
pub fn map_scroll_delta(delta: MouseScrollDelta) -> i32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => (y * WHEEL_DELTA as f32) as i32,
        MouseScrollDelta::PixelDelta(position) => {
            (position.y / PIXELS_PER_NOTCH * WHEEL_DELTA as f64) as i32
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "winit_events_tests.rs"]
mod tests;
