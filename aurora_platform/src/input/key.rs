/// Abstract key and mouse button enumerations plus the static tables that map
/// platform-native codes onto them.
///
/// Native key codes are Windows virtual-key codes. Other windowing layers
/// translate into that code space before handing events to the router (see
/// `winit_events`).

use std::sync::OnceLock;
use rustc_hash::FxHashMap;

/// Size of the key state bitmap. Every `Key` ordinal is below this bound.
pub const KEY_COUNT: usize = 512;

/// Number of tracked mouse buttons
pub const MOUSE_BUTTON_COUNT: usize = 3;

/// Platform-independent key identifiers
///
/// Discriminants match the virtual-key code of the key, so the ordinal doubles
/// as the index into the key state bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Key {
    Unknown = 0,

    // Letters
    A = 65, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers
    Num0 = 48, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,

    // Function keys
    F1 = 112, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    // Special keys
    Space = 32,
    Enter = 13,
    Escape = 27,
    Tab = 9,
    Backspace = 8,
    Delete = 46,
    Insert = 45,
    Home = 36,
    End = 35,
    PageUp = 33,
    PageDown = 34,

    // Arrow keys
    Left = 37,
    Up = 38,
    Right = 39,
    Down = 40,

    // Modifier keys
    Shift = 16,
    Control = 17,
    Alt = 18,
}

/// Every mapped key, in table order
pub const ALL_KEYS: [Key; 66] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
    Key::Num0, Key::Num1, Key::Num2, Key::Num3, Key::Num4,
    Key::Num5, Key::Num6, Key::Num7, Key::Num8, Key::Num9,
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
    Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
    Key::Space, Key::Enter, Key::Escape, Key::Tab, Key::Backspace,
    Key::Delete, Key::Insert, Key::Home, Key::End, Key::PageUp, Key::PageDown,
    Key::Left, Key::Up, Key::Right, Key::Down,
    Key::Shift, Key::Control, Key::Alt,
];

/// Windows virtual-key codes for the keys that are not their own ASCII value
pub mod vk {
    pub const BACK: u32 = 0x08;
    pub const TAB: u32 = 0x09;
    pub const RETURN: u32 = 0x0D;
    pub const SHIFT: u32 = 0x10;
    pub const CONTROL: u32 = 0x11;
    pub const MENU: u32 = 0x12;
    pub const ESCAPE: u32 = 0x1B;
    pub const SPACE: u32 = 0x20;
    pub const PRIOR: u32 = 0x21;
    pub const NEXT: u32 = 0x22;
    pub const END: u32 = 0x23;
    pub const HOME: u32 = 0x24;
    pub const LEFT: u32 = 0x25;
    pub const UP: u32 = 0x26;
    pub const RIGHT: u32 = 0x27;
    pub const DOWN: u32 = 0x28;
    pub const INSERT: u32 = 0x2D;
    pub const DELETE: u32 = 0x2E;
    pub const F1: u32 = 0x70;
    pub const LSHIFT: u32 = 0xA0;
    pub const RSHIFT: u32 = 0xA1;
    pub const LCONTROL: u32 = 0xA2;
    pub const RCONTROL: u32 = 0xA3;
    pub const LMENU: u32 = 0xA4;
    pub const RMENU: u32 = 0xA5;
}

fn virtual_key_table() -> &'static FxHashMap<u32, Key> {
    static TABLE: OnceLock<FxHashMap<u32, Key>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = FxHashMap::default();
        for key in ALL_KEYS {
            table.insert(key as u32, key);
        }
        // Left/right modifier variants resolve onto the same keys
        table.insert(vk::LSHIFT, Key::Shift);
        table.insert(vk::RSHIFT, Key::Shift);
        table.insert(vk::LCONTROL, Key::Control);
        table.insert(vk::RCONTROL, Key::Control);
        table.insert(vk::LMENU, Key::Alt);
        table.insert(vk::RMENU, Key::Alt);
        table
    })
}

impl Key {
    /// Map a virtual-key code to a key. Unmapped codes resolve to `Key::Unknown`.
    pub fn from_virtual_key(code: u32) -> Key {
        virtual_key_table().get(&code).copied().unwrap_or(Key::Unknown)
    }

    /// Index into the key state bitmap
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Mouse buttons tracked by the input state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
}

impl MouseButton {
    /// Map a native button code (0 = left, 1 = right, 2 = middle).
    ///
    /// Extra buttons (X1/X2 and beyond) are not tracked and return `None`.
    pub fn from_native(code: u32) -> Option<MouseButton> {
        match code {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Right),
            2 => Some(MouseButton::Middle),
            _ => None,
        }
    }

    /// Index into the mouse button state array
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
