/// Double-buffered keyboard and mouse state
///
/// Raw events write the *live* state immediately. `update()` latches the live
/// state once per tick, so edge queries (`was_*_pressed/released`) compare the
/// state observed at the last two `update()` calls and report every edge for
/// exactly one cycle.

use glam::IVec2;
use crate::input::key::{Key, MouseButton, KEY_COUNT, MOUSE_BUTTON_COUNT};
use crate::input::platform_event::WHEEL_DELTA;

const KEY_WORDS: usize = KEY_COUNT / 64;

/// Fixed-size bitmap indexed by `Key` ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBitmap {
    words: [u64; KEY_WORDS],
}

impl Default for KeyBitmap {
    fn default() -> Self {
        Self { words: [0; KEY_WORDS] }
    }
}

impl KeyBitmap {
    #[inline]
    pub fn get(&self, key: Key) -> bool {
        let index = key.index();
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    #[inline]
    pub fn set(&mut self, key: Key, down: bool) {
        let index = key.index();
        let mask = 1u64 << (index % 64);
        if down {
            self.words[index / 64] |= mask;
        } else {
            self.words[index / 64] &= !mask;
        }
    }

    /// Number of keys held down
    pub fn count(&self) -> u32 {
        self.words.iter().map(|word| word.count_ones()).sum()
    }

    pub fn clear(&mut self) {
        self.words = [0; KEY_WORDS];
    }
}

/// Keyboard and mouse state with frame latching
#[derive(Debug, Clone, Default)]
pub struct InputState {
    // Live state, written by event handlers
    keys: KeyBitmap,
    buttons: [bool; MOUSE_BUTTON_COUNT],
    position: IVec2,
    pending_wheel: i32,

    // State observed at the most recent update()
    current_keys: KeyBitmap,
    current_buttons: [bool; MOUSE_BUTTON_COUNT],
    current_position: IVec2,

    // State observed at the update() before that
    previous_keys: KeyBitmap,
    previous_buttons: [bool; MOUSE_BUTTON_COUNT],
    previous_position: IVec2,

    mouse_delta: IVec2,
    wheel_delta: i32,

    // Set by reset_to(); the next latch reports a zero mouse delta
    rebase_position: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the state and take `position` as the starting cursor position
    pub fn reset_to(&mut self, position: IVec2) {
        *self = Self {
            position,
            current_position: position,
            previous_position: position,
            rebase_position: true,
            ..Self::default()
        };
    }

    // ===== EVENT SIDE =====

    /// Record a key transition. Returns `true` when the live state changed.
    pub fn set_key(&mut self, key: Key, down: bool) -> bool {
        if self.keys.get(key) == down {
            return false;
        }
        self.keys.set(key, down);
        true
    }

    /// Record a mouse button transition. Returns `true` when the live state changed.
    pub fn set_mouse_button(&mut self, button: MouseButton, down: bool) -> bool {
        let slot = &mut self.buttons[button.index()];
        if *slot == down {
            return false;
        }
        *slot = down;
        true
    }

    pub fn set_position(&mut self, position: IVec2) {
        self.position = position;
    }

    /// Accumulate raw wheel units. Whole notches are published at the next
    /// latch; the sub-notch remainder carries over.
    pub fn add_wheel_delta(&mut self, raw_delta: i32) {
        self.pending_wheel = self.pending_wheel.saturating_add(raw_delta);
    }

    // ===== LATCH =====

    /// Rotate the frame buffers.
    ///
    /// `sampled_position` is the cursor position read from the platform at this
    /// update, falling back to the last event position when unavailable.
    pub fn latch(&mut self, sampled_position: Option<IVec2>) {
        self.previous_keys = self.current_keys;
        self.current_keys = self.keys;

        self.previous_buttons = self.current_buttons;
        self.current_buttons = self.buttons;

        let sampled = sampled_position.unwrap_or(self.position);
        self.position = sampled;
        if self.rebase_position {
            self.previous_position = sampled;
            self.rebase_position = false;
        } else {
            self.previous_position = self.current_position;
        }
        self.current_position = sampled;
        self.mouse_delta = self.current_position - self.previous_position;

        self.wheel_delta = self.pending_wheel / WHEEL_DELTA;
        self.pending_wheel %= WHEEL_DELTA;
    }

    // ===== QUERIES =====

    #[inline]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.get(key)
    }

    #[inline]
    pub fn was_key_pressed(&self, key: Key) -> bool {
        self.current_keys.get(key) && !self.previous_keys.get(key)
    }

    #[inline]
    pub fn was_key_released(&self, key: Key) -> bool {
        !self.current_keys.get(key) && self.previous_keys.get(key)
    }

    #[inline]
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    #[inline]
    pub fn was_mouse_button_pressed(&self, button: MouseButton) -> bool {
        let index = button.index();
        self.current_buttons[index] && !self.previous_buttons[index]
    }

    #[inline]
    pub fn was_mouse_button_released(&self, button: MouseButton) -> bool {
        let index = button.index();
        !self.current_buttons[index] && self.previous_buttons[index]
    }

    /// Live cursor position in client coordinates
    pub fn mouse_position(&self) -> IVec2 {
        self.position
    }

    /// Cursor movement between the last two updates
    pub fn mouse_delta(&self) -> IVec2 {
        self.mouse_delta
    }

    /// Wheel notches received between the last two updates
    pub fn wheel_delta(&self) -> i32 {
        self.wheel_delta
    }

    /// Keys currently held down
    pub fn keys_down(&self) -> u32 {
        self.keys.count()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "input_state_tests.rs"]
mod tests;
