/// Raw platform input events, the single entry point through which a window
/// forwards native messages to its input system.

/// Raw wheel units that make up one wheel notch
pub const WHEEL_DELTA: i32 = 120;

/// A raw, not yet interpreted, platform input event
///
/// Codes are native: `vk_code` is a virtual-key code and `button` a native
/// button index. The input system maps them through its lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Key transition. Repeated `pressed == true` events model auto-repeat.
    Key { vk_code: u32, pressed: bool },
    /// Mouse button transition at client coordinates `(x, y)`
    MouseButton { button: u32, pressed: bool, x: i32, y: i32 },
    /// Cursor moved to client coordinates `(x, y)`
    MouseMove { x: i32, y: i32 },
    /// Wheel rotated by `raw_delta` raw units (multiples of [`WHEEL_DELTA`])
    MouseWheel { raw_delta: i32 },
}

/// Convert a raw wheel delta to a signed notch count.
///
/// Partial notches (high-resolution wheels) truncate toward zero.
pub fn wheel_notches(raw_delta: i32) -> i32 {
    raw_delta / WHEEL_DELTA
}
