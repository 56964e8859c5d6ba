//! Keyboard and mouse input

pub mod key;
pub mod platform_event;
pub mod cursor;
pub mod input;
pub mod input_state;
pub mod input_router;
pub mod winit_events;

pub use key::{vk, Key, MouseButton, ALL_KEYS, KEY_COUNT, MOUSE_BUTTON_COUNT};
pub use platform_event::{wheel_notches, PlatformEvent, WHEEL_DELTA};
pub use cursor::{CursorControl, HeadlessCursor, HeadlessCursorState};
pub use input::{Input, KeyCallback, MouseButtonCallback, MouseMoveCallback, MouseScrollCallback};
pub use input_state::{InputState, KeyBitmap};
pub use input_router::InputRouter;
pub use winit_events::translate_winit_event;
