/// Platform cursor access used by the input router

use std::sync::{Arc, Mutex};
use glam::IVec2;

/// Operations the input router needs from the platform cursor
pub trait CursorControl: Send {
    /// Current cursor position in client coordinates, if the platform can
    /// report it. `None` makes the router rely on move events alone.
    fn position(&self) -> Option<IVec2>;

    /// Warp the cursor to a client-space position
    fn set_position(&mut self, position: IVec2);

    /// Show or hide the cursor
    fn set_visible(&mut self, visible: bool);

    /// Confine the cursor to the window (or release it)
    fn set_captured(&mut self, captured: bool);
}

/// Observable state of a [`HeadlessCursor`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessCursorState {
    pub visible: bool,
    pub captured: bool,
    pub last_warp: Option<IVec2>,
    pub visibility_calls: u32,
    pub capture_calls: u32,
    pub warp_calls: u32,
}

/// Cursor without an OS behind it
///
/// Records every platform call so callers can check that toggles are not
/// forwarded redundantly. Clones share the same state.
#[derive(Debug, Clone)]
pub struct HeadlessCursor {
    state: Arc<Mutex<HeadlessCursorState>>,
}

impl Default for HeadlessCursor {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(HeadlessCursorState {
                visible: true,
                ..HeadlessCursorState::default()
            })),
        }
    }
}

impl HeadlessCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded state
    pub fn snapshot(&self) -> HeadlessCursorState {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn with_state(&self, f: impl FnOnce(&mut HeadlessCursorState)) {
        match self.state.lock() {
            Ok(mut state) => f(&mut *state),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }
}

impl CursorControl for HeadlessCursor {
    fn position(&self) -> Option<IVec2> {
        None
    }

    fn set_position(&mut self, position: IVec2) {
        self.with_state(|state| {
            state.last_warp = Some(position);
            state.warp_calls += 1;
        });
    }

    fn set_visible(&mut self, visible: bool) {
        self.with_state(|state| {
            state.visible = visible;
            state.visibility_calls += 1;
        });
    }

    fn set_captured(&mut self, captured: bool) {
        self.with_state(|state| {
            state.captured = captured;
            state.capture_calls += 1;
        });
    }
}
