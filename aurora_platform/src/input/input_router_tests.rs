use super::*;
use crate::input::cursor::HeadlessCursor;
use crate::input::key::vk;
use std::sync::{Arc, Mutex};

// ============================================================================
// TEST HELPERS
// ============================================================================

fn window() -> WindowHandle {
    WindowHandle::from_raw(0x1000)
}

fn initialized_router() -> InputRouter {
    let mut router = InputRouter::new();
    router.initialize(window()).expect("initialize with a valid handle");
    router
}

fn key(vk_code: char) -> u32 {
    vk_code as u32
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn test_null_handle_is_rejected() {
    let mut router = InputRouter::new();
    assert_eq!(router.initialize(WindowHandle::NULL), Err(Error::InvalidHandle));
    assert!(!router.is_initialized());

    // Every subsequent call is a no-op
    router.on_key_event(key('W'), true);
    router.update();
    assert!(!router.is_key_down(Key::W));
    assert!(!router.was_key_pressed(Key::W));
    assert_eq!(router.mouse_delta(), IVec2::ZERO);
}

#[test]
fn test_initialize_binds_window() {
    let router = initialized_router();
    assert!(router.is_initialized());
    assert_eq!(router.window(), window());
}

#[test]
fn test_shutdown_is_idempotent_and_unbinds() {
    let mut router = initialized_router();
    router.on_key_event(key('A'), true);
    router.shutdown();
    router.shutdown();

    assert!(!router.is_initialized());
    assert!(router.window().is_null());
    assert!(!router.is_key_down(Key::A));
}

#[test]
fn test_reinitialize_keeps_callbacks() {
    let mut router = initialized_router();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    router.set_key_callback(Box::new(move |key, pressed| sink.lock().unwrap().push((key, pressed))));
    router.capture_mouse(true);
    router.on_key_event(key('A'), true);

    let other = WindowHandle::from_raw(0x2000);
    router.initialize(other).unwrap();
    assert_eq!(router.window(), other);
    assert!(!router.is_mouse_captured());
    assert!(!router.is_key_down(Key::A));

    router.on_key_event(key('B'), true);
    assert_eq!(*seen.lock().unwrap(), vec![(Key::A, true), (Key::B, true)]);
}

#[test]
fn test_shutdown_clears_callbacks() {
    let mut router = initialized_router();
    let seen = Arc::new(Mutex::new(0));
    let sink = seen.clone();
    router.set_key_callback(Box::new(move |_, _| *sink.lock().unwrap() += 1));

    router.shutdown();
    router.initialize(window()).unwrap();
    router.on_key_event(key('C'), true);
    assert_eq!(*seen.lock().unwrap(), 0);
}

// ============================================================================
// KEYBOARD
// ============================================================================

#[test]
fn test_press_update_scenario() {
    let mut router = initialized_router();

    router.on_key_event(key('W'), true);
    router.update();
    assert!(router.was_key_pressed(Key::W));

    router.update();
    assert!(!router.was_key_pressed(Key::W));
    assert!(router.is_key_down(Key::W));

    router.on_key_event(key('W'), false);
    assert!(router.is_key_up(Key::W));
    router.update();
    assert!(router.was_key_released(Key::W));
}

#[test]
fn test_no_phantom_edges() {
    let mut router = initialized_router();
    router.on_key_event(key('D'), true);
    router.update();
    for _ in 0..5 {
        router.update();
        assert!(!router.was_key_pressed(Key::D));
        assert!(!router.was_key_released(Key::D));
    }
}

#[test]
fn test_unmapped_key_is_ignored() {
    let mut router = initialized_router();
    let calls = Arc::new(Mutex::new(0));
    let sink = calls.clone();
    router.set_key_callback(Box::new(move |_, _| *sink.lock().unwrap() += 1));

    router.on_key_event(0xFF, true);
    router.update();

    assert_eq!(*calls.lock().unwrap(), 0);
    assert_eq!(router.state().keys_down(), 0);
}

#[test]
fn test_key_callback_fires_on_edges_only() {
    let mut router = initialized_router();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    router.set_key_callback(Box::new(move |k, pressed| sink.lock().unwrap().push((k, pressed))));

    router.on_key_event(vk::LSHIFT, true);
    router.on_key_event(vk::LSHIFT, true); // auto-repeat
    router.on_key_event(vk::LSHIFT, true);
    router.on_key_event(vk::LSHIFT, false);
    router.on_key_event(vk::LSHIFT, false); // release while already up

    assert_eq!(
        *events.lock().unwrap(),
        vec![(Key::Shift, true), (Key::Shift, false)]
    );
}

#[test]
fn test_update_never_invokes_callbacks() {
    let mut router = initialized_router();
    let calls = Arc::new(Mutex::new(0));
    let (k, m, s) = (calls.clone(), calls.clone(), calls.clone());
    router.set_key_callback(Box::new(move |_, _| *k.lock().unwrap() += 1));
    router.set_mouse_move_callback(Box::new(move |_, _| *m.lock().unwrap() += 1));
    router.set_mouse_scroll_callback(Box::new(move |_| *s.lock().unwrap() += 1));

    for _ in 0..3 {
        router.update();
    }
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[test]
fn test_setting_callback_replaces_previous() {
    let mut router = initialized_router();
    let first = Arc::new(Mutex::new(0));
    let second = Arc::new(Mutex::new(0));
    let (a, b) = (first.clone(), second.clone());
    router.set_key_callback(Box::new(move |_, _| *a.lock().unwrap() += 1));
    router.set_key_callback(Box::new(move |_, _| *b.lock().unwrap() += 1));

    router.on_key_event(key('Q'), true);

    assert_eq!(*first.lock().unwrap(), 0);
    assert_eq!(*second.lock().unwrap(), 1);
}

#[test]
fn test_clear_callbacks_removes_all() {
    let mut router = initialized_router();
    let calls = Arc::new(Mutex::new(0));
    let (k, b, m, s) = (calls.clone(), calls.clone(), calls.clone(), calls.clone());
    router.set_key_callback(Box::new(move |_, _| *k.lock().unwrap() += 1));
    router.set_mouse_button_callback(Box::new(move |_, _, _, _| *b.lock().unwrap() += 1));
    router.set_mouse_move_callback(Box::new(move |_, _| *m.lock().unwrap() += 1));
    router.set_mouse_scroll_callback(Box::new(move |_| *s.lock().unwrap() += 1));
    router.clear_callbacks();

    router.on_key_event(key('Q'), true);
    router.on_mouse_button_event(0, true, 0, 0);
    router.on_mouse_move_event(3, 4);
    router.on_mouse_wheel_event(120);

    assert_eq!(*calls.lock().unwrap(), 0);
}

// ============================================================================
// MOUSE
// ============================================================================

#[test]
fn test_mouse_button_edges_and_callback() {
    let mut router = initialized_router();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    router.set_mouse_button_callback(Box::new(move |button, pressed, x, y| {
        sink.lock().unwrap().push((button, pressed, x, y))
    }));

    router.on_mouse_button_event(2, true, 10, 20);
    router.on_mouse_button_event(2, true, 10, 20);
    router.update();
    assert!(router.was_mouse_button_pressed(MouseButton::Middle));
    assert!(router.is_mouse_button_down(MouseButton::Middle));
    assert_eq!(router.mouse_position(), IVec2::new(10, 20));

    router.on_mouse_button_event(2, false, 12, 22);
    router.update();
    assert!(router.was_mouse_button_released(MouseButton::Middle));
    assert!(router.is_mouse_button_up(MouseButton::Middle));

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            (MouseButton::Middle, true, 10, 20),
            (MouseButton::Middle, false, 12, 22),
        ]
    );
}

#[test]
fn test_extra_mouse_buttons_are_ignored() {
    let mut router = initialized_router();
    let calls = Arc::new(Mutex::new(0));
    let sink = calls.clone();
    router.set_mouse_button_callback(Box::new(move |_, _, _, _| *sink.lock().unwrap() += 1));

    router.on_mouse_button_event(3, true, 50, 50);

    assert_eq!(*calls.lock().unwrap(), 0);
    assert_eq!(router.mouse_position(), IVec2::ZERO);
}

#[test]
fn test_mouse_move_callback_fires_every_event() {
    let mut router = initialized_router();
    let moves = Arc::new(Mutex::new(Vec::new()));
    let sink = moves.clone();
    router.set_mouse_move_callback(Box::new(move |x, y| sink.lock().unwrap().push((x, y))));

    router.on_mouse_move_event(5, 5);
    router.on_mouse_move_event(5, 5);

    assert_eq!(moves.lock().unwrap().len(), 2);
}

#[test]
fn test_first_update_has_zero_delta() {
    let mut router = initialized_router();
    router.on_mouse_move_event(300, 200);
    router.update();
    assert_eq!(router.mouse_delta(), IVec2::ZERO);

    router.on_mouse_move_event(310, 190);
    router.update();
    assert_eq!(router.mouse_delta(), IVec2::new(10, -10));

    router.update();
    assert_eq!(router.mouse_delta(), IVec2::ZERO);
}

#[test]
fn test_wheel_notches_and_reset() {
    let mut router = initialized_router();
    let scrolls = Arc::new(Mutex::new(Vec::new()));
    let sink = scrolls.clone();
    router.set_mouse_scroll_callback(Box::new(move |notches| sink.lock().unwrap().push(notches)));

    router.on_mouse_wheel_event(240);
    router.on_mouse_wheel_event(-120);
    router.update();
    assert_eq!(router.wheel_delta(), 1);

    router.update();
    assert_eq!(router.wheel_delta(), 0);
    assert_eq!(*scrolls.lock().unwrap(), vec![2, -1]);
}

#[test]
fn test_high_resolution_wheel_events_add_up() {
    let mut router = initialized_router();

    for _ in 0..10 {
        router.on_mouse_wheel_event(60);
    }
    router.update();
    assert_eq!(router.wheel_delta(), 5);

    router.on_mouse_wheel_event(-30);
    router.update();
    assert_eq!(router.wheel_delta(), 0);
}

#[test]
fn test_set_mouse_position_warps_cursor() {
    let cursor = HeadlessCursor::new();
    let mut router = InputRouter::with_cursor(Box::new(cursor.clone()));
    router.initialize(window()).unwrap();

    router.set_mouse_position(IVec2::new(64, 32));

    assert_eq!(router.mouse_position(), IVec2::new(64, 32));
    assert_eq!(cursor.snapshot().last_warp, Some(IVec2::new(64, 32)));
}

// ============================================================================
// CURSOR STATE
// ============================================================================

#[test]
fn test_cursor_toggles_are_idempotent() {
    let cursor = HeadlessCursor::new();
    let mut router = InputRouter::with_cursor(Box::new(cursor.clone()));
    router.initialize(window()).unwrap();

    router.show_cursor(true);
    assert_eq!(cursor.snapshot().visibility_calls, 0);

    router.show_cursor(false);
    router.show_cursor(false);
    router.show_cursor(false);
    assert_eq!(cursor.snapshot().visibility_calls, 1);
    assert!(!router.is_cursor_visible());

    router.capture_mouse(true);
    router.capture_mouse(true);
    assert_eq!(cursor.snapshot().capture_calls, 1);
    assert!(router.is_mouse_captured());
}

#[test]
fn test_shutdown_restores_cursor_defaults() {
    let cursor = HeadlessCursor::new();
    let mut router = InputRouter::with_cursor(Box::new(cursor.clone()));
    router.initialize(window()).unwrap();
    router.show_cursor(false);
    router.capture_mouse(true);

    router.shutdown();

    let state = cursor.snapshot();
    assert!(state.visible);
    assert!(!state.captured);
    assert!(router.is_cursor_visible());
    assert!(!router.is_mouse_captured());
}

#[test]
fn test_reset_state_clears_keys() {
    let mut router = initialized_router();
    router.on_key_event(key('S'), true);
    router.update();
    router.reset_state();

    assert!(!router.is_key_down(Key::S));
    assert!(!router.was_key_pressed(Key::S));
}

#[test]
fn test_process_platform_event_matches_raw_entry_points() {
    let mut router = initialized_router();
    router.process_platform_event(PlatformEvent::Key { vk_code: vk::ESCAPE, pressed: true });
    router.process_platform_event(PlatformEvent::MouseMove { x: 9, y: 8 });
    router.update();

    assert!(router.was_key_pressed(Key::Escape));
    assert_eq!(router.mouse_position(), IVec2::new(9, 8));
}
