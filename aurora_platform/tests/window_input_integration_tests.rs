//! Integration tests for windows and the input system
//!
//! Events are posted to headless windows and observed through the public
//! `Window` and `Input` traits. No display server required.
//!
//! Run with: cargo test --test window_input_integration_tests

use aurora_platform::aurora::{SystemFactory, Window, WindowConfig};
use aurora_platform::aurora::input::{Input, Key, MouseButton, PlatformEvent, WHEEL_DELTA};
use aurora_platform::aurora::window::WindowMessage;
use aurora_platform::glam::IVec2;
use std::sync::{Arc, Mutex};

// ============================================================================
// TEST HELPERS
// ============================================================================

fn small_window(factory: &SystemFactory) -> aurora_platform::aurora::HeadlessWindow {
    factory
        .create_window(WindowConfig {
            title: "Input Test".to_string(),
            width: 800,
            height: 600,
            ..WindowConfig::default()
        })
        .unwrap()
}

fn key(key: Key, pressed: bool) -> PlatformEvent {
    PlatformEvent::Key { vk_code: key as u32, pressed }
}

// ============================================================================
// KEYBOARD
// ============================================================================

#[test]
fn test_key_edges_follow_updates() {
    let factory = SystemFactory::new();
    let mut window = small_window(&factory);

    window.post_input(key(Key::W, true));
    window.update();
    assert!(window.input().is_key_down(Key::W));
    assert!(window.input().was_key_pressed(Key::W));

    // Held: still down but no new edge
    window.update();
    assert!(window.input().is_key_down(Key::W));
    assert!(!window.input().was_key_pressed(Key::W));

    window.post_input(key(Key::W, false));
    window.update();
    assert!(window.input().is_key_up(Key::W));
    assert!(window.input().was_key_released(Key::W));

    window.update();
    assert!(!window.input().was_key_released(Key::W));
}

#[test]
fn test_key_callback_sees_each_transition_once() {
    let factory = SystemFactory::new();
    let mut window = small_window(&factory);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    window
        .input_mut()
        .set_key_callback(Box::new(move |key, pressed| sink.lock().unwrap().push((key, pressed))));

    // Auto-repeat delivers the press twice
    window.post_input(key(Key::Space, true));
    window.post_input(key(Key::Space, true));
    window.post_input(key(Key::Space, false));
    window.update();

    assert_eq!(*seen.lock().unwrap(), vec![(Key::Space, true), (Key::Space, false)]);
}

#[test]
fn test_focus_loss_releases_held_keys() {
    let factory = SystemFactory::new();
    let mut window = small_window(&factory);
    let focus = Arc::new(Mutex::new(Vec::new()));
    let sink = focus.clone();
    window.set_focus_callback(Box::new(move |focused| sink.lock().unwrap().push(focused)));

    window.post_input(key(Key::A, true));
    window.post_input(PlatformEvent::MouseButton { button: 0, pressed: true, x: 5, y: 5 });
    window.update();
    assert!(window.input().is_key_down(Key::A));

    window.post(WindowMessage::Focus(false));
    window.update();
    assert!(!window.has_focus());
    assert!(!window.input().is_key_down(Key::A));
    assert!(!window.input().is_mouse_button_down(MouseButton::Left));
    assert_eq!(*focus.lock().unwrap(), vec![false]);
}

// ============================================================================
// MOUSE
// ============================================================================

#[test]
fn test_mouse_motion_and_wheel() {
    let factory = SystemFactory::new();
    let mut window = small_window(&factory);

    window.post_input(PlatformEvent::MouseMove { x: 100, y: 100 });
    window.update();
    assert_eq!(window.input().mouse_position(), IVec2::new(100, 100));
    assert_eq!(window.input().mouse_delta(), IVec2::ZERO);

    window.post_input(PlatformEvent::MouseMove { x: 110, y: 95 });
    window.post_input(PlatformEvent::MouseWheel { raw_delta: 2 * WHEEL_DELTA });
    window.update();
    assert_eq!(window.input().mouse_delta(), IVec2::new(10, -5));
    assert_eq!(window.input().wheel_delta(), 2);

    window.update();
    assert_eq!(window.input().mouse_delta(), IVec2::ZERO);
    assert_eq!(window.input().wheel_delta(), 0);
}

#[test]
fn test_mouse_buttons() {
    let factory = SystemFactory::new();
    let mut window = small_window(&factory);

    window.post_input(PlatformEvent::MouseButton { button: 1, pressed: true, x: 40, y: 30 });
    window.update();
    assert!(window.input().was_mouse_button_pressed(MouseButton::Right));
    assert_eq!(window.input().mouse_position(), IVec2::new(40, 30));

    window.post_input(PlatformEvent::MouseButton { button: 1, pressed: false, x: 40, y: 30 });
    // Unknown native button codes are dropped
    window.post_input(PlatformEvent::MouseButton { button: 9, pressed: true, x: 40, y: 30 });
    window.update();
    assert!(window.input().was_mouse_button_released(MouseButton::Right));
    assert!(!window.input().is_mouse_button_down(MouseButton::Left));
    assert!(!window.input().is_mouse_button_down(MouseButton::Middle));
}

#[test]
fn test_cursor_capture_and_visibility() {
    let factory = SystemFactory::new();
    let mut window = small_window(&factory);

    window.input_mut().capture_mouse(true);
    window.input_mut().show_cursor(false);
    assert!(window.input().is_mouse_captured());
    assert!(!window.input().is_cursor_visible());

    window.input_mut().capture_mouse(false);
    window.input_mut().show_cursor(true);
    assert!(!window.input().is_mouse_captured());
    assert!(window.input().is_cursor_visible());
}

// ============================================================================
// WINDOW LIFECYCLE
// ============================================================================

#[test]
fn test_resize_and_close_messages() {
    let factory = SystemFactory::new();
    let mut window = small_window(&factory);
    let sizes = Arc::new(Mutex::new(Vec::new()));
    let sink = sizes.clone();
    window.set_resize_callback(Box::new(move |w, h| sink.lock().unwrap().push((w, h))));

    window.post(WindowMessage::Resize { width: 1024, height: 768 });
    window.post(WindowMessage::Resize { width: 1024, height: 768 });
    window.post(WindowMessage::Resize { width: 0, height: 0 });
    window.update();

    assert_eq!(*sizes.lock().unwrap(), vec![(1024, 768)]);
    assert_eq!(window.size(), (1024, 768));
    assert!(window.is_minimized());

    assert!(!window.should_close());
    window.post(WindowMessage::Close);
    window.update();
    assert!(window.should_close());
}

#[test]
fn test_window_class_shared_between_windows() {
    let factory = SystemFactory::new();
    let first = small_window(&factory);
    let second = small_window(&factory);

    assert_ne!(first.native_handle(), second.native_handle());
    assert_eq!(factory.live_windows(), 2);

    drop(first);
    assert!(factory.is_class_registered());
    drop(second);
    assert!(!factory.is_class_registered());
}

#[test]
fn test_zero_sized_window_is_rejected() {
    let factory = SystemFactory::new();
    let result = factory.create_window(WindowConfig { width: 0, ..WindowConfig::default() });
    assert!(result.is_err());
    assert_eq!(factory.live_windows(), 0);
}
