use super::*;

#[test]
fn test_letters_map_from_ascii_codes() {
    assert_eq!(Key::from_virtual_key('A' as u32), Key::A);
    assert_eq!(Key::from_virtual_key('W' as u32), Key::W);
    assert_eq!(Key::from_virtual_key('Z' as u32), Key::Z);
}

#[test]
fn test_digits_and_function_keys() {
    assert_eq!(Key::from_virtual_key('0' as u32), Key::Num0);
    assert_eq!(Key::from_virtual_key('9' as u32), Key::Num9);
    assert_eq!(Key::from_virtual_key(vk::F1), Key::F1);
    assert_eq!(Key::from_virtual_key(vk::F1 + 11), Key::F12);
}

#[test]
fn test_special_keys() {
    assert_eq!(Key::from_virtual_key(vk::SPACE), Key::Space);
    assert_eq!(Key::from_virtual_key(vk::RETURN), Key::Enter);
    assert_eq!(Key::from_virtual_key(vk::ESCAPE), Key::Escape);
    assert_eq!(Key::from_virtual_key(vk::PRIOR), Key::PageUp);
    assert_eq!(Key::from_virtual_key(vk::NEXT), Key::PageDown);
    assert_eq!(Key::from_virtual_key(vk::LEFT), Key::Left);
    assert_eq!(Key::from_virtual_key(vk::MENU), Key::Alt);
}

#[test]
fn test_sided_modifiers_collapse() {
    assert_eq!(Key::from_virtual_key(vk::LSHIFT), Key::Shift);
    assert_eq!(Key::from_virtual_key(vk::RSHIFT), Key::Shift);
    assert_eq!(Key::from_virtual_key(vk::LCONTROL), Key::Control);
    assert_eq!(Key::from_virtual_key(vk::RMENU), Key::Alt);
}

#[test]
fn test_unmapped_codes_resolve_to_unknown() {
    // Lowercase ASCII, numpad, and out-of-range codes are not in the table
    assert_eq!(Key::from_virtual_key('a' as u32), Key::Unknown);
    assert_eq!(Key::from_virtual_key(0x60), Key::Unknown);
    assert_eq!(Key::from_virtual_key(0), Key::Unknown);
    assert_eq!(Key::from_virtual_key(100_000), Key::Unknown);
}

#[test]
fn test_every_key_fits_the_bitmap() {
    for key in ALL_KEYS {
        assert!(key.index() < KEY_COUNT, "{:?} out of range", key);
        assert_eq!(Key::from_virtual_key(key as u32), key);
    }
}

#[test]
fn test_mouse_button_native_codes() {
    assert_eq!(MouseButton::from_native(0), Some(MouseButton::Left));
    assert_eq!(MouseButton::from_native(1), Some(MouseButton::Right));
    assert_eq!(MouseButton::from_native(2), Some(MouseButton::Middle));
    assert_eq!(MouseButton::from_native(3), None);
    assert!(MouseButton::Middle.index() < MOUSE_BUTTON_COUNT);
}
