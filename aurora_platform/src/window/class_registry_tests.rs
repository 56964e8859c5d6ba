use super::*;

#[test]
fn test_first_acquire_registers() {
    let mut registry = WindowClassRegistry::new();
    assert!(registry.is_empty());

    assert!(registry.acquire("Main"));
    assert!(!registry.acquire("Main"));
    assert_eq!(registry.ref_count("Main"), 2);
    assert!(registry.is_registered("Main"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_last_release_unregisters() {
    let mut registry = WindowClassRegistry::new();
    registry.acquire("Main");
    registry.acquire("Main");

    assert!(!registry.release("Main"));
    assert!(registry.is_registered("Main"));
    assert!(registry.release("Main"));
    assert!(!registry.is_registered("Main"));
    assert_eq!(registry.ref_count("Main"), 0);
}

#[test]
fn test_release_unknown_class_is_noop() {
    let mut registry = WindowClassRegistry::new();
    assert!(!registry.release("Missing"));
    assert!(registry.is_empty());
}

#[test]
fn test_classes_are_counted_independently() {
    let mut registry = WindowClassRegistry::new();
    registry.acquire("Main");
    registry.acquire("Tool");
    registry.release("Main");

    assert!(!registry.is_registered("Main"));
    assert!(registry.is_registered("Tool"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_reacquire_after_unregister_registers_again() {
    let mut registry = WindowClassRegistry::new();
    registry.acquire("Main");
    registry.release("Main");
    assert!(registry.acquire("Main"));
}
