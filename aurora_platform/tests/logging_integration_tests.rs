//! Integration tests for the platform logging system
//!
//! A capturing logger records what the window, input and renderer layers
//! report. Tests share the global logger and run serially.
//!
//! Run with: cargo test --test logging_integration_tests

use aurora_platform::aurora::{Platform, Renderer, RendererConfig, SystemFactory, Window, WindowConfig, WindowHandle};
use aurora_platform::aurora::log::{LogEntry, LogSeverity, Logger};
use aurora_platform::aurora::window::WindowMessage;
use aurora_platform_renderer_headless::{create_renderer, HeadlessDeviceConfig};
use serial_test::serial;
use std::sync::{Arc, Mutex};

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn install() -> Arc<Mutex<Vec<LogEntry>>> {
        let entries = Arc::new(Mutex::new(Vec::new()));
        Platform::set_logger(Self { entries: entries.clone() });
        entries
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn restore() {
    Platform::reset_logger();
    Platform::set_min_severity(LogSeverity::Debug);
}

fn messages(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str, severity: LogSeverity) -> Vec<String> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.source == source && entry.severity == severity)
        .map(|entry| entry.message.clone())
        .collect()
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_renderer_lifecycle_is_logged() {
    let entries = TestLogger::install();

    let (mut renderer, _probe) = create_renderer(RendererConfig::default(), HeadlessDeviceConfig::default());
    renderer.initialize(WindowHandle::from_raw(1), 800, 600).unwrap();
    renderer.initialize(WindowHandle::from_raw(1), 800, 600).unwrap();
    renderer.shutdown();

    let info = messages(&entries, "aurora::Renderer", LogSeverity::Info);
    assert_eq!(
        info,
        vec![
            "Headless renderer initialized (800x600, 2 back buffers)".to_string(),
            "Headless renderer shut down".to_string(),
        ]
    );
    let warnings = messages(&entries, "aurora::Renderer", LogSeverity::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("ignored"));

    restore();
}

#[test]
#[serial]
fn test_integration_errors_carry_location() {
    let entries = TestLogger::install();

    let factory = SystemFactory::new();
    assert!(factory.create_window(WindowConfig { height: 0, ..WindowConfig::default() }).is_err());

    let captured = entries.lock().unwrap();
    let error = captured
        .iter()
        .find(|entry| entry.severity == LogSeverity::Error)
        .expect("window creation failure should be logged");
    assert_eq!(error.source, "aurora::Window");
    assert!(error.file.is_some_and(|file| file.ends_with("system_factory.rs")));
    assert!(error.line.is_some());
    drop(captured);

    restore();
}

#[test]
#[serial]
fn test_integration_min_severity_filters_subsystems() {
    let entries = TestLogger::install();
    Platform::set_min_severity(LogSeverity::Warn);

    let factory = SystemFactory::new();
    let mut window = factory.create_window(WindowConfig::default()).unwrap();
    window.post(WindowMessage::Resize { width: 640, height: 480 });
    window.update();
    window.shutdown();

    // Creation (INFO) and resize (DEBUG) are below the threshold
    assert!(entries.lock().unwrap().is_empty());

    restore();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let entries = TestLogger::install();
    Platform::log(LogSeverity::Info, "test", "Message 1".to_string());

    Platform::reset_logger();
    Platform::log(LogSeverity::Info, "test", "Message 2".to_string());

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].message, "Message 1");
    assert_eq!(captured[0].file, None);
    drop(captured);

    restore();
}
