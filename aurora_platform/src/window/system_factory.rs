/// SystemFactory - creates windows and owns the window class registry

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use crate::error::{Error, Result};
use crate::input::{Input, InputRouter};
use crate::window::class_registry::WindowClassRegistry;
use crate::window::headless_window::HeadlessWindow;
use crate::window::window::{WindowConfig, WindowHandle};
use crate::{platform_error, platform_info};

const SOURCE: &str = "aurora::Window";

/// Class name shared by every window this factory creates
pub const DEFAULT_WINDOW_CLASS: &str = "AuroraWindowClass";

pub struct SystemFactory {
    registry: Arc<Mutex<WindowClassRegistry>>,
    next_handle: AtomicUsize,
}

impl Default for SystemFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemFactory {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(WindowClassRegistry::new())),
            next_handle: AtomicUsize::new(1),
        }
    }

    /// Create a window with an initialized input system
    pub fn create_window(&self, config: WindowConfig) -> Result<HeadlessWindow> {
        if config.width == 0 || config.height == 0 {
            platform_error!(
                SOURCE,
                "Invalid window size {}x{}",
                config.width,
                config.height
            );
            return Err(Error::InitializationFailed(format!(
                "window size must be non-zero, got {}x{}",
                config.width, config.height
            )));
        }

        let handle = WindowHandle::from_raw(self.next_handle.fetch_add(1, Ordering::Relaxed));
        let mut input = InputRouter::new();
        input.initialize(handle)?;

        self.with_registry(|registry| {
            registry.acquire(DEFAULT_WINDOW_CLASS);
        });

        platform_info!(
            SOURCE,
            "Created window '{}' ({}x{}) handle {:?}",
            config.title,
            config.width,
            config.height,
            handle
        );
        Ok(HeadlessWindow::new(
            config,
            handle,
            DEFAULT_WINDOW_CLASS.to_string(),
            self.registry.clone(),
            input,
        ))
    }

    /// Create a standalone input system (not yet initialized)
    pub fn create_input(&self) -> InputRouter {
        InputRouter::new()
    }

    /// Live windows of the default class
    pub fn live_windows(&self) -> u32 {
        let mut count = 0;
        self.with_registry(|registry| count = registry.ref_count(DEFAULT_WINDOW_CLASS));
        count
    }

    /// Whether the default window class is currently registered
    pub fn is_class_registered(&self) -> bool {
        self.live_windows() > 0
    }

    fn with_registry(&self, f: impl FnOnce(&mut WindowClassRegistry)) {
        match self.registry.lock() {
            Ok(mut registry) => f(&mut *registry),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }
}
