/// HeadlessWindow - a `Window` with no OS window behind it
///
/// Platform messages are posted to an internal queue and dispatched by
/// `update()`, in the order a native message loop would deliver them.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use crate::input::{Input, InputRouter, PlatformEvent};
use crate::window::class_registry::WindowClassRegistry;
use crate::window::window::{
    CloseCallback, FocusCallback, ResizeCallback, Window, WindowConfig, WindowHandle,
};
use crate::{platform_debug, platform_info};

const SOURCE: &str = "aurora::Window";

/// Native message delivered to a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMessage {
    Input(PlatformEvent),
    Resize { width: u32, height: u32 },
    Close,
    Focus(bool),
}

pub struct HeadlessWindow {
    config: WindowConfig,
    class_name: String,
    registry: Option<Arc<Mutex<WindowClassRegistry>>>,
    handle: WindowHandle,
    width: u32,
    height: u32,
    position: (i32, i32),
    visible: bool,
    minimized: bool,
    maximized: bool,
    fullscreen: bool,
    vsync: bool,
    focused: bool,
    should_close: bool,
    messages: VecDeque<WindowMessage>,
    input: InputRouter,
    resize_callback: Option<ResizeCallback>,
    close_callback: Option<CloseCallback>,
    focus_callback: Option<FocusCallback>,
}

impl HeadlessWindow {
    /// Build a window around an already allocated handle and an initialized
    /// input router. Called by `SystemFactory`.
    pub(crate) fn new(
        config: WindowConfig,
        handle: WindowHandle,
        class_name: String,
        registry: Arc<Mutex<WindowClassRegistry>>,
        input: InputRouter,
    ) -> Self {
        let (width, height) = config.clamp_size(config.width, config.height);
        Self {
            position: config.position.unwrap_or((0, 0)),
            maximized: config.maximized,
            fullscreen: config.fullscreen,
            vsync: config.vsync,
            config,
            class_name,
            registry: Some(registry),
            handle,
            width,
            height,
            visible: true,
            minimized: false,
            focused: true,
            should_close: false,
            messages: VecDeque::new(),
            input,
            resize_callback: None,
            close_callback: None,
            focus_callback: None,
        }
    }

    /// Queue a platform message for the next `update()`
    pub fn post(&mut self, message: WindowMessage) {
        if self.handle.is_null() {
            return;
        }
        self.messages.push_back(message);
    }

    /// Queue a raw input event for the next `update()`
    pub fn post_input(&mut self, event: PlatformEvent) {
        self.post(WindowMessage::Input(event));
    }

    /// Messages waiting for the next `update()`
    pub fn pending_messages(&self) -> usize {
        self.messages.len()
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    fn dispatch(&mut self, message: WindowMessage) {
        match message {
            WindowMessage::Input(event) => self.input.process_platform_event(event),
            WindowMessage::Resize { width, height } => self.handle_resize(width, height),
            WindowMessage::Close => self.request_close(),
            WindowMessage::Focus(focused) => self.handle_focus(focused),
        }
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            self.minimized = true;
            return;
        }
        self.minimized = false;
        let (width, height) = self.config.clamp_size(width, height);
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        platform_debug!(SOURCE, "Window resized to {}x{}", width, height);
        if let Some(callback) = self.resize_callback.as_mut() {
            callback(width, height);
        }
    }

    fn handle_focus(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        if !focused {
            // Keys held while focus leaves never get their release event
            self.input.reset_state();
        }
        if let Some(callback) = self.focus_callback.as_mut() {
            callback(focused);
        }
    }
}

impl Window for HeadlessWindow {
    fn update(&mut self) {
        while let Some(message) = self.messages.pop_front() {
            self.dispatch(message);
        }
        self.input.update();
    }

    fn native_handle(&self) -> WindowHandle {
        self.handle
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.post(WindowMessage::Resize { width, height });
    }

    fn position(&self) -> (i32, i32) {
        self.position
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.position = (x, y);
    }

    fn title(&self) -> &str {
        &self.config.title
    }

    fn set_title(&mut self, title: &str) {
        self.config.title = title.to_string();
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn minimize(&mut self) {
        self.minimized = true;
        self.maximized = false;
    }

    fn maximize(&mut self) {
        self.maximized = true;
        self.minimized = false;
    }

    fn restore(&mut self) {
        self.minimized = false;
        self.maximized = false;
    }

    fn is_minimized(&self) -> bool {
        self.minimized
    }

    fn is_maximized(&self) -> bool {
        self.maximized
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn set_vsync(&mut self, vsync: bool) {
        self.vsync = vsync;
    }

    fn vsync(&self) -> bool {
        self.vsync
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn request_close(&mut self) {
        if self.should_close {
            return;
        }
        self.should_close = true;
        if let Some(callback) = self.close_callback.as_mut() {
            callback();
        }
    }

    fn input(&self) -> &dyn Input {
        &self.input
    }

    fn input_mut(&mut self) -> &mut dyn Input {
        &mut self.input
    }

    fn set_resize_callback(&mut self, callback: ResizeCallback) {
        self.resize_callback = Some(callback);
    }

    fn set_close_callback(&mut self, callback: CloseCallback) {
        self.close_callback = Some(callback);
    }

    fn set_focus_callback(&mut self, callback: FocusCallback) {
        self.focus_callback = Some(callback);
    }

    fn clear_callbacks(&mut self) {
        self.resize_callback = None;
        self.close_callback = None;
        self.focus_callback = None;
    }

    fn shutdown(&mut self) {
        let Some(registry) = self.registry.take() else {
            return;
        };
        self.input.shutdown();
        self.clear_callbacks();
        self.messages.clear();
        match registry.lock() {
            Ok(mut registry) => {
                registry.release(&self.class_name);
            }
            Err(poisoned) => {
                poisoned.into_inner().release(&self.class_name);
            }
        }
        platform_info!(SOURCE, "Window {:?} destroyed", self.handle);
        self.handle = WindowHandle::NULL;
    }
}

impl Drop for HeadlessWindow {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "headless_window_tests.rs"]
mod tests;
