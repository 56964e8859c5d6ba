//! Native windows and the factory that creates them

pub mod window;
pub mod class_registry;
pub mod headless_window;
pub mod system_factory;

pub use window::{
    CloseCallback, FocusCallback, ResizeCallback, Window, WindowConfig, WindowHandle,
};
pub use class_registry::WindowClassRegistry;
pub use headless_window::{HeadlessWindow, WindowMessage};
pub use system_factory::{SystemFactory, DEFAULT_WINDOW_CLASS};
