/*!
# Aurora Platform

Window, input and renderer abstraction layer for desktop applications.

This crate provides the platform-agnostic contracts and the state machines
behind them. Graphics backends implement [`aurora::render::RenderDevice`] and
are registered with a [`aurora::RendererFactory`] as plugins.

## Architecture

- **Input**: double-buffered key/mouse state with frame-latched edge queries
- **Window**: native window trait, headless implementation and factory
- **Renderer**: object-safe renderer trait with frame lifecycle
- **RendererBackend**: frame/fence/resize state machine over a `RenderDevice`
- **RendererFactory**: capability-probed backend selection

## Frame loop

```no_run
use aurora_platform::aurora::{Renderer, Window, SystemFactory, WindowConfig};
use aurora_platform::aurora::input::Key;
use aurora_platform::aurora::render::ClearColor;

fn run(renderer: &mut dyn Renderer) -> aurora_platform::aurora::Result<()> {
    let factory = SystemFactory::new();
    let mut window = factory.create_window(WindowConfig::default())?;
    let (width, height) = window.size();
    renderer.initialize(window.native_handle(), width, height)?;

    while !window.should_close() {
        window.update();
        if window.input().was_key_pressed(Key::Escape) {
            window.request_close();
        }
        renderer.begin_frame();
        renderer.clear(ClearColor::BLACK);
        renderer.end_frame();
        renderer.present()?;
    }
    renderer.shutdown();
    Ok(())
}
```
*/

// Internal modules
mod error;
mod platform;
pub mod log;
pub mod input;
pub mod window;
pub mod renderer;

// Main aurora namespace module
pub mod aurora {
    // Error types
    pub use crate::error::{Error, Result};

    // Diagnostics sink
    pub use crate::platform::Platform;

    // Core traits and entry points
    pub use crate::input::{Input, InputRouter};
    pub use crate::window::{Window, WindowConfig, WindowHandle, SystemFactory, HeadlessWindow};
    pub use crate::renderer::{Renderer, RendererConfig, RendererApi, RendererFactory, RenderStats};

    // Logging sub-module (types only; the platform_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Input sub-module
    pub mod input {
        pub use crate::input::*;
    }

    // Window sub-module
    pub mod window {
        pub use crate::window::*;
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::renderer::*;
    }
}

// Re-export math library at crate root
pub use glam;
