/// Renderer module - renderer contract, frame state machine and backend selection

// Module declarations
pub mod renderer;
pub mod buffer;
pub mod vertex;
pub mod resource_table;
pub mod render_device;
pub mod renderer_backend;
pub mod renderer_factory;

#[cfg(test)]
pub(crate) mod mock_render_device;

// Re-export everything from renderer.rs
pub use renderer::*;

// Re-export from other modules
pub use buffer::{BufferDesc, BufferHandle, BufferType, BufferUsage, CpuAccess, ShaderHandle};
pub use vertex::{create_buffer_from_slice, update_buffer_from_slice, Mesh, Vertex};
pub use resource_table::{RawHandle, ResourceKey, ResourceTable};
pub use render_device::{BackBufferState, RenderDevice};
pub use renderer_backend::{FrameState, RendererBackend, MAX_BACK_BUFFERS, MIN_BACK_BUFFERS};
pub use renderer_factory::{
    priority_for_os, BackendConstructor, BackendProbe, RendererApi, RendererFactory,
};
