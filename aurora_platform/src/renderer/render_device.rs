/// RenderDevice trait - the contract a graphics backend implements
///
/// `RendererBackend` owns the frame state machine, resource tables, fence
/// bookkeeping and statistics. A device only executes the primitive steps in
/// the order the backend calls them:
///
/// ```text
/// create_device -> create_back_buffer_views
/// per frame:  begin_commands -> transition(RenderTarget) -> set_viewport
///             -> clear / bind_* / draw_indexed ...
///             -> transition(Present) -> submit
///             -> present -> signal_fence -> [wait_for_fence]
/// resize:     wait_for_fence -> release_back_buffer_views -> resize_surface
///             -> create_back_buffer_views
/// teardown:   destroy_* resources -> release_back_buffer_views -> destroy_device
/// ```

use crate::error::Result;
use crate::renderer::buffer::BufferDesc;
use crate::renderer::renderer::{ClearColor, PrimitiveTopology, RendererConfig, Viewport};
use crate::window::WindowHandle;

/// Resource state of a swapchain back buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackBufferState {
    /// Owned by the presentation engine
    Present,
    /// Bound as the render target of the frame being recorded
    RenderTarget,
}

pub trait RenderDevice: Send {
    /// Backend buffer object
    type Buffer: Send;
    /// Backend shader/pipeline object
    type Shader: Send;

    /// Human-readable API name
    fn api_name(&self) -> &str;

    /// Driver or backend version
    fn version(&self) -> String;

    // ===== DEVICE & SWAPCHAIN =====

    /// Create the device, queue, swapchain and fence for `window`
    fn create_device(
        &mut self,
        window: WindowHandle,
        width: u32,
        height: u32,
        config: &RendererConfig,
    ) -> Result<()>;

    /// Release everything `create_device` created. Must tolerate a partially
    /// created device.
    fn destroy_device(&mut self);

    /// Create render target views for every back buffer plus the depth view
    fn create_back_buffer_views(&mut self, width: u32, height: u32, buffer_count: u32) -> Result<()>;

    fn release_back_buffer_views(&mut self);

    /// Resize the swapchain buffers. Views must have been released.
    fn resize_surface(&mut self, width: u32, height: u32, buffer_count: u32) -> Result<()>;

    // ===== COMMAND RECORDING =====

    /// Reset the command allocator/list for the given back buffer
    fn begin_commands(&mut self, back_buffer: u32) -> Result<()>;

    fn transition_back_buffer(&mut self, back_buffer: u32, state: BackBufferState);
    fn set_viewport(&mut self, viewport: &Viewport);
    fn clear(&mut self, back_buffer: u32, color: ClearColor);
    fn bind_vertex_buffer(&mut self, buffer: &Self::Buffer, stride: u32, offset: u32);
    fn bind_index_buffer(&mut self, buffer: &Self::Buffer, offset: u32);
    fn set_topology(&mut self, topology: PrimitiveTopology);
    fn bind_shader(&mut self, shader: &Self::Shader);
    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32);

    /// Close the command list and submit it to the queue
    fn submit(&mut self) -> Result<()>;

    // ===== PRESENTATION & SYNC =====

    /// Present a back buffer. Fails with `Error::DeviceLost` when the device
    /// was removed.
    fn present(&mut self, back_buffer: u32, vsync: bool) -> Result<()>;

    /// Enqueue a fence signal of `value` after all submitted work
    fn signal_fence(&mut self, value: u64) -> Result<()>;

    /// Highest fence value the GPU has completed
    fn completed_fence_value(&self) -> u64;

    /// Block until the fence reaches `value`
    fn wait_for_fence(&mut self, value: u64) -> Result<()>;

    // ===== RESOURCES =====

    fn create_buffer(&mut self, desc: &BufferDesc, initial_data: Option<&[u8]>) -> Result<Self::Buffer>;
    fn write_buffer(&mut self, buffer: &mut Self::Buffer, offset: u64, data: &[u8]) -> Result<()>;
    fn destroy_buffer(&mut self, buffer: Self::Buffer);
    fn create_color_shader(&mut self) -> Result<Self::Shader>;
    fn destroy_shader(&mut self, shader: Self::Shader);
}
