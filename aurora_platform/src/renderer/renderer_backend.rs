/// RendererBackend - frame lifecycle state machine over a `RenderDevice`
///
/// ```text
/// Uninitialized --initialize--> Idle --begin_frame--> Recording
///      ^                          ^                      |
///      |                          +------present---- Submitted <--end_frame--+
///  (failed init)
/// any state --shutdown--> ShutDown --initialize--> Idle
/// ```
///
/// CPU/GPU pacing uses one counting fence. Every present signals the next
/// fence value and records it for the back buffer slot just presented;
/// before a slot is reused the CPU waits for that slot's value. The CPU can
/// therefore run at most `back_buffer_count` frames ahead of the GPU.

use std::time::Instant;
use crate::error::{Error, Result};
use crate::renderer::buffer::{BufferDesc, BufferHandle, BufferType, ShaderHandle};
use crate::renderer::render_device::{BackBufferState, RenderDevice};
use crate::renderer::renderer::{
    ClearColor, PrimitiveTopology, RenderStats, Renderer, RendererConfig, Viewport,
};
use crate::renderer::resource_table::ResourceTable;
use crate::window::WindowHandle;
use crate::{platform_debug, platform_error, platform_info, platform_trace, platform_warn};

const SOURCE: &str = "aurora::Renderer";

/// Smallest swapchain the backend accepts
pub const MIN_BACK_BUFFERS: u32 = 2;

/// Largest swapchain the backend accepts
pub const MAX_BACK_BUFFERS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Uninitialized,
    Idle,
    Recording,
    Submitted,
    ShutDown,
}

struct BufferRecord<B> {
    desc: BufferDesc,
    resource: B,
}

#[derive(Default)]
struct Bindings {
    vertex_buffer: Option<BufferHandle>,
    index_buffer: Option<BufferHandle>,
    shader: Option<ShaderHandle>,
    topology: PrimitiveTopology,
}

pub struct RendererBackend<D: RenderDevice> {
    device: D,
    config: RendererConfig,
    state: FrameState,
    device_lost: bool,
    window: WindowHandle,

    width: u32,
    height: u32,
    buffer_count: u32,
    back_buffer_index: u32,
    back_buffer_generation: u64,
    viewport: Viewport,

    fence_value: u64,
    slot_fences: Vec<u64>,
    gpu_waits: u64,

    buffers: ResourceTable<BufferRecord<D::Buffer>>,
    shaders: ResourceTable<D::Shader>,
    bindings: Bindings,

    pending_resize: Option<(u32, u32)>,
    frame_start: Option<Instant>,
    stats: RenderStats,
}

impl<D: RenderDevice> RendererBackend<D> {
    /// Wrap a device. Nothing is created until `initialize`.
    pub fn new(device: D, config: RendererConfig) -> Self {
        let buffer_count = config.back_buffer_count.clamp(MIN_BACK_BUFFERS, MAX_BACK_BUFFERS);
        Self {
            device,
            config,
            state: FrameState::Uninitialized,
            device_lost: false,
            window: WindowHandle::NULL,
            width: 0,
            height: 0,
            buffer_count,
            back_buffer_index: 0,
            back_buffer_generation: 0,
            viewport: Viewport::default(),
            fence_value: 0,
            slot_fences: vec![0; buffer_count as usize],
            gpu_waits: 0,
            buffers: ResourceTable::new(),
            shaders: ResourceTable::new(),
            bindings: Bindings::default(),
            pending_resize: None,
            frame_start: None,
            stats: RenderStats::default(),
        }
    }

    // ===== INSPECTION =====

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn frame_state(&self) -> FrameState {
        self.state
    }

    pub fn window(&self) -> WindowHandle {
        self.window
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }

    pub fn back_buffer_index(&self) -> u32 {
        self.back_buffer_index
    }

    /// Incremented every time back buffer views are (re)created
    pub fn back_buffer_generation(&self) -> u64 {
        self.back_buffer_generation
    }

    /// Last fence value signaled
    pub fn fence_value(&self) -> u64 {
        self.fence_value
    }

    /// Number of times `present` had to block on the GPU
    pub fn gpu_waits(&self) -> u64 {
        self.gpu_waits
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_device_lost(&self) -> bool {
        self.device_lost
    }

    /// Resize waiting for the current frame to be presented
    pub fn pending_resize(&self) -> Option<(u32, u32)> {
        self.pending_resize
    }

    pub fn is_buffer_alive(&self, handle: BufferHandle) -> bool {
        self.buffers.contains(handle.0)
    }

    pub fn is_shader_alive(&self, handle: ShaderHandle) -> bool {
        self.shaders.contains(handle.0)
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn live_shaders(&self) -> usize {
        self.shaders.len()
    }

    /// Descriptor a live buffer was created with
    pub fn buffer_desc(&self, handle: BufferHandle) -> Option<BufferDesc> {
        self.buffers.get(handle.0).map(|record| record.desc)
    }

    // ===== INTERNAL =====

    fn is_live(&self) -> bool {
        matches!(
            self.state,
            FrameState::Idle | FrameState::Recording | FrameState::Submitted
        )
    }

    /// Record a device error; device loss is sticky
    fn device_failure(&mut self, operation: &str, error: Error) -> Error {
        platform_error!(SOURCE, "{} failed: {}", operation, error);
        if matches!(error, Error::DeviceLost(_)) {
            self.device_lost = true;
        }
        error
    }

    fn require_recording(&self, operation: &str) -> bool {
        if !self.is_live() {
            return false;
        }
        if self.state != FrameState::Recording {
            platform_warn!(SOURCE, "{} called outside begin_frame/end_frame, ignored", operation);
            return false;
        }
        true
    }

    fn drain_resources(&mut self) {
        let buffers: Vec<_> = self.buffers.drain().collect();
        for record in buffers {
            self.device.destroy_buffer(record.resource);
        }
        let shaders: Vec<_> = self.shaders.drain().collect();
        for shader in shaders {
            self.device.destroy_shader(shader);
        }
        self.stats.gpu_memory_used = 0;
        self.bindings = Bindings::default();
    }

    fn apply_resize(&mut self, width: u32, height: u32) {
        if let Err(error) = self.wait_for_gpu() {
            platform_error!(SOURCE, "Resize to {}x{} aborted: {}", width, height, error);
            return;
        }

        self.device.release_back_buffer_views();
        if let Err(error) = self.device.resize_surface(width, height, self.buffer_count) {
            let error = self.device_failure("resize_surface", error);
            platform_warn!(SOURCE, "Keeping {}x{} after failed resize ({})", self.width, self.height, error);
            if let Err(error) = self.device.create_back_buffer_views(self.width, self.height, self.buffer_count) {
                self.device_failure("create_back_buffer_views", error);
            }
            return;
        }
        if let Err(error) = self.device.create_back_buffer_views(width, height, self.buffer_count) {
            self.device_failure("create_back_buffer_views", error);
            return;
        }

        self.back_buffer_generation += 1;
        self.back_buffer_index = 0;
        self.slot_fences.iter_mut().for_each(|fence| *fence = 0);
        self.width = width;
        self.height = height;
        self.viewport = Viewport::full(width, height);
        platform_info!(SOURCE, "Back buffers resized to {}x{}", width, height);
    }
}

impl<D: RenderDevice> Renderer for RendererBackend<D> {
    fn initialize(&mut self, window: WindowHandle, width: u32, height: u32) -> Result<()> {
        if self.is_live() {
            platform_warn!(SOURCE, "initialize called on an initialized renderer, ignored");
            return Ok(());
        }
        if window.is_null() {
            platform_error!(SOURCE, "Cannot initialize renderer with a null window handle");
            return Err(Error::InvalidHandle);
        }
        if width == 0 || height == 0 {
            platform_error!(SOURCE, "Cannot initialize renderer with a {}x{} back buffer", width, height);
            return Err(Error::InitializationFailed(format!(
                "back buffer size must be non-zero, got {}x{}",
                width, height
            )));
        }

        if let Err(error) = self.device.create_device(window, width, height, &self.config) {
            platform_error!(SOURCE, "{} device creation failed: {}", self.device.api_name(), error);
            self.device.destroy_device();
            return Err(error);
        }
        if let Err(error) = self.device.create_back_buffer_views(width, height, self.buffer_count) {
            platform_error!(SOURCE, "Back buffer view creation failed: {}", error);
            self.device.destroy_device();
            return Err(error);
        }

        self.window = window;
        self.width = width;
        self.height = height;
        self.viewport = Viewport::full(width, height);
        self.back_buffer_index = 0;
        self.back_buffer_generation += 1;
        self.fence_value = 0;
        self.slot_fences = vec![0; self.buffer_count as usize];
        self.gpu_waits = 0;
        self.buffers = ResourceTable::new();
        self.shaders = ResourceTable::new();
        self.bindings = Bindings::default();
        self.pending_resize = None;
        self.frame_start = None;
        self.stats = RenderStats::default();
        self.device_lost = false;
        self.state = FrameState::Idle;

        platform_info!(
            SOURCE,
            "{} renderer initialized ({}x{}, {} back buffers)",
            self.device.api_name(),
            width,
            height,
            self.buffer_count
        );
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.is_live() {
            return;
        }
        if !self.device_lost {
            if let Err(error) = self.wait_for_gpu() {
                platform_warn!(SOURCE, "GPU drain during shutdown failed: {}", error);
            }
        }
        self.drain_resources();
        self.device.release_back_buffer_views();
        self.device.destroy_device();
        self.window = WindowHandle::NULL;
        self.pending_resize = None;
        self.state = FrameState::ShutDown;
        platform_info!(SOURCE, "{} renderer shut down", self.device.api_name());
    }

    fn is_initialized(&self) -> bool {
        self.is_live()
    }

    fn name(&self) -> &str {
        self.device.api_name()
    }

    fn version(&self) -> String {
        self.device.version()
    }

    fn begin_frame(&mut self) {
        if !self.is_live() {
            return;
        }
        if self.device_lost {
            platform_warn!(SOURCE, "begin_frame after device loss, ignored");
            return;
        }
        if self.state != FrameState::Idle {
            platform_warn!(SOURCE, "begin_frame called in state {:?}, ignored", self.state);
            return;
        }
        if let Err(error) = self.device.begin_commands(self.back_buffer_index) {
            self.device_failure("begin_commands", error);
            return;
        }

        self.stats.draw_calls = 0;
        self.stats.vertices = 0;
        self.stats.triangles = 0;
        self.bindings = Bindings::default();
        self.frame_start = Some(Instant::now());

        self.device
            .transition_back_buffer(self.back_buffer_index, BackBufferState::RenderTarget);
        self.device.set_viewport(&self.viewport);
        self.device.set_topology(self.bindings.topology);
        self.state = FrameState::Recording;
    }

    fn end_frame(&mut self) {
        if !self.require_recording("end_frame") {
            return;
        }
        self.device
            .transition_back_buffer(self.back_buffer_index, BackBufferState::Present);
        if let Err(error) = self.device.submit() {
            self.device_failure("submit", error);
        }
        if let Some(start) = self.frame_start.take() {
            self.stats.frame_time_ms = start.elapsed().as_secs_f32() * 1000.0;
        }
        self.state = FrameState::Submitted;
    }

    fn present(&mut self) -> Result<()> {
        if !self.is_live() {
            return Ok(());
        }
        if self.device_lost {
            self.state = FrameState::Idle;
            return Err(Error::DeviceLost("device was lost".to_string()));
        }
        if self.state != FrameState::Submitted {
            platform_warn!(SOURCE, "present called in state {:?}, ignored", self.state);
            return Ok(());
        }
        self.state = FrameState::Idle;

        if let Err(error) = self.device.present(self.back_buffer_index, self.config.vsync) {
            return Err(self.device_failure("present", error));
        }

        self.fence_value += 1;
        if let Err(error) = self.device.signal_fence(self.fence_value) {
            return Err(self.device_failure("signal_fence", error));
        }
        self.slot_fences[self.back_buffer_index as usize] = self.fence_value;
        self.back_buffer_index = (self.back_buffer_index + 1) % self.buffer_count;
        self.stats.frame_count += 1;

        let wait_value = self.slot_fences[self.back_buffer_index as usize];
        if self.device.completed_fence_value() < wait_value {
            platform_trace!(SOURCE, "Waiting for fence {} (slot {})", wait_value, self.back_buffer_index);
            self.gpu_waits += 1;
            if let Err(error) = self.device.wait_for_fence(wait_value) {
                return Err(self.device_failure("wait_for_fence", error));
            }
        }

        if let Some((width, height)) = self.pending_resize.take() {
            self.on_resize(width, height);
        }
        Ok(())
    }

    fn clear(&mut self, color: ClearColor) {
        if !self.require_recording("clear") {
            return;
        }
        self.device.clear(self.back_buffer_index, color);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        if !self.is_live() {
            return;
        }
        self.viewport = viewport;
        if self.state == FrameState::Recording {
            self.device.set_viewport(&viewport);
        }
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        if !self.is_live() {
            return;
        }
        if width == 0 || height == 0 {
            platform_debug!(SOURCE, "Ignoring resize to {}x{} (minimized)", width, height);
            return;
        }
        if self.state != FrameState::Idle {
            platform_debug!(SOURCE, "Deferring resize to {}x{} until present", width, height);
            self.pending_resize = Some((width, height));
            return;
        }
        self.pending_resize = None;
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.apply_resize(width, height);
    }

    fn wait_for_gpu(&mut self) -> Result<()> {
        if !self.is_live() {
            return Ok(());
        }
        if self.device_lost {
            return Err(Error::DeviceLost("device was lost".to_string()));
        }
        self.fence_value += 1;
        if let Err(error) = self.device.signal_fence(self.fence_value) {
            return Err(self.device_failure("signal_fence", error));
        }
        if let Err(error) = self.device.wait_for_fence(self.fence_value) {
            return Err(self.device_failure("wait_for_fence", error));
        }
        Ok(())
    }

    fn back_buffer_width(&self) -> u32 {
        self.width
    }

    fn back_buffer_height(&self) -> u32 {
        self.height
    }

    fn stats(&self) -> RenderStats {
        self.stats
    }

    fn create_buffer(&mut self, desc: &BufferDesc, initial_data: Option<&[u8]>) -> Result<BufferHandle> {
        if !self.is_live() {
            return Err(Error::NotInitialized);
        }
        if let Err(error) = desc.validate(initial_data) {
            platform_error!(SOURCE, "create_buffer rejected: {}", error);
            return Err(error);
        }
        let resource = match self.device.create_buffer(desc, initial_data) {
            Ok(resource) => resource,
            Err(error) => return Err(self.device_failure("create_buffer", error)),
        };

        let handle = BufferHandle(self.buffers.insert(BufferRecord { desc: *desc, resource }));
        self.stats.gpu_memory_used += desc.size;
        platform_debug!(
            SOURCE,
            "Created {:?}/{:?} buffer ({} bytes)",
            desc.buffer_type,
            desc.usage,
            desc.size
        );
        Ok(handle)
    }

    fn destroy_buffer(&mut self, handle: BufferHandle) {
        if !self.is_live() {
            return;
        }
        let Some(record) = self.buffers.remove(handle.0) else {
            platform_warn!(SOURCE, "destroy_buffer on a stale or foreign handle, ignored");
            return;
        };
        self.stats.gpu_memory_used = self.stats.gpu_memory_used.saturating_sub(record.desc.size);
        if self.bindings.vertex_buffer == Some(handle) {
            self.bindings.vertex_buffer = None;
        }
        if self.bindings.index_buffer == Some(handle) {
            self.bindings.index_buffer = None;
        }
        self.device.destroy_buffer(record.resource);
    }

    fn update_buffer(&mut self, handle: BufferHandle, offset: u64, data: &[u8]) -> Result<()> {
        if !self.is_live() {
            return Err(Error::NotInitialized);
        }
        let Some(record) = self.buffers.get_mut(handle.0) else {
            platform_warn!(SOURCE, "update_buffer on a stale or foreign handle");
            return Err(Error::InvalidResource("stale buffer handle".to_string()));
        };
        if let Err(error) = record.desc.validate_write(offset, data.len()) {
            platform_warn!(SOURCE, "update_buffer rejected: {}", error);
            return Err(error);
        }
        match self.device.write_buffer(&mut record.resource, offset, data) {
            Ok(()) => Ok(()),
            Err(error) => Err(self.device_failure("write_buffer", error)),
        }
    }

    fn create_color_shader(&mut self) -> Result<ShaderHandle> {
        if !self.is_live() {
            return Err(Error::NotInitialized);
        }
        match self.device.create_color_shader() {
            Ok(shader) => Ok(ShaderHandle(self.shaders.insert(shader))),
            Err(error) => Err(self.device_failure("create_color_shader", error)),
        }
    }

    fn destroy_shader(&mut self, handle: ShaderHandle) {
        if !self.is_live() {
            return;
        }
        let Some(shader) = self.shaders.remove(handle.0) else {
            platform_warn!(SOURCE, "destroy_shader on a stale or foreign handle, ignored");
            return;
        };
        if self.bindings.shader == Some(handle) {
            self.bindings.shader = None;
        }
        self.device.destroy_shader(shader);
    }

    fn set_vertex_buffer(&mut self, handle: BufferHandle, stride: u32, offset: u32) {
        if !self.require_recording("set_vertex_buffer") {
            return;
        }
        let Some(record) = self.buffers.get(handle.0) else {
            platform_warn!(SOURCE, "set_vertex_buffer with a stale handle, ignored");
            return;
        };
        if record.desc.buffer_type != BufferType::Vertex {
            platform_warn!(SOURCE, "set_vertex_buffer with a {:?} buffer, ignored", record.desc.buffer_type);
            return;
        }
        self.device.bind_vertex_buffer(&record.resource, stride, offset);
        self.bindings.vertex_buffer = Some(handle);
    }

    fn set_index_buffer(&mut self, handle: BufferHandle, offset: u32) {
        if !self.require_recording("set_index_buffer") {
            return;
        }
        let Some(record) = self.buffers.get(handle.0) else {
            platform_warn!(SOURCE, "set_index_buffer with a stale handle, ignored");
            return;
        };
        if record.desc.buffer_type != BufferType::Index {
            platform_warn!(SOURCE, "set_index_buffer with a {:?} buffer, ignored", record.desc.buffer_type);
            return;
        }
        self.device.bind_index_buffer(&record.resource, offset);
        self.bindings.index_buffer = Some(handle);
    }

    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) {
        if !self.require_recording("set_primitive_topology") {
            return;
        }
        self.device.set_topology(topology);
        self.bindings.topology = topology;
    }

    fn set_shader(&mut self, handle: ShaderHandle) {
        if !self.require_recording("set_shader") {
            return;
        }
        let Some(shader) = self.shaders.get(handle.0) else {
            platform_warn!(SOURCE, "set_shader with a stale handle, ignored");
            return;
        };
        self.device.bind_shader(shader);
        self.bindings.shader = Some(handle);
    }

    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32) {
        if !self.require_recording("draw_indexed") {
            return;
        }
        let bindings = &self.bindings;
        if bindings.vertex_buffer.is_none() || bindings.index_buffer.is_none() || bindings.shader.is_none() {
            platform_warn!(SOURCE, "draw_indexed without vertex buffer, index buffer and shader bound");
        }
        self.device.draw_indexed(index_count, start_index, base_vertex);
        self.stats.draw_calls += 1;
        self.stats.vertices += index_count as u64;
        self.stats.triangles += self.bindings.topology.triangle_count(index_count);
    }
}

impl<D: RenderDevice> Drop for RendererBackend<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "renderer_backend_tests.rs"]
mod tests;
