/// Mock RenderDevice for unit tests (no GPU required)
///
/// Every device call is appended to a shared command log so tests can check
/// the order in which `RendererBackend` drives the device. The fence lags
/// `latency` signals behind, so pacing waits can be provoked on demand.

use std::sync::{Arc, Mutex};
use crate::error::{Error, Result};
use crate::renderer::buffer::BufferDesc;
use crate::renderer::render_device::{BackBufferState, RenderDevice};
use crate::renderer::renderer::{ClearColor, PrimitiveTopology, RendererConfig, Viewport};
use crate::window::WindowHandle;

#[derive(Debug)]
pub struct MockBuffer {
    pub id: u32,
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub struct MockShader {
    pub id: u32,
}

/// Failure injection switches
#[derive(Debug, Clone, Copy, Default)]
pub struct MockFailures {
    pub create_device: bool,
    pub create_views: bool,
    pub present: bool,
    pub create_buffer: bool,
}

pub struct MockRenderDevice {
    pub commands: Arc<Mutex<Vec<String>>>,
    pub failures: MockFailures,
    pub latency: u64,
    signaled: u64,
    completed: u64,
    next_id: u32,
}

impl MockRenderDevice {
    pub fn new() -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            failures: MockFailures::default(),
            latency: 0,
            signaled: 0,
            completed: 0,
            next_id: 1,
        }
    }

    pub fn with_latency(latency: u64) -> Self {
        Self { latency, ..Self::new() }
    }

    pub fn with_failures(failures: MockFailures) -> Self {
        Self { failures, ..Self::new() }
    }

    fn record(&self, command: impl Into<String>) {
        self.commands.lock().unwrap().push(command.into());
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl RenderDevice for MockRenderDevice {
    type Buffer = MockBuffer;
    type Shader = MockShader;

    fn api_name(&self) -> &str {
        "Mock"
    }

    fn version(&self) -> String {
        "mock 1.0".to_string()
    }

    fn create_device(&mut self, _window: WindowHandle, width: u32, height: u32, _config: &RendererConfig) -> Result<()> {
        self.record(format!("create_device({}x{})", width, height));
        if self.failures.create_device {
            return Err(Error::InitializationFailed("mock device creation failure".to_string()));
        }
        self.signaled = 0;
        self.completed = 0;
        Ok(())
    }

    fn destroy_device(&mut self) {
        self.record("destroy_device");
    }

    fn create_back_buffer_views(&mut self, width: u32, height: u32, buffer_count: u32) -> Result<()> {
        self.record(format!("create_views({}x{}, {})", width, height, buffer_count));
        if self.failures.create_views {
            return Err(Error::BackendError("mock view creation failure".to_string()));
        }
        Ok(())
    }

    fn release_back_buffer_views(&mut self) {
        self.record("release_views");
    }

    fn resize_surface(&mut self, width: u32, height: u32, _buffer_count: u32) -> Result<()> {
        self.record(format!("resize_surface({}x{})", width, height));
        Ok(())
    }

    fn begin_commands(&mut self, back_buffer: u32) -> Result<()> {
        self.record(format!("begin_commands({})", back_buffer));
        Ok(())
    }

    fn transition_back_buffer(&mut self, back_buffer: u32, state: BackBufferState) {
        self.record(format!("transition({}, {:?})", back_buffer, state));
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        self.record(format!("set_viewport({}x{})", viewport.width, viewport.height));
    }

    fn clear(&mut self, back_buffer: u32, _color: ClearColor) {
        self.record(format!("clear({})", back_buffer));
    }

    fn bind_vertex_buffer(&mut self, buffer: &MockBuffer, stride: u32, _offset: u32) {
        self.record(format!("bind_vertex_buffer({}, {})", buffer.id, stride));
    }

    fn bind_index_buffer(&mut self, buffer: &MockBuffer, _offset: u32) {
        self.record(format!("bind_index_buffer({})", buffer.id));
    }

    fn set_topology(&mut self, topology: PrimitiveTopology) {
        self.record(format!("set_topology({:?})", topology));
    }

    fn bind_shader(&mut self, shader: &MockShader) {
        self.record(format!("bind_shader({})", shader.id));
    }

    fn draw_indexed(&mut self, index_count: u32, _start_index: u32, _base_vertex: i32) {
        self.record(format!("draw_indexed({})", index_count));
    }

    fn submit(&mut self) -> Result<()> {
        self.record("submit");
        Ok(())
    }

    fn present(&mut self, back_buffer: u32, _vsync: bool) -> Result<()> {
        self.record(format!("present({})", back_buffer));
        if self.failures.present {
            return Err(Error::DeviceLost("mock device removed".to_string()));
        }
        Ok(())
    }

    fn signal_fence(&mut self, value: u64) -> Result<()> {
        self.record(format!("signal({})", value));
        self.signaled = value;
        self.completed = self.completed.max(value.saturating_sub(self.latency));
        Ok(())
    }

    fn completed_fence_value(&self) -> u64 {
        self.completed
    }

    fn wait_for_fence(&mut self, value: u64) -> Result<()> {
        self.record(format!("wait({})", value));
        self.completed = self.completed.max(value.min(self.signaled));
        Ok(())
    }

    fn create_buffer(&mut self, desc: &BufferDesc, initial_data: Option<&[u8]>) -> Result<MockBuffer> {
        if self.failures.create_buffer {
            return Err(Error::OutOfMemory);
        }
        let id = self.next_id();
        self.record(format!("create_buffer({}, {})", id, desc.size));
        let mut data = vec![0u8; desc.size as usize];
        if let Some(initial) = initial_data {
            data[..initial.len()].copy_from_slice(initial);
        }
        Ok(MockBuffer { id, data })
    }

    fn write_buffer(&mut self, buffer: &mut MockBuffer, offset: u64, data: &[u8]) -> Result<()> {
        self.record(format!("write_buffer({}, {}, {})", buffer.id, offset, data.len()));
        let start = offset as usize;
        buffer.data[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn destroy_buffer(&mut self, buffer: MockBuffer) {
        self.record(format!("destroy_buffer({})", buffer.id));
    }

    fn create_color_shader(&mut self) -> Result<MockShader> {
        let id = self.next_id();
        self.record(format!("create_shader({})", id));
        Ok(MockShader { id })
    }

    fn destroy_shader(&mut self, shader: MockShader) {
        self.record(format!("destroy_shader({})", shader.id));
    }
}
