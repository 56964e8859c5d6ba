/// HeadlessDevice - RenderDevice without a GPU
///
/// Buffers live in system memory, the swapchain is a list of back buffer
/// states and the queue is a `GpuTimeline`. Call ordering is validated the way
/// a debug layer would: recording without views, presenting a back buffer
/// still bound as render target, or leaking resources at device destruction
/// are reported.

use aurora_platform::aurora::{Error, Result, RendererConfig, WindowHandle};
use aurora_platform::aurora::render::{
    BackBufferState, BufferDesc, ClearColor, PrimitiveTopology, RenderDevice, Viewport,
};
use aurora_platform::{platform_bail, platform_debug, platform_warn};
use rustc_hash::FxHashMap;

use crate::gpu_timeline::{GpuTimeline, HeadlessProbe};

const SOURCE: &str = "aurora::Headless";

/// Simulated device settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessDeviceConfig {
    /// How many fence signals the simulated GPU keeps in flight before it
    /// retires the oldest. 0 completes work at submission.
    pub gpu_latency_frames: u32,
    /// When false the backend reports itself unavailable and device creation
    /// fails
    pub supported: bool,
}

impl Default for HeadlessDeviceConfig {
    fn default() -> Self {
        Self {
            gpu_latency_frames: 1,
            supported: true,
        }
    }
}

/// System-memory buffer
pub struct HeadlessBuffer {
    id: u64,
    desc: BufferDesc,
    data: Vec<u8>,
}

impl HeadlessBuffer {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn desc(&self) -> &BufferDesc {
        &self.desc
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

pub struct HeadlessShader {
    id: u64,
}

impl HeadlessShader {
    pub fn id(&self) -> u64 {
        self.id
    }
}

pub struct HeadlessDevice {
    config: HeadlessDeviceConfig,
    probe: HeadlessProbe,
    timeline: GpuTimeline,
    device_created: bool,
    surface: (u32, u32),
    back_buffers: Vec<BackBufferState>,
    recording: Option<u32>,
    next_id: u64,
    /// Live buffer id -> size in bytes
    allocations: FxHashMap<u64, u64>,
    live_shaders: u64,
}

impl HeadlessDevice {
    pub fn new(config: HeadlessDeviceConfig) -> Self {
        Self {
            config,
            probe: HeadlessProbe::default(),
            timeline: GpuTimeline::new(config.gpu_latency_frames as u64),
            device_created: false,
            surface: (0, 0),
            back_buffers: Vec::new(),
            recording: None,
            next_id: 1,
            allocations: FxHashMap::default(),
            live_shaders: 0,
        }
    }

    pub fn config(&self) -> &HeadlessDeviceConfig {
        &self.config
    }

    /// Shared handle to this device's counters
    pub fn probe(&self) -> HeadlessProbe {
        self.probe.clone()
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface
    }

    pub fn back_buffer_states(&self) -> &[BackBufferState] {
        &self.back_buffers
    }

    pub fn frames_in_flight(&self) -> u64 {
        self.timeline.in_flight()
    }

    #[cfg(feature = "command-trace")]
    fn trace(&self, command: std::fmt::Arguments) {
        aurora_platform::platform_trace!(SOURCE, "{}", command);
    }

    #[cfg(not(feature = "command-trace"))]
    fn trace(&self, _command: std::fmt::Arguments) {}

    fn check_lost(&self, operation: &str) -> Result<()> {
        if self.probe.is_device_lost() {
            return Err(Error::DeviceLost(format!("{} on a removed device", operation)));
        }
        Ok(())
    }

    fn check_back_buffer(&self, back_buffer: u32, operation: &str) -> Result<()> {
        if (back_buffer as usize) >= self.back_buffers.len() {
            platform_bail!(
                SOURCE,
                "{} on back buffer {} but only {} views exist",
                operation,
                back_buffer,
                self.back_buffers.len()
            );
        }
        Ok(())
    }

    fn check_recording(&self, operation: &str) -> bool {
        if self.recording.is_none() {
            platform_warn!(SOURCE, "{} recorded outside a command list", operation);
            return false;
        }
        true
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn publish_allocations(&self) {
        let live_buffers = self.allocations.len() as u64;
        let buffer_bytes = self.allocations.values().sum();
        let live_shaders = self.live_shaders;
        self.probe.update(|stats| {
            stats.live_buffers = live_buffers;
            stats.buffer_bytes = buffer_bytes;
            stats.live_shaders = live_shaders;
        });
    }
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new(HeadlessDeviceConfig::default())
    }
}

impl RenderDevice for HeadlessDevice {
    type Buffer = HeadlessBuffer;
    type Shader = HeadlessShader;

    fn api_name(&self) -> &str {
        "Headless"
    }

    fn version(&self) -> String {
        format!("headless {}", env!("CARGO_PKG_VERSION"))
    }

    // ===== DEVICE & SWAPCHAIN =====

    fn create_device(
        &mut self,
        window: WindowHandle,
        width: u32,
        height: u32,
        config: &RendererConfig,
    ) -> Result<()> {
        if !self.config.supported {
            return Err(Error::InitializationFailed(
                "headless device disabled by configuration".to_string(),
            ));
        }
        if self.device_created {
            platform_bail!(SOURCE, "create_device called twice");
        }

        self.probe.restore_device();
        self.timeline.reset();
        self.surface = (width, height);
        self.recording = None;
        self.device_created = true;
        self.probe.update(|stats| stats.devices_created += 1);
        platform_debug!(
            SOURCE,
            "Device created for window {:?} ({}x{}, validation {})",
            window.as_raw(),
            width,
            height,
            if config.enable_validation { "on" } else { "off" }
        );
        Ok(())
    }

    fn destroy_device(&mut self) {
        if !self.device_created {
            return;
        }
        if !self.allocations.is_empty() || self.live_shaders > 0 {
            platform_warn!(
                SOURCE,
                "Device destroyed with {} buffers ({} bytes) and {} shaders still alive",
                self.allocations.len(),
                self.allocations.values().sum::<u64>(),
                self.live_shaders
            );
        }
        self.timeline.drain();
        self.allocations.clear();
        self.live_shaders = 0;
        self.back_buffers.clear();
        self.recording = None;
        self.device_created = false;
        self.publish_allocations();
        self.trace(format_args!("destroy_device"));
    }

    fn create_back_buffer_views(&mut self, width: u32, height: u32, buffer_count: u32) -> Result<()> {
        if !self.device_created {
            platform_bail!(SOURCE, "create_back_buffer_views without a device");
        }
        if !self.back_buffers.is_empty() {
            platform_bail!(SOURCE, "create_back_buffer_views while {} views are alive", self.back_buffers.len());
        }
        if (width, height) != self.surface {
            platform_bail!(
                SOURCE,
                "views of {}x{} requested for a {}x{} surface",
                width,
                height,
                self.surface.0,
                self.surface.1
            );
        }
        self.back_buffers = vec![BackBufferState::Present; buffer_count as usize];
        self.probe.update(|stats| stats.view_generations += 1);
        self.trace(format_args!("create_back_buffer_views({}x{}, {})", width, height, buffer_count));
        Ok(())
    }

    fn release_back_buffer_views(&mut self) {
        self.back_buffers.clear();
        self.trace(format_args!("release_back_buffer_views"));
    }

    fn resize_surface(&mut self, width: u32, height: u32, buffer_count: u32) -> Result<()> {
        if !self.back_buffers.is_empty() {
            platform_bail!(SOURCE, "resize_surface while back buffer views are alive");
        }
        if self.timeline.in_flight() > 0 {
            platform_bail!(
                SOURCE,
                "resize_surface with {} frames still in flight",
                self.timeline.in_flight()
            );
        }
        self.surface = (width, height);
        self.probe.update(|stats| stats.surface_resizes += 1);
        self.trace(format_args!("resize_surface({}x{}, {})", width, height, buffer_count));
        Ok(())
    }

    // ===== COMMAND RECORDING =====

    fn begin_commands(&mut self, back_buffer: u32) -> Result<()> {
        self.check_lost("begin_commands")?;
        self.check_back_buffer(back_buffer, "begin_commands")?;
        if let Some(open) = self.recording {
            platform_bail!(SOURCE, "begin_commands({}) while list for {} is open", back_buffer, open);
        }
        self.recording = Some(back_buffer);
        self.trace(format_args!("begin_commands({})", back_buffer));
        Ok(())
    }

    fn transition_back_buffer(&mut self, back_buffer: u32, state: BackBufferState) {
        if !self.check_recording("transition_back_buffer") {
            return;
        }
        match self.back_buffers.get_mut(back_buffer as usize) {
            Some(current) => {
                if *current == state {
                    platform_warn!(SOURCE, "Back buffer {} already in {:?}", back_buffer, state);
                }
                *current = state;
                self.trace(format_args!("transition({}, {:?})", back_buffer, state));
            }
            None => {
                platform_warn!(SOURCE, "transition on missing back buffer {}", back_buffer);
            }
        }
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        if self.check_recording("set_viewport") {
            self.trace(format_args!("set_viewport({}x{})", viewport.width, viewport.height));
        }
    }

    fn clear(&mut self, back_buffer: u32, color: ClearColor) {
        if !self.check_recording("clear") {
            return;
        }
        if self.back_buffers.get(back_buffer as usize) != Some(&BackBufferState::RenderTarget) {
            platform_warn!(SOURCE, "clear on back buffer {} which is not a render target", back_buffer);
            return;
        }
        self.trace(format_args!(
            "clear({}, [{:.2}, {:.2}, {:.2}, {:.2}])",
            back_buffer, color.r, color.g, color.b, color.a
        ));
    }

    fn bind_vertex_buffer(&mut self, buffer: &HeadlessBuffer, stride: u32, offset: u32) {
        if self.check_recording("bind_vertex_buffer") {
            self.trace(format_args!("bind_vertex_buffer({}, {}, {})", buffer.id, stride, offset));
        }
    }

    fn bind_index_buffer(&mut self, buffer: &HeadlessBuffer, offset: u32) {
        if self.check_recording("bind_index_buffer") {
            self.trace(format_args!("bind_index_buffer({}, {})", buffer.id, offset));
        }
    }

    fn set_topology(&mut self, topology: PrimitiveTopology) {
        if self.check_recording("set_topology") {
            self.trace(format_args!("set_topology({:?})", topology));
        }
    }

    fn bind_shader(&mut self, shader: &HeadlessShader) {
        if self.check_recording("bind_shader") {
            self.trace(format_args!("bind_shader({})", shader.id));
        }
    }

    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32) {
        if !self.check_recording("draw_indexed") {
            return;
        }
        self.probe.update(|stats| stats.draw_calls += 1);
        self.trace(format_args!("draw_indexed({}, {}, {})", index_count, start_index, base_vertex));
    }

    fn submit(&mut self) -> Result<()> {
        self.check_lost("submit")?;
        let Some(back_buffer) = self.recording.take() else {
            platform_bail!(SOURCE, "submit without an open command list");
        };
        if self.back_buffers.get(back_buffer as usize) != Some(&BackBufferState::Present) {
            platform_warn!(SOURCE, "Back buffer {} submitted without transition to Present", back_buffer);
        }
        self.probe.update(|stats| stats.frames_submitted += 1);
        self.trace(format_args!("submit"));
        Ok(())
    }

    // ===== PRESENTATION & SYNC =====

    fn present(&mut self, back_buffer: u32, vsync: bool) -> Result<()> {
        self.check_lost("present")?;
        self.check_back_buffer(back_buffer, "present")?;
        if self.back_buffers[back_buffer as usize] != BackBufferState::Present {
            platform_bail!(SOURCE, "present of back buffer {} still bound as render target", back_buffer);
        }
        self.probe.update(|stats| stats.frames_presented += 1);
        self.trace(format_args!("present({}, vsync {})", back_buffer, vsync));
        Ok(())
    }

    fn signal_fence(&mut self, value: u64) -> Result<()> {
        self.check_lost("signal_fence")?;
        self.timeline.signal(value)?;
        let in_flight = self.timeline.in_flight();
        let completed = self.timeline.completed();
        self.probe.update(|stats| {
            stats.fences_signaled += 1;
            stats.completed_fence = completed;
            stats.max_frames_in_flight = stats.max_frames_in_flight.max(in_flight);
        });
        self.trace(format_args!("signal({})", value));
        Ok(())
    }

    fn completed_fence_value(&self) -> u64 {
        self.timeline.completed()
    }

    fn wait_for_fence(&mut self, value: u64) -> Result<()> {
        self.check_lost("wait_for_fence")?;
        let stalled = self.timeline.wait(value)?;
        let completed = self.timeline.completed();
        self.probe.update(|stats| {
            stats.completed_fence = completed;
            if stalled {
                stats.cpu_stalls += 1;
            }
        });
        self.trace(format_args!("wait({})", value));
        Ok(())
    }

    // ===== RESOURCES =====

    fn create_buffer(&mut self, desc: &BufferDesc, initial_data: Option<&[u8]>) -> Result<HeadlessBuffer> {
        if !self.device_created {
            return Err(Error::NotInitialized);
        }
        let size = usize::try_from(desc.size).map_err(|_| Error::OutOfMemory)?;
        let mut data = Vec::new();
        data.try_reserve_exact(size).map_err(|_| Error::OutOfMemory)?;
        data.resize(size, 0);
        if let Some(initial) = initial_data {
            let len = initial.len().min(data.len());
            data[..len].copy_from_slice(&initial[..len]);
        }
        let id = self.allocate_id();
        self.allocations.insert(id, desc.size);
        self.publish_allocations();
        self.trace(format_args!("create_buffer({}, {})", id, desc.size));
        Ok(HeadlessBuffer { id, desc: *desc, data })
    }

    fn write_buffer(&mut self, buffer: &mut HeadlessBuffer, offset: u64, data: &[u8]) -> Result<()> {
        let start = offset as usize;
        let Some(end) = start.checked_add(data.len()).filter(|&end| end <= buffer.data.len()) else {
            return Err(Error::InvalidResource(format!(
                "write of {} bytes at {} overflows buffer {} ({} bytes)",
                data.len(),
                offset,
                buffer.id,
                buffer.data.len()
            )));
        };
        buffer.data[start..end].copy_from_slice(data);
        self.trace(format_args!("write_buffer({}, {}, {})", buffer.id, offset, data.len()));
        Ok(())
    }

    fn destroy_buffer(&mut self, buffer: HeadlessBuffer) {
        if self.allocations.remove(&buffer.id).is_none() {
            platform_warn!(SOURCE, "destroy_buffer on unknown buffer {}", buffer.id);
            return;
        }
        self.publish_allocations();
        self.trace(format_args!("destroy_buffer({})", buffer.id));
    }

    fn create_color_shader(&mut self) -> Result<HeadlessShader> {
        if !self.device_created {
            return Err(Error::NotInitialized);
        }
        let id = self.allocate_id();
        self.live_shaders += 1;
        self.publish_allocations();
        self.trace(format_args!("create_shader({})", id));
        Ok(HeadlessShader { id })
    }

    fn destroy_shader(&mut self, shader: HeadlessShader) {
        self.live_shaders = self.live_shaders.saturating_sub(1);
        self.publish_allocations();
        self.trace(format_args!("destroy_shader({})", shader.id));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "headless_device_tests.rs"]
mod tests;
