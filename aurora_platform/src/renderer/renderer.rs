/// Renderer trait - frame lifecycle, draw submission and GPU resources

use crate::error::Result;
use crate::renderer::buffer::{BufferDesc, BufferHandle, ShaderHandle};
use crate::window::WindowHandle;

// ============================================================================
// Common types
// ============================================================================

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Application name (reported to drivers that accept one)
    pub app_name: String,
    /// Enable validation/debug layers
    pub enable_validation: bool,
    /// Number of swapchain back buffers (at least 2)
    pub back_buffer_count: u32,
    /// Synchronize presentation with the display refresh
    pub vsync: bool,
    /// Let `RendererFactory::create_renderer` fall back to the headless
    /// backend when no native API is available
    pub headless_fallback: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            app_name: "Aurora Application".to_string(),
            enable_validation: cfg!(debug_assertions),
            back_buffer_count: 2,
            vsync: true,
            headless_fallback: false,
        }
    }
}

/// Renderer statistics
///
/// Draw counters cover the frame being recorded (reset by `begin_frame`).
/// `frame_count` counts presented frames since initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    /// Frames presented
    pub frame_count: u64,
    /// CPU time between `begin_frame` and `end_frame` of the last frame
    pub frame_time_ms: f32,
    /// Number of draw calls this frame
    pub draw_calls: u32,
    /// Number of indices submitted this frame
    pub vertices: u64,
    /// Number of triangles drawn this frame
    pub triangles: u64,
    /// Bytes held by live buffers
    pub gpu_memory_used: u64,
}

/// RGBA clear color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ClearColor {
    pub const BLACK: ClearColor = ClearColor { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Viewport covering a whole `width` x `height` target
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// Scissor rectangle matching the viewport area
    pub fn scissor(&self) -> ScissorRect {
        ScissorRect {
            left: self.x as i32,
            top: self.y as i32,
            right: (self.x + self.width) as i32,
            bottom: (self.y + self.height) as i32,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::full(0, 0)
    }
}

/// Integer scissor rectangle (right/bottom exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScissorRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Triangle list
    #[default]
    TriangleList,
    /// Line list
    LineList,
    /// Point list
    PointList,
}

impl PrimitiveTopology {
    /// Triangles produced by `index_count` indices
    pub fn triangle_count(self, index_count: u32) -> u64 {
        match self {
            PrimitiveTopology::TriangleList => (index_count / 3) as u64,
            PrimitiveTopology::LineList | PrimitiveTopology::PointList => 0,
        }
    }
}

// ============================================================================
// Renderer trait
// ============================================================================

/// Main renderer trait
///
/// One frame is `begin_frame`, draw calls, `end_frame`, `present`. Calls made
/// out of that order are ignored with a warning; calls made before
/// `initialize` are ignored silently.
pub trait Renderer: Send {
    /// Create the device and swapchain for a window
    ///
    /// # Arguments
    ///
    /// * `window` - Native window to present to
    /// * `width` - Back buffer width in pixels
    /// * `height` - Back buffer height in pixels
    fn initialize(&mut self, window: WindowHandle, width: u32, height: u32) -> Result<()>;

    /// Wait for the GPU and release every resource. Idempotent.
    fn shutdown(&mut self);

    fn is_initialized(&self) -> bool;

    /// Backend name (e.g. "Headless", "DirectX 12")
    fn name(&self) -> &str;

    /// Backend/driver version string
    fn version(&self) -> String;

    // ===== FRAME =====

    /// Start recording a frame
    fn begin_frame(&mut self);

    /// Finish recording and submit the frame
    fn end_frame(&mut self);

    /// Present the submitted frame
    ///
    /// Blocks while the GPU is more than `back_buffer_count` frames behind.
    /// Fails with `Error::DeviceLost` when the device is gone.
    fn present(&mut self) -> Result<()>;

    /// Clear the current back buffer
    fn clear(&mut self, color: ClearColor);

    /// Set the viewport (kept across frames until changed or resized)
    fn set_viewport(&mut self, viewport: Viewport);

    /// Notify the renderer that the window client area changed
    ///
    /// # Arguments
    ///
    /// * `width` - New width (0 is ignored)
    /// * `height` - New height (0 is ignored)
    fn on_resize(&mut self, width: u32, height: u32);

    /// Block until the GPU has finished all submitted work
    fn wait_for_gpu(&mut self) -> Result<()>;

    fn back_buffer_width(&self) -> u32;
    fn back_buffer_height(&self) -> u32;

    /// Get statistics about the renderer
    fn stats(&self) -> RenderStats;

    // ===== RESOURCES =====

    /// Create a buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor
    /// * `initial_data` - Optional contents; required for immutable buffers
    fn create_buffer(&mut self, desc: &BufferDesc, initial_data: Option<&[u8]>) -> Result<BufferHandle>;

    /// Destroy a buffer. Stale handles are ignored with a warning.
    fn destroy_buffer(&mut self, handle: BufferHandle);

    /// Write into a dynamic or staging buffer
    ///
    /// # Arguments
    ///
    /// * `handle` - Buffer to write
    /// * `offset` - Byte offset into the buffer
    /// * `data` - Bytes to write
    fn update_buffer(&mut self, handle: BufferHandle, offset: u64, data: &[u8]) -> Result<()>;

    /// Create the built-in position/color shader
    fn create_color_shader(&mut self) -> Result<ShaderHandle>;

    /// Destroy a shader. Stale handles are ignored with a warning.
    fn destroy_shader(&mut self, handle: ShaderHandle);

    // ===== DRAW =====

    fn set_vertex_buffer(&mut self, handle: BufferHandle, stride: u32, offset: u32);
    fn set_index_buffer(&mut self, handle: BufferHandle, offset: u32);
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology);
    fn set_shader(&mut self, handle: ShaderHandle);

    /// Draw indexed primitives with the bound buffers and shader
    ///
    /// # Arguments
    ///
    /// * `index_count` - Number of indices to draw
    /// * `start_index` - First index in the index buffer
    /// * `base_vertex` - Value added to each index before fetching vertices
    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32);
}
