/// CPU-side geometry and typed upload helpers

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::error::Result;
use crate::renderer::buffer::{BufferDesc, BufferHandle, BufferType, BufferUsage};
use crate::renderer::renderer::Renderer;

/// Position + RGBA color, the layout consumed by the built-in color shader
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte stride of one vertex
    pub const STRIDE: u32 = std::mem::size_of::<Vertex>() as u32;

    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Unit cube centered on the origin, one color per face
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        let faces: [([Vec3; 4], [f32; 4]); 6] = [
            // +Z
            ([Vec3::new(-h, -h, h), Vec3::new(h, -h, h), Vec3::new(h, h, h), Vec3::new(-h, h, h)], [1.0, 0.0, 0.0, 1.0]),
            // -Z
            ([Vec3::new(h, -h, -h), Vec3::new(-h, -h, -h), Vec3::new(-h, h, -h), Vec3::new(h, h, -h)], [0.0, 1.0, 0.0, 1.0]),
            // +X
            ([Vec3::new(h, -h, h), Vec3::new(h, -h, -h), Vec3::new(h, h, -h), Vec3::new(h, h, h)], [0.0, 0.0, 1.0, 1.0]),
            // -X
            ([Vec3::new(-h, -h, -h), Vec3::new(-h, -h, h), Vec3::new(-h, h, h), Vec3::new(-h, h, -h)], [1.0, 1.0, 0.0, 1.0]),
            // +Y
            ([Vec3::new(-h, h, h), Vec3::new(h, h, h), Vec3::new(h, h, -h), Vec3::new(-h, h, -h)], [0.0, 1.0, 1.0, 1.0]),
            // -Y
            ([Vec3::new(-h, -h, -h), Vec3::new(h, -h, -h), Vec3::new(h, -h, h), Vec3::new(-h, -h, h)], [1.0, 0.0, 1.0, 1.0]),
        ];

        let mut mesh = Mesh::default();
        for (corners, color) in faces {
            let base = mesh.vertices.len() as u32;
            mesh.vertices.extend(corners.iter().map(|&corner| Vertex::new(corner, color)));
            mesh.indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Upload as immutable vertex and index buffers
    pub fn upload(&self, renderer: &mut dyn Renderer) -> Result<(BufferHandle, BufferHandle)> {
        let vertices = create_buffer_from_slice(renderer, BufferType::Vertex, BufferUsage::Immutable, &self.vertices)?;
        let indices = match create_buffer_from_slice(renderer, BufferType::Index, BufferUsage::Immutable, &self.indices) {
            Ok(indices) => indices,
            Err(error) => {
                renderer.destroy_buffer(vertices);
                return Err(error);
            }
        };
        Ok((vertices, indices))
    }
}

/// Create a buffer sized for and filled with `data`
pub fn create_buffer_from_slice<T: Pod>(
    renderer: &mut dyn Renderer,
    buffer_type: BufferType,
    usage: BufferUsage,
    data: &[T],
) -> Result<BufferHandle> {
    let bytes: &[u8] = bytemuck::cast_slice(data);
    let desc = BufferDesc::new(buffer_type, usage, bytes.len() as u64);
    renderer.create_buffer(&desc, Some(bytes))
}

/// Write `data` into a buffer, `first_element` elements from its start
pub fn update_buffer_from_slice<T: Pod>(
    renderer: &mut dyn Renderer,
    handle: BufferHandle,
    first_element: u64,
    data: &[T],
) -> Result<()> {
    let offset = first_element * std::mem::size_of::<T>() as u64;
    renderer.update_buffer(handle, offset, bytemuck::cast_slice(data))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "vertex_tests.rs"]
mod tests;
