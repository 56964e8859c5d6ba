/// Buffer descriptors and GPU resource handles

use bitflags::bitflags;
use crate::error::{Error, Result};
use crate::renderer::resource_table::RawHandle;

/// What the buffer is bound as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferType {
    /// Vertex buffer
    Vertex,
    /// Index buffer (32-bit indices)
    Index,
    /// Constant/uniform buffer
    Constant,
}

/// How the buffer is accessed after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// GPU read/write, no CPU access
    Default,
    /// Contents fixed at creation
    Immutable,
    /// CPU writes, GPU reads (per-frame data)
    Dynamic,
    /// CPU read/write transfer buffer
    Staging,
}

bitflags! {
    /// CPU access granted by a [`BufferUsage`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CpuAccess: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
    }
}

impl BufferUsage {
    pub fn cpu_access(self) -> CpuAccess {
        match self {
            BufferUsage::Default | BufferUsage::Immutable => CpuAccess::empty(),
            BufferUsage::Dynamic => CpuAccess::WRITE,
            BufferUsage::Staging => CpuAccess::READ | CpuAccess::WRITE,
        }
    }
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Binding type
    pub buffer_type: BufferType,
    /// Access pattern
    pub usage: BufferUsage,
}

impl BufferDesc {
    pub fn new(buffer_type: BufferType, usage: BufferUsage, size: u64) -> Self {
        Self { size, buffer_type, usage }
    }

    /// Check the descriptor against the data it is created with
    pub fn validate(&self, initial_data: Option<&[u8]>) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidResource("buffer size must be non-zero".to_string()));
        }
        let data_len = initial_data.map_or(0, |data| data.len() as u64);
        if data_len > self.size {
            return Err(Error::InvalidResource(format!(
                "initial data ({} bytes) exceeds buffer size ({} bytes)",
                data_len, self.size
            )));
        }
        if self.usage == BufferUsage::Immutable && data_len != self.size {
            return Err(Error::InvalidResource(format!(
                "immutable buffer of {} bytes needs exactly {} bytes of initial data, got {}",
                self.size, self.size, data_len
            )));
        }
        Ok(())
    }

    /// Check that `len` bytes can be written at `offset` from the CPU
    pub fn validate_write(&self, offset: u64, len: usize) -> Result<()> {
        if !self.usage.cpu_access().contains(CpuAccess::WRITE) {
            return Err(Error::InvalidResource(format!(
                "{:?} buffer does not allow CPU writes",
                self.usage
            )));
        }
        let end = offset.checked_add(len as u64);
        match end {
            Some(end) if end <= self.size => Ok(()),
            _ => Err(Error::InvalidResource(format!(
                "write of {} bytes at offset {} overruns buffer of {} bytes",
                len, offset, self.size
            ))),
        }
    }
}

/// Handle to a buffer owned by a renderer
///
/// Handles stay `Copy`; a destroyed buffer's handle is detected as stale on
/// use. `BufferHandle::default()` never refers to a live buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BufferHandle(pub(crate) RawHandle);

/// Handle to a shader owned by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShaderHandle(pub(crate) RawHandle);

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
