//! Error types for the Aurora platform layer
//!
//! This module defines the error types shared by the input, window and
//! renderer subsystems.

use std::fmt;

/// Result type for Aurora platform operations
pub type Result<T> = std::result::Result<T, Error>;

/// Aurora platform errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Backend-specific error (DirectX, Vulkan, headless, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (buffer, shader, stale handle, etc.)
    InvalidResource(String),

    /// Initialization failed (window, input, renderer)
    InitializationFailed(String),

    /// A null or otherwise unusable native window handle was supplied
    InvalidHandle,

    /// The requested graphics API is not available on this platform
    UnsupportedApi(String),

    /// The GPU device was removed or reset; the renderer cannot continue
    DeviceLost(String),

    /// The subsystem has not been initialized
    NotInitialized,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidHandle => write!(f, "Invalid native window handle"),
            Error::UnsupportedApi(api) => write!(f, "Unsupported graphics API: {}", api),
            Error::DeviceLost(msg) => write!(f, "GPU device lost: {}", msg),
            Error::NotInitialized => write!(f, "Not initialized"),
        }
    }
}

impl std::error::Error for Error {}

/// Log an ERROR message and return `Err(Error::BackendError(..))` from the
/// enclosing function.
///
/// # Example
///
/// ```no_run
/// # use aurora_platform::platform_bail;
/// # fn check(size: u64) -> aurora_platform::aurora::Result<()> {
/// if size == 0 {
///     platform_bail!("aurora::Renderer", "buffer size must be non-zero");
/// }
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! platform_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::platform_err!($source, $($arg)*))
    };
}

/// Log an ERROR message and build an `Error::BackendError` value with the
/// same text.
#[macro_export]
macro_rules! platform_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::platform_error!($source, "{}", message);
        $crate::aurora::Error::BackendError(message)
    }};
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
