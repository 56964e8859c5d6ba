/// RendererFactory - picks and builds a renderer backend
///
/// Backends are plugins: each registers a side-effect-free availability probe
/// and a constructor for one `RendererApi`. The factory walks the platform
/// priority list and builds the first backend that is available.

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::renderer::renderer::{Renderer, RendererConfig};
use crate::{platform_debug, platform_error, platform_info, platform_warn};

const SOURCE: &str = "aurora::RendererFactory";

/// Graphics APIs a renderer can be built on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererApi {
    /// Best available API for the platform
    Auto,
    DirectX12,
    DirectX11,
    Vulkan,
    OpenGL,
    Metal,
    /// Simulated GPU, no window system needed
    Headless,
}

impl RendererApi {
    pub fn name(self) -> &'static str {
        match self {
            RendererApi::Auto => "Auto",
            RendererApi::DirectX12 => "DirectX 12",
            RendererApi::DirectX11 => "DirectX 11",
            RendererApi::Vulkan => "Vulkan",
            RendererApi::OpenGL => "OpenGL",
            RendererApi::Metal => "Metal",
            RendererApi::Headless => "Headless",
        }
    }
}

/// Native API priority for an operating system (`std::env::consts::OS` names)
pub fn priority_for_os(os: &str) -> &'static [RendererApi] {
    match os {
        "windows" => &[
            RendererApi::DirectX12,
            RendererApi::DirectX11,
            RendererApi::Vulkan,
            RendererApi::OpenGL,
        ],
        "macos" => &[RendererApi::Metal, RendererApi::Vulkan, RendererApi::OpenGL],
        "linux" => &[RendererApi::Vulkan, RendererApi::OpenGL],
        _ => &[],
    }
}

/// Reports whether a backend can run on this machine. Must not create
/// devices or windows.
pub type BackendProbe = Box<dyn Fn() -> bool + Send + Sync>;

/// Builds an uninitialized renderer
pub type BackendConstructor = Box<dyn Fn(&RendererConfig) -> Result<Box<dyn Renderer>> + Send + Sync>;

struct RegisteredBackend {
    probe: BackendProbe,
    constructor: BackendConstructor,
}

pub struct RendererFactory {
    config: RendererConfig,
    os: &'static str,
    backends: FxHashMap<RendererApi, RegisteredBackend>,
}

impl RendererFactory {
    /// Factory for the current operating system
    pub fn new(config: RendererConfig) -> Self {
        Self::for_os(config, std::env::consts::OS)
    }

    /// Factory using another operating system's priority list
    pub fn for_os(config: RendererConfig, os: &'static str) -> Self {
        Self {
            config,
            os,
            backends: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RendererConfig {
        &mut self.config
    }

    /// Register (or replace) the backend for `api`
    ///
    /// # Arguments
    ///
    /// * `api` - API the backend implements (`Auto` is rejected)
    /// * `probe` - Availability check
    /// * `constructor` - Builds the renderer
    pub fn register_backend<P, C>(&mut self, api: RendererApi, probe: P, constructor: C)
    where
        P: Fn() -> bool + Send + Sync + 'static,
        C: Fn(&RendererConfig) -> Result<Box<dyn Renderer>> + Send + Sync + 'static,
    {
        if api == RendererApi::Auto {
            platform_warn!(SOURCE, "Cannot register a backend for RendererApi::Auto, ignored");
            return;
        }
        let replaced = self
            .backends
            .insert(
                api,
                RegisteredBackend {
                    probe: Box::new(probe),
                    constructor: Box::new(constructor),
                },
            )
            .is_some();
        platform_debug!(
            SOURCE,
            "{} backend {}",
            api.name(),
            if replaced { "replaced" } else { "registered" }
        );
    }

    pub fn is_registered(&self, api: RendererApi) -> bool {
        self.backends.contains_key(&api)
    }

    /// APIs tried by `create_renderer`, in order
    pub fn priority_order(&self) -> Vec<RendererApi> {
        let mut order = priority_for_os(self.os).to_vec();
        if self.config.headless_fallback {
            order.push(RendererApi::Headless);
        }
        order
    }

    /// Probe an API without creating anything
    pub fn is_api_supported(&self, api: RendererApi) -> bool {
        match api {
            RendererApi::Auto => self.best_available_api().is_some(),
            _ => self.backends.get(&api).is_some_and(|backend| (backend.probe)()),
        }
    }

    /// First available API in priority order
    pub fn best_available_api(&self) -> Option<RendererApi> {
        self.priority_order()
            .into_iter()
            .find(|&api| self.is_api_supported(api))
    }

    /// Build the first available backend in priority order
    pub fn create_renderer(&self) -> Result<Box<dyn Renderer>> {
        for api in self.priority_order() {
            if !self.is_api_supported(api) {
                continue;
            }
            match self.construct(api) {
                Ok(renderer) => return Ok(renderer),
                Err(error) => {
                    platform_warn!(SOURCE, "{} backend failed to construct ({}), trying next", api.name(), error);
                }
            }
        }
        platform_error!(SOURCE, "No renderer backend available on {}", self.os);
        Err(Error::UnsupportedApi(format!("no available backend on {}", self.os)))
    }

    /// Build exactly `api`. Never substitutes another backend.
    pub fn create_renderer_for(&self, api: RendererApi) -> Result<Box<dyn Renderer>> {
        if api == RendererApi::Auto {
            return self.create_renderer();
        }
        if !self.is_api_supported(api) {
            platform_error!(SOURCE, "{} backend is not available", api.name());
            return Err(Error::UnsupportedApi(api.name().to_string()));
        }
        self.construct(api)
    }

    fn construct(&self, api: RendererApi) -> Result<Box<dyn Renderer>> {
        let Some(backend) = self.backends.get(&api) else {
            return Err(Error::UnsupportedApi(api.name().to_string()));
        };
        let renderer = (backend.constructor)(&self.config)?;
        platform_info!(SOURCE, "Created {} renderer", api.name());
        Ok(renderer)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "renderer_factory_tests.rs"]
mod tests;
