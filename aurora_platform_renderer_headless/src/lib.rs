/*!
# Aurora Platform - Headless Renderer Backend

Renderer backend without a GPU, for tests, CI and servers.

The device keeps buffers in system memory and simulates a GPU queue that runs
a configurable number of frames behind the CPU, so fence waits, frame pacing
and resize draining behave like on real hardware. All frame state handling
comes from [`RendererBackend`]; this crate only supplies the device.

The backend is registered with a [`RendererFactory`] as a plugin.
*/

mod gpu_timeline;
mod headless_device;
mod timeline_report;

use aurora_platform::aurora::{RendererApi, RendererConfig, RendererFactory};
use aurora_platform::aurora::render::RendererBackend;

pub use gpu_timeline::{GpuTimeline, HeadlessProbe, TimelineStats};
pub use headless_device::{HeadlessBuffer, HeadlessDevice, HeadlessDeviceConfig, HeadlessShader};
pub use timeline_report::{has_leaks, print_timeline_report};

/// Renderer running on a `HeadlessDevice`
pub type HeadlessRenderer = RendererBackend<HeadlessDevice>;

/// Create an uninitialized headless renderer and the probe watching its device
///
/// # Example
///
/// ```no_run
/// use aurora_platform::aurora::{Renderer, RendererConfig, WindowHandle};
/// use aurora_platform_renderer_headless::{create_renderer, HeadlessDeviceConfig};
///
/// let (mut renderer, probe) = create_renderer(RendererConfig::default(), HeadlessDeviceConfig::default());
/// renderer.initialize(WindowHandle::from_raw(1), 1280, 720)?;
/// renderer.begin_frame();
/// renderer.end_frame();
/// renderer.present()?;
/// assert_eq!(probe.stats().frames_presented, 1);
/// # Ok::<(), aurora_platform::aurora::Error>(())
/// ```
pub fn create_renderer(
    config: RendererConfig,
    device_config: HeadlessDeviceConfig,
) -> (HeadlessRenderer, HeadlessProbe) {
    let device = HeadlessDevice::new(device_config);
    let probe = device.probe();
    (RendererBackend::new(device, config), probe)
}

/// Register the headless backend with default device settings
pub fn register(factory: &mut RendererFactory) {
    register_with(factory, HeadlessDeviceConfig::default());
}

/// Register the headless backend under `RendererApi::Headless`
pub fn register_with(factory: &mut RendererFactory, device_config: HeadlessDeviceConfig) {
    let supported = device_config.supported;
    factory.register_backend(
        RendererApi::Headless,
        move || supported,
        move |config| {
            let (renderer, _probe) = create_renderer(config.clone(), device_config);
            Ok(Box::new(renderer) as Box<dyn aurora_platform::aurora::Renderer>)
        },
    );
}
