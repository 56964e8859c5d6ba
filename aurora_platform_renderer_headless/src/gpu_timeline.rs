/// Simulated GPU queue timeline
///
/// Fence signals are queued in submission order. The simulated GPU keeps the
/// newest `latency` signals in flight and retires everything older, which
/// models a GPU running `latency` frames behind the CPU. A CPU wait retires
/// queued signals up to the awaited value immediately.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use aurora_platform::aurora::{Error, Result};

pub struct GpuTimeline {
    latency: u64,
    pending: VecDeque<u64>,
    last_signaled: u64,
    completed: u64,
}

impl GpuTimeline {
    pub fn new(latency: u64) -> Self {
        Self {
            latency,
            pending: VecDeque::new(),
            last_signaled: 0,
            completed: 0,
        }
    }

    pub fn latency(&self) -> u64 {
        self.latency
    }

    /// Queue a signal. Values must increase.
    pub fn signal(&mut self, value: u64) -> Result<()> {
        if value <= self.last_signaled {
            return Err(Error::BackendError(format!(
                "fence value {} does not follow {}",
                value, self.last_signaled
            )));
        }
        self.last_signaled = value;
        self.pending.push_back(value);
        while self.pending.len() as u64 > self.latency {
            self.retire_front();
        }
        Ok(())
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn last_signaled(&self) -> u64 {
        self.last_signaled
    }

    /// Signals queued but not yet retired
    pub fn in_flight(&self) -> u64 {
        self.pending.len() as u64
    }

    /// Block until `value` completes. Returns `true` if the CPU had to wait.
    pub fn wait(&mut self, value: u64) -> Result<bool> {
        if self.completed >= value {
            return Ok(false);
        }
        if value > self.last_signaled {
            return Err(Error::BackendError(format!(
                "wait for fence {} which was never signaled (last {})",
                value, self.last_signaled
            )));
        }
        while self.completed < value {
            self.retire_front();
        }
        Ok(true)
    }

    /// Retire all queued work
    pub fn drain(&mut self) {
        while !self.pending.is_empty() {
            self.retire_front();
        }
    }

    /// Forget all state (new device)
    pub fn reset(&mut self) {
        self.pending.clear();
        self.last_signaled = 0;
        self.completed = 0;
    }

    fn retire_front(&mut self) {
        if let Some(value) = self.pending.pop_front() {
            self.completed = value;
        }
    }
}

/// Counters collected by a `HeadlessDevice`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineStats {
    pub devices_created: u32,
    pub view_generations: u64,
    pub surface_resizes: u64,
    pub frames_submitted: u64,
    pub frames_presented: u64,
    pub draw_calls: u64,
    pub fences_signaled: u64,
    pub completed_fence: u64,
    pub cpu_stalls: u64,
    pub max_frames_in_flight: u64,
    pub live_buffers: u64,
    pub live_shaders: u64,
    pub buffer_bytes: u64,
}

#[derive(Default)]
struct ProbeState {
    stats: TimelineStats,
    device_lost: bool,
}

/// Shared view into a `HeadlessDevice` that outlives moving the device into
/// a renderer. Also used to inject device loss.
#[derive(Clone, Default)]
pub struct HeadlessProbe {
    inner: Arc<Mutex<ProbeState>>,
}

impl HeadlessProbe {
    pub fn stats(&self) -> TimelineStats {
        self.with(|state| state.stats)
    }

    /// Make every following present/submit/fence call fail with
    /// `Error::DeviceLost`, as after a driver reset.
    pub fn lose_device(&self) {
        self.with(|state| state.device_lost = true);
    }

    pub fn is_device_lost(&self) -> bool {
        self.with(|state| state.device_lost)
    }

    pub(crate) fn restore_device(&self) {
        self.with(|state| state.device_lost = false);
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut TimelineStats)) {
        self.with(|state| f(&mut state.stats));
    }

    fn with<R>(&self, f: impl FnOnce(&mut ProbeState) -> R) -> R {
        match self.inner.lock() {
            Ok(mut state) => f(&mut *state),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "gpu_timeline_tests.rs"]
mod tests;
