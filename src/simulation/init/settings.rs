use serde::{Deserialize, Serialize};

use super::perf_stats::PerfStats;
use super::WorldCore;

/// World-wide simulation parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Downward acceleration (pixels/s²). 0 disables the landing rule too.
    pub gravity: f32,
    /// Largest tick a single `step` integrates (seconds)
    pub max_step: f32,
}

impl SimSettings {
    pub const DEFAULT_MAX_STEP: f32 = 0.05;

    /// Frame time clamped to `0..=max_step`; non-finite input is a zero tick
    #[inline]
    pub fn tick(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        dt.min(self.max_step)
    }
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            gravity: 0.0,
            max_step: Self::DEFAULT_MAX_STEP,
        }
    }
}

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_gravity(world: &mut WorldCore, gravity: f32) {
    if gravity.is_finite() {
        world.settings.gravity = gravity;
    } else {
        log::warn!("ignoring non-finite gravity {}", gravity);
    }
}

pub(super) fn set_max_step(world: &mut WorldCore, max_step: f32) {
    if max_step.is_finite() && max_step > 0.0 {
        world.settings.max_step = max_step;
    } else {
        log::warn!("ignoring max step {} (must be positive and finite)", max_step);
    }
}
