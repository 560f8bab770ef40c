use crate::core::{DEFAULT_FIXED_TIME_STEP, DEFAULT_GRAVITY, DEFAULT_MAX_SUBSTEPS};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for the simulator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default, rename_all = "camelCase"))]
pub struct SimulatorConfig {
    /// The fixed time step of one sub-step, in seconds
    pub fixed_time_step: f32,

    /// The maximum number of sub-steps run per step call; excess time is dropped
    pub max_substeps: u32,

    /// Initial gravity acceleration
    pub gravity: [f32; 3],

    /// Whether resting bodies may fall asleep
    pub allow_sleeping: bool,

    /// The number of solver iterations per sub-step
    pub solver_iterations: usize,

    /// Whether creating a body with an existing id replaces the old body
    /// instead of failing
    pub replace_duplicate_ids: bool,

    /// Capacity of the worker request channel (0 means unbounded)
    pub channel_capacity: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            fixed_time_step: DEFAULT_FIXED_TIME_STEP,
            max_substeps: DEFAULT_MAX_SUBSTEPS,
            gravity: [0.0, DEFAULT_GRAVITY, 0.0],
            allow_sleeping: true,
            solver_iterations: 4,
            replace_duplicate_ids: false,
            channel_capacity: 256,
        }
    }
}

impl SimulatorConfig {
    /// Returns a configuration with the given gravity
    pub fn with_gravity(mut self, gravity: [f32; 3]) -> Self {
        self.gravity = gravity;
        self
    }

    /// Returns a configuration with sleeping enabled or disabled
    pub fn with_sleeping(mut self, allow_sleeping: bool) -> Self {
        self.allow_sleeping = allow_sleeping;
        self
    }
}
