pub mod world;
pub mod config;
pub mod storage;
pub mod events;
pub mod timestep;
pub mod worker;

pub use self::world::{Simulator, StepResult};
pub use self::config::SimulatorConfig;
pub use self::storage::BodyRegistry;
pub use self::events::{StepEvents, CallbackEvent, CollisionEventType, EventMap};
pub use self::timestep::FixedTimestep;
pub use self::worker::SimulatorHandle;

/// Stable caller-assigned identifier of a body, unique for the simulator's lifetime
pub type BodyId = u32;

/// Identifier of a host-side callback attached to a body's enter/leave events
pub type CallbackId = String;

/// Flat transform buffer handed back and forth between host and simulator.
///
/// Holds 7 floats per dynamic body (position xyz, quaternion xyzw) in
/// dynamic-body insertion order.
pub type TransformBuffer = Vec<f32>;

/// Fixed integration step used when no configuration overrides it
pub const DEFAULT_FIXED_TIME_STEP: f32 = 1.0 / 60.0;

/// Upper bound of fixed sub-steps run for a single caller-visible step
pub const DEFAULT_MAX_SUBSTEPS: u32 = 40;

/// Default downward acceleration along the y axis
pub const DEFAULT_GRAVITY: f32 = -9.8;
