pub mod math;
pub mod core;
pub mod bodies;
pub mod shapes;
pub mod collision;
pub mod backend;
pub mod protocol;

/// Re-export common types for easier usage
pub use crate::core::{BodyId, Simulator, SimulatorConfig, SimulatorHandle, StepResult, TransformBuffer};
pub use crate::core::events::{CallbackEvent, StepEvents};
pub use crate::bodies::{BodyDescriptor, RigidBody, RigidBodyType, Material};
pub use crate::shapes::ShapeKind;
pub use crate::protocol::{Request, Response, UpdatePayload};

/// Error types for the simulator
pub mod error {
    use crate::core::BodyId;
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid shape: {0}")]
        InvalidShape(String),

        #[error("Mesh body {0} has no triangle data")]
        MissingTriangles(String),

        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Body {0} not found")]
        UnknownBody(BodyId),

        #[error("Body {0} already exists")]
        DuplicateBody(BodyId),

        #[error("Simulation worker is disconnected")]
        WorkerDisconnected,

        #[error("Simulation worker panicked")]
        WorkerPanicked,

        #[error("Internal error: {0}")]
        InternalError(String),
    }
}

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
