//! Messages exchanged between a host and the simulation worker.

use crate::bodies::BodyDescriptor;
use crate::core::{BodyId, CallbackEvent, StepEvents, StepResult, TransformBuffer};
use crate::math::POSE_STRIDE;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Observer id with the partner ids it reported in one event category
pub type EventList = Vec<(BodyId, Vec<BodyId>)>;

/// Request sent to the simulation worker
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serialize",
    serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum Request {
    /// Prepares the worker and restarts its step clock; answered with `Ready`
    Init,

    /// Advances the world; answered with `Update`
    Step { transforms: TransformBuffer },

    /// Creates bodies in order
    CreateBodies { bodies: Vec<BodyDescriptor> },

    /// Applies an impulse at a body's center of mass
    ApplyCentralImpulse { id: BodyId, impulse: [f32; 3] },

    /// Applies a force at a body's center of mass for one step
    ApplyCentralForce { id: BodyId, force: [f32; 3] },

    /// Moves one body
    Teleport {
        id: BodyId,
        transform: [f32; POSE_STRIDE],
        #[cfg_attr(feature = "serialize", serde(default))]
        clear_forces: bool,
    },

    /// Moves several bodies; `transforms` holds one pose per id
    TeleportMany {
        ids: Vec<BodyId>,
        transforms: Vec<f32>,
        #[cfg_attr(feature = "serialize", serde(default))]
        clear_forces: bool,
    },

    /// Replaces the world gravity
    SetGravity { acceleration: [f32; 3] },

    /// Stops the worker
    Shutdown,
}

impl Request {
    /// Returns the operation name used on the wire
    pub fn op(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Step { .. } => "step",
            Self::CreateBodies { .. } => "createBodies",
            Self::ApplyCentralImpulse { .. } => "applyCentralImpulse",
            Self::ApplyCentralForce { .. } => "applyCentralForce",
            Self::Teleport { .. } => "teleport",
            Self::TeleportMany { .. } => "teleportMany",
            Self::SetGravity { .. } => "setGravity",
            Self::Shutdown => "shutdown",
        }
    }
}

/// Result of a step as published to the host
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
pub struct UpdatePayload {
    /// The host's buffer, handed back
    pub transforms: TransformBuffer,

    /// Enter/leave callbacks to invoke
    pub events: Vec<CallbackEvent>,

    /// Trigger entries, keyed by trigger
    pub trigger_enter: EventList,

    /// Trigger departures, keyed by trigger
    pub trigger_leave: EventList,

    /// Solid contacts that began
    pub collision_start: EventList,

    /// Solid contacts that ended
    pub collision_end: EventList,
}

impl From<StepResult> for UpdatePayload {
    fn from(result: StepResult) -> Self {
        let StepResult { transforms, events, .. } = result;
        Self {
            transforms,
            trigger_enter: StepEvents::to_pairs(&events.trigger_enter),
            trigger_leave: StepEvents::to_pairs(&events.trigger_leave),
            collision_start: StepEvents::to_pairs(&events.collision_start),
            collision_end: StepEvents::to_pairs(&events.collision_end),
            events: events.callbacks,
        }
    }
}

/// Message sent back by the simulation worker
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serialize",
    serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum Response {
    /// The worker finished `Init`
    Ready,

    /// The outcome of a `Step`
    Update(UpdatePayload),

    /// A request failed; `request` names its wire tag
    Error { request: String, message: String },
}

impl Response {
    /// Builds the error response for a failed request
    pub fn error(op: &str, err: &crate::error::PhysicsError) -> Self {
        Self::Error {
            request: op.to_owned(),
            message: err.to_string(),
        }
    }
}
