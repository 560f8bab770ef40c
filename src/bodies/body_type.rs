use crate::error::PhysicsError;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Type of rigid body, determining how it behaves in the simulation.
///
/// The discriminants are the wire codes used by body descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(try_from = "u8", into = "u8"))]
#[repr(u8)]
pub enum RigidBodyType {
    /// Static bodies have infinite mass and never move
    Static = 0,

    /// Dynamic bodies are fully simulated (affected by forces, collisions, etc.)
    Dynamic = 1,

    /// Kinematic bodies are moved programmatically but push dynamic bodies
    Kinematic = 2,
}

impl RigidBodyType {
    /// Returns whether the body is driven by the solver and owns a transform slot
    pub fn is_dynamic(self) -> bool {
        matches!(self, Self::Dynamic)
    }
}

impl TryFrom<u8> for RigidBodyType {
    type Error = PhysicsError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Static),
            1 => Ok(Self::Dynamic),
            2 => Ok(Self::Kinematic),
            other => Err(PhysicsError::InvalidParameter(format!("unknown body type {}", other))),
        }
    }
}

impl From<RigidBodyType> for u8 {
    fn from(kind: RigidBodyType) -> Self {
        kind as u8
    }
}
