use crate::error::PhysicsError;
use crate::math::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3, DEGENERATE_ROTATION_EPSILON};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Number of floats one pose occupies in a flat buffer: position(3) + quaternion xyzw(4)
pub const POSE_STRIDE: usize = 7;

/// A rigid pose in 3D space (position and orientation, no scale)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Position in world space
    pub position: Vector3<f32>,

    /// Orientation as a unit quaternion
    pub rotation: UnitQuaternion<f32>,
}

impl Transform {
    /// Creates a new transform with the given position and rotation
    #[inline]
    pub fn new(position: Vector3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self { position, rotation }
    }

    /// Creates a new identity transform
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Reads a pose from `buffer[offset..offset + 7]` laid out as `x y z qx qy qz qw`.
    ///
    /// The quaternion is renormalized; a zero (or non-finite) quaternion is rejected.
    pub fn from_slice(buffer: &[f32], offset: usize) -> Result<Self> {
        let slots = buffer.get(offset..offset + POSE_STRIDE).ok_or_else(|| {
            PhysicsError::InvalidParameter(format!(
                "pose at offset {} needs {} floats, buffer has {}",
                offset,
                POSE_STRIDE,
                buffer.len()
            ))
        })?;

        if slots.iter().any(|v| !v.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "pose at offset {} contains non-finite values",
                offset
            )));
        }

        let quaternion = Quaternion::new(slots[6], slots[3], slots[4], slots[5]);
        if quaternion.norm_squared() < DEGENERATE_ROTATION_EPSILON {
            return Err(PhysicsError::InvalidParameter(format!(
                "pose at offset {} has a zero-length rotation",
                offset
            )));
        }

        Ok(Self {
            position: Vector3::new(slots[0], slots[1], slots[2]),
            rotation: UnitQuaternion::from_quaternion(quaternion),
        })
    }

    /// Writes this pose into `buffer[offset..offset + 7]`
    #[inline]
    pub fn write_to(&self, buffer: &mut [f32], offset: usize) {
        let q = self.rotation.quaternion();
        buffer[offset] = self.position.x;
        buffer[offset + 1] = self.position.y;
        buffer[offset + 2] = self.position.z;
        buffer[offset + 3] = q.i;
        buffer[offset + 4] = q.j;
        buffer[offset + 5] = q.k;
        buffer[offset + 6] = q.w;
    }

    /// Converts the transform to an isometry
    #[inline]
    pub fn to_isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.position), self.rotation)
    }

    /// Creates a transform from an isometry
    #[inline]
    pub fn from_isometry(isometry: &Isometry3<f32>) -> Self {
        Self {
            position: isometry.translation.vector,
            rotation: isometry.rotation,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
