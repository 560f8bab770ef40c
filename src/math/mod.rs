mod transform;

pub use transform::{Transform, POSE_STRIDE};

pub use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};

/// Squared quaternion norm below which an orientation is rejected as degenerate
pub const DEGENERATE_ROTATION_EPSILON: f32 = 1.0e-12;

/// Builds a vector from a `[x, y, z]` wire triple
#[inline]
pub fn vector_from_array(v: [f32; 3]) -> Vector3<f32> {
    Vector3::new(v[0], v[1], v[2])
}

/// Converts a vector into a `[x, y, z]` wire triple
#[inline]
pub fn vector_to_array(v: &Vector3<f32>) -> [f32; 3] {
    [v.x, v.y, v.z]
}
