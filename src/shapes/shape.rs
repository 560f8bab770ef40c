use crate::error::PhysicsError;
use crate::shapes::TriangleMesh;
use crate::Result;

use rapier3d::prelude::SharedShape;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// First descriptor slot after the embedded pose, where shape dimensions start
pub const SHAPE_DIMENSIONS_OFFSET: usize = 7;

/// Kind of collision shape; discriminants are the wire codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(try_from = "u8", into = "u8"))]
#[repr(u8)]
pub enum ShapeKind {
    /// Box with half-extents in descriptor slots 7..10
    Box = 0,

    /// Sphere with its radius in descriptor slot 7
    Sphere = 1,

    /// Static-friendly triangle mesh built from a triangle buffer
    Mesh = 2,
}

impl ShapeKind {
    /// Returns the type name of the shape
    pub fn shape_type(self) -> &'static str {
        match self {
            Self::Box => "Box",
            Self::Sphere => "Sphere",
            Self::Mesh => "Mesh",
        }
    }
}

impl TryFrom<u8> for ShapeKind {
    type Error = PhysicsError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Box),
            1 => Ok(Self::Sphere),
            2 => Ok(Self::Mesh),
            other => Err(PhysicsError::InvalidShape(format!("unknown shape kind {}", other))),
        }
    }
}

impl From<ShapeKind> for u8 {
    fn from(kind: ShapeKind) -> Self {
        kind as u8
    }
}

/// Builds the collision geometry of a body.
///
/// `transform` is the body's flat descriptor (pose then dimensions). Shapes are
/// exact-fit: no collision margin is added around the geometry.
pub fn create_shape(name: &str, kind: ShapeKind, transform: &[f32], triangles: Option<&[f32]>) -> Result<SharedShape> {
    match kind {
        ShapeKind::Box => {
            let [hx, hy, hz] = dimensions::<3>(name, kind, transform)?;
            Ok(SharedShape::cuboid(hx, hy, hz))
        }
        ShapeKind::Sphere => {
            let [radius] = dimensions::<1>(name, kind, transform)?;
            Ok(SharedShape::ball(radius))
        }
        ShapeKind::Mesh => {
            let triangles = triangles.ok_or_else(|| PhysicsError::MissingTriangles(name.to_owned()))?;
            Ok(TriangleMesh::from_flat(name, triangles)?.into_shape())
        }
    }
}

fn dimensions<const N: usize>(name: &str, kind: ShapeKind, transform: &[f32]) -> Result<[f32; N]> {
    let slots = transform
        .get(SHAPE_DIMENSIONS_OFFSET..SHAPE_DIMENSIONS_OFFSET + N)
        .ok_or_else(|| {
            PhysicsError::InvalidShape(format!(
                "{}: {} needs {} descriptor slots, got {}",
                name,
                kind.shape_type(),
                SHAPE_DIMENSIONS_OFFSET + N,
                transform.len()
            ))
        })?;

    let mut out = [0.0; N];
    for (dst, &value) in out.iter_mut().zip(slots) {
        if !value.is_finite() || value < 0.0 {
            return Err(PhysicsError::InvalidShape(format!(
                "{}: {} dimension {} is not a finite non-negative number",
                name,
                kind.shape_type(),
                value
            )));
        }
        *dst = value;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSE: [f32; 7] = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0];

    fn descriptor(dims: &[f32]) -> Vec<f32> {
        let mut out = POSE.to_vec();
        out.extend_from_slice(dims);
        out
    }

    #[test]
    fn builds_box_and_sphere() {
        let cuboid = create_shape("crate", ShapeKind::Box, &descriptor(&[1.0, 2.0, 3.0]), None).unwrap();
        let half = cuboid.as_cuboid().unwrap().half_extents;
        assert_eq!((half.x, half.y, half.z), (1.0, 2.0, 3.0));

        let ball = create_shape("ball", ShapeKind::Sphere, &descriptor(&[0.5]), None).unwrap();
        assert_eq!(ball.as_ball().unwrap().radius, 0.5);
    }

    #[test]
    fn rejects_short_descriptors_and_bad_dimensions() {
        assert!(matches!(
            create_shape("crate", ShapeKind::Box, &descriptor(&[1.0]), None),
            Err(PhysicsError::InvalidShape(_))
        ));
        assert!(matches!(
            create_shape("ball", ShapeKind::Sphere, &descriptor(&[-1.0]), None),
            Err(PhysicsError::InvalidShape(_))
        ));
    }

    #[test]
    fn mesh_requires_triangles() {
        assert_eq!(
            create_shape("floor", ShapeKind::Mesh, &POSE, None).unwrap_err(),
            PhysicsError::MissingTriangles("floor".to_owned())
        );
    }

    #[test]
    fn unknown_shape_codes_fail() {
        assert_eq!(ShapeKind::try_from(1).unwrap(), ShapeKind::Sphere);
        assert!(matches!(ShapeKind::try_from(7), Err(PhysicsError::InvalidShape(_))));
    }
}
