use crate::error::PhysicsError;
use crate::math::vector_from_array;
use crate::Result;

use rapier3d::prelude::{Point, Real, SharedShape};
use std::collections::HashMap;

/// Number of floats describing one triangle (3 vertices x xyz)
pub const FLOATS_PER_TRIANGLE: usize = 9;

/// A triangle in a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// The vertices of the triangle
    pub vertices: [[f32; 3]; 3],
}

impl Triangle {
    /// Reads the triangle stored in a 9-float chunk
    fn from_chunk(chunk: &[f32]) -> Self {
        Self {
            vertices: [
                [chunk[0], chunk[1], chunk[2]],
                [chunk[3], chunk[4], chunk[5]],
                [chunk[6], chunk[7], chunk[8]],
            ],
        }
    }

    /// Returns true when the three vertices do not span any area
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.vertices.map(vector_from_array);
        (b - a).cross(&(c - a)).norm_squared() <= f32::EPSILON * f32::EPSILON
    }
}

/// An indexed triangle mesh built from a flat triangle list.
///
/// Bit-identical vertices shared between triangles are welded into one
/// vertex so the backend sees a connected surface rather than a soup.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Builds a mesh from groups of 9 floats; `name` only labels errors
    pub fn from_flat(name: &str, triangles: &[f32]) -> Result<Self> {
        if triangles.is_empty() {
            return Err(PhysicsError::MissingTriangles(name.to_owned()));
        }
        if triangles.len() % FLOATS_PER_TRIANGLE != 0 {
            return Err(PhysicsError::InvalidShape(format!(
                "{}: triangle buffer length {} is not a multiple of {}",
                name,
                triangles.len(),
                FLOATS_PER_TRIANGLE
            )));
        }
        if triangles.iter().any(|v| !v.is_finite()) {
            return Err(PhysicsError::InvalidShape(format!(
                "{}: triangle buffer contains non-finite values",
                name
            )));
        }

        let faces: Vec<Triangle> = triangles
            .chunks_exact(FLOATS_PER_TRIANGLE)
            .map(Triangle::from_chunk)
            .collect();
        if faces.iter().all(Triangle::is_degenerate) {
            return Err(PhysicsError::InvalidShape(format!(
                "{}: every triangle has zero area",
                name
            )));
        }

        let mut mesh = Self::default();
        let mut welded: HashMap<[u32; 3], u32> = HashMap::new();

        for triangle in faces {
            let mut face = [0u32; 3];
            for (slot, vertex) in face.iter_mut().zip(triangle.vertices.iter()) {
                *slot = mesh.weld(&mut welded, *vertex);
            }
            mesh.indices.push(face);
        }

        Ok(mesh)
    }

    fn weld(&mut self, welded: &mut HashMap<[u32; 3], u32>, vertex: [f32; 3]) -> u32 {
        let key = vertex.map(f32::to_bits);
        let next = self.vertices.len() as u32;
        let index = *welded.entry(key).or_insert(next);
        if index == next {
            self.vertices.push(Point::new(vertex[0], vertex[1], vertex[2]));
        }
        index
    }

    /// Returns the number of distinct vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Converts the mesh into a BVH-accelerated backend shape
    pub fn into_shape(self) -> SharedShape {
        SharedShape::trimesh(self.vertices, self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Vec<f32> {
        vec![
            -1.0, 0.0, -1.0, 1.0, 0.0, -1.0, 1.0, 0.0, 1.0, //
            -1.0, 0.0, -1.0, 1.0, 0.0, 1.0, -1.0, 0.0, 1.0,
        ]
    }

    #[test]
    fn welds_shared_vertices() {
        let mesh = TriangleMesh::from_flat("floor", &quad()).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn rejects_empty_and_ragged_buffers() {
        assert_eq!(
            TriangleMesh::from_flat("floor", &[]).unwrap_err(),
            PhysicsError::MissingTriangles("floor".to_owned())
        );
        assert!(matches!(
            TriangleMesh::from_flat("floor", &[0.0; 10]),
            Err(PhysicsError::InvalidShape(_))
        ));
    }

    #[test]
    fn rejects_meshes_without_area() {
        // Collinear and collapsed triangles only
        let flat = vec![
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0, //
            1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
        ];
        assert!(matches!(
            TriangleMesh::from_flat("floor", &flat),
            Err(PhysicsError::InvalidShape(_))
        ));

        // One sliver is fine as long as some face has area
        let mut mixed = quad();
        mixed.extend_from_slice(&flat[..FLOATS_PER_TRIANGLE]);
        let mesh = TriangleMesh::from_flat("floor", &mixed).unwrap();
        assert_eq!(mesh.triangle_count(), 3);
    }

    #[test]
    fn builds_backend_trimesh() {
        let shape = TriangleMesh::from_flat("floor", &quad()).unwrap().into_shape();
        let trimesh = shape.as_trimesh().unwrap();
        assert_eq!(trimesh.indices().len(), 2);
        assert_eq!(trimesh.vertices().len(), 4);
    }
}
