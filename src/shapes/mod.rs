mod shape;
mod mesh;

pub use self::shape::{create_shape, ShapeKind, SHAPE_DIMENSIONS_OFFSET};
pub use self::mesh::{Triangle, TriangleMesh, FLOATS_PER_TRIANGLE};
