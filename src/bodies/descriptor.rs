use crate::bodies::{Material, RigidBodyType};
use crate::core::{BodyId, CallbackId};
use crate::math::POSE_STRIDE;
use crate::shapes::ShapeKind;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Wire description of a body to create.
///
/// `transform` packs the pose (`x y z qx qy qz qw`) followed by the shape
/// dimensions: box half-extents in slots 7..10, sphere radius in slot 7.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
pub struct BodyDescriptor {
    /// Stable identifier chosen by the host
    pub id: BodyId,

    /// Logical tag, matched against entity filters
    #[cfg_attr(feature = "serialize", serde(default))]
    pub name: String,

    /// Body type
    #[cfg_attr(feature = "serialize", serde(rename = "type"))]
    pub kind: RigidBodyType,

    /// Collision shape
    pub shape: ShapeKind,

    /// Pose followed by shape dimensions
    pub transform: Vec<f32>,

    /// Flat triangle list (9 floats per triangle) for mesh shapes
    #[cfg_attr(feature = "serialize", serde(default, skip_serializing_if = "Option::is_none"))]
    pub triangles: Option<Vec<f32>>,

    /// Mass in kg; ignored for static and kinematic bodies
    #[cfg_attr(feature = "serialize", serde(default))]
    pub mass: f32,

    /// Coefficient of restitution
    #[cfg_attr(feature = "serialize", serde(default))]
    pub restitution: f32,

    /// Coefficient of friction
    #[cfg_attr(feature = "serialize", serde(default))]
    pub friction: f32,

    /// Linear velocity damping
    #[cfg_attr(feature = "serialize", serde(default))]
    pub linear_damping: f32,

    /// Angular velocity damping
    #[cfg_attr(feature = "serialize", serde(default))]
    pub angular_damping: f32,

    /// Whether the body only detects overlaps (no contact response)
    #[cfg_attr(feature = "serialize", serde(default))]
    pub trigger: bool,

    /// Body whose pose mirrors this body every step
    #[cfg_attr(feature = "serialize", serde(default, skip_serializing_if = "Option::is_none"))]
    pub linked_body_id: Option<BodyId>,

    /// Partner name (or `"any"`) gating the enter/leave callbacks
    #[cfg_attr(feature = "serialize", serde(default, skip_serializing_if = "Option::is_none"))]
    pub entity: Option<String>,

    /// Callback fired when a matching partner enters this trigger
    #[cfg_attr(feature = "serialize", serde(default, skip_serializing_if = "Option::is_none"))]
    pub enter: Option<CallbackId>,

    /// Callback fired when a matching partner leaves this trigger
    #[cfg_attr(feature = "serialize", serde(default, skip_serializing_if = "Option::is_none"))]
    pub leave: Option<CallbackId>,
}

impl BodyDescriptor {
    /// Creates a descriptor with default material, zero mass and no trigger behaviour
    pub fn new(id: BodyId, name: impl Into<String>, kind: RigidBodyType, shape: ShapeKind, transform: Vec<f32>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            shape,
            transform,
            triangles: None,
            mass: 0.0,
            restitution: 0.0,
            friction: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            trigger: false,
            linked_body_id: None,
            entity: None,
            enter: None,
            leave: None,
        }
    }

    /// Creates an axis-aligned box descriptor at `position`
    pub fn cuboid(id: BodyId, name: impl Into<String>, kind: RigidBodyType, position: [f32; 3], half_extents: [f32; 3]) -> Self {
        let [x, y, z] = position;
        let [hx, hy, hz] = half_extents;
        Self::new(id, name, kind, ShapeKind::Box, vec![x, y, z, 0.0, 0.0, 0.0, 1.0, hx, hy, hz])
    }

    /// Creates a sphere descriptor at `position`
    pub fn sphere(id: BodyId, name: impl Into<String>, kind: RigidBodyType, position: [f32; 3], radius: f32) -> Self {
        let [x, y, z] = position;
        Self::new(id, name, kind, ShapeKind::Sphere, vec![x, y, z, 0.0, 0.0, 0.0, 1.0, radius, 0.0, 0.0])
    }

    /// Creates a triangle mesh descriptor with its origin at `position`
    pub fn mesh(id: BodyId, name: impl Into<String>, kind: RigidBodyType, position: [f32; 3], triangles: Vec<f32>) -> Self {
        let [x, y, z] = position;
        let mut descriptor = Self::new(id, name, kind, ShapeKind::Mesh, vec![x, y, z, 0.0, 0.0, 0.0, 1.0]);
        descriptor.triangles = Some(triangles);
        descriptor
    }

    /// Sets the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Sets the surface and damping properties
    pub fn with_material(mut self, material: Material) -> Self {
        self.restitution = material.restitution;
        self.friction = material.friction;
        self.linear_damping = material.linear_damping;
        self.angular_damping = material.angular_damping;
        self
    }

    /// Sets the orientation quaternion (`[x, y, z, w]`)
    pub fn with_rotation(mut self, rotation: [f32; 4]) -> Self {
        if self.transform.len() < POSE_STRIDE {
            self.transform.resize(POSE_STRIDE, 0.0);
        }
        self.transform[3..POSE_STRIDE].copy_from_slice(&rotation);
        self
    }

    /// Marks the body as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.trigger = true;
        self
    }

    /// Links another body that mirrors this body's pose
    pub fn linked_to(mut self, other: BodyId) -> Self {
        self.linked_body_id = Some(other);
        self
    }

    /// Sets the entity filter and enter/leave callbacks
    pub fn with_callbacks(mut self, entity: impl Into<String>, enter: Option<&str>, leave: Option<&str>) -> Self {
        self.entity = Some(entity.into());
        self.enter = enter.map(str::to_owned);
        self.leave = leave.map(str::to_owned);
        self
    }

    /// Returns the material described by this descriptor
    pub fn material(&self) -> Material {
        Material::new(self.friction, self.restitution)
            .with_damping(self.linear_damping, self.angular_damping)
    }
}
