use std::collections::HashMap;
use crate::bodies::RigidBody;
use crate::core::BodyId;
use crate::error::PhysicsError;
use crate::Result;

/// Storage for the bodies of one simulator, keyed by caller-supplied id.
///
/// Dynamic bodies are additionally tracked in insertion order; that order
/// defines the slot layout of the transform buffer.
#[derive(Debug, Default)]
pub struct BodyRegistry {
    items: HashMap<BodyId, RigidBody>,
    dynamic_order: Vec<BodyId>,
}

impl BodyRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body, returning the body previously stored under the same id.
    ///
    /// A replaced dynamic body loses its slot; the new one is appended.
    pub fn insert(&mut self, body: RigidBody) -> Option<RigidBody> {
        let id = body.id();
        let dynamic = body.get_body_type().is_dynamic();

        let previous = self.items.insert(id, body);
        if previous.as_ref().map_or(false, |old| old.get_body_type().is_dynamic()) {
            self.dynamic_order.retain(|other| *other != id);
        }
        if dynamic {
            self.dynamic_order.push(id);
        }
        previous
    }

    /// Removes a body from the registry
    pub fn remove(&mut self, id: BodyId) -> Option<RigidBody> {
        let removed = self.items.remove(&id)?;
        if removed.get_body_type().is_dynamic() {
            self.dynamic_order.retain(|other| *other != id);
        }
        Some(removed)
    }

    /// Gets a body by its id
    pub fn get(&self, id: BodyId) -> Option<&RigidBody> {
        self.items.get(&id)
    }

    /// Gets a body by its id, returning an error if not found
    pub fn get_body(&self, id: BodyId) -> Result<&RigidBody> {
        self.get(id).ok_or(PhysicsError::UnknownBody(id))
    }

    /// Returns whether a body with this id exists
    pub fn contains(&self, id: BodyId) -> bool {
        self.items.contains_key(&id)
    }

    /// Returns the dynamic body ids in insertion order
    pub fn dynamic_ids(&self) -> &[BodyId] {
        &self.dynamic_order
    }

    /// Returns the number of dynamic bodies
    pub fn dynamic_count(&self) -> usize {
        self.dynamic_order.len()
    }

    /// Returns the number of bodies
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over all bodies
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &RigidBody)> + '_ {
        self.items.iter().map(|(id, body)| (*id, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{BodyDescriptor, RigidBodyType};
    use rapier3d::prelude::RigidBodyHandle;

    fn body(id: BodyId, kind: RigidBodyType) -> RigidBody {
        let descriptor = BodyDescriptor::sphere(id, "ball", kind, [0.0; 3], 0.5);
        RigidBody::from_descriptor(&descriptor, RigidBodyHandle::invalid())
    }

    #[test]
    fn only_dynamic_bodies_get_slots() {
        let mut registry = BodyRegistry::new();
        registry.insert(body(10, RigidBodyType::Static));
        registry.insert(body(3, RigidBodyType::Dynamic));
        registry.insert(body(7, RigidBodyType::Kinematic));
        registry.insert(body(1, RigidBodyType::Dynamic));

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.dynamic_ids(), &[3, 1]);
        assert_eq!(registry.dynamic_count(), 2);
    }

    #[test]
    fn replacing_moves_body_to_the_end() {
        let mut registry = BodyRegistry::new();
        registry.insert(body(1, RigidBodyType::Dynamic));
        registry.insert(body(2, RigidBodyType::Dynamic));

        let previous = registry.insert(body(1, RigidBodyType::Dynamic));
        assert!(previous.is_some());
        assert_eq!(registry.dynamic_ids(), &[2, 1]);

        registry.insert(body(2, RigidBodyType::Static));
        assert_eq!(registry.dynamic_ids(), &[1]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookups_report_unknown_ids() {
        let mut registry = BodyRegistry::new();
        registry.insert(body(5, RigidBodyType::Dynamic));

        assert!(registry.contains(5));
        assert_eq!(registry.get_body(6).unwrap_err(), PhysicsError::UnknownBody(6));

        assert!(registry.remove(5).is_some());
        assert!(registry.remove(5).is_none());
        assert!(registry.is_empty());
        assert_eq!(registry.dynamic_count(), 0);
    }
}
