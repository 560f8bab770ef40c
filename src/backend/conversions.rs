use crate::bodies::RigidBodyType;
use crate::collision::ContactManifold;
use crate::core::BodyId;

use rapier3d::prelude::{ColliderHandle, ColliderSet, ContactPair, RigidBodyBuilder};

/// Encodes a body id into backend user data
pub fn body_user_data(id: BodyId) -> u128 {
    id as u128
}

/// Decodes the body id stored on a collider
pub fn collider_body_id(colliders: &ColliderSet, handle: ColliderHandle) -> Option<BodyId> {
    colliders.get(handle).map(|collider| collider.user_data as BodyId)
}

/// Returns the backend builder matching a body type
pub fn body_builder(kind: RigidBodyType) -> RigidBodyBuilder {
    match kind {
        RigidBodyType::Static => RigidBodyBuilder::fixed(),
        RigidBodyType::Dynamic => RigidBodyBuilder::dynamic(),
        RigidBodyType::Kinematic => RigidBodyBuilder::kinematic_position_based().can_sleep(false),
    }
}

/// Converts a backend contact pair into a manifold record
pub fn manifold_from_pair(colliders: &ColliderSet, pair: &ContactPair) -> Option<ContactManifold> {
    if !pair.has_any_active_contact {
        return None;
    }

    let body_a = collider_body_id(colliders, pair.collider1)?;
    let body_b = collider_body_id(colliders, pair.collider2)?;
    let points: usize = pair.manifolds.iter().map(|m| m.points.len()).sum();
    Some(ContactManifold::new(body_a, body_b, points.max(1)))
}
