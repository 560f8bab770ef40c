mod collision_filter;
mod contact_manifold;
pub mod tracker;

pub use self::collision_filter::{
    CollisionFilter, CollisionGroup, CollisionMask, MASK_ALL, MASK_NONE, MASK_NOT_STATIC,
    MASK_NOT_STATIC_KINEMATIC, MASK_STATIC,
};
pub use self::contact_manifold::ContactManifold;
pub use self::tracker::CollisionTracker;
