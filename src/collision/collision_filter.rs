use bitflags::bitflags;

use crate::bodies::RigidBodyType;

use rapier3d::prelude::{Group, InteractionGroups};

bitflags! {
    /// A bit mask representing a collision group.
    ///
    /// The bit values are shared with host-authored body descriptors and must
    /// not change.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionGroup: u32 {
        /// Default group (moving actors)
        const DEFAULT   = 1;

        /// Dynamic objects (same bit as the default group)
        const DYNAMIC   = 1;

        /// Static world geometry
        const STATIC    = 2;

        /// Kinematic objects
        const KINEMATIC = 4;

        /// Trigger volumes
        const TRIGGER   = 16;
    }
}

/// Type alias for a collision mask (what groups this object collides with)
pub type CollisionMask = u32;

/// Mask colliding with nothing
pub const MASK_NONE: CollisionMask = 0;

/// Mask colliding with every group
pub const MASK_ALL: CollisionMask = 65535;

/// Mask colliding with static geometry only
pub const MASK_STATIC: CollisionMask = 2;

/// Mask colliding with everything but static geometry
pub const MASK_NOT_STATIC: CollisionMask = 65535 ^ 2;

/// Mask colliding with everything but static and kinematic bodies
pub const MASK_NOT_STATIC_KINEMATIC: CollisionMask = 65535 ^ (2 | 4);

/// Group/mask pair assigned to a body when it enters the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Groups the body belongs to
    pub group: CollisionGroup,

    /// Groups the body collides with
    pub mask: CollisionMask,
}

impl CollisionFilter {
    /// Returns the fixed policy for a body type: static world geometry ignores
    /// other statics, moving actors collide with everything.
    pub fn for_kind(kind: RigidBodyType) -> Self {
        match kind {
            RigidBodyType::Static => Self {
                group: CollisionGroup::STATIC,
                mask: MASK_NOT_STATIC,
            },
            RigidBodyType::Dynamic => Self {
                group: CollisionGroup::DYNAMIC,
                mask: MASK_ALL,
            },
            RigidBodyType::Kinematic => Self {
                group: CollisionGroup::DEFAULT,
                mask: MASK_ALL,
            },
        }
    }

    /// Returns whether bodies with these filters should be tested for collision.
    ///
    /// A collides with B if A's mask includes B's group and B's mask includes A's group.
    pub fn should_collide(&self, other: &CollisionFilter) -> bool {
        (self.group.bits() & other.mask) != 0 && (other.group.bits() & self.mask) != 0
    }

    /// Converts the filter into backend interaction groups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_truncate(self.group.bits()),
            Group::from_bits_truncate(self.mask),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_constants_are_stable() {
        assert_eq!(CollisionGroup::DEFAULT.bits(), 1);
        assert_eq!(CollisionGroup::STATIC.bits(), 2);
        assert_eq!(CollisionGroup::KINEMATIC.bits(), 4);
        assert_eq!(CollisionGroup::TRIGGER.bits(), 16);
        assert_eq!(MASK_NOT_STATIC, 65533);
        assert_eq!(MASK_NOT_STATIC_KINEMATIC, 65529);
    }

    #[test]
    fn statics_ignore_each_other() {
        let ground = CollisionFilter::for_kind(RigidBodyType::Static);
        let wall = CollisionFilter::for_kind(RigidBodyType::Static);
        let ball = CollisionFilter::for_kind(RigidBodyType::Dynamic);
        let platform = CollisionFilter::for_kind(RigidBodyType::Kinematic);

        assert!(!ground.should_collide(&wall));
        assert!(ground.should_collide(&ball));
        assert!(ground.should_collide(&platform));
        assert!(ball.should_collide(&platform));
    }
}
