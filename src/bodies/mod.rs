mod rigid_body;
mod material;
mod body_type;
mod descriptor;

pub use self::rigid_body::{RigidBody, EntityFilter};
pub use self::material::Material;
pub use self::body_type::RigidBodyType;
pub use self::descriptor::BodyDescriptor;

/// Per-body collision flags, bit-compatible with body descriptors authored by the host
pub mod body_flags {
    use bitflags::bitflags;

    use crate::bodies::RigidBodyType;

    bitflags! {
        /// Flags controlling how the solver treats a body
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct CollisionFlags: u32 {
            /// Body never moves and has infinite mass
            const STATIC_OBJECT = 1;

            /// Body is moved by the host, not by the solver
            const KINEMATIC_OBJECT = 2;

            /// Body reports overlaps but never receives contact impulses (trigger)
            const NO_CONTACT_RESPONSE = 4;
        }
    }

    impl CollisionFlags {
        /// Returns the flags every body of the given type carries
        pub fn for_kind(kind: RigidBodyType) -> Self {
            match kind {
                RigidBodyType::Static => Self::STATIC_OBJECT,
                RigidBodyType::Dynamic => Self::empty(),
                RigidBodyType::Kinematic => Self::KINEMATIC_OBJECT,
            }
        }

        /// Returns whether these flags mark a trigger body
        pub fn is_trigger(self) -> bool {
            self.contains(Self::NO_CONTACT_RESPONSE)
        }
    }
}

/// Activation state codes exchanged with the host
pub mod activation {
    /// Body is awake and simulated
    pub const ACTIVE_TAG: u8 = 1;

    /// Body sleeps together with its island
    pub const ISLAND_SLEEPING: u8 = 2;

    /// Body is about to fall asleep
    pub const WANTS_DEACTIVATION: u8 = 3;

    /// Body never falls asleep
    pub const DISABLE_DEACTIVATION: u8 = 4;

    /// Body is excluded from simulation
    pub const DISABLE_SIMULATION: u8 = 5;
}
