use crate::core::BodyId;

/// Per-pair contact record reported by the backend for one step.
///
/// Only the participants and the number of contact points matter to the
/// event engine; a manifold with zero points is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactManifold {
    /// The first body in the pair
    pub body_a: BodyId,

    /// The second body in the pair
    pub body_b: BodyId,

    /// Number of contact points currently in the manifold
    pub num_contacts: usize,
}

impl ContactManifold {
    /// Creates a new manifold record
    pub fn new(body_a: BodyId, body_b: BodyId, num_contacts: usize) -> Self {
        Self {
            body_a,
            body_b,
            num_contacts,
        }
    }

    /// Returns whether the manifold holds at least one contact point
    pub fn is_touching(&self) -> bool {
        self.num_contacts > 0
    }
}
