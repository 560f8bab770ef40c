use crate::bodies::{body_flags::CollisionFlags, BodyDescriptor, RigidBodyType};
use crate::core::{BodyId, CallbackId};

use rapier3d::prelude::RigidBodyHandle;

/// Wildcard entity filter matching every partner name
pub const ANY_ENTITY: &str = "any";

/// Name predicate gating a body's enter/leave callbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityFilter {
    /// Matches every partner
    Any,

    /// Matches partners with exactly this name
    Name(String),
}

impl EntityFilter {
    /// Parses a wire filter tag, treating `"any"` as the wildcard
    pub fn parse(tag: &str) -> Self {
        if tag == ANY_ENTITY {
            Self::Any
        } else {
            Self::Name(tag.to_owned())
        }
    }

    /// Returns whether a partner with the given name passes the filter
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Name(expected) => expected == name,
        }
    }
}

/// A body known to the simulator: its identity, event wiring and backend handle
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Stable identifier
    id: BodyId,

    /// Logical tag (not unique)
    name: String,

    /// The body's type (dynamic, kinematic, or static)
    body_type: RigidBodyType,


    /// Collision flags fixed at creation
    flags: CollisionFlags,

    /// Body mirroring this body's pose every step
    linked_body_id: Option<BodyId>,

    /// Filter gating enter/leave callbacks
    entity_filter: Option<EntityFilter>,

    /// Callback fired on enter
    on_enter: Option<CallbackId>,

    /// Callback fired on leave
    on_leave: Option<CallbackId>,

    /// Handle of the body inside the physics backend
    handle: RigidBodyHandle,
}

impl RigidBody {
    /// Builds the record for a descriptor whose backend body was inserted under `handle`
    pub fn from_descriptor(descriptor: &BodyDescriptor, handle: RigidBodyHandle) -> Self {
        let mut flags = CollisionFlags::for_kind(descriptor.kind);
        if descriptor.trigger {
            flags.insert(CollisionFlags::NO_CONTACT_RESPONSE);
        }

        Self {
            id: descriptor.id,
            name: descriptor.name.clone(),
            body_type: descriptor.kind,
            flags,
            linked_body_id: descriptor.linked_body_id,
            entity_filter: descriptor.entity.as_deref().map(EntityFilter::parse),
            on_enter: descriptor.enter.clone(),
            on_leave: descriptor.leave.clone(),
            handle,
        }
    }

    /// Returns the body's id
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Returns the body's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the body's type
    pub fn get_body_type(&self) -> RigidBodyType {
        self.body_type
    }

    /// Returns the body's collision flags
    pub fn flags(&self) -> CollisionFlags {
        self.flags
    }

    /// Returns whether the body is a trigger volume
    pub fn is_trigger(&self) -> bool {
        self.flags.is_trigger()
    }

    /// Returns the id of the body mirroring this one
    pub fn linked_body_id(&self) -> Option<BodyId> {
        self.linked_body_id
    }

    /// Returns the backend handle
    pub fn handle(&self) -> RigidBodyHandle {
        self.handle
    }

    /// Returns the enter callback to fire for `partner`, if any
    pub fn enter_callback_for(&self, partner: &RigidBody) -> Option<&CallbackId> {
        self.callback_for(self.on_enter.as_ref(), partner)
    }

    /// Returns the leave callback to fire for `partner`, if any
    pub fn leave_callback_for(&self, partner: &RigidBody) -> Option<&CallbackId> {
        self.callback_for(self.on_leave.as_ref(), partner)
    }

    fn callback_for<'a>(&self, callback: Option<&'a CallbackId>, partner: &RigidBody) -> Option<&'a CallbackId> {
        let filter = self.entity_filter.as_ref()?;
        callback.filter(|_| filter.matches(&partner.name))
    }
}
