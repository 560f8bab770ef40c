use crate::core::{BodyId, CallbackId};
use std::collections::BTreeMap;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Partner ids per observing body, ordered by observer id
pub type EventMap = BTreeMap<BodyId, Vec<BodyId>>;

/// Categories of collision lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEventType {
    /// A solid body touched a trigger for the first time
    TriggerEnter,

    /// A body stopped overlapping a trigger
    TriggerLeave,

    /// Two solid bodies started touching
    CollisionStart,

    /// Two solid bodies stopped touching
    CollisionEnd,
}

/// A host callback to invoke, produced by a trigger's enter/leave wiring
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct CallbackEvent {
    /// The callback identifier attached to the owner
    pub callback: CallbackId,

    /// The body owning the callback
    pub owner: BodyId,

    /// The body that entered or left
    pub partner: BodyId,
}

/// Collision events produced by one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepEvents {
    /// Trigger entries this frame
    pub trigger_enter: EventMap,

    /// Trigger departures this frame
    pub trigger_leave: EventMap,

    /// Solid contacts that began this frame
    pub collision_start: EventMap,

    /// Solid contacts that ended this frame
    pub collision_end: EventMap,

    /// Enter/leave callbacks whose entity filter matched
    pub callbacks: Vec<CallbackEvent>,
}

impl StepEvents {
    /// Creates a new empty event set
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the map holding events of the given type
    pub fn get(&self, event_type: CollisionEventType) -> &EventMap {
        match event_type {
            CollisionEventType::TriggerEnter => &self.trigger_enter,
            CollisionEventType::TriggerLeave => &self.trigger_leave,
            CollisionEventType::CollisionStart => &self.collision_start,
            CollisionEventType::CollisionEnd => &self.collision_end,
        }
    }

    fn get_mut(&mut self, event_type: CollisionEventType) -> &mut EventMap {
        match event_type {
            CollisionEventType::TriggerEnter => &mut self.trigger_enter,
            CollisionEventType::TriggerLeave => &mut self.trigger_leave,
            CollisionEventType::CollisionStart => &mut self.collision_start,
            CollisionEventType::CollisionEnd => &mut self.collision_end,
        }
    }

    /// Records that `owner` observed `partner` for the given event type
    pub fn register(&mut self, event_type: CollisionEventType, owner: BodyId, partner: BodyId) {
        self.get_mut(event_type).entry(owner).or_default().push(partner);
    }

    /// Records a callback invocation
    pub fn add_callback(&mut self, callback: &CallbackId, owner: BodyId, partner: BodyId) {
        self.callbacks.push(CallbackEvent {
            callback: callback.clone(),
            owner,
            partner,
        });
    }

    /// Returns whether `owner` observed `partner` for the given event type
    pub fn contains(&self, event_type: CollisionEventType, owner: BodyId, partner: BodyId) -> bool {
        self.get(event_type)
            .get(&owner)
            .map_or(false, |partners| partners.contains(&partner))
    }

    /// Returns the total number of partner entries recorded for the given event type
    pub fn count(&self, event_type: CollisionEventType) -> usize {
        self.get(event_type).values().map(Vec::len).sum()
    }

    /// Clears the categories that only describe this frame's new contacts
    pub fn clear_begin_events(&mut self) {
        self.trigger_enter.clear();
        self.collision_start.clear();
    }

    /// Clears the categories filled by the staleness pass
    pub fn clear_end_events(&mut self) {
        self.trigger_leave.clear();
        self.collision_end.clear();
    }

    /// Clears all events
    pub fn clear(&mut self) {
        self.clear_begin_events();
        self.clear_end_events();
        self.callbacks.clear();
    }

    /// Returns whether no event of any kind was recorded
    pub fn is_empty(&self) -> bool {
        self.trigger_enter.is_empty()
            && self.trigger_leave.is_empty()
            && self.collision_start.is_empty()
            && self.collision_end.is_empty()
            && self.callbacks.is_empty()
    }

    /// Flattens an event map into `(owner, partners)` pairs in owner order
    pub fn to_pairs(map: &EventMap) -> Vec<(BodyId, Vec<BodyId>)> {
        map.iter().map(|(owner, partners)| (*owner, partners.clone())).collect()
    }
}
