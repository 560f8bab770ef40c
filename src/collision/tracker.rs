use std::collections::{HashMap, HashSet};

use log::warn;

use crate::bodies::RigidBody;
use crate::collision::ContactManifold;
use crate::core::events::CollisionEventType;
use crate::core::{BodyId, BodyRegistry, StepEvents};

type PartnerMap = HashMap<BodyId, HashSet<BodyId>>;

/// Turns per-step contact manifolds into collision lifecycle events.
///
/// Every pairing is stored once per side, so `(a, b)` and `(b, a)` have their
/// own lifetime. The persistent map survives between steps; the frame map only
/// holds what this step's manifolds reported and is diffed against the former
/// to find pairings that ended.
#[derive(Debug, Default)]
pub struct CollisionTracker {
    /// Pairings alive across steps
    collisions: PartnerMap,

    /// Pairings reported by the current step
    frame_collisions: PartnerMap,

    /// Emptied partner sets kept for reuse
    spare_sets: Vec<HashSet<BodyId>>,

    /// Scratch list of pairings that ended this step
    stale: Vec<(BodyId, BodyId)>,
}

impl CollisionTracker {
    /// Creates a tracker with no recorded pairings
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one step's manifolds, replacing the contents of `events`
    pub fn process(&mut self, manifolds: &[ContactManifold], bodies: &BodyRegistry, events: &mut StepEvents) {
        events.callbacks.clear();
        self.check_for_collisions(manifolds, bodies, events);
        self.clean_old_collisions(bodies, events);
    }

    fn check_for_collisions(&mut self, manifolds: &[ContactManifold], bodies: &BodyRegistry, events: &mut StepEvents) {
        for partners in self.frame_collisions.values_mut() {
            partners.clear();
        }
        events.clear_begin_events();

        for manifold in manifolds.iter().filter(|m| m.is_touching()) {
            let (a, b) = match (bodies.get(manifold.body_a), bodies.get(manifold.body_b)) {
                (Some(a), Some(b)) => (a, b),
                _ => {
                    warn!(
                        "Skipping contact between unknown bodies {} and {}",
                        manifold.body_a, manifold.body_b
                    );
                    continue;
                }
            };
            if a.id() == b.id() {
                continue;
            }

            if a.is_trigger() || b.is_trigger() {
                self.observe_trigger(a, b, events);
                self.observe_trigger(b, a, events);
            } else {
                if self.store_collision(a.id(), b.id()) {
                    events.register(CollisionEventType::CollisionStart, a.id(), b.id());
                }
                if self.store_collision(b.id(), a.id()) {
                    events.register(CollisionEventType::CollisionStart, b.id(), a.id());
                }
            }
        }
    }

    /// Records `observer` seeing `partner` in a pairing that involves a trigger
    fn observe_trigger(&mut self, observer: &RigidBody, partner: &RigidBody, events: &mut StepEvents) {
        let is_new = self.store_collision(observer.id(), partner.id());
        if !is_new || partner.is_trigger() {
            return;
        }

        events.register(CollisionEventType::TriggerEnter, observer.id(), partner.id());
        if let Some(callback) = observer.enter_callback_for(partner) {
            events.add_callback(callback, observer.id(), partner.id());
        }
    }

    fn clean_old_collisions(&mut self, bodies: &BodyRegistry, events: &mut StepEvents) {
        events.clear_end_events();

        let mut stale = std::mem::take(&mut self.stale);
        stale.clear();
        for (owner, partners) in &self.collisions {
            let seen = self.frame_collisions.get(owner);
            stale.extend(
                partners
                    .iter()
                    .filter(|partner| !seen.map_or(false, |set| set.contains(*partner)))
                    .map(|partner| (*owner, *partner)),
            );
        }
        stale.sort_unstable();

        for &(owner_id, partner_id) in &stale {
            self.remove_pairing(owner_id, partner_id);

            let Some(owner) = bodies.get(owner_id) else {
                continue;
            };
            let partner = bodies.get(partner_id);

            if owner.is_trigger() {
                events.register(CollisionEventType::TriggerLeave, owner_id, partner_id);
                if let Some(callback) = partner.and_then(|p| owner.leave_callback_for(p)) {
                    events.add_callback(callback, owner_id, partner_id);
                }
            } else if partner.map_or(false, |p| !p.is_trigger()) {
                events.register(CollisionEventType::CollisionEnd, owner_id, partner_id);
            }
        }

        self.stale = stale;
    }

    /// Records a pairing in both the persistent and the frame state.
    ///
    /// Returns `true` when the pairing was not already persistent.
    pub fn store_collision(&mut self, owner: BodyId, partner: BodyId) -> bool {
        self.frame_collisions.entry(owner).or_default().insert(partner);

        let spare_sets = &mut self.spare_sets;
        self.collisions
            .entry(owner)
            .or_insert_with(|| spare_sets.pop().unwrap_or_default())
            .insert(partner)
    }

    fn remove_pairing(&mut self, owner: BodyId, partner: BodyId) {
        let now_empty = match self.collisions.get_mut(&owner) {
            Some(partners) => {
                partners.remove(&partner);
                partners.is_empty()
            }
            None => false,
        };

        if now_empty {
            if let Some(set) = self.collisions.remove(&owner) {
                self.spare_sets.push(set);
            }
        }
    }

    /// Returns whether `owner` currently tracks `partner`
    pub fn is_touching(&self, owner: BodyId, partner: BodyId) -> bool {
        self.collisions
            .get(&owner)
            .map_or(false, |partners| partners.contains(&partner))
    }

    /// Returns the partners currently tracked for `owner`, sorted by id
    pub fn partners(&self, owner: BodyId) -> Vec<BodyId> {
        let mut partners: Vec<BodyId> = self
            .collisions
            .get(&owner)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        partners.sort_unstable();
        partners
    }

    /// Returns the number of owners with at least one tracked partner
    pub fn tracked_owners(&self) -> usize {
        self.collisions.len()
    }

    /// Drops every pairing involving `id` without emitting events
    pub fn forget(&mut self, id: BodyId) {
        if let Some(mut set) = self.collisions.remove(&id) {
            set.clear();
            self.spare_sets.push(set);
        }
        self.frame_collisions.remove(&id);

        let mut emptied = Vec::new();
        for (owner, partners) in self.collisions.iter_mut() {
            if partners.remove(&id) && partners.is_empty() {
                emptied.push(*owner);
            }
        }
        for owner in emptied {
            if let Some(set) = self.collisions.remove(&owner) {
                self.spare_sets.push(set);
            }
        }
        for partners in self.frame_collisions.values_mut() {
            partners.remove(&id);
        }
    }
}
