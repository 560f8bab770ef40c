//! Thin wrapper around the rapier pipeline: owns the solver state and exposes
//! the handful of operations the simulator needs.

pub mod conversions;

use std::num::NonZeroUsize;

use crate::bodies::BodyDescriptor;
use crate::collision::{CollisionFilter, ContactManifold};
use crate::core::SimulatorConfig;
use crate::error::PhysicsError;
use crate::math::{vector_from_array, Isometry3, Transform, Vector3};
use crate::Result;

use self::conversions::{body_builder, body_user_data, collider_body_id, manifold_from_pair};

use rapier3d::prelude::{
    ActiveCollisionTypes, CCDSolver, CoefficientCombineRule, ColliderBuilder, ColliderSet,
    DefaultBroadPhase, ImpulseJointSet, IntegrationParameters, IslandManager, MultibodyJointSet,
    NarrowPhase, PhysicsPipeline, RigidBodyHandle, RigidBodySet, SharedShape,
};

type BackendBody = rapier3d::prelude::RigidBody;

/// The solver world a simulator drives
pub struct PhysicsBackend {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    gravity: Vector3<f32>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsBackend {
    /// Creates an empty world configured from `config`
    pub fn new(config: &SimulatorConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.fixed_time_step;
        integration_parameters.num_solver_iterations =
            NonZeroUsize::new(config.solver_iterations).unwrap_or(NonZeroUsize::MIN);

        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            gravity: vector_from_array(config.gravity),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Inserts a body and its single collider, returning the body handle
    pub fn insert_body(
        &mut self,
        descriptor: &BodyDescriptor,
        shape: SharedShape,
        pose: &Transform,
        allow_sleeping: bool,
    ) -> RigidBodyHandle {
        let kind = descriptor.kind;
        let material = descriptor.material();

        let mut builder = body_builder(kind)
            .position(pose.to_isometry())
            .user_data(body_user_data(descriptor.id));
        if kind.is_dynamic() {
            builder = builder
                .linear_damping(material.linear_damping)
                .angular_damping(material.angular_damping)
                .can_sleep(allow_sleeping);
        }
        let handle = self.bodies.insert(builder.build());

        let mut collider = ColliderBuilder::new(shape)
            .restitution(material.restitution)
            .friction(material.friction)
            .restitution_combine_rule(CoefficientCombineRule::Multiply)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .collision_groups(CollisionFilter::for_kind(kind).to_interaction_groups())
            .sensor(descriptor.trigger)
            .user_data(body_user_data(descriptor.id));

        // Mass properties only come from the shape for dynamic bodies with a mass
        collider = if kind.is_dynamic() && descriptor.mass != 0.0 {
            collider.mass(descriptor.mass)
        } else {
            collider.density(0.0)
        };

        if descriptor.trigger {
            collider = collider.active_collision_types(
                ActiveCollisionTypes::default()
                    | ActiveCollisionTypes::KINEMATIC_FIXED
                    | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
            );
        }

        self.colliders
            .insert_with_parent(collider.build(), handle, &mut self.bodies);
        handle
    }

    /// Removes a body and its collider
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Advances the world by one fixed sub-step
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Clears accumulated user forces and torques on every body
    pub fn clear_forces(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.reset_forces(false);
            body.reset_torques(false);
        }
    }

    /// Fills `out` with the touching pairs of the last sub-step, sensor overlaps included
    pub fn collect_manifolds(&self, out: &mut Vec<ContactManifold>) {
        out.clear();
        out.extend(
            self.narrow_phase
                .contact_pairs()
                .filter_map(|pair| manifold_from_pair(&self.colliders, pair)),
        );

        for (collider_a, collider_b, intersecting) in self.narrow_phase.intersection_pairs() {
            if !intersecting {
                continue;
            }
            if let (Some(a), Some(b)) = (
                collider_body_id(&self.colliders, collider_a),
                collider_body_id(&self.colliders, collider_b),
            ) {
                out.push(ContactManifold::new(a, b, 1));
            }
        }
    }

    /// Returns the current gravity
    pub fn gravity(&self) -> Vector3<f32> {
        self.gravity
    }

    /// Replaces the gravity applied to dynamic bodies
    pub fn set_gravity(&mut self, gravity: Vector3<f32>) {
        self.gravity = gravity;
    }

    fn body(&self, handle: RigidBodyHandle) -> Result<&BackendBody> {
        self.bodies
            .get(handle)
            .ok_or_else(|| PhysicsError::InternalError(format!("backend body {:?} is missing", handle)))
    }

    fn body_mut(&mut self, handle: RigidBodyHandle) -> Result<&mut BackendBody> {
        self.bodies
            .get_mut(handle)
            .ok_or_else(|| PhysicsError::InternalError(format!("backend body {:?} is missing", handle)))
    }

    /// Returns the current pose of a body
    pub fn pose(&self, handle: RigidBodyHandle) -> Result<Transform> {
        Ok(Transform::from_isometry(self.body(handle)?.position()))
    }

    /// Returns whether a body is asleep
    pub fn is_sleeping(&self, handle: RigidBodyHandle) -> Result<bool> {
        Ok(self.body(handle)?.is_sleeping())
    }

    /// Returns a body's linear velocity
    pub fn linear_velocity(&self, handle: RigidBodyHandle) -> Result<Vector3<f32>> {
        Ok(*self.body(handle)?.linvel())
    }

    /// Applies an impulse at the center of mass and wakes the body
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vector3<f32>) -> Result<()> {
        self.body_mut(handle)?.apply_impulse(impulse, true);
        Ok(())
    }

    /// Accumulates a force at the center of mass until the next force reset
    pub fn add_force(&mut self, handle: RigidBodyHandle, force: Vector3<f32>) -> Result<()> {
        self.body_mut(handle)?.add_force(force, true);
        Ok(())
    }

    /// Moves a body to `pose` and wakes it, optionally zeroing its motion first
    pub fn teleport(&mut self, handle: RigidBodyHandle, pose: &Transform, clear_forces: bool) -> Result<()> {
        let body = self.body_mut(handle)?;
        let isometry = pose.to_isometry();

        if clear_forces {
            body.set_linvel(Vector3::zeros(), false);
            body.set_angvel(Vector3::zeros(), false);
            body.reset_forces(false);
            body.reset_torques(false);
        }

        body.set_position(isometry, true);
        if body.is_kinematic() {
            body.set_next_kinematic_position(isometry);
        }
        body.wake_up(true);
        Ok(())
    }

    /// Makes a body follow `pose` without waking it
    pub fn place(&mut self, handle: RigidBodyHandle, pose: &Isometry3<f32>) -> Result<()> {
        let body = self.body_mut(handle)?;
        if body.is_kinematic() {
            body.set_next_kinematic_position(*pose);
        } else {
            body.set_position(*pose, false);
        }
        Ok(())
    }
}
