use std::time::Instant;

use log::{debug, trace, warn};

use crate::backend::PhysicsBackend;
use crate::bodies::activation;
use crate::bodies::{BodyDescriptor, RigidBody, RigidBodyType};
use crate::collision::{CollisionTracker, ContactManifold};
use crate::core::{BodyId, BodyRegistry, FixedTimestep, SimulatorConfig, StepEvents, TransformBuffer};
use crate::error::PhysicsError;
use crate::math::{vector_from_array, vector_to_array, Isometry3, Transform, Vector3, POSE_STRIDE};
use crate::protocol::{Request, Response, UpdatePayload};
use crate::shapes::create_shape;
use crate::Result;

/// Output of one caller-visible step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// The caller's buffer, updated with the poses of awake dynamic bodies
    pub transforms: TransformBuffer,

    /// Collision events derived from this step's contacts
    pub events: StepEvents,

    /// Number of fixed sub-steps that ran
    pub substeps: u32,
}

/// A physics world with its bodies, event state and fixed-step clock
pub struct Simulator {
    /// Configuration the simulator was created with
    config: SimulatorConfig,

    /// The solver world
    backend: PhysicsBackend,

    /// All bodies, keyed by caller id
    bodies: BodyRegistry,

    /// Collision lifecycle state
    tracker: CollisionTracker,

    /// Sub-step accumulator
    timestep: FixedTimestep,

    /// Events of the last step, reused between steps
    events: StepEvents,

    /// Contact scratch buffer, reused between steps
    manifolds: Vec<ContactManifold>,

    /// Wall-clock instant of the previous step
    last_step: Instant,
}

impl Simulator {
    /// Creates an empty simulator
    pub fn new(config: SimulatorConfig) -> Self {
        debug!(
            "Creating simulator: step {}s, max {} sub-steps, gravity {:?}",
            config.fixed_time_step, config.max_substeps, config.gravity
        );

        Self {
            backend: PhysicsBackend::new(&config),
            bodies: BodyRegistry::new(),
            tracker: CollisionTracker::new(),
            timestep: FixedTimestep::new(config.fixed_time_step, config.max_substeps),
            events: StepEvents::new(),
            manifolds: Vec::new(),
            last_step: Instant::now(),
            config,
        }
    }

    /// Returns the configuration
    pub fn get_config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Steps the world by the wall-clock time elapsed since the previous step
    pub fn step(&mut self, transforms: TransformBuffer) -> StepResult {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_step).as_secs_f32();
        self.last_step = now;
        self.advance(elapsed, transforms)
    }

    /// Steps the world by `elapsed` seconds of simulated time.
    ///
    /// Runs as many fixed sub-steps as fit in the accumulated time (bounded by
    /// `max_substeps`), clears user forces, writes the pose of every awake
    /// dynamic body into its slot and derives this step's collision events.
    pub fn advance(&mut self, elapsed: f32, mut transforms: TransformBuffer) -> StepResult {
        let substeps = self.timestep.consume(elapsed);
        let fixed_step = self.timestep.fixed_step();
        for _ in 0..substeps {
            self.backend.step(fixed_step);
        }
        self.backend.clear_forces();

        self.write_transforms(&mut transforms);

        self.backend.collect_manifolds(&mut self.manifolds);
        self.tracker.process(&self.manifolds, &self.bodies, &mut self.events);
        trace!(
            "Advanced {}s in {} sub-steps, {} touching pairs",
            elapsed,
            substeps,
            self.manifolds.len()
        );

        StepResult {
            transforms,
            events: self.events.clone(),
            substeps,
        }
    }

    fn write_transforms(&mut self, transforms: &mut TransformBuffer) {
        let needed = POSE_STRIDE * self.bodies.dynamic_count();
        if transforms.len() < needed {
            transforms.resize(needed, 0.0);
        }

        let mut mirrors: Vec<(BodyId, Isometry3<f32>)> = Vec::new();
        for (index, id) in self.bodies.dynamic_ids().iter().enumerate() {
            let Some(body) = self.bodies.get(*id) else {
                continue;
            };

            match awake_pose(&self.backend, body) {
                Ok(Some(pose)) => {
                    pose.write_to(transforms, index * POSE_STRIDE);
                    if let Some(linked) = body.linked_body_id() {
                        mirrors.push((linked, pose.to_isometry()));
                    }
                }
                Ok(None) => {}
                Err(err) => warn!("Could not read pose of body {}: {}", id, err),
            }
        }

        for (linked, pose) in mirrors {
            let Some(body) = self.bodies.get(linked) else {
                warn!("Linked body {} does not exist", linked);
                continue;
            };
            if let Err(err) = self.backend.place(body.handle(), &pose) {
                warn!("Could not move linked body {}: {}", linked, err);
            }
        }
    }

    /// Creates a body from its descriptor
    pub fn create_body(&mut self, descriptor: &BodyDescriptor) -> Result<BodyId> {
        let id = descriptor.id;
        if self.bodies.contains(id) && !self.config.replace_duplicate_ids {
            return Err(PhysicsError::DuplicateBody(id));
        }
        validate_material(descriptor)?;

        let pose = Transform::from_slice(&descriptor.transform, 0)?;
        let shape = create_shape(
            &descriptor.name,
            descriptor.shape,
            &descriptor.transform,
            descriptor.triangles.as_deref(),
        )?;

        if let Some(previous) = self.bodies.remove(id) {
            debug!("Replacing body {} ({})", id, previous.name());
            self.backend.remove_body(previous.handle());
            self.tracker.forget(id);
        }

        let handle = self
            .backend
            .insert_body(descriptor, shape, &pose, self.config.allow_sleeping);
        self.bodies.insert(RigidBody::from_descriptor(descriptor, handle));

        debug!(
            "Created {:?} {} body {} ({}){}",
            descriptor.kind,
            descriptor.shape.shape_type(),
            id,
            descriptor.name,
            if descriptor.trigger { " as trigger" } else { "" }
        );
        Ok(id)
    }

    /// Creates bodies in order, stopping at the first failing descriptor.
    ///
    /// Bodies created before the failure stay in the world.
    pub fn create_bodies(&mut self, descriptors: &[BodyDescriptor]) -> Result<Vec<BodyId>> {
        descriptors
            .iter()
            .map(|descriptor| self.create_body(descriptor))
            .collect()
    }

    /// Applies an impulse at a body's center of mass
    pub fn apply_central_impulse(&mut self, id: BodyId, impulse: [f32; 3]) -> Result<()> {
        let impulse = finite_vector("impulse", impulse)?;
        let handle = self.bodies.get_body(id)?.handle();
        self.backend.apply_impulse(handle, impulse)
    }

    /// Applies a force at a body's center of mass for the next step
    pub fn apply_central_force(&mut self, id: BodyId, force: [f32; 3]) -> Result<()> {
        let force = finite_vector("force", force)?;
        let handle = self.bodies.get_body(id)?.handle();
        self.backend.add_force(handle, force)
    }

    /// Moves a body to a new pose (`x y z qx qy qz qw`) and wakes it
    pub fn teleport(&mut self, id: BodyId, pose: &[f32], clear_forces: bool) -> Result<()> {
        let handle = self.bodies.get_body(id)?.handle();
        let pose = Transform::from_slice(pose, 0)?;
        self.backend.teleport(handle, &pose, clear_forces)
    }

    /// Teleports several bodies; nothing moves unless every id and pose is valid
    pub fn teleport_many(&mut self, ids: &[BodyId], poses: &[f32], clear_forces: bool) -> Result<()> {
        if poses.len() != POSE_STRIDE * ids.len() {
            return Err(PhysicsError::InvalidParameter(format!(
                "{} ids need {} pose values, got {}",
                ids.len(),
                POSE_STRIDE * ids.len(),
                poses.len()
            )));
        }

        let targets = ids
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let handle = self.bodies.get_body(*id)?.handle();
                Ok((handle, Transform::from_slice(poses, index * POSE_STRIDE)?))
            })
            .collect::<Result<Vec<_>>>()?;

        for (handle, pose) in &targets {
            self.backend.teleport(*handle, pose, clear_forces)?;
        }
        Ok(())
    }

    /// Replaces the world gravity
    pub fn set_gravity(&mut self, acceleration: [f32; 3]) -> Result<()> {
        let gravity = finite_vector("gravity", acceleration)?;
        debug!("Setting gravity to {:?}", acceleration);
        self.backend.set_gravity(gravity);
        Ok(())
    }

    /// Returns the world gravity
    pub fn get_gravity(&self) -> [f32; 3] {
        vector_to_array(&self.backend.gravity())
    }

    /// Returns the current pose of a body
    pub fn body_pose(&self, id: BodyId) -> Result<Transform> {
        self.backend.pose(self.bodies.get_body(id)?.handle())
    }

    /// Returns the linear velocity of a body
    pub fn linear_velocity(&self, id: BodyId) -> Result<Vector3<f32>> {
        self.backend.linear_velocity(self.bodies.get_body(id)?.handle())
    }

    /// Returns the activation state code of a body
    pub fn activation_state(&self, id: BodyId) -> Result<u8> {
        let body = self.bodies.get_body(id)?;
        let state = match body.get_body_type() {
            RigidBodyType::Static => activation::ISLAND_SLEEPING,
            RigidBodyType::Kinematic => activation::DISABLE_DEACTIVATION,
            RigidBodyType::Dynamic if !self.config.allow_sleeping => activation::DISABLE_DEACTIVATION,
            RigidBodyType::Dynamic => {
                if self.backend.is_sleeping(body.handle())? {
                    activation::ISLAND_SLEEPING
                } else {
                    activation::ACTIVE_TAG
                }
            }
        };
        Ok(state)
    }

    /// Gets a body by its id
    pub fn get_body(&self, id: BodyId) -> Result<&RigidBody> {
        self.bodies.get_body(id)
    }

    /// Returns the dynamic body ids in transform-slot order
    pub fn dynamic_ids(&self) -> &[BodyId] {
        self.bodies.dynamic_ids()
    }

    /// Returns the number of dynamic bodies
    pub fn dynamic_count(&self) -> usize {
        self.bodies.dynamic_count()
    }

    /// Returns the number of bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Returns whether `owner` currently tracks a contact with `partner`
    pub fn is_touching(&self, owner: BodyId, partner: BodyId) -> bool {
        self.tracker.is_touching(owner, partner)
    }

    /// Executes one request.
    ///
    /// Only `Init` and `Step` produce a response; the other requests are
    /// fire-and-forget and report failures through the returned error.
    pub fn handle(&mut self, request: Request) -> Result<Option<Response>> {
        match request {
            Request::Init => {
                self.timestep.reset();
                self.last_step = Instant::now();
                Ok(Some(Response::Ready))
            }
            Request::Step { transforms } => {
                let result = self.step(transforms);
                Ok(Some(Response::Update(UpdatePayload::from(result))))
            }
            Request::CreateBodies { bodies } => self.create_bodies(&bodies).map(|_| None),
            Request::ApplyCentralImpulse { id, impulse } => {
                self.apply_central_impulse(id, impulse).map(|_| None)
            }
            Request::ApplyCentralForce { id, force } => {
                self.apply_central_force(id, force).map(|_| None)
            }
            Request::Teleport { id, transform, clear_forces } => {
                self.teleport(id, &transform, clear_forces).map(|_| None)
            }
            Request::TeleportMany { ids, transforms, clear_forces } => {
                self.teleport_many(&ids, &transforms, clear_forces).map(|_| None)
            }
            Request::SetGravity { acceleration } => self.set_gravity(acceleration).map(|_| None),
            Request::Shutdown => Ok(None),
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

/// Returns the pose of a body, or `None` while it sleeps
fn awake_pose(backend: &PhysicsBackend, body: &RigidBody) -> Result<Option<Transform>> {
    if backend.is_sleeping(body.handle())? {
        return Ok(None);
    }
    backend.pose(body.handle()).map(Some)
}

fn finite_vector(what: &str, value: [f32; 3]) -> Result<Vector3<f32>> {
    if value.iter().all(|v| v.is_finite()) {
        Ok(vector_from_array(value))
    } else {
        Err(PhysicsError::InvalidParameter(format!("{} {:?} is not finite", what, value)))
    }
}

fn validate_material(descriptor: &BodyDescriptor) -> Result<()> {
    let values = [
        ("mass", descriptor.mass),
        ("restitution", descriptor.restitution),
        ("friction", descriptor.friction),
        ("linear damping", descriptor.linear_damping),
        ("angular damping", descriptor.angular_damping),
    ];
    for (what, value) in values {
        if !value.is_finite() || value < 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "body {}: {} {} must be a finite non-negative number",
                descriptor.id, what, value
            )));
        }
    }
    Ok(())
}
