use tracing::{debug, instrument, trace};

use crate::collision::manifold::{BodyHandle, CollisionEvent, CollisionInfo};
use crate::common::WorldConfig;
use crate::integration::integrator;
use crate::math::transform::Transform;
use crate::objects::collider::Collider;
use crate::objects::rigid_body::RigidBody;
use crate::world::solver::{DefaultSolver, RigidManifold, Solver};

/// Everything the world stores for one simulated object.
#[derive(Debug)]
pub struct Body {
    pub transform: Transform,
    pub rigidbody: RigidBody,
    pub collider: Collider,
}

impl Body {
    pub fn new(transform: Transform, rigidbody: RigidBody, collider: Collider) -> Self {
        Self {
            transform,
            rigidbody,
            collider,
        }
    }

    fn manifold(&mut self) -> RigidManifold<'_> {
        RigidManifold::new(&mut self.transform, &mut self.rigidbody, &mut self.collider)
    }
}

pub struct PhysicsWorld {
    bodies: Vec<Body>,
    solver: Box<dyn Solver>,
    pub config: WorldConfig,
    /// Contacts detected during the last step, oriented from the lower handle
    /// to the higher one.
    pub contacts: Vec<CollisionEvent>,
}

impl PhysicsWorld {
    /// Creates a new, empty physics world with default settings.
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            bodies: Vec::new(),
            solver: Box::new(DefaultSolver::new(config.solver)),
            config,
            contacts: Vec::new(),
        }
    }

    /// Replaces the contact solver.
    pub fn set_solver(&mut self, solver: Box<dyn Solver>) {
        self.solver = solver;
    }

    /// Adds a body to the world and returns its handle.
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len());
        self.bodies.push(body);
        handle
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.0)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.0)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Advances the simulation by one time step `dt`.
    #[instrument(skip(self))]
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }

        // 1. Apply gravity
        let gravity = self.config.gravity;
        for body in self.bodies.iter_mut().filter(|b| !b.rigidbody.is_static) {
            let weight = gravity * body.rigidbody.mass;
            body.rigidbody.apply_force(weight);
        }

        // 2. Integrate motion
        for body in self.bodies.iter_mut() {
            let inv_inertia = body.manifold().inv_inertia();
            integrator::integrate(&mut body.transform, &mut body.rigidbody, inv_inertia, dt);
        }

        // 3. Detect and resolve, pair by pair
        self.contacts.clear();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                self.collide_pair(i, j);
            }
        }
        debug!(contacts = self.contacts.len(), "step finished");
    }

    fn collide_pair(&mut self, i: usize, j: usize) {
        // Get mutable references using split_at_mut to satisfy the borrow checker
        let (head, tail) = self.bodies.split_at_mut(j);
        let a = &mut head[i];
        let b = &mut tail[0];

        if a.rigidbody.is_static && b.rigidbody.is_static {
            return;
        }
        if !a.collider.aabb(&a.transform).overlaps(&b.collider.aabb(&b.transform)) {
            return;
        }

        let infos = self
            .solver
            .detect(&a.transform, &mut a.collider, &b.transform, &mut b.collider);
        if infos.is_empty() {
            return;
        }
        trace!(i, j, pairs = infos.len(), "bodies collide");

        let resolve = !a.collider.is_trigger && !b.collider.is_trigger;
        let material = a.rigidbody.material.combine(&b.rigidbody.material);

        for info in infos {
            notify(a, BodyHandle(i), b, BodyHandle(j), &info);
            if resolve {
                self.solver
                    .solve(&info, &mut a.manifold(), &mut b.manifold(), material);
            }
            self.contacts.push(CollisionEvent {
                this: BodyHandle(i),
                other: BodyHandle(j),
                info,
            });
        }
    }
}

/// Tells both colliders' observers, each with the normal pointing away from it.
fn notify(a: &mut Body, handle_a: BodyHandle, b: &mut Body, handle_b: BodyHandle, info: &CollisionInfo) {
    if !a.collider.observers.is_empty() {
        a.collider.observers.notify(&CollisionEvent {
            this: handle_a,
            other: handle_b,
            info: info.clone(),
        });
    }
    if !b.collider.observers.is_empty() {
        let mut flipped = info.clone();
        flipped.normal = -flipped.normal;
        b.collider.observers.notify(&CollisionEvent {
            this: handle_b,
            other: handle_a,
            info: flipped,
        });
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
