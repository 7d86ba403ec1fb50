use crate::common::Material;
use crate::math::vec2::Vec2;

/// Mass and motion state of a body. Pose lives in the body's
/// [`Transform`](crate::math::Transform); shape lives in its collider.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub mass: f64,
    pub velocity: Vec2,
    /// Radians per second, counter-clockwise positive.
    pub angular_velocity: f64,

    // Accumulators for forces/torques applied during a time step
    pub force: Vec2,
    pub torque: f64,

    /// Static bodies have infinite mass: never moved, never accelerated.
    pub is_static: bool,
    /// Keeps the body's rotation fixed; contacts apply no angular impulse.
    pub lock_rotation: bool,
    pub material: Material,
}

impl RigidBody {
    /// Creates a dynamic body. A mass <= 0.0 creates a static body instead.
    pub fn new(mass: f64) -> Self {
        if mass <= 0.0 {
            return Self::new_static();
        }
        Self {
            mass,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            is_static: false,
            lock_rotation: false,
            material: Material::default(),
        }
    }

    pub fn new_static() -> Self {
        Self {
            mass: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            is_static: true,
            lock_rotation: false,
            material: Material::default(),
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_locked_rotation(mut self) -> Self {
        self.lock_rotation = true;
        self
    }

    /// 1.0 / mass, or 0.0 for static bodies.
    pub fn inv_mass(&self) -> f64 {
        if self.is_static || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Applies a force at the center of mass.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Applies a force at `point` (world coordinates) on a body whose center of
    /// mass is at `center`. This generates both linear force and torque.
    pub fn apply_force_at_point(&mut self, force: Vec2, point: Vec2, center: Vec2) {
        self.force += force;
        self.torque += (point - center).cross(force);
    }

    /// Should typically be called after integration in each simulation step.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }
}
