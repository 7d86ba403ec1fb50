//! Contact resolution: positional correction followed by a single combined
//! normal + friction impulse per detected polygon pair.

use tracing::{debug, trace};

use crate::collision::manifold::CollisionInfo;
use crate::collision::narrow_phase::detect_polygons;
use crate::common::{CombinedMaterial, SolverConfig};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::objects::collider::Collider;
use crate::objects::rigid_body::RigidBody;

/// Borrowed view of one body's full kinematic state for a single contact.
pub struct RigidManifold<'a> {
    pub transform: &'a mut Transform,
    pub rigidbody: &'a mut RigidBody,
    pub collider: &'a mut Collider,
}

impl<'a> RigidManifold<'a> {
    pub fn new(
        transform: &'a mut Transform,
        rigidbody: &'a mut RigidBody,
        collider: &'a mut Collider,
    ) -> Self {
        Self {
            transform,
            rigidbody,
            collider,
        }
    }

    /// 0.0 for static or rotation-locked bodies and for shapes without area.
    pub fn inv_inertia(&mut self) -> f64 {
        if self.rigidbody.is_static || self.rigidbody.lock_rotation {
            return 0.0;
        }
        let inertia = self.collider.inertia(self.rigidbody.mass);
        if inertia > 0.0 {
            1.0 / inertia
        } else {
            0.0
        }
    }

    /// Velocity of the material point at `lever` from the center of mass.
    fn point_velocity(&self, lever: Vec2) -> Vec2 {
        let body = &*self.rigidbody;
        if body.is_static {
            return Vec2::ZERO;
        }
        if body.lock_rotation {
            return body.velocity;
        }
        body.velocity + lever.perpendicular() * body.angular_velocity
    }
}

/// Mass terms of one body as seen from the contact point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactTerms {
    pub inv_mass: f64,
    pub inv_inertia: f64,
    /// Lever arm from the center of mass to the contact, rotated a quarter turn.
    pub lever_perp: Vec2,
}

impl ContactTerms {
    fn angular(&self, direction: Vec2) -> f64 {
        let d = self.lever_perp.dot(direction);
        d * d * self.inv_inertia
    }
}

/// Inverse effective mass of the pair along `direction`.
fn inv_effective_mass(b1: &ContactTerms, b2: &ContactTerms, direction: Vec2) -> f64 {
    b1.inv_mass + b2.inv_mass + b1.angular(direction) + b2.angular(direction)
}

/// Impulse for one contact, computed before either body is moved.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Reaction {
    /// Impulse applied to body 2; body 1 receives its negation.
    impulse: Vec2,
    lever1: Vec2,
    lever2: Vec2,
    b1: ContactTerms,
    b2: ContactTerms,
}

pub trait Solver {
    /// Narrow-phase test of every polygon pair of the two colliders.
    /// Returns one entry per detected pair.
    fn detect(
        &self,
        transform1: &Transform,
        collider1: &mut Collider,
        transform2: &Transform,
        collider2: &mut Collider,
    ) -> Vec<CollisionInfo>;

    /// Resolves one contact. Does nothing if `info.detected` is false.
    fn solve(
        &self,
        info: &CollisionInfo,
        m1: &mut RigidManifold<'_>,
        m2: &mut RigidManifold<'_>,
        material: CombinedMaterial,
    );
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DefaultSolver {
    pub config: SolverConfig,
}

impl DefaultSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Pushes the bodies apart along the contact normal.
    ///
    /// A static body never moves. Against a static body the dynamic one takes
    /// the whole overlap; two dynamic bodies each move half of it, scaled by
    /// the response coefficient.
    pub fn handle_overlap(&self, info: &CollisionInfo, m1: &mut RigidManifold<'_>, m2: &mut RigidManifold<'_>) {
        if !info.detected {
            return;
        }
        let push = info.normal * info.overlap;
        match (m1.rigidbody.is_static, m2.rigidbody.is_static) {
            (true, true) => {}
            (false, true) => m1.transform.set_pos(m1.transform.pos() - push),
            (true, false) => m2.transform.set_pos(m2.transform.pos() + push),
            (false, false) => {
                let half = push * (0.5 * self.config.response_coefficient);
                m1.transform.set_pos(m1.transform.pos() - half);
                m2.transform.set_pos(m2.transform.pos() + half);
            }
        }
        trace!(overlap = info.overlap, "positional correction");
    }

    /// Computes and applies the contact impulse, measuring lever arms from the
    /// bodies' current positions.
    pub fn process_reaction(
        &self,
        info: &CollisionInfo,
        m1: &mut RigidManifold<'_>,
        m2: &mut RigidManifold<'_>,
        material: CombinedMaterial,
    ) {
        if let Some(reaction) = self.reaction(info, m1, m2, material) {
            apply_reaction(&reaction, m1, m2);
        }
    }

    /// `None` when nothing is detected or the bodies already separate.
    fn reaction(
        &self,
        info: &CollisionInfo,
        m1: &mut RigidManifold<'_>,
        m2: &mut RigidManifold<'_>,
        material: CombinedMaterial,
    ) -> Option<Reaction> {
        if !info.detected {
            return None;
        }
        let contact = info.contact_point()?;
        let normal = info.normal;

        let lever1 = contact - m1.transform.pos();
        let lever2 = contact - m2.transform.pos();
        let b1 = ContactTerms {
            inv_mass: m1.rigidbody.inv_mass(),
            inv_inertia: m1.inv_inertia(),
            lever_perp: lever1.perpendicular(),
        };
        let b2 = ContactTerms {
            inv_mass: m2.rigidbody.inv_mass(),
            inv_inertia: m2.inv_inertia(),
            lever_perp: lever2.perpendicular(),
        };

        let rel_vel = m2.point_velocity(lever2) - m1.point_velocity(lever1);
        if rel_vel.dot(normal) > 0.0 {
            trace!("bodies already separating");
            return None;
        }

        let j = self.reaction_impulse(&b1, &b2, material.restitution, rel_vel, normal);
        let friction = self.friction_impulse(
            &b1,
            &b2,
            material.static_friction,
            material.dynamic_friction,
            j,
            rel_vel,
            normal,
        );

        Some(Reaction {
            impulse: normal * j + friction,
            lever1,
            lever2,
            b1,
            b2,
        })
    }

    /// Normal impulse magnitude,
    /// `-(1 + e) * (v_rel . n) / (1/m1 + 1/m2 + (r1perp . n)^2 / I1 + (r2perp . n)^2 / I2)`.
    pub fn reaction_impulse(
        &self,
        b1: &ContactTerms,
        b2: &ContactTerms,
        restitution: f64,
        rel_vel: Vec2,
        normal: Vec2,
    ) -> f64 {
        let denom = inv_effective_mass(b1, b2, normal);
        if denom <= 0.0 {
            return 0.0;
        }
        let j = -(1.0 + restitution) * rel_vel.dot(normal) / denom;
        trace!(j, "normal impulse");
        j
    }

    /// Coulomb friction impulse for body 2, opposing the tangential relative
    /// velocity. Zero below the configured friction threshold.
    #[allow(clippy::too_many_arguments)]
    pub fn friction_impulse(
        &self,
        b1: &ContactTerms,
        b2: &ContactTerms,
        static_friction: f64,
        dynamic_friction: f64,
        j: f64,
        rel_vel: Vec2,
        normal: Vec2,
    ) -> Vec2 {
        let tangent = rel_vel - normal * rel_vel.dot(normal);
        if tangent.magnitude() < self.config.friction_threshold {
            return Vec2::ZERO;
        }
        let Some(tangent) = tangent.try_normalize() else {
            return Vec2::ZERO;
        };

        let denom = inv_effective_mass(b1, b2, tangent);
        if denom <= 0.0 {
            return Vec2::ZERO;
        }
        let jt = -rel_vel.dot(tangent) / denom;

        if jt.abs() <= (j * static_friction).abs() {
            debug!(jt, "static friction");
            tangent * jt
        } else {
            debug!(jt, "dynamic friction");
            tangent * (-j * dynamic_friction)
        }
    }
}

fn apply_reaction(reaction: &Reaction, m1: &mut RigidManifold<'_>, m2: &mut RigidManifold<'_>) {
    let impulse = reaction.impulse;

    let rb1 = &mut *m1.rigidbody;
    rb1.velocity -= impulse * reaction.b1.inv_mass;
    rb1.angular_velocity -= reaction.lever1.cross(impulse) * reaction.b1.inv_inertia;

    let rb2 = &mut *m2.rigidbody;
    rb2.velocity += impulse * reaction.b2.inv_mass;
    rb2.angular_velocity += reaction.lever2.cross(impulse) * reaction.b2.inv_inertia;
}

impl Solver for DefaultSolver {
    fn detect(
        &self,
        transform1: &Transform,
        collider1: &mut Collider,
        transform2: &Transform,
        collider2: &mut Collider,
    ) -> Vec<CollisionInfo> {
        let shape1 = collider1.polygons(transform1);
        let shape2 = collider2.polygons(transform2);
        detect_polygons(shape1, shape2)
    }

    /// Positional correction, then the impulse. Lever arms are taken from
    /// the corrected positions.
    fn solve(
        &self,
        info: &CollisionInfo,
        m1: &mut RigidManifold<'_>,
        m2: &mut RigidManifold<'_>,
        material: CombinedMaterial,
    ) {
        if !info.detected {
            return;
        }
        self.handle_overlap(info, m1, m2);
        self.process_reaction(info, m1, m2, material);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::aabb::AABB;
    use crate::common::Material;
    use crate::shapes::polygon::ConvexPolygon;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    struct TestBody {
        transform: Transform,
        rigidbody: RigidBody,
        collider: Collider,
    }

    impl TestBody {
        fn square(center: Vec2, rigidbody: RigidBody) -> Self {
            let polygon = ConvexPolygon::from_aabb(&AABB::from_center_size(Vec2::ZERO, Vec2::new(1.0, 1.0)));
            Self {
                transform: Transform::new(center, 0.0),
                rigidbody,
                collider: Collider::from(polygon),
            }
        }

        fn manifold(&mut self) -> RigidManifold<'_> {
            RigidManifold::new(&mut self.transform, &mut self.rigidbody, &mut self.collider)
        }
    }

    fn head_on_info() -> CollisionInfo {
        CollisionInfo {
            detected: true,
            normal: Vec2::RIGHT,
            contact_points: vec![Vec2::new(0.5, 0.5), Vec2::new(0.5, -0.5)],
            overlap: 0.2,
        }
    }

    fn elastic() -> CombinedMaterial {
        Material::new(1.0, 0.0, 0.0).combine(&Material::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn test_handle_overlap_static_never_moves() {
        let solver = DefaultSolver::default();
        let info = head_on_info();

        let mut a = TestBody::square(Vec2::ZERO, RigidBody::new_static());
        let mut b = TestBody::square(Vec2::new(0.8, 0.0), RigidBody::new(1.0));
        solver.handle_overlap(&info, &mut a.manifold(), &mut b.manifold());
        assert_eq!(a.transform.pos(), Vec2::ZERO);
        assert_relative_eq!(b.transform.pos().x, 1.0, epsilon = EPSILON);

        let mut a = TestBody::square(Vec2::ZERO, RigidBody::new(1.0));
        let mut b = TestBody::square(Vec2::new(0.8, 0.0), RigidBody::new_static());
        solver.handle_overlap(&info, &mut a.manifold(), &mut b.manifold());
        assert_relative_eq!(a.transform.pos().x, -0.2, epsilon = EPSILON);
        assert_eq!(b.transform.pos(), Vec2::new(0.8, 0.0));
    }

    #[test]
    fn test_handle_overlap_splits_between_dynamic_bodies() {
        let solver = DefaultSolver::default();
        let mut a = TestBody::square(Vec2::ZERO, RigidBody::new(1.0));
        let mut b = TestBody::square(Vec2::new(0.8, 0.0), RigidBody::new(1.0));
        solver.handle_overlap(&head_on_info(), &mut a.manifold(), &mut b.manifold());
        // each moves 0.2 * 0.5 * 0.9
        assert_relative_eq!(a.transform.pos().x, -0.09, epsilon = EPSILON);
        assert_relative_eq!(b.transform.pos().x, 0.89, epsilon = EPSILON);
    }

    #[test]
    fn test_solve_ignores_undetected() {
        let solver = DefaultSolver::default();
        let mut a = TestBody::square(Vec2::ZERO, RigidBody::new(1.0).with_velocity(Vec2::RIGHT));
        let mut b = TestBody::square(Vec2::new(0.8, 0.0), RigidBody::new(1.0));
        solver.solve(&CollisionInfo::none(), &mut a.manifold(), &mut b.manifold(), elastic());
        assert_eq!(a.transform.pos(), Vec2::ZERO);
        assert_eq!(a.rigidbody.velocity, Vec2::RIGHT);
    }

    #[test]
    fn test_elastic_head_on_swaps_velocities() {
        let solver = DefaultSolver::default();
        let mut a = TestBody::square(Vec2::ZERO, RigidBody::new(1.0).with_velocity(Vec2::new(2.0, 0.0)));
        let mut b = TestBody::square(Vec2::new(0.8, 0.0), RigidBody::new(1.0).with_velocity(Vec2::new(-1.0, 0.0)));
        solver.solve(&head_on_info(), &mut a.manifold(), &mut b.manifold(), elastic());

        assert_relative_eq!(a.rigidbody.velocity.x, -1.0, epsilon = EPSILON);
        assert_relative_eq!(b.rigidbody.velocity.x, 2.0, epsilon = EPSILON);
        assert_relative_eq!(a.rigidbody.velocity.y, 0.0, epsilon = EPSILON);
        // contact on the line of centers: no spin
        assert_relative_eq!(a.rigidbody.angular_velocity, 0.0, epsilon = EPSILON);
        assert_relative_eq!(b.rigidbody.angular_velocity, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_inelastic_against_static_stops_normal_motion() {
        let solver = DefaultSolver::default();
        let material = Material::new(0.0, 0.0, 0.0).combine(&Material::new(0.0, 0.0, 0.0));
        let mut a = TestBody::square(Vec2::ZERO, RigidBody::new(2.0).with_velocity(Vec2::new(3.0, 0.0)));
        let mut wall = TestBody::square(Vec2::new(0.8, 0.0), RigidBody::new_static());
        solver.solve(&head_on_info(), &mut a.manifold(), &mut wall.manifold(), material);

        assert_relative_eq!(a.rigidbody.velocity.x, 0.0, epsilon = EPSILON);
        assert_eq!(wall.rigidbody.velocity, Vec2::ZERO);
        assert_eq!(wall.transform.pos(), Vec2::new(0.8, 0.0));
    }

    #[test]
    fn test_separating_bodies_get_no_impulse() {
        let solver = DefaultSolver::default();
        let mut a = TestBody::square(Vec2::ZERO, RigidBody::new(1.0).with_velocity(Vec2::new(-1.0, 0.0)));
        let mut b = TestBody::square(Vec2::new(0.8, 0.0), RigidBody::new(1.0).with_velocity(Vec2::new(1.0, 0.0)));
        solver.process_reaction(&head_on_info(), &mut a.manifold(), &mut b.manifold(), elastic());
        assert_eq!(a.rigidbody.velocity, Vec2::new(-1.0, 0.0));
        assert_eq!(b.rigidbody.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_off_center_contact_spins_bodies() {
        let solver = DefaultSolver::default();
        let info = CollisionInfo {
            detected: true,
            normal: Vec2::RIGHT,
            contact_points: vec![Vec2::new(0.5, 0.4)],
            overlap: 0.0,
        };
        let mut a = TestBody::square(Vec2::ZERO, RigidBody::new(1.0).with_velocity(Vec2::new(1.0, 0.0)));
        let mut b = TestBody::square(Vec2::new(1.0, 0.0), RigidBody::new(1.0));
        solver.solve(&info, &mut a.manifold(), &mut b.manifold(), elastic());

        // hit above its center from the left, b spins clockwise
        assert!(b.rigidbody.angular_velocity < 0.0);
        // a is pushed back at a point above its center, so it spins the other way
        assert!(a.rigidbody.angular_velocity > 0.0);
        // linear momentum is conserved
        let p = a.rigidbody.velocity + b.rigidbody.velocity;
        assert_relative_eq!(p.x, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_solve_measures_friction_after_correction() {
        let solver = DefaultSolver::default();
        let info = CollisionInfo {
            detected: true,
            normal: Vec2::UP,
            contact_points: vec![Vec2::new(-0.5, 0.5), Vec2::new(0.5, 0.5)],
            overlap: 0.2,
        };
        let material = Material::new(0.0, 0.6, 0.4).combine(&Material::new(0.0, 0.6, 0.4));
        let sliding = || RigidBody::new(1.0).with_velocity(Vec2::new(2.0, -1.0));

        let mut ground = TestBody::square(Vec2::ZERO, RigidBody::new_static());
        let mut block = TestBody::square(Vec2::new(0.0, 0.8), sliding());
        solver.solve(&info, &mut ground.manifold(), &mut block.manifold(), material);

        let mut ground_ref = TestBody::square(Vec2::ZERO, RigidBody::new_static());
        let mut block_ref = TestBody::square(Vec2::new(0.0, 0.8), sliding());
        solver.handle_overlap(&info, &mut ground_ref.manifold(), &mut block_ref.manifold());
        solver.process_reaction(&info, &mut ground_ref.manifold(), &mut block_ref.manifold(), material);

        assert_relative_eq!(block.transform.pos().y, 1.0, epsilon = EPSILON);
        assert_eq!(block.transform, block_ref.transform);
        assert_eq!(block.rigidbody.velocity, block_ref.rigidbody.velocity);
        assert_eq!(block.rigidbody.angular_velocity, block_ref.rigidbody.angular_velocity);
        // friction acted on the slide
        assert!(block.rigidbody.velocity.x < 2.0);
        assert!(block.rigidbody.angular_velocity != 0.0);
    }

    #[test]
    fn test_locked_rotation_gets_no_spin() {
        let solver = DefaultSolver::default();
        let info = CollisionInfo {
            detected: true,
            normal: Vec2::RIGHT,
            contact_points: vec![Vec2::new(0.5, 0.4)],
            overlap: 0.0,
        };
        let mut a = TestBody::square(Vec2::ZERO, RigidBody::new(1.0).with_velocity(Vec2::new(1.0, 0.0)));
        let mut b = TestBody::square(Vec2::new(1.0, 0.0), RigidBody::new(1.0).with_locked_rotation());
        solver.solve(&info, &mut a.manifold(), &mut b.manifold(), elastic());
        assert_eq!(b.rigidbody.angular_velocity, 0.0);
        assert!(b.rigidbody.velocity.x > 0.0);
    }

    #[test]
    fn test_friction_static_branch_cancels_sliding() {
        let solver = DefaultSolver::default();
        let terms = ContactTerms {
            inv_mass: 1.0,
            inv_inertia: 0.0,
            lever_perp: Vec2::ZERO,
        };
        // normal closing speed 2, tangential slip 0.5 along +y
        let rel_vel = Vec2::new(-2.0, 0.5);
        let j = solver.reaction_impulse(&terms, &terms, 0.0, rel_vel, Vec2::RIGHT);
        assert_relative_eq!(j, 1.0, epsilon = EPSILON);

        let friction = solver.friction_impulse(&terms, &terms, 1.0, 0.5, j, rel_vel, Vec2::RIGHT);
        // jt = -0.5 / 2 = -0.25, within j * static_friction
        assert_relative_eq!(friction.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(friction.y, -0.25, epsilon = EPSILON);
    }

    #[test]
    fn test_friction_dynamic_branch() {
        let solver = DefaultSolver::default();
        let terms = ContactTerms {
            inv_mass: 1.0,
            inv_inertia: 0.0,
            lever_perp: Vec2::ZERO,
        };
        let rel_vel = Vec2::new(-2.0, 4.0);
        let friction = solver.friction_impulse(&terms, &terms, 0.1, 0.05, 1.0, rel_vel, Vec2::RIGHT);
        // |jt| = 2 exceeds 0.1, so the dynamic coefficient applies
        assert_relative_eq!(friction.y, -0.05, epsilon = EPSILON);
    }

    #[test]
    fn test_friction_below_threshold() {
        let solver = DefaultSolver::default();
        let terms = ContactTerms {
            inv_mass: 1.0,
            inv_inertia: 0.0,
            lever_perp: Vec2::ZERO,
        };
        let friction = solver.friction_impulse(&terms, &terms, 1.0, 1.0, 1.0, Vec2::new(-1.0, 0.005), Vec2::RIGHT);
        assert_eq!(friction, Vec2::ZERO);
    }

    #[test]
    fn test_detect_through_colliders() {
        let solver = DefaultSolver::default();
        let mut a = TestBody::square(Vec2::ZERO, RigidBody::new(1.0));
        let mut b = TestBody::square(Vec2::new(0.5, 0.0), RigidBody::new(1.0));
        let infos = solver.detect(&a.transform, &mut a.collider, &b.transform, &mut b.collider);
        assert_eq!(infos.len(), 1);
        assert_relative_eq!(infos[0].overlap, 0.5, epsilon = EPSILON);
        assert_relative_eq!(infos[0].normal.x, 1.0, epsilon = EPSILON);

        b.transform.set_pos(Vec2::new(3.0, 0.0));
        assert!(solver
            .detect(&a.transform, &mut a.collider, &b.transform, &mut b.collider)
            .is_empty());
    }
}
