use crate::math::transform::Transform;
use crate::objects::rigid_body::RigidBody;

/// Integrates the body's state forward in time using Semi-Implicit Euler.
///
/// `inv_inertia` comes from the body's collider; pass 0.0 for a body that
/// should not spin up from torque.
pub fn integrate(transform: &mut Transform, body: &mut RigidBody, inv_inertia: f64, dt: f64) {
    if body.is_static {
        // Static object, do not integrate
        body.clear_accumulators();
        return;
    }

    // --- Linear Motion --- //
    let linear_acceleration = body.force * body.inv_mass();
    body.velocity += linear_acceleration * dt;
    transform.set_pos(transform.pos() + body.velocity * dt);

    // --- Angular Motion --- //
    if body.lock_rotation {
        body.angular_velocity = 0.0;
    } else {
        let angular_acceleration = body.torque * inv_inertia;
        body.angular_velocity += angular_acceleration * dt;
        transform.set_rot(wrap_angle(transform.rot() + body.angular_velocity * dt));
    }

    body.clear_accumulators();
}

/// Wraps an angle in radians to the range [-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_integrate_linear_motion_no_force() {
        let mut transform = Transform::identity();
        let mut rb = RigidBody::new(1.0).with_velocity(Vec2::new(10.0, -5.0));

        integrate(&mut transform, &mut rb, 0.0, 0.1);

        assert!((transform.pos().x - 1.0).abs() < EPSILON);
        assert!((transform.pos().y - -0.5).abs() < EPSILON);
        assert_eq!(rb.velocity, Vec2::new(10.0, -5.0)); // Velocity unchanged
        assert_eq!(rb.force, Vec2::ZERO);
    }

    #[test]
    fn test_integrate_linear_motion_constant_force() {
        let mut transform = Transform::identity();
        let mut rb = RigidBody::new(2.0);
        rb.apply_force(Vec2::new(10.0, 0.0)); // a = F/m = (5, 0)

        integrate(&mut transform, &mut rb, 0.0, 0.1);

        // v = v0 + a*dt = (0.5, 0)
        assert!((rb.velocity.x - 0.5).abs() < EPSILON);
        // p = p0 + v*dt = (0.05, 0)
        assert!((transform.pos().x - 0.05).abs() < EPSILON);
        assert_eq!(rb.force, Vec2::ZERO); // Force cleared
    }

    #[test]
    fn test_integrate_angular_motion_constant_torque() {
        let mut transform = Transform::identity();
        let mut rb = RigidBody::new(1.0);
        rb.torque = 5.0;
        let inertia = 0.5;
        let dt = 0.1;

        integrate(&mut transform, &mut rb, 1.0 / inertia, dt);

        let alpha = 5.0 / inertia;
        assert!((rb.angular_velocity - alpha * dt).abs() < EPSILON);
        assert!((transform.rot() - alpha * dt * dt).abs() < EPSILON);
        assert_eq!(rb.torque, 0.0); // Torque cleared
    }

    #[test]
    fn test_integrate_locked_rotation() {
        let mut transform = Transform::new(Vec2::ZERO, 0.3);
        let mut rb = RigidBody::new(1.0).with_locked_rotation();
        rb.angular_velocity = 2.0;
        rb.torque = 5.0;

        integrate(&mut transform, &mut rb, 1.0, 0.1);

        assert_eq!(transform.rot(), 0.3);
        assert_eq!(rb.angular_velocity, 0.0);
    }

    #[test]
    fn test_integrate_static_object() {
        let mut transform = Transform::new(Vec2::new(1.0, 1.0), 1.0);
        let mut rb = RigidBody::new_static();
        rb.velocity = Vec2::new(1.0, 1.0);
        rb.angular_velocity = 1.0;
        rb.force = Vec2::new(10.0, 10.0);

        integrate(&mut transform, &mut rb, 0.0, 0.1);

        assert_eq!(transform, Transform::new(Vec2::new(1.0, 1.0), 1.0));
        assert_eq!(rb.velocity, Vec2::new(1.0, 1.0));
        assert_eq!(rb.force, Vec2::ZERO);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(0.0) - 0.0).abs() < EPSILON);
        assert!((wrap_angle(PI) - PI).abs() < EPSILON);
        assert!((wrap_angle(-PI) - -PI).abs() < EPSILON); // Should stay -PI, not wrap to PI
        assert!((wrap_angle(PI + 0.1) - (-PI + 0.1)).abs() < EPSILON);
        assert!((wrap_angle(-PI - 0.1) - (PI - 0.1)).abs() < EPSILON);
        assert!((wrap_angle(2.0 * PI) - 0.0).abs() < EPSILON);
    }
}
