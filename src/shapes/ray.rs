use crate::math::vec2::Vec2;

/// A ray with origin `pos` and direction `dir`.
///
/// Built from two endpoints the ray is a bounded segment (`dir = end - start`,
/// parameter range `[0, 1]`). `dir` is never required to be unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub pos: Vec2,
    pub dir: Vec2,
}

impl Ray {
    /// Segment from `a` to `b`.
    pub fn from_points(a: Vec2, b: Vec2) -> Self {
        Self { pos: a, dir: b - a }
    }

    pub fn from_origin_direction(pos: Vec2, dir: Vec2) -> Self {
        Self { pos, dir }
    }

    /// Point at parameter 1.
    pub fn end(&self) -> Vec2 {
        self.pos + self.dir
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f64) -> Vec2 {
        self.pos + self.dir * t
    }

    pub fn length(&self) -> f64 {
        self.dir.magnitude()
    }

    /// Projects `point` onto the segment, clamped to its endpoints.
    /// Returns the closest point and its parameter `t` in `[0, 1]`.
    pub fn project(&self, point: Vec2) -> (Vec2, f64) {
        let length_sq = self.dir.magnitude_squared();
        if length_sq < 1e-12 {
            // Degenerate segment, treat as a point
            return (self.pos, 0.0);
        }
        let t = ((point - self.pos).dot(self.dir) / length_sq).clamp(0.0, 1.0);
        (self.at(t), t)
    }

    /// Closest point on the bounded segment to `point`.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        self.project(point).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_ray_from_points() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        let ray = Ray::from_points(a, b);
        assert_eq!(ray.pos, a);
        assert_eq!(ray.dir, Vec2::new(3.0, 4.0));
        assert_eq!(ray.end(), b);
        assert!((ray.length() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_closest_point_interior() {
        let ray = Ray::from_points(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0));
        let (p, t) = ray.project(Vec2::new(1.0, 3.0));
        assert!((p.x - 1.0).abs() < EPSILON);
        assert!(p.y.abs() < EPSILON);
        assert!((t - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_closest_point_clamps_to_endpoints() {
        let ray = Ray::from_points(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0));
        assert_eq!(ray.closest_point(Vec2::new(-3.0, 1.0)), Vec2::new(0.0, 0.0));
        assert_eq!(ray.closest_point(Vec2::new(9.0, -1.0)), Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_closest_point_degenerate_segment() {
        let ray = Ray::from_points(Vec2::new(2.0, 2.0), Vec2::new(2.0, 2.0));
        assert_eq!(ray.closest_point(Vec2::new(5.0, 5.0)), Vec2::new(2.0, 2.0));
    }
}
