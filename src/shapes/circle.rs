use crate::math::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub pos: Vec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(pos: Vec2, radius: f64) -> Self {
        assert!(radius >= 0.0, "Circle radius cannot be negative");
        Self { pos, radius }
    }

    /// Closed containment test: points on the circumference are inside.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.distance(self.pos) <= self.radius
    }
}
