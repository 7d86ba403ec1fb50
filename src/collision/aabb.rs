// Defines an Axis-Aligned Bounding Box

use crate::math::vec2::Vec2;
use crate::shapes::circle::Circle;
use crate::shapes::polygon::ConvexPolygon;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Creates a new AABB from any two opposite corners.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        AABB {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        AABB::new(center - half, center + half)
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        AABB::new(min, min + size)
    }

    /// Creates an AABB that encompasses a set of points.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), &p| (min.min(p), max.max(p)));
        Some(AABB { min, max })
    }

    pub fn from_polygon(polygon: &ConvexPolygon) -> Self {
        // A constructed polygon always has at least three vertices.
        AABB::from_points(polygon.vertices()).unwrap_or(AABB {
            min: polygon.pos(),
            max: polygon.pos(),
        })
    }

    pub fn from_circle(circle: &Circle) -> Self {
        let r = Vec2::new(circle.radius, circle.radius);
        AABB::new(circle.pos - r, circle.pos + r)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Bottom-left corner (`min`).
    pub fn bl(&self) -> Vec2 {
        self.min
    }

    pub fn br(&self) -> Vec2 {
        Vec2::new(self.max.x, self.min.y)
    }

    /// Top-right corner (`max`).
    pub fn tr(&self) -> Vec2 {
        self.max
    }

    pub fn tl(&self) -> Vec2 {
        Vec2::new(self.min.x, self.max.y)
    }

    /// Corners in counter-clockwise order starting at `min`.
    pub fn corners(&self) -> [Vec2; 4] {
        [self.bl(), self.br(), self.tr(), self.tl()]
    }

    /// Checks if this AABB overlaps with another AABB. Touching boxes overlap.
    pub fn overlaps(&self, other: &AABB) -> bool {
        let x_overlap = self.max.x >= other.min.x && self.min.x <= other.max.x;
        let y_overlap = self.max.y >= other.min.y && self.min.y <= other.max.y;
        x_overlap && y_overlap
    }

    /// True if `other` lies entirely within this box, boundaries included.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }

    /// Half-open containment: the low edges are excluded and the high edges
    /// included, so a point on a shared edge of two adjacent boxes belongs to
    /// exactly one of them.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.min.x < point.x
            && point.x <= self.max.x
            && self.min.y < point.y
            && point.y <= self.max.y
    }

    /// Merges another AABB into this one, expanding this AABB to contain both.
    pub fn merge(&mut self, other: &AABB) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AABB {
        AABB::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0))
    }

    #[test]
    fn test_new_orders_corners() {
        let aabb = AABB::new(Vec2::new(3.0, -1.0), Vec2::new(1.0, 2.0));
        assert_eq!(aabb.min, Vec2::new(1.0, -1.0));
        assert_eq!(aabb.max, Vec2::new(3.0, 2.0));
    }

    #[test]
    fn test_constructors_agree() {
        let a = AABB::from_center_size(Vec2::new(1.0, 1.0), Vec2::new(2.0, 4.0));
        let b = AABB::from_min_size(Vec2::new(0.0, -1.0), Vec2::new(2.0, 4.0));
        assert_eq!(a, b);
        assert_eq!(a.center(), Vec2::new(1.0, 1.0));
        assert_eq!(a.size(), Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_from_points() {
        assert_eq!(AABB::from_points(&[]), None);
        let aabb = AABB::from_points(&[
            Vec2::new(1.0, 5.0),
            Vec2::new(-2.0, 3.0),
            Vec2::new(0.0, -1.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec2::new(-2.0, -1.0));
        assert_eq!(aabb.max, Vec2::new(1.0, 5.0));
    }

    #[test]
    fn test_from_circle() {
        let aabb = AABB::from_circle(&Circle::new(Vec2::new(2.0, 3.0), 1.5));
        assert_eq!(aabb.min, Vec2::new(0.5, 1.5));
        assert_eq!(aabb.max, Vec2::new(3.5, 4.5));
    }

    #[test]
    fn test_from_polygon() {
        let square = ConvexPolygon::from_points(&[
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(2.0, 3.0),
            Vec2::new(1.0, 3.0),
        ])
        .unwrap();
        let aabb = AABB::from_polygon(&square);
        assert_eq!(aabb.min, Vec2::new(1.0, 1.0));
        assert_eq!(aabb.max, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_corners() {
        let aabb = unit_box();
        assert_eq!(
            aabb.corners(),
            [
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_overlaps() {
        let a = unit_box();
        let b = AABB::new(Vec2::new(0.5, 0.5), Vec2::new(2.0, 2.0));
        let touching = AABB::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        let apart = AABB::new(Vec2::new(1.5, 0.0), Vec2::new(2.0, 1.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_contains_box() {
        let outer = AABB::new(Vec2::new(-1.0, -1.0), Vec2::new(2.0, 2.0));
        assert!(outer.contains(&unit_box()));
        assert!(outer.contains(&outer));
        assert!(!unit_box().contains(&outer));
    }

    #[test]
    fn test_contains_point_edge_rule() {
        let aabb = unit_box();
        assert!(aabb.contains_point(Vec2::new(0.5, 0.5)));
        // low edges are exclusive
        assert!(!aabb.contains_point(Vec2::new(0.0, 0.5)));
        assert!(!aabb.contains_point(Vec2::new(0.5, 0.0)));
        // high edges are inclusive
        assert!(aabb.contains_point(Vec2::new(1.0, 0.5)));
        assert!(aabb.contains_point(Vec2::new(0.5, 1.0)));
        assert!(aabb.contains_point(Vec2::new(1.0, 1.0)));
        assert!(!aabb.contains_point(Vec2::new(0.0, 1.0)));
        assert!(!aabb.contains_point(Vec2::new(1.5, 0.5)));
    }

    #[test]
    fn test_merge() {
        let mut a = unit_box();
        a.merge(&AABB::new(Vec2::new(-1.0, 0.5), Vec2::new(0.5, 3.0)));
        assert_eq!(a.min, Vec2::new(-1.0, 0.0));
        assert_eq!(a.max, Vec2::new(1.0, 3.0));
    }
}
