//! Containment and distance queries over polygon outlines.

use crate::math::vec2::Vec2;
use crate::shapes::polygon::ConvexPolygon;
use crate::shapes::ray::Ray;

/// Horizontal ray-crossing parity test. Works for any simple outline,
/// convex or not, in either winding.
pub fn point_in_polygon(point: Vec2, outline: &[Vec2]) -> bool {
    let n = outline.len();
    let mut inside = false;
    for i in 0..n {
        let a = outline[i];
        let b = outline[(i + 1) % n];
        if (a.y > point.y) != (b.y > point.y) {
            let x_at = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_at {
                inside = !inside;
            }
        }
    }
    inside
}

/// Closest point on the polygon's boundary to `point`, with its distance.
pub fn closest_point_on_polygon(point: Vec2, polygon: &ConvexPolygon) -> (Vec2, f64) {
    closest_point_on_outline(point, polygon.vertices())
}

pub fn closest_point_on_outline(point: Vec2, outline: &[Vec2]) -> (Vec2, f64) {
    let n = outline.len();
    let mut best = (outline.first().copied().unwrap_or(point), f64::INFINITY);
    for i in 0..n {
        let edge = Ray::from_points(outline[i], outline[(i + 1) % n]);
        let candidate = edge.closest_point(point);
        let distance = candidate.distance(point);
        if distance < best.1 {
            best = (candidate, distance);
        }
    }
    best
}
