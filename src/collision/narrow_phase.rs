use tracing::trace;

use crate::collision::contact_points::find_contact_points;
use crate::collision::intersection::intersect_polygon_polygon;
use crate::collision::manifold::CollisionInfo;
use crate::shapes::polygon::ConvexPolygon;

/// SAT followed by contact point generation for one polygon pair.
///
/// A SAT overlap whose boundaries never cross (numerically degenerate, or one
/// polygon fully inside the other) is reported as not detected.
pub fn detect_overlap(p1: &ConvexPolygon, p2: &ConvexPolygon) -> CollisionInfo {
    let Some(sat) = intersect_polygon_polygon(p1, p2) else {
        return CollisionInfo::none();
    };
    let contact_points = find_contact_points(p1, p2);
    if contact_points.is_empty() {
        trace!(overlap = sat.overlap, "SAT overlap without contact points");
        return CollisionInfo::none();
    }
    CollisionInfo {
        detected: true,
        normal: sat.normal,
        contact_points,
        overlap: sat.overlap,
    }
}

/// Tests every polygon of one shape against every polygon of the other,
/// skipping pairs whose boxes don't overlap. Only detected pairs are returned.
pub fn detect_polygons(shape1: &[ConvexPolygon], shape2: &[ConvexPolygon]) -> Vec<CollisionInfo> {
    let mut result = Vec::new();
    for p1 in shape1 {
        let aabb1 = p1.aabb();
        for p2 in shape2 {
            if !aabb1.overlaps(&p2.aabb()) {
                continue;
            }
            let info = detect_overlap(p1, p2);
            if info.detected {
                result.push(info);
            }
        }
    }
    result
}
