//! Pairwise intersection tests between kernel primitives.
//!
//! Every routine that reports a normal orients it from the first argument
//! toward the second.

use crate::collision::aabb::AABB;
use crate::collision::queries::closest_point_on_polygon;
use crate::math::vec2::Vec2;
use crate::shapes::circle::Circle;
use crate::shapes::polygon::ConvexPolygon;
use crate::shapes::ray::Ray;

/// Below this distance two centers are treated as coincident.
const COINCIDENT_EPSILON: f64 = 1e-10;

/// Where a ray enters and leaves a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayAabbHit {
    /// Entry parameter along the ray; negative if the origin is inside.
    pub near: f64,
    pub far: f64,
    /// Point at the entry parameter.
    pub point: Vec2,
    /// Face normal at the entry point, facing the ray. Zero when both slabs
    /// are entered at the same parameter (a corner hit).
    pub normal: Vec2,
}

/// Slab test of a ray against a box.
///
/// A slab whose bounds produce NaN (zero direction component with the origin
/// exactly on that slab's boundary) reports no hit, as do a zero direction
/// and a box entirely behind the origin.
pub fn intersect_ray_aabb(ray: &Ray, aabb: &AABB) -> Option<RayAabbHit> {
    if ray.dir == Vec2::ZERO {
        return None;
    }
    let inv_dir = Vec2::new(1.0 / ray.dir.x, 1.0 / ray.dir.y);
    let mut t_near = (aabb.min - ray.pos).component_mul(inv_dir);
    let mut t_far = (aabb.max - ray.pos).component_mul(inv_dir);

    if t_near.is_nan() || t_far.is_nan() {
        return None;
    }
    if t_near.x > t_far.x {
        std::mem::swap(&mut t_near.x, &mut t_far.x);
    }
    if t_near.y > t_far.y {
        std::mem::swap(&mut t_near.y, &mut t_far.y);
    }
    if t_near.x > t_far.y || t_near.y > t_far.x {
        return None;
    }

    let near = t_near.x.max(t_near.y);
    let far = t_far.x.min(t_far.y);
    if !near.is_finite() || !far.is_finite() || far < 0.0 {
        return None;
    }

    let normal = if t_near.x > t_near.y {
        if inv_dir.x < 0.0 {
            Vec2::RIGHT
        } else {
            -Vec2::RIGHT
        }
    } else if t_near.x < t_near.y {
        if inv_dir.y < 0.0 {
            Vec2::UP
        } else {
            -Vec2::UP
        }
    } else {
        Vec2::ZERO
    };

    Some(RayAabbHit {
        near,
        far,
        point: ray.at(near),
        normal,
    })
}

/// Outcome of a segment-segment test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayRayIntersection {
    /// The segments cross at `point`; `t0` and `t1` are the parameters along
    /// the first and second segment.
    Hit { point: Vec2, t0: f64, t1: f64 },
    /// The supporting lines cross outside at least one segment.
    Miss,
    /// The directions are parallel (zero determinant); no single crossing
    /// point exists.
    Parallel,
}

impl RayRayIntersection {
    pub fn point(&self) -> Option<Vec2> {
        match *self {
            RayRayIntersection::Hit { point, .. } => Some(point),
            _ => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, RayRayIntersection::Hit { .. })
    }
}

/// Intersection of two bounded segments. Segments sharing an origin always
/// hit at that origin, even when parallel.
pub fn intersect_ray_ray(r0: &Ray, r1: &Ray) -> RayRayIntersection {
    if r0.pos == r1.pos {
        return RayRayIntersection::Hit {
            point: r0.pos,
            t0: 0.0,
            t1: 0.0,
        };
    }

    let d = r1.pos - r0.pos;
    let det = r1.dir.x * r0.dir.y - r1.dir.y * r0.dir.x;
    if det == 0.0 {
        return RayRayIntersection::Parallel;
    }

    let t0 = (d.y * r1.dir.x - d.x * r1.dir.y) / det;
    let t1 = (d.y * r0.dir.x - d.x * r0.dir.y) / det;
    if (0.0..=1.0).contains(&t0) && (0.0..=1.0).contains(&t1) {
        RayRayIntersection::Hit {
            point: r0.at(t0),
            t0,
            t1,
        }
    } else {
        RayRayIntersection::Miss
    }
}

/// First crossing of a segment with a polygon's boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayPolygonHit {
    pub point: Vec2,
    /// Outward unit normal of the edge that was hit.
    pub normal: Vec2,
    /// Squared distance from the ray origin to `point`.
    pub distance_squared: f64,
}

/// Tests the segment against every edge and keeps the crossing closest to the
/// ray's origin. Assumes counter-clockwise winding for the normal direction.
pub fn intersect_ray_polygon(ray: &Ray, polygon: &ConvexPolygon) -> Option<RayPolygonHit> {
    polygon
        .edges()
        .filter_map(|edge| {
            let point = intersect_ray_ray(ray, &edge).point()?;
            let normal = (-edge.dir.perpendicular()).try_normalize()?;
            Some(RayPolygonHit {
                point,
                normal,
                distance_squared: point.distance_squared(ray.pos),
            })
        })
        .min_by(|a, b| a.distance_squared.total_cmp(&b.distance_squared))
}

/// Separating-axis result: minimum translation axis and depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonOverlap {
    pub normal: Vec2,
    pub overlap: f64,
}

fn project(vertices: &[Vec2], axis: Vec2) -> (f64, f64) {
    vertices
        .iter()
        .map(|v| v.dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
            (min.min(p), max.max(p))
        })
}

/// Separating-axis test over the edge normals of both polygons.
///
/// Returns `None` as soon as an axis shows a gap. Touching polygons overlap
/// with depth zero.
pub fn intersect_polygon_polygon(p1: &ConvexPolygon, p2: &ConvexPolygon) -> Option<PolygonOverlap> {
    let mut best: Option<PolygonOverlap> = None;

    for edge in p1.edges().chain(p2.edges()) {
        let Some(axis) = edge.dir.perpendicular().try_normalize() else {
            continue;
        };
        let (min1, max1) = project(p1.vertices(), axis);
        let (min2, max2) = project(p2.vertices(), axis);
        if max2 < min1 || max1 < min2 {
            return None;
        }

        let overlap = max1.min(max2) - min1.max(min2);
        if best.map_or(true, |b| overlap < b.overlap) {
            best = Some(PolygonOverlap {
                normal: axis,
                overlap,
            });
        }
    }

    let mut result = best?;
    if (p2.pos() - p1.pos()).dot(result.normal) < 0.0 {
        result.normal = -result.normal;
    }
    Some(result)
}

/// Contact between a circle and another shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: Vec2,
    pub point: Vec2,
    pub overlap: f64,
}

/// Circle against convex polygon.
///
/// With the center outside, the overlap is how far the circle reaches past
/// the closest boundary point. With the center inside, the overlap is the
/// distance to the boundary plus the radius, enough to push the circle fully
/// out. The contact point is the closest boundary point in both cases.
pub fn intersect_circle_polygon(circle: &Circle, polygon: &ConvexPolygon) -> Option<Contact> {
    let (closest, distance) = closest_point_on_polygon(circle.pos, polygon);
    let center_inside = polygon.contains_point(circle.pos);
    if !center_inside && distance > circle.radius {
        return None;
    }

    let (direction, overlap) = if center_inside {
        (circle.pos - closest, distance + circle.radius)
    } else {
        (closest - circle.pos, circle.radius - distance)
    };
    let normal = direction
        .try_normalize()
        .or_else(|| (polygon.pos() - circle.pos).try_normalize())
        .unwrap_or(Vec2::UP);

    Some(Contact {
        normal,
        point: closest,
        overlap,
    })
}

/// Circle against circle. Touching circles are detected with zero overlap;
/// concentric circles push apart along +y.
pub fn intersect_circle_circle(c1: &Circle, c2: &Circle) -> Option<Contact> {
    let delta = c2.pos - c1.pos;
    let distance = delta.magnitude();
    let radii = c1.radius + c2.radius;
    if distance > radii {
        return None;
    }

    let normal = if distance > COINCIDENT_EPSILON {
        delta / distance
    } else {
        Vec2::UP
    };
    Some(Contact {
        normal,
        point: c1.pos + normal * c1.radius,
        overlap: radii - distance,
    })
}
