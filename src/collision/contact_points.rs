//! Contact point generation by sweeping polygon edges along the x-axis.

use crate::collision::intersection::intersect_ray_ray;
use crate::math::vec2::Vec2;
use crate::shapes::polygon::ConvexPolygon;
use crate::shapes::ray::Ray;

/// Points closer than this to an already recorded contact are dropped.
const DEDUP_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
struct Event {
    x: f64,
    polygon: usize,
    edge: usize,
    closing: bool,
}

/// All points where the boundaries of `p0` and `p1` cross.
///
/// Each edge spans an x-interval; edges are opened and closed in x order and
/// an opening edge is only tested against the currently open edges of the
/// other polygon. On equal x, opens are processed before closes so edges that
/// merely touch in x still get tested.
pub fn find_contact_points(p0: &ConvexPolygon, p1: &ConvexPolygon) -> Vec<Vec2> {
    let edges: [Vec<Ray>; 2] = [p0.edges().collect(), p1.edges().collect()];

    let mut events = Vec::with_capacity(2 * (edges[0].len() + edges[1].len()));
    for (polygon, list) in edges.iter().enumerate() {
        for (edge, ray) in list.iter().enumerate() {
            let (a, b) = (ray.pos.x, ray.end().x);
            events.push(Event {
                x: a.min(b),
                polygon,
                edge,
                closing: false,
            });
            events.push(Event {
                x: a.max(b),
                polygon,
                edge,
                closing: true,
            });
        }
    }
    events.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.closing.cmp(&b.closing)));

    let mut open: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
    let mut points: Vec<Vec2> = Vec::new();

    for event in events {
        let other = 1 - event.polygon;
        if event.closing {
            if let Some(i) = open[event.polygon].iter().position(|&e| e == event.edge) {
                open[event.polygon].swap_remove(i);
            }
            continue;
        }

        let ray = &edges[event.polygon][event.edge];
        for &candidate in &open[other] {
            let Some(point) = intersect_ray_ray(&edges[other][candidate], ray).point() else {
                continue;
            };
            if points
                .iter()
                .all(|p| p.distance_squared(point) > DEDUP_EPSILON * DEDUP_EPSILON)
            {
                points.push(point);
            }
        }
        open[event.polygon].push(event.edge);
    }
    points
}
