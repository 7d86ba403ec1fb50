use tracing::warn;

use crate::collision::aabb::AABB;
use crate::collision::queries::point_in_polygon;
use crate::error::{validate_outline, ShapeError};
use crate::math::vec2::Vec2;
use crate::shapes::ray::Ray;

/// A convex polygon placed in the world.
///
/// Vertices are stored in model space, relative to the polygon's centroid
/// `pos` and before rotation by `rot`. World-space vertices are kept in sync on
/// every pose change, so reading them never recomputes anything.
///
/// Vertices are expected in counter-clockwise order; nothing checks convexity.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    pos: Vec2,
    rot: f64,
    model: Vec<Vec2>,
    vertices: Vec<Vec2>,
}

impl ConvexPolygon {
    /// Creates a polygon from model-space vertices placed at `pos`, rotated by `rot`.
    pub fn new(pos: Vec2, rot: f64, model: Vec<Vec2>) -> Result<Self, ShapeError> {
        validate_outline(&model)?;
        Ok(Self::from_model(pos, rot, model))
    }

    /// Creates a polygon from world-space points at rotation zero.
    /// The vertex average becomes the polygon's position.
    pub fn from_points(points: &[Vec2]) -> Result<Self, ShapeError> {
        validate_outline(points)?;
        let avg = points.iter().sum::<Vec2>() / points.len() as f64;
        let model = points.iter().map(|&p| p - avg).collect();
        Ok(Self::from_model(avg, 0.0, model))
    }

    /// The four corners of `aabb`, counter-clockwise from `min`.
    pub fn from_aabb(aabb: &AABB) -> Self {
        let center = aabb.center();
        let model = [aabb.bl(), aabb.br(), aabb.tr(), aabb.tl()]
            .iter()
            .map(|&corner| corner - center)
            .collect();
        Self::from_model(center, 0.0, model)
    }

    /// A regular polygon with `count` vertices at distance `radius` from `pos`.
    pub fn regular(pos: Vec2, rot: f64, count: usize, radius: f64) -> Result<Self, ShapeError> {
        if count < 3 {
            return Err(ShapeError::TooFewVertices { count });
        }
        let step = std::f64::consts::TAU / count as f64;
        let model = (0..count)
            .map(|i| Vec2::new(radius, 0.0).rotate(step * i as f64))
            .collect();
        Ok(Self::from_model(pos, rot, model))
    }

    fn from_model(pos: Vec2, rot: f64, model: Vec<Vec2>) -> Self {
        let mut polygon = Self {
            pos,
            rot,
            vertices: Vec::with_capacity(model.len()),
            model,
        };
        polygon.update_vertices();
        polygon
    }

    fn update_vertices(&mut self) {
        let (pos, rot) = (self.pos, self.rot);
        self.vertices.clear();
        self.vertices
            .extend(self.model.iter().map(|&v| v.rotate(rot) + pos));
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn rot(&self) -> f64 {
        self.rot
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
        self.update_vertices();
    }

    pub fn set_rot(&mut self, rot: f64) {
        self.rot = rot;
        self.update_vertices();
    }

    /// Moves and rotates in one pass over the vertices.
    pub fn set_transform(&mut self, pos: Vec2, rot: f64) {
        self.pos = pos;
        self.rot = rot;
        self.update_vertices();
    }

    /// World-space vertices.
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Vertices relative to the centroid, before rotation.
    pub fn model_vertices(&self) -> &[Vec2] {
        &self.model
    }

    /// World-space edges as bounded rays, starting with the edge that closes
    /// the outline (last vertex to first).
    pub fn edges(&self) -> impl Iterator<Item = Ray> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| {
            let prev = self.vertices[(i + n - 1) % n];
            Ray::from_points(prev, self.vertices[i])
        })
    }

    pub fn area(&self) -> f64 {
        area(&self.model)
    }

    pub fn aabb(&self) -> AABB {
        AABB::from_polygon(self)
    }

    /// Parity test against the world-space outline.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point_in_polygon(point, &self.vertices)
    }

    /// Moment of inertia about the centroid for a body of the given mass.
    pub fn inertia(&self, mass: f64) -> f64 {
        calculate_inertia(&self.model, mass)
    }
}

/// Shoelace area, positive for counter-clockwise outlines.
pub fn signed_area(points: &[Vec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        sum += points[i].cross(points[(i + 1) % n]);
    }
    sum / 2.0
}

pub fn area(points: &[Vec2]) -> f64 {
    signed_area(points).abs()
}

/// Moment of inertia of a polygon about its model origin.
///
/// The outline is fanned into triangles around the origin; each contributes
/// `area_i * (|a|^2 + |b|^2 + |a.b|) / 6`, and the sum is scaled by
/// `mass / total_area`. A zero-area outline makes the result NaN, which is
/// reported and replaced with zero.
pub fn calculate_inertia(model: &[Vec2], mass: f64) -> f64 {
    let n = model.len();
    let mut total_area = 0.0;
    let mut inertia = 0.0;
    for i in 0..n {
        let a = model[(i + n - 1) % n];
        let b = model[i];
        let area_step = a.cross(b).abs() / 2.0;
        total_area += area_step;
        inertia += area_step * (a.dot(a) + b.dot(b) + a.dot(b).abs()) / 6.0;
    }

    let density = mass / total_area;
    inertia *= density;
    if inertia.is_nan() {
        warn!(vertices = n, mass, "polygon inertia is NaN, using zero");
        return 0.0;
    }
    inertia.abs()
}
