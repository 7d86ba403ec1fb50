use crate::collision::aabb::AABB;
use crate::collision::events::CollisionObservers;
use crate::collision::manifold::BodyHandle;
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::shapes::concave::ConcavePolygon;
use crate::shapes::polygon::ConvexPolygon;

/// Pose the world-space pieces were last placed at.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pose {
    pos: Vec2,
    rot: f64,
}

/// Collision shape of a body, with world-space and inertia caches.
///
/// The shape is re-placed around the transform's position on query, so its
/// own construction-time position does not matter.
#[derive(Debug)]
pub struct Collider {
    shape: ConcavePolygon,
    /// `None` until the first query, and again after `set_shape`.
    cached_pose: Option<Pose>,
    inertia_per_mass: Option<f64>,
    /// Trigger colliders report collisions but are never resolved.
    pub is_trigger: bool,
    /// Root body this collider belongs to, if it is part of a compound.
    pub parent: Option<BodyHandle>,
    pub observers: CollisionObservers,
}

impl Collider {
    pub fn new(shape: ConcavePolygon) -> Self {
        Self {
            shape,
            cached_pose: None,
            inertia_per_mass: None,
            is_trigger: false,
            parent: None,
            observers: CollisionObservers::new(),
        }
    }

    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    pub fn shape(&self) -> &ConcavePolygon {
        &self.shape
    }

    /// Replaces the shape and drops both caches.
    pub fn set_shape(&mut self, shape: ConcavePolygon) {
        self.shape = shape;
        self.cached_pose = None;
        self.inertia_per_mass = None;
    }

    /// World-space convex pieces at `transform`. Pieces are only re-placed
    /// when the position or rotation differs from the previous query.
    pub fn polygons(&mut self, transform: &Transform) -> &[ConvexPolygon] {
        let pose = Pose {
            pos: transform.pos(),
            rot: transform.rot(),
        };
        if self.cached_pose != Some(pose) {
            self.shape.set_transform(pose.pos, pose.rot);
            self.cached_pose = Some(pose);
        }
        self.shape.polygons()
    }

    /// Union of the piece boxes at `transform`.
    pub fn aabb(&mut self, transform: &Transform) -> AABB {
        let mut pieces = self.polygons(transform).iter().map(ConvexPolygon::aabb);
        let first = pieces.next().unwrap_or(AABB {
            min: transform.pos(),
            max: transform.pos(),
        });
        pieces.fold(first, |mut acc, aabb| {
            acc.merge(&aabb);
            acc
        })
    }

    /// Moment of inertia about the shape's position.
    ///
    /// Mass is split between pieces by area; each piece adds its own inertia
    /// plus the parallel-axis term for its offset.
    pub fn calc_inertia(&self, mass: f64) -> f64 {
        let total_area = self.shape.area();
        if total_area <= 0.0 {
            return 0.0;
        }
        self.shape
            .polygons()
            .iter()
            .zip(self.shape.offsets())
            .map(|(piece, offset)| {
                let piece_mass = mass * piece.area() / total_area;
                piece.inertia(piece_mass) + piece_mass * offset.magnitude_squared()
            })
            .sum()
    }

    /// Inertia for `mass`, reusing the cached inertia-to-mass ratio.
    /// Non-positive masses give zero and leave the cache untouched.
    pub fn inertia(&mut self, mass: f64) -> f64 {
        if mass <= 0.0 {
            return 0.0;
        }
        let ratio = match self.inertia_per_mass {
            Some(ratio) => ratio,
            None => {
                let ratio = self.calc_inertia(mass) / mass;
                self.inertia_per_mass = Some(ratio);
                ratio
            }
        };
        ratio * mass
    }
}

impl From<ConcavePolygon> for Collider {
    fn from(shape: ConcavePolygon) -> Self {
        Collider::new(shape)
    }
}

impl From<ConvexPolygon> for Collider {
    fn from(polygon: ConvexPolygon) -> Self {
        Collider::new(ConcavePolygon::from(polygon))
    }
}
