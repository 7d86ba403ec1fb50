use crate::math::vec2::Vec2;

/// Index of a body inside a [`PhysicsWorld`](crate::world::PhysicsWorld).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub usize);

/// Result of a narrow-phase test between one polygon of each body.
///
/// The other fields are only meaningful when `detected` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionInfo {
    pub detected: bool,
    /// Unit normal pointing from the first body toward the second.
    pub normal: Vec2,
    /// World-space points where the two boundaries cross.
    pub contact_points: Vec<Vec2>,
    /// Penetration depth along `normal`, never negative.
    pub overlap: f64,
}

impl CollisionInfo {
    /// A result with nothing detected.
    pub fn none() -> Self {
        Self {
            detected: false,
            normal: Vec2::ZERO,
            contact_points: Vec::new(),
            overlap: 0.0,
        }
    }

    /// Average of the contact points, the single point impulses act through.
    pub fn contact_point(&self) -> Option<Vec2> {
        if self.contact_points.is_empty() {
            return None;
        }
        Some(self.contact_points.iter().sum::<Vec2>() / self.contact_points.len() as f64)
    }
}

impl Default for CollisionInfo {
    fn default() -> Self {
        Self::none()
    }
}

/// Broadcast to a collider's observers after a detected collision.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    /// Body owning the collider that raised the event.
    pub this: BodyHandle,
    pub other: BodyHandle,
    /// Normal oriented from `this` toward `other`.
    pub info: CollisionInfo,
}
