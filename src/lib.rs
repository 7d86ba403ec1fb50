//! Narrow-phase collision detection and impulse-based contact resolution for
//! 2D rigid bodies.
//!
//! Shapes are convex polygons, or concave outlines decomposed into convex
//! pieces. Detection runs the separating-axis test per polygon pair and finds
//! contact points with a sweep over the edges; the solver then separates the
//! bodies and applies a combined normal and friction impulse.

pub mod collision;
pub mod common;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{BodyHandle, CollisionEvent, CollisionInfo, AABB};
pub use common::{Material, SolverConfig, WorldConfig};
pub use error::ShapeError;
pub use math::{Transform, Vec2};
pub use objects::{Collider, RigidBody};
pub use shapes::{Circle, ConcavePolygon, ConvexPolygon, Ray};
pub use world::{Body, DefaultSolver, PhysicsWorld, RigidManifold, Solver};
