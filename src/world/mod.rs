pub mod physics_world;
pub mod solver;

pub use physics_world::{Body, PhysicsWorld};
pub use solver::{ContactTerms, DefaultSolver, RigidManifold, Solver};
