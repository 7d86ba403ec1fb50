pub mod aabb;
pub mod contact_points;
pub mod events;
pub mod intersection;
pub mod manifold;
pub mod narrow_phase;
pub mod queries;

// Re-export key types
pub use aabb::AABB;
pub use contact_points::find_contact_points;
pub use events::{CollisionObservers, SubscriptionId};
pub use intersection::*;
pub use manifold::*;
pub use narrow_phase::{detect_overlap, detect_polygons};
pub use queries::{closest_point_on_polygon, point_in_polygon};
