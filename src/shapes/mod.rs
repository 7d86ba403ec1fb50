pub mod circle;
pub mod concave;
pub mod decompose;
pub mod polygon;
pub mod ray;

// Re-export the specific shape types
pub use circle::Circle;
pub use concave::ConcavePolygon;
pub use decompose::{angle_around, decompose, triangulate, Decomposition, Triangulation};
pub use polygon::ConvexPolygon;
pub use ray::Ray;
