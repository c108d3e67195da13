pub mod collision;
pub mod common;
pub mod error;
pub mod math;
pub mod shapes;

// Re-export key types for easier use
pub use collision::{first_hit, ContactPoint, Manifold, Raycast};
pub use common::Tolerance;
pub use error::{GeometryError, Result};
pub use math::{Ray2, Rect, Transform, Vec2};
pub use shapes::{Capsule, Circle, Hull, LineSegment, Polygon, Shape, Shape2D};
