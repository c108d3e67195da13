pub mod detection;
pub mod manifold;
pub mod raycast;

// Re-export key types
pub use manifold::{ContactPoint, Manifold};
pub use raycast::{first_hit, RayEntry, Raycast};
