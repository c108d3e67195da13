//! Error type shared by every fallible constructor in the crate.

use thiserror::Error;

/// Errors raised when a shape, ray or manifold is built from invalid input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A manifold must carry at least one contact point. Shapes that do not
    /// touch produce no manifold at all.
    #[error("a manifold needs at least one contact point")]
    EmptyManifold,
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("polygon has zero area")]
    DegeneratePolygon,
    #[error("polygon is not convex")]
    NonConvexPolygon,
    #[error("radius must be finite and non-negative, got {radius}")]
    InvalidRadius { radius: f64 },
    /// Ray directions are normalized at construction, so they cannot be zero.
    #[error("ray direction must be non-zero")]
    InvalidDirection,
    #[error("coordinates must be finite")]
    NonFinite,
}

pub type Result<T> = std::result::Result<T, GeometryError>;
