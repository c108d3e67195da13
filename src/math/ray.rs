use super::vec2::Vec2;
use crate::error::{GeometryError, Result};

/// A half-line starting at `origin`. The direction is kept unit length, so
/// the parameter of `point_at` is a distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2 {
    origin: Vec2,
    direction: Vec2,
}

impl Ray2 {
    /// Creates a ray, normalizing `direction`.
    pub fn new(origin: Vec2, direction: Vec2) -> Result<Self> {
        if !origin.is_finite() || !direction.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if direction.magnitude_squared() == 0.0 {
            return Err(GeometryError::InvalidDirection);
        }
        Ok(Self { origin, direction: direction.normalize() })
    }

    /// Ray from `from` towards `to`.
    pub fn between(from: Vec2, to: Vec2) -> Result<Self> {
        Self::new(from, to - from)
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Point at distance `t` along the ray.
    pub fn point_at(&self, t: f64) -> Vec2 {
        self.origin + self.direction * t
    }
}
