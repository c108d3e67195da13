use std::f64::consts::TAU;

use super::{wrap_index, Hull, Shape2D};
use crate::collision::RayEntry;
use crate::error::{GeometryError, Result};
use crate::math::{Ray2, Rect, Transform, Vec2};

/// A disk in world space.
///
/// The boundary index runs counter-clockwise from the rightmost point, so
/// index 0.25 is the top and 0.5 the leftmost point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vec2, radius: f64) -> Result<Self> {
        if !center.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeometryError::InvalidRadius { radius });
        }
        Ok(Self { center, radius })
    }

    pub fn transformed(&self, transform: &Transform) -> Circle {
        Circle { center: transform.apply(self.center), radius: self.radius }
    }

    /// Boundary index of the direction from the center towards `point`.
    pub fn index_of(&self, point: Vec2) -> f64 {
        wrap_index((point - self.center).angle() / TAU)
    }
}

/// Distance along `ray` where it enters the disk, if it does.
/// Rays starting inside, pointing away, or only grazing the rim miss.
pub(crate) fn ray_disk_entry(center: Vec2, radius: f64, ray: &Ray2) -> Option<f64> {
    let m = ray.origin() - center;
    let b = m.dot(ray.direction());
    let c = m.magnitude_squared() - radius * radius;
    if c < 0.0 || b >= 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant <= 0.0 {
        return None;
    }
    Some(-b - discriminant.sqrt())
}

impl Shape2D for Circle {
    fn bounds(&self) -> Rect {
        Rect::from_center(self.center, self.radius, self.radius)
    }

    fn center(&self) -> Vec2 {
        self.center
    }

    fn point_at(&self, index: f64) -> Vec2 {
        self.center + self.normal_at(index) * self.radius
    }

    fn normal_at(&self, index: f64) -> Vec2 {
        let angle = wrap_index(index) * TAU;
        Vec2::new(angle.cos(), angle.sin())
    }

    fn hull(&self) -> Hull<'_> {
        Hull::point(self.center, self.radius)
    }

    fn ray_entry(&self, ray: &Ray2, max_length: f64) -> Option<RayEntry> {
        let distance = ray_disk_entry(self.center, self.radius, ray)?;
        if distance > max_length {
            return None;
        }
        let point = ray.point_at(distance);
        Some(RayEntry {
            distance,
            normal: (point - self.center).normalize_or(-ray.direction()),
            shape_index: self.index_of(point),
        })
    }

    fn contains_point(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}
