use std::slice;

use crate::error::{GeometryError, Result};
use crate::math::vec2::Vec2;
use crate::shapes::Shape2D;

/// A single contact sample between shape A and shape B.
///
/// Only the point on A, A's outward normal there, and the signed separation
/// are stored; everything about B is derived, so the three can never
/// disagree.
///
/// `distance` is measured along `normal_on_a` from `point_on_a` to the
/// matching point on B: negative when the shapes overlap, zero when they
/// touch, positive for a speculative contact between separated shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    point_on_a: Vec2,
    normal_on_a: Vec2,
    distance: f64,
}

impl ContactPoint {
    /// Creates a contact point. `normal_on_a` must be unit length.
    pub fn new(point_on_a: Vec2, normal_on_a: Vec2, distance: f64) -> Self {
        debug_assert!(
            (normal_on_a.magnitude() - 1.0).abs() < 1e-6,
            "contact normal must be unit length, got {:?}",
            normal_on_a
        );
        Self { point_on_a, normal_on_a, distance }
    }

    /// Contact between overlapping shapes, from the surface point of each.
    ///
    /// The separation is `-|a - b|` and the normal points from B's point
    /// towards A's point. When the points coincide the normal is `Vec2::UP`,
    /// which carries no geometric meaning.
    pub fn from_surface_points(point_on_a: Vec2, point_on_b: Vec2) -> Self {
        let separation = point_on_a.distance(point_on_b);
        let normal = if separation == 0.0 {
            log::debug!("coincident contact points at {:?}, using canonical normal", point_on_a);
            Vec2::UP
        } else {
            (point_on_a - point_on_b) / separation
        };
        Self::new(point_on_a, normal, -separation)
    }

    /// Contact between shapes that do not overlap: positive separation and a
    /// unit normal from A's point towards B's point.
    pub fn not_intersecting(point_on_a: Vec2, point_on_b: Vec2) -> Self {
        let separation = point_on_a.distance(point_on_b);
        let normal = if separation == 0.0 {
            Vec2::UP
        } else {
            (point_on_b - point_on_a) / separation
        };
        Self::new(point_on_a, normal, separation)
    }

    pub fn point_on_a(&self) -> Vec2 {
        self.point_on_a
    }

    pub fn normal_on_a(&self) -> Vec2 {
        self.normal_on_a
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn point_on_b(&self) -> Vec2 {
        self.point_on_a + self.normal_on_a * self.distance
    }

    pub fn normal_on_b(&self) -> Vec2 {
        -self.normal_on_a
    }

    /// Midway between the two surface points, the best single estimate of
    /// where the shapes actually meet.
    pub fn point(&self) -> Vec2 {
        self.point_on_a + self.normal_on_a * (self.distance / 2.0)
    }

    pub fn is_penetrating(&self) -> bool {
        self.distance < 0.0
    }

    /// Overlap depth, zero for touching or separated contacts.
    pub fn penetration(&self) -> f64 {
        (-self.distance).max(0.0)
    }

    /// The same contact seen from B.
    pub fn flipped(&self) -> Self {
        Self::new(self.point_on_b(), self.normal_on_b(), self.distance)
    }
}

/// The contact points between two shapes.
///
/// Borrows both shapes and always holds at least one point; shapes that do
/// not touch have no manifold at all. Points keep the order the producer
/// generated them in.
#[derive(Debug, Clone)]
pub struct Manifold<'a> {
    shape_a: &'a dyn Shape2D,
    shape_b: &'a dyn Shape2D,
    points: Vec<ContactPoint>,
}

impl<'a> Manifold<'a> {
    /// Fails with [`GeometryError::EmptyManifold`] when `points` is empty.
    pub fn new(
        shape_a: &'a dyn Shape2D,
        shape_b: &'a dyn Shape2D,
        points: impl Into<Vec<ContactPoint>>,
    ) -> Result<Self> {
        let points = points.into();
        if points.is_empty() {
            return Err(GeometryError::EmptyManifold);
        }
        Ok(Self { shape_a, shape_b, points })
    }

    pub fn single(shape_a: &'a dyn Shape2D, shape_b: &'a dyn Shape2D, point: ContactPoint) -> Self {
        Self { shape_a, shape_b, points: vec![point] }
    }

    // Callers guarantee at least one point.
    pub(crate) fn from_parts(shape_a: &'a dyn Shape2D, shape_b: &'a dyn Shape2D, points: Vec<ContactPoint>) -> Self {
        debug_assert!(!points.is_empty());
        Self { shape_a, shape_b, points }
    }

    pub fn shape_a(&self) -> &'a dyn Shape2D {
        self.shape_a
    }

    pub fn shape_b(&self) -> &'a dyn Shape2D {
        self.shape_b
    }

    pub fn points(&self) -> &[ContactPoint] {
        &self.points
    }

    /// Owned copy of the points; changing it does not affect the manifold.
    pub fn to_points(&self) -> Vec<ContactPoint> {
        self.points.clone()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn iter(&self) -> slice::Iter<'_, ContactPoint> {
        self.points.iter()
    }

    /// The point with the most negative separation.
    pub fn deepest(&self) -> &ContactPoint {
        let first = &self.points[0];
        self.points[1..]
            .iter()
            .fold(first, |deepest, p| if p.distance < deepest.distance { p } else { deepest })
    }

    /// Same shapes, new points.
    pub fn with_points(self, points: impl Into<Vec<ContactPoint>>) -> Result<Self> {
        Self::new(self.shape_a, self.shape_b, points)
    }

    /// Same points, new shapes.
    pub fn with_shapes(self, shape_a: &'a dyn Shape2D, shape_b: &'a dyn Shape2D) -> Self {
        Self { shape_a, shape_b, points: self.points }
    }

    /// The manifold seen from B: shapes swapped and every point flipped.
    pub fn flipped(&self) -> Manifold<'a> {
        Self {
            shape_a: self.shape_b,
            shape_b: self.shape_a,
            points: self.points.iter().map(ContactPoint::flipped).collect(),
        }
    }
}

impl<'m, 'a> IntoIterator for &'m Manifold<'a> {
    type Item = &'m ContactPoint;
    type IntoIter = slice::Iter<'m, ContactPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
