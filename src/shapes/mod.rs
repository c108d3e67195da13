pub mod capsule;
pub mod circle;
pub mod hull;
pub mod line_segment;
pub mod polygon;

use std::fmt;

use crate::collision::detection;
use crate::collision::{Manifold, RayEntry, Raycast};
use crate::common::Tolerance;
use crate::math::{Ray2, Rect, Transform, Vec2};

pub use capsule::Capsule;
pub use circle::Circle;
pub use hull::Hull;
pub use line_segment::LineSegment;
pub use polygon::Polygon;

/// Upcast helper so the provided methods of [`Shape2D`] can hand `self` to
/// code expecting `&dyn Shape2D`. Implemented for every sized shape.
pub trait AsShape2D {
    fn as_shape(&self) -> &dyn Shape2D;
}

impl<T: Shape2D> AsShape2D for T {
    fn as_shape(&self) -> &dyn Shape2D {
        self
    }
}

/// The capability every collidable 2D region exposes.
///
/// Implementors supply their geometry (bounds, boundary parameterization, a
/// convex [`Hull`] and the ray entry test); overlap, containment, contact
/// generation and raycasting are derived from those and behave identically
/// for every shape.
///
/// All region predicates are closed: touching counts as overlapping and
/// boundary points count as contained.
pub trait Shape2D: fmt::Debug + AsShape2D {
    /// Axis-aligned bounds. Returned by value, so it never tracks later
    /// changes to the shape.
    fn bounds(&self) -> Rect;

    /// A representative interior point. Not necessarily the center of
    /// `bounds()`.
    fn center(&self) -> Vec2;

    /// Boundary location at `index` in `[0, 1]`, counter-clockwise by arc
    /// length. Indices wrap, so `point_at(0.0) == point_at(1.0)`.
    fn point_at(&self, index: f64) -> Vec2;

    /// Outward unit normal at the same boundary location as `point_at`.
    fn normal_at(&self, index: f64) -> Vec2;

    /// The shape as a rounded convex hull, used by the narrow phase.
    fn hull(&self) -> Hull<'_>;

    /// First point where `ray` crosses from outside to inside within
    /// `max_length`. Grazes, exits and rays starting inside yield `None`.
    fn ray_entry(&self, ray: &Ray2, max_length: f64) -> Option<RayEntry>;

    fn contains_point(&self, point: Vec2) -> bool {
        self.hull().clearance(point) >= 0.0
    }

    /// Whether the whole region of `other` lies inside this shape.
    fn contains(&self, other: &dyn Shape2D) -> bool {
        self.bounds().contains_rect(&other.bounds()) && detection::contains(&self.hull(), &other.hull())
    }

    fn overlaps(&self, other: &dyn Shape2D) -> bool {
        self.bounds().overlaps(&other.bounds()) && detection::overlaps(&self.hull(), &other.hull())
    }

    fn overlaps_rect(&self, rect: &Rect) -> bool {
        self.bounds().overlaps(rect) && detection::overlaps(&self.hull(), &Hull::from_rect(rect))
    }

    /// Contact manifold against `other`, or `None` when the shapes do not
    /// touch. Normals point out of `self`.
    fn contact_with<'a>(&'a self, other: &'a dyn Shape2D) -> Option<Manifold<'a>> {
        self.contact_with_tolerance(other, &Tolerance::default())
    }

    fn contact_with_tolerance<'a>(
        &'a self,
        other: &'a dyn Shape2D,
        tolerance: &Tolerance,
    ) -> Option<Manifold<'a>> {
        detection::contact(self.as_shape(), other, tolerance)
    }

    fn intersects(&self, ray: &Ray2, max_length: f64) -> bool {
        self.ray_entry(ray, max_length).is_some()
    }

    /// Always returns a result; check `hit()` before trusting the shape,
    /// normal or index.
    fn raycast(&self, ray: &Ray2, max_length: f64) -> Raycast<'_> {
        match self.ray_entry(ray, max_length) {
            Some(entry) => Raycast::new(self.as_shape(), *ray, entry.distance, entry.shape_index, entry.normal),
            None => Raycast::miss(*ray, max_length),
        }
    }

    fn intersects_unbounded(&self, ray: &Ray2) -> bool {
        self.intersects(ray, f64::INFINITY)
    }

    fn raycast_unbounded(&self, ray: &Ray2) -> Raycast<'_> {
        self.raycast(ray, f64::INFINITY)
    }
}

/// Maps any boundary index onto `[0, 1)`.
pub(crate) fn wrap_index(index: f64) -> f64 {
    let wrapped = index.rem_euclid(1.0);
    // rem_euclid rounds tiny negative inputs up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Closed set of the shapes this crate knows how to build.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Capsule(Capsule),
    Polygon(Polygon),
}

impl Shape {
    /// Copy of the shape placed by `transform`.
    pub fn transformed(&self, transform: &Transform) -> Shape {
        match self {
            Shape::Circle(c) => Shape::Circle(c.transformed(transform)),
            Shape::Capsule(c) => Shape::Capsule(c.transformed(transform)),
            Shape::Polygon(p) => Shape::Polygon(p.transformed(transform)),
        }
    }

    fn inner(&self) -> &dyn Shape2D {
        match self {
            Shape::Circle(c) => c,
            Shape::Capsule(c) => c,
            Shape::Polygon(p) => p,
        }
    }
}

impl Shape2D for Shape {
    fn bounds(&self) -> Rect {
        self.inner().bounds()
    }

    fn center(&self) -> Vec2 {
        self.inner().center()
    }

    fn point_at(&self, index: f64) -> Vec2 {
        self.inner().point_at(index)
    }

    fn normal_at(&self, index: f64) -> Vec2 {
        self.inner().normal_at(index)
    }

    fn hull(&self) -> Hull<'_> {
        self.inner().hull()
    }

    fn ray_entry(&self, ray: &Ray2, max_length: f64) -> Option<RayEntry> {
        self.inner().ray_entry(ray, max_length)
    }

    fn contains_point(&self, point: Vec2) -> bool {
        self.inner().contains_point(point)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Capsule> for Shape {
    fn from(capsule: Capsule) -> Self {
        Shape::Capsule(capsule)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}
