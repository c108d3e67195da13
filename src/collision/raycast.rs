use crate::math::{Ray2, Vec2};
use crate::shapes::Shape2D;

/// Raw result of a shape's ray entry test, before it is tied to the shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayEntry {
    /// Distance along the ray to the entry point.
    pub distance: f64,
    /// Outward surface normal at the entry point.
    pub normal: Vec2,
    /// Boundary index of the entry point.
    pub shape_index: f64,
}

/// Outcome of casting a ray against a shape.
///
/// A miss carries no shape, NaN for the index and normal, and the ray's
/// maximum length as distance; only `ray` and `distance` mean anything then.
#[derive(Debug, Clone, Copy)]
pub struct Raycast<'a> {
    shape: Option<&'a dyn Shape2D>,
    ray: Ray2,
    distance: f64,
    shape_index: f64,
    normal: Vec2,
}

impl<'a> Raycast<'a> {
    /// A hit on `shape`. The normal is normalized here.
    pub fn new(shape: &'a dyn Shape2D, ray: Ray2, distance: f64, shape_index: f64, normal: Vec2) -> Self {
        Self {
            shape: Some(shape),
            ray,
            distance,
            shape_index,
            normal: normal.normalize_or(-ray.direction()),
        }
    }

    pub fn miss(ray: Ray2, max_length: f64) -> Self {
        Self {
            shape: None,
            ray,
            distance: max_length,
            shape_index: f64::NAN,
            normal: Vec2::NAN,
        }
    }

    pub fn hit(&self) -> bool {
        self.shape.is_some()
    }

    pub fn shape(&self) -> Option<&'a dyn Shape2D> {
        self.shape
    }

    pub fn ray(&self) -> Ray2 {
        self.ray
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn shape_index(&self) -> f64 {
        self.shape_index
    }

    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// Where the ray stopped: the hit point, or the end of the ray on a miss.
    pub fn point(&self) -> Vec2 {
        self.ray.point_at(self.distance)
    }
}

/// Casts `ray` against every shape and returns the closest hit within
/// `max_length`. On equal distances the earlier shape wins.
pub fn first_hit<'a, I>(shapes: I, ray: &Ray2, max_length: f64) -> Raycast<'a>
where
    I: IntoIterator<Item = &'a dyn Shape2D>,
{
    let mut best = Raycast::miss(*ray, max_length);
    let mut ceiling = max_length;
    for shape in shapes {
        let Some(entry) = shape.ray_entry(ray, ceiling) else {
            continue;
        };
        if !best.hit() || entry.distance < best.distance {
            ceiling = entry.distance;
            best = Raycast::new(shape, *ray, entry.distance, entry.shape_index, entry.normal);
        }
    }
    log::trace!("first hit along {:?}: {}", ray, best.hit());
    best
}
