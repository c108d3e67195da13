use std::f64::consts::PI;

use super::circle::ray_disk_entry;
use super::line_segment::LineSegment;
use super::{wrap_index, Hull, Shape2D};
use crate::collision::RayEntry;
use crate::error::{GeometryError, Result};
use crate::math::{Ray2, Rect, Transform, Vec2};

/// All points within `radius` of a segment: a "stadium".
///
/// The boundary index walks counter-clockwise: the right-hand side of `a -> b`
/// (offset by `n * radius`, `n` the right normal), the cap around `b`, the
/// opposite side back towards `a`, then the cap around `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub segment: LineSegment,
    pub radius: f64,
}

impl Capsule {
    pub fn new(a: Vec2, b: Vec2, radius: f64) -> Result<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeometryError::InvalidRadius { radius });
        }
        Ok(Self { segment: LineSegment::new(a, b), radius })
    }

    pub fn transformed(&self, transform: &Transform) -> Capsule {
        Capsule {
            segment: LineSegment::new(transform.apply(self.segment.a), transform.apply(self.segment.b)),
            radius: self.radius,
        }
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * self.segment.length() + 2.0 * PI * self.radius
    }

    // (right normal n, axis d) with d = n rotated a quarter turn CCW
    fn frame(&self) -> (Vec2, Vec2) {
        let n = self.segment.right_normal();
        (n, n.perpendicular())
    }

    /// Boundary index of a point on (or near) the boundary.
    pub fn index_of(&self, point: Vec2) -> f64 {
        let perimeter = self.perimeter();
        if perimeter == 0.0 {
            return 0.0;
        }
        let (n, d) = self.frame();
        let (a, b) = (self.segment.a, self.segment.b);
        let length = self.segment.length();
        let half_turn = PI * self.radius;
        let t = (point - a).dot(d);

        let s = if t > length {
            let v = point - b;
            length + self.radius * n.cross(v).atan2(n.dot(v)).clamp(0.0, PI)
        } else if t < 0.0 {
            let v = point - a;
            2.0 * length + half_turn + self.radius * (-n).cross(v).atan2((-n).dot(v)).clamp(0.0, PI)
        } else if (point - a).dot(n) >= 0.0 {
            t
        } else {
            length + half_turn + (length - t)
        };
        wrap_index(s / perimeter)
    }

    // Boundary point and outward normal at arc length `s`.
    fn boundary(&self, index: f64) -> (Vec2, Vec2) {
        let (n, d) = self.frame();
        let (a, b, r) = (self.segment.a, self.segment.b, self.radius);
        let length = self.segment.length();
        let half_turn = PI * r;
        let s = wrap_index(index) * self.perimeter();

        if s < length {
            (a + n * r + d * s, n)
        } else if s < length + half_turn {
            let normal = n.rotate((s - length) / r);
            (b + normal * r, normal)
        } else if s < 2.0 * length + half_turn {
            (b - n * r - d * (s - length - half_turn), -n)
        } else if r > 0.0 {
            let normal = (-n).rotate((s - 2.0 * length - half_turn) / r);
            (a + normal * r, normal)
        } else {
            (a, -n)
        }
    }
}

impl Shape2D for Capsule {
    fn bounds(&self) -> Rect {
        Rect::new(self.segment.a, self.segment.b).expanded(self.radius)
    }

    fn center(&self) -> Vec2 {
        self.segment.midpoint()
    }

    fn point_at(&self, index: f64) -> Vec2 {
        self.boundary(index).0
    }

    fn normal_at(&self, index: f64) -> Vec2 {
        self.boundary(index).1
    }

    fn hull(&self) -> Hull<'_> {
        Hull::segment(self.segment.a, self.segment.b, self.radius)
    }

    // The capsule is the union of two disks and the rectangle between them.
    // Starting outside, the first entry into the union is the earliest entry
    // into any part; the rectangle's short ends lie inside the disks, so only
    // its long sides are tested.
    fn ray_entry(&self, ray: &Ray2, max_length: f64) -> Option<RayEntry> {
        let origin = ray.origin();
        let direction = ray.direction();
        if self.segment.distance_to(origin) < self.radius {
            return None;
        }

        let (n, d) = self.frame();
        let (a, b, r) = (self.segment.a, self.segment.b, self.radius);
        let length = self.segment.length();
        let mut best: Option<(f64, Vec2)> = None;
        let mut consider = |t: f64, normal: Vec2| {
            if best.map_or(true, |(best_t, _)| t < best_t) {
                best = Some((t, normal));
            }
        };

        for cap in [a, b] {
            if let Some(t) = ray_disk_entry(cap, r, ray) {
                consider(t, (ray.point_at(t) - cap).normalize_or(-direction));
            }
        }
        for side in [n, -n] {
            let denom = side.dot(direction);
            if denom >= 0.0 {
                continue;
            }
            let t = side.dot(a + side * r - origin) / denom;
            if t < 0.0 {
                continue;
            }
            let along = (ray.point_at(t) - a).dot(d);
            if (0.0..=length).contains(&along) {
                consider(t, side);
            }
        }

        let (distance, normal) = best?;
        if distance > max_length {
            return None;
        }
        Some(RayEntry {
            distance,
            normal,
            shape_index: self.index_of(ray.point_at(distance)),
        })
    }

    fn contains_point(&self, point: Vec2) -> bool {
        self.segment.distance_to(point) <= self.radius
    }
}
