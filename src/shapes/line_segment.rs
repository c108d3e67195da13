use crate::math::vec2::Vec2;

/// A straight segment between two world-space points. Used as the core of a
/// capsule and for the edges of hulls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub a: Vec2,
    pub b: Vec2,
}

impl LineSegment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Vector from `a` to `b` (not normalized).
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    pub fn midpoint(&self) -> Vec2 {
        self.a.lerp(self.b, 0.5)
    }

    /// Unit normal on the right-hand side when walking from `a` to `b`.
    /// Falls back to `Vec2::UP` for a zero-length segment.
    pub fn right_normal(&self) -> Vec2 {
        self.direction().right_perpendicular().normalize_or(Vec2::UP)
    }

    /// Finds the point on the segment closest to `point`.
    /// Returns the point and its parameter `t` in `[0, 1]` along the segment.
    pub fn closest_point(&self, point: Vec2) -> (Vec2, f64) {
        let segment_vec = self.direction();
        let length_sq = segment_vec.magnitude_squared();
        if length_sq < 1e-24 {
            return (self.a, 0.0);
        }
        let t = ((point - self.a).dot(segment_vec) / length_sq).clamp(0.0, 1.0);
        (self.a + segment_vec * t, t)
    }

    pub fn distance_to(&self, point: Vec2) -> f64 {
        self.closest_point(point).0.distance(point)
    }
}
