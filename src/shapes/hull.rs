use std::borrow::Cow;

use super::line_segment::LineSegment;
use crate::math::{Rect, Vec2};

/// A convex core (a point, a segment, or a counter-clockwise convex polygon)
/// inflated by `radius`.
///
/// Every shape exposes itself as a hull so that one narrow-phase routine can
/// serve all shape pairs: a circle is a point with a radius, a capsule is a
/// segment with a radius, a polygon is itself with radius zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Hull<'a> {
    vertices: Cow<'a, [Vec2]>,
    radius: f64,
}

impl<'a> Hull<'a> {
    /// A disk: single core vertex.
    pub fn point(center: Vec2, radius: f64) -> Hull<'static> {
        Hull { vertices: Cow::Owned(vec![center]), radius }
    }

    /// A rounded segment.
    pub fn segment(a: Vec2, b: Vec2, radius: f64) -> Hull<'static> {
        Hull { vertices: Cow::Owned(vec![a, b]), radius }
    }

    /// A sharp convex polygon. `vertices` must be counter-clockwise.
    pub fn polygon(vertices: &'a [Vec2]) -> Hull<'a> {
        Hull { vertices: Cow::Borrowed(vertices), radius: 0.0 }
    }

    pub fn from_rect(rect: &Rect) -> Hull<'static> {
        Hull { vertices: Cow::Owned(rect.corners().to_vec()), radius: 0.0 }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of distinct edges of the core. A segment has one.
    pub fn edge_count(&self) -> usize {
        match self.vertices.len() {
            0 | 1 => 0,
            2 => 1,
            n => n,
        }
    }

    /// Edge `i`, running from vertex `i` to the next vertex.
    pub fn edge(&self, i: usize) -> LineSegment {
        let n = self.vertices.len();
        LineSegment::new(self.vertices[i], self.vertices[(i + 1) % n])
    }

    /// Outward normal of edge `i` (for a segment, its right-hand side).
    pub fn edge_normal(&self, i: usize) -> Vec2 {
        self.edge(i).right_normal()
    }

    /// Projects the inflated hull onto `axis` and returns the `(min, max)`
    /// interval. `axis` is expected to be unit length.
    pub fn project(&self, axis: Vec2) -> (f64, f64) {
        let mut min_proj = f64::INFINITY;
        let mut max_proj = f64::NEG_INFINITY;
        for vertex in self.vertices.iter() {
            let projection = vertex.dot(axis);
            min_proj = min_proj.min(projection);
            max_proj = max_proj.max(projection);
        }
        (min_proj - self.radius, max_proj + self.radius)
    }

    /// Index of the core vertex furthest along `direction`.
    /// Ties go to the lowest index.
    pub fn support_index(&self, direction: Vec2) -> usize {
        let mut best = 0;
        let mut best_proj = f64::NEG_INFINITY;
        for (i, vertex) in self.vertices.iter().enumerate() {
            let projection = vertex.dot(direction);
            if projection > best_proj {
                best_proj = projection;
                best = i;
            }
        }
        best
    }

    /// Closest point to `point` on the boundary of the core.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        match self.vertices.len() {
            0 => point,
            1 => self.vertices[0],
            _ => {
                let mut best = self.vertices[0];
                let mut best_dist_sq = f64::INFINITY;
                for i in 0..self.edge_count() {
                    let (candidate, _) = self.edge(i).closest_point(point);
                    let dist_sq = candidate.distance_squared(point);
                    if dist_sq < best_dist_sq {
                        best_dist_sq = dist_sq;
                        best = candidate;
                    }
                }
                best
            }
        }
    }

    /// Whether `point` is inside the core polygon (boundary included).
    /// Points and segments have no interior.
    pub fn core_contains(&self, point: Vec2) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        (0..self.edge_count()).all(|i| (point - self.vertices[i]).dot(self.edge_normal(i)) <= 0.0)
    }

    /// Signed distance from `point` to the boundary of the inflated hull,
    /// positive inside.
    pub fn clearance(&self, point: Vec2) -> f64 {
        if self.core_contains(point) {
            let depth = (0..self.edge_count())
                .map(|i| -(point - self.vertices[i]).dot(self.edge_normal(i)))
                .fold(f64::INFINITY, f64::min);
            self.radius + depth
        } else {
            self.radius - self.closest_point(point).distance(point)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    fn unit_square() -> Vec<Vec2> {
        vec![
            Vec2::new(-0.5, -0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(-0.5, 0.5),
        ]
    }

    #[test]
    fn test_hull_edge_counts() {
        assert_eq!(Hull::point(Vec2::ZERO, 1.0).edge_count(), 0);
        assert_eq!(Hull::segment(Vec2::ZERO, Vec2::X, 1.0).edge_count(), 1);
        let square = unit_square();
        assert_eq!(Hull::polygon(&square).edge_count(), 4);
    }

    #[test]
    fn test_hull_edge_normals_point_outward() {
        let square = unit_square();
        let hull = Hull::polygon(&square);
        assert_eq!(hull.edge_normal(0), Vec2::new(0.0, -1.0));
        assert_eq!(hull.edge_normal(1), Vec2::new(1.0, 0.0));
        assert_eq!(hull.edge_normal(2), Vec2::new(0.0, 1.0));
        assert_eq!(hull.edge_normal(3), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_hull_project_includes_radius() {
        let hull = Hull::segment(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), 0.5);
        let (min, max) = hull.project(Vec2::X);
        assert!((min + 1.5).abs() < EPSILON);
        assert!((max - 1.5).abs() < EPSILON);
        let (min, max) = hull.project(Vec2::UP);
        assert!((min + 0.5).abs() < EPSILON);
        assert!((max - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_hull_support_index() {
        let square = unit_square();
        let hull = Hull::polygon(&square);
        assert_eq!(hull.support_index(Vec2::new(1.0, 1.0)), 2);
        assert_eq!(hull.support_index(Vec2::new(-1.0, -1.0)), 0);
    }

    #[test]
    fn test_hull_closest_point_on_boundary() {
        let square = unit_square();
        let hull = Hull::polygon(&square);
        let p = hull.closest_point(Vec2::new(0.1, 0.0));
        assert!((p.x - 0.5).abs() < EPSILON);
        assert!(p.y.abs() < EPSILON);
        assert_eq!(Hull::point(Vec2::X, 1.0).closest_point(Vec2::ZERO), Vec2::X);
    }

    #[test]
    fn test_hull_clearance() {
        let square = unit_square();
        let hull = Hull::polygon(&square);
        assert!((hull.clearance(Vec2::ZERO) - 0.5).abs() < EPSILON);
        assert!(hull.clearance(Vec2::new(0.5, 0.2)).abs() < EPSILON);
        assert!((hull.clearance(Vec2::new(1.5, 0.0)) + 1.0).abs() < EPSILON);

        let disk = Hull::point(Vec2::ZERO, 2.0);
        assert!((disk.clearance(Vec2::new(1.0, 0.0)) - 1.0).abs() < EPSILON);
        assert!(!disk.core_contains(Vec2::ZERO));
    }
}
