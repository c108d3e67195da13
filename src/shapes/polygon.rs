use std::f64::consts::TAU;

use super::{wrap_index, Hull, Shape2D};
use crate::collision::RayEntry;
use crate::error::{GeometryError, Result};
use crate::math::{Ray2, Rect, Transform, Vec2};

/// A convex polygon in world space.
///
/// Vertices are stored counter-clockwise whatever order they were given in.
/// The boundary index starts at vertex 0 and follows the edges by arc length.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    // Outward unit normal of the edge starting at each vertex.
    normals: Vec<Vec2>,
    // Arc length from vertex 0 to each vertex, plus the perimeter at the end.
    arc_lengths: Vec<f64>,
    bounds: Rect,
    centroid: Vec2,
}

impl Polygon {
    /// Creates a polygon from its vertices, in either winding order.
    ///
    /// Consecutive duplicate vertices are dropped. Fails if fewer than three
    /// distinct vertices remain, if the area is zero, or if the outline is not
    /// convex.
    pub fn new(vertices: Vec<Vec2>) -> Result<Self> {
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        let mut vertices = vertices;
        vertices.dedup();
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices { count: vertices.len() });
        }

        let bounds = Rect::from_points(&vertices).ok_or(GeometryError::TooFewVertices { count: 0 })?;
        // Areas and edge cross products grow with the square of the outline's size
        let scale = bounds.width().max(bounds.height()).powi(2);

        let area = signed_area(&vertices);
        if area.abs() <= 1e-12 * scale {
            return Err(GeometryError::DegeneratePolygon);
        }
        if area < 0.0 {
            vertices.reverse();
        }

        let n = vertices.len();
        let mut turning = 0.0;
        for i in 0..n {
            let e1 = vertices[(i + 1) % n] - vertices[i];
            let e2 = vertices[(i + 2) % n] - vertices[(i + 1) % n];
            let cross = e1.cross(e2);
            if cross < -1e-12 * scale {
                return Err(GeometryError::NonConvexPolygon);
            }
            turning += cross.atan2(e1.dot(e2));
        }
        // A convex outline turns exactly once; star outlines wind around several times
        if (turning - TAU).abs() > 1e-6 {
            return Err(GeometryError::NonConvexPolygon);
        }

        let normals = outward_normals(&vertices);
        Ok(Self::assemble(vertices, normals, bounds))
    }

    /// Axis-aligned rectangle centered at `center`.
    pub fn rectangle(center: Vec2, half_width: f64, half_height: f64) -> Result<Self> {
        Self::new(Rect::from_center(center, half_width, half_height).corners().to_vec())
    }

    // Vertices must already be deduplicated, convex and counter-clockwise.
    fn assemble(vertices: Vec<Vec2>, normals: Vec<Vec2>, bounds: Rect) -> Self {
        let n = vertices.len();
        let mut arc_lengths = Vec::with_capacity(n + 1);
        let mut travelled = 0.0;
        for i in 0..n {
            arc_lengths.push(travelled);
            travelled += vertices[i].distance(vertices[(i + 1) % n]);
        }
        arc_lengths.push(travelled);
        let centroid = centroid(&vertices);

        Polygon { vertices, normals, arc_lengths, bounds, centroid }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Outward unit normals, one per edge; edge `i` runs from vertex `i` to
    /// vertex `i + 1`.
    pub fn edge_normals(&self) -> &[Vec2] {
        &self.normals
    }

    pub fn perimeter(&self) -> f64 {
        self.arc_lengths[self.vertices.len()]
    }

    pub fn area(&self) -> f64 {
        signed_area(&self.vertices).abs()
    }

    pub fn transformed(&self, transform: &Transform) -> Polygon {
        // Rotation and translation keep the winding, so no revalidation.
        let vertices: Vec<Vec2> = self.vertices.iter().map(|v| transform.apply(*v)).collect();
        let normals = self.normals.iter().map(|n| transform.apply_vector(*n)).collect();
        let bounds = Rect::from_points(&vertices).unwrap_or(self.bounds);
        Self::assemble(vertices, normals, bounds)
    }

    /// Boundary index of `point`, which must lie on edge `edge`.
    fn index_on_edge(&self, edge: usize, point: Vec2) -> f64 {
        let along = self.vertices[edge].distance(point);
        wrap_index((self.arc_lengths[edge] + along) / self.perimeter())
    }

    /// Edge containing arc-length position `s` and the distance along it.
    fn locate(&self, index: f64) -> (usize, f64) {
        let s = wrap_index(index) * self.perimeter();
        let n = self.vertices.len();
        let edge = self.arc_lengths[..n].partition_point(|&len| len <= s).saturating_sub(1);
        (edge, s - self.arc_lengths[edge])
    }
}

/// Outward unit normal of each edge of a counter-clockwise outline.
fn outward_normals(vertices: &[Vec2]) -> Vec<Vec2> {
    let n = vertices.len();
    (0..n)
        .map(|i| (vertices[(i + 1) % n] - vertices[i]).right_perpendicular().normalize_or(Vec2::UP))
        .collect()
}

/// Shoelace formula, positive for counter-clockwise outlines.
fn signed_area(vertices: &[Vec2]) -> f64 {
    let n = vertices.len();
    let mut area = 0.0;
    for i in 0..n {
        area += vertices[i].cross(vertices[(i + 1) % n]);
    }
    area / 2.0
}

/// Area-weighted centroid, computed as a fan of triangles from vertex 0.
fn centroid(vertices: &[Vec2]) -> Vec2 {
    let origin = vertices[0];
    let mut centroid = Vec2::ZERO;
    let mut signed_area_sum = 0.0;

    for i in 1..(vertices.len() - 1) {
        let v2 = vertices[i];
        let v3 = vertices[i + 1];
        let triangle_area = (v2 - origin).cross(v3 - origin) / 2.0;
        signed_area_sum += triangle_area;
        centroid += (origin + v2 + v3) / 3.0 * triangle_area;
    }

    centroid / signed_area_sum
}

impl Shape2D for Polygon {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn center(&self) -> Vec2 {
        self.centroid
    }

    fn point_at(&self, index: f64) -> Vec2 {
        let (edge, along) = self.locate(index);
        let start = self.vertices[edge];
        let end = self.vertices[(edge + 1) % self.vertices.len()];
        let length = self.arc_lengths[edge + 1] - self.arc_lengths[edge];
        if length == 0.0 {
            return start;
        }
        start.lerp(end, along / length)
    }

    fn normal_at(&self, index: f64) -> Vec2 {
        self.normals[self.locate(index).0]
    }

    fn hull(&self) -> Hull<'_> {
        Hull::polygon(&self.vertices)
    }

    // Cyrus-Beck clipping against the edge half-planes. The ray enters at the
    // latest entering crossing, provided that comes strictly before the
    // earliest exiting one; equality is a graze through a vertex.
    fn ray_entry(&self, ray: &Ray2, max_length: f64) -> Option<RayEntry> {
        let origin = ray.origin();
        let direction = ray.direction();
        let mut t_enter = f64::NEG_INFINITY;
        let mut t_exit = f64::INFINITY;
        let mut enter_edge = None;

        for (i, (vertex, normal)) in self.vertices.iter().zip(&self.normals).enumerate() {
            let denom = normal.dot(direction);
            let num = normal.dot(*vertex - origin);
            if denom == 0.0 {
                // parallel: outside this half-plane, or sliding along the edge
                if num <= 0.0 {
                    return None;
                }
                continue;
            }
            let t = num / denom;
            if denom < 0.0 {
                if t > t_enter {
                    t_enter = t;
                    enter_edge = Some(i);
                }
            } else {
                t_exit = t_exit.min(t);
            }
        }

        let edge = enter_edge?;
        if t_enter < 0.0 || t_enter >= t_exit || t_enter > max_length {
            return None;
        }
        let point = ray.point_at(t_enter);
        Some(RayEntry {
            distance: t_enter,
            normal: self.normals[edge],
            shape_index: self.index_on_edge(edge, point),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;
    const EPSILON: f64 = 1e-9;

    // Unit square centered at origin
    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Vec2::new(-0.5, -0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(-0.5, 0.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_polygon_new() {
        let polygon = Polygon::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]).unwrap();
        assert_eq!(polygon.vertices().len(), 3);
        assert!((polygon.area() - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_polygon_new_too_few_vertices() {
        let result = Polygon::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)]);
        assert_eq!(result, Err(GeometryError::TooFewVertices { count: 2 }));

        // Duplicates do not count
        let result = Polygon::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0)]);
        assert_eq!(result, Err(GeometryError::TooFewVertices { count: 2 }));
    }

    #[test]
    fn test_polygon_new_rejects_degenerate_and_concave() {
        let collinear = Polygon::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)]);
        assert_eq!(collinear, Err(GeometryError::DegeneratePolygon));

        let arrow = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(1.0, 0.5),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ]);
        assert_eq!(arrow, Err(GeometryError::NonConvexPolygon));

        // Only left turns, but the outline winds around twice
        let corner = |k: usize| {
            let angle = FRAC_PI_2 + k as f64 * TAU / 5.0;
            Vec2::new(angle.cos(), angle.sin())
        };
        let pentagram = Polygon::new([0, 2, 4, 1, 3].iter().map(|&k| corner(k)).collect());
        assert_eq!(pentagram, Err(GeometryError::NonConvexPolygon));

        let pentagon = Polygon::new((0..5).map(corner).collect()).unwrap();
        assert!(pentagon.contains_point(Vec2::new(0.0, 0.9)));
    }

    #[test]
    fn test_polygon_new_accepts_tiny_outlines() {
        let tiny = Polygon::rectangle(Vec2::ZERO, 5e-8, 5e-8).unwrap();
        assert!((tiny.area() - 1e-14).abs() < 1e-20);
        assert!(tiny.contains_point(Vec2::new(4e-8, -4e-8)));

        let sliver = Polygon::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1e-7, 0.0), Vec2::new(2e-7, 1e-30)]);
        assert_eq!(sliver, Err(GeometryError::DegeneratePolygon));
    }

    #[test]
    fn test_polygon_transformed_carries_normals_and_bounds() {
        let square = unit_square();
        let transform = Transform::new(Vec2::new(3.0, -2.0), FRAC_PI_2 / 3.0);
        let moved = square.transformed(&transform);
        let rebuilt = Polygon::new(moved.vertices().to_vec()).unwrap();

        for (carried, recomputed) in moved.edge_normals().iter().zip(rebuilt.edge_normals()) {
            assert!(carried.distance(*recomputed) < EPSILON);
        }
        assert!(moved.bounds().min.distance(rebuilt.bounds().min) < EPSILON);
        assert!(moved.bounds().max.distance(rebuilt.bounds().max) < EPSILON);
        assert!((moved.perimeter() - 4.0).abs() < EPSILON);
        assert!(moved.center().distance(Vec2::new(3.0, -2.0)) < EPSILON);
    }

    #[test]
    fn test_polygon_clockwise_input_is_reordered() {
        let cw = Polygon::new(vec![
            Vec2::new(-0.5, -0.5),
            Vec2::new(-0.5, 0.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(0.5, -0.5),
        ])
        .unwrap();
        assert!(signed_area(cw.vertices()) > 0.0);
        for (normal, vertex) in cw.edge_normals().iter().zip(cw.vertices()) {
            // outward normals point away from the centroid
            assert!(normal.dot(*vertex - cw.center()) > 0.0);
        }
    }

    #[test]
    fn test_polygon_centroid_square_offset() {
        let polygon = Polygon::rectangle(Vec2::new(10.5, -4.5), 0.5, 0.5).unwrap();
        let centroid = polygon.center();
        assert!((centroid.x - 10.5).abs() < EPSILON);
        assert!((centroid.y + 4.5).abs() < EPSILON);
    }

    #[test]
    fn test_polygon_centroid_triangle() {
        let polygon = Polygon::new(vec![Vec2::new(0.0, 0.0), Vec2::new(3.0, 0.0), Vec2::new(0.0, 3.0)]).unwrap();
        let centroid = polygon.center();
        assert!((centroid.x - 1.0).abs() < EPSILON);
        assert!((centroid.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_polygon_boundary_parameterization() {
        let square = unit_square();
        assert!((square.perimeter() - 4.0).abs() < EPSILON);
        assert!(square.point_at(0.0).distance(Vec2::new(-0.5, -0.5)) < EPSILON);
        assert!(square.point_at(0.125).distance(Vec2::new(0.0, -0.5)) < EPSILON);
        assert!(square.point_at(0.25).distance(Vec2::new(0.5, -0.5)) < EPSILON);
        assert!(square.point_at(0.625).distance(Vec2::new(0.0, 0.5)) < EPSILON);
        assert!(square.point_at(1.0).distance(square.point_at(0.0)) < EPSILON);
        assert_eq!(square.normal_at(0.1), Vec2::new(0.0, -1.0));
        assert_eq!(square.normal_at(0.3), Vec2::new(1.0, 0.0));
        // at a vertex, the edge starting there wins
        assert_eq!(square.normal_at(0.5), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_polygon_bounds() {
        let triangle = Polygon::new(vec![Vec2::new(1.0, 0.0), Vec2::new(4.0, 1.0), Vec2::new(2.0, 5.0)]).unwrap();
        let b = triangle.bounds();
        assert_eq!(b.min, Vec2::new(1.0, 0.0));
        assert_eq!(b.max, Vec2::new(4.0, 5.0));
    }

    #[test]
    fn test_polygon_raycast_hits_left_face() {
        let square = unit_square();
        let ray = Ray2::new(Vec2::new(-5.0, 0.0), Vec2::X).unwrap();
        let entry = square.ray_entry(&ray, 10.0).unwrap();
        assert!((entry.distance - 4.5).abs() < EPSILON);
        assert_eq!(entry.normal, Vec2::new(-1.0, 0.0));
        // midpoint of the last edge: (3 + 0.5) / 4
        assert!((entry.shape_index - 0.875).abs() < EPSILON);
        assert!(square.point_at(entry.shape_index).distance(ray.point_at(entry.distance)) < EPSILON);
    }

    #[test]
    fn test_polygon_raycast_misses() {
        let square = unit_square();
        let short = Ray2::new(Vec2::new(-5.0, 0.0), Vec2::X).unwrap();
        assert!(square.ray_entry(&short, 4.0).is_none());

        let inside = Ray2::new(Vec2::ZERO, Vec2::X).unwrap();
        assert!(square.ray_entry(&inside, 10.0).is_none());

        let along_edge = Ray2::new(Vec2::new(-5.0, 0.5), Vec2::X).unwrap();
        assert!(square.ray_entry(&along_edge, 10.0).is_none());

        // touches only the corner (0.5, 0.5)
        let corner = Ray2::between(Vec2::new(1.5, -0.5), Vec2::new(0.5, 0.5)).unwrap();
        assert!(square.ray_entry(&corner, 10.0).is_none());

        let behind = Ray2::new(Vec2::new(5.0, 0.0), Vec2::X).unwrap();
        assert!(square.ray_entry(&behind, 10.0).is_none());
    }

    #[test]
    fn test_polygon_raycast_diagonal() {
        let square = unit_square();
        // crosses the line y = -0.5 outside the square, enters through the left face
        let ray = Ray2::new(Vec2::new(-2.0, -1.2), Vec2::new(1.0, 1.0)).unwrap();
        let entry = square.ray_entry(&ray, 10.0).unwrap();
        assert!((entry.distance - 1.5 * 2f64.sqrt()).abs() < EPSILON);
        assert!(ray.point_at(entry.distance).distance(Vec2::new(-0.5, 0.3)) < EPSILON);
        assert_eq!(entry.normal, Vec2::new(-1.0, 0.0));
        assert!((entry.shape_index - 0.8).abs() < EPSILON);
    }
}
