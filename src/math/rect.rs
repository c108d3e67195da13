// Axis-aligned rectangle used for shape bounds and broad-phase style queries.

use super::vec2::Vec2;

/// An axis-aligned rectangle defined by its minimum and maximum corners.
/// All predicates treat the rectangle as a closed region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Creates a rectangle from any two opposite corners.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Rect {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_center(center: Vec2, half_width: f64, half_height: f64) -> Self {
        let half = Vec2::new(half_width.abs(), half_height.abs());
        Rect { min: center - half, max: center + half }
    }

    /// Smallest rectangle enclosing all `points`, `None` for an empty slice.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut rect = Rect { min: *first, max: *first };
        for point in rest {
            rect.merge(&Rect { min: *point, max: *point });
        }
        Some(rect)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Corners in counter-clockwise order, starting at `min`.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// Touching edges count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Grows this rectangle to also cover `other`.
    pub fn merge(&mut self, other: &Rect) {
        self.min.x = self.min.x.min(other.min.x);
        self.min.y = self.min.y.min(other.min.y);
        self.max.x = self.max.x.max(other.max.x);
        self.max.y = self.max.y.max(other.max.y);
    }

    /// Copy grown by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> Rect {
        let m = Vec2::new(margin, margin);
        Rect::new(self.min - m, self.max + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Rect {
        Rect::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0))
    }

    #[test]
    fn test_rect_new_orders_corners() {
        let r = Rect::new(Vec2::new(2.0, -1.0), Vec2::new(-3.0, 4.0));
        assert_eq!(r.min, Vec2::new(-3.0, -1.0));
        assert_eq!(r.max, Vec2::new(2.0, 4.0));
        assert_eq!(r.width(), 5.0);
        assert_eq!(r.height(), 5.0);
    }

    #[test]
    fn test_rect_from_points() {
        assert!(Rect::from_points(&[]).is_none());
        let r = Rect::from_points(&[Vec2::new(1.0, 5.0), Vec2::new(-2.0, 0.0), Vec2::new(0.0, 2.0)]).unwrap();
        assert_eq!(r.min, Vec2::new(-2.0, 0.0));
        assert_eq!(r.max, Vec2::new(1.0, 5.0));
    }

    #[test]
    fn test_rect_overlap_is_closed() {
        let touching = Rect::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        let apart = Rect::new(Vec2::new(1.5, 0.0), Vec2::new(2.0, 1.0));
        assert!(unit().overlaps(&touching));
        assert!(touching.overlaps(&unit()));
        assert!(!unit().overlaps(&apart));
    }

    #[test]
    fn test_rect_contains() {
        assert!(unit().contains_point(Vec2::new(1.0, 0.5)));
        assert!(!unit().contains_point(Vec2::new(1.0001, 0.5)));
        let inner = Rect::from_center(Vec2::new(0.5, 0.5), 0.25, 0.25);
        assert!(unit().contains_rect(&inner));
        assert!(!inner.contains_rect(&unit()));
    }

    #[test]
    fn test_rect_merge_and_expand() {
        let mut r = unit();
        r.merge(&Rect::new(Vec2::new(3.0, 3.0), Vec2::new(4.0, 4.0)));
        assert_eq!(r.max, Vec2::new(4.0, 4.0));
        let e = unit().expanded(1.0);
        assert_eq!(e.min, Vec2::new(-1.0, -1.0));
        assert_eq!(e.center(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_rect_corners_ccw() {
        let c = unit().corners();
        let mut area = 0.0;
        for i in 0..4 {
            area += c[i].cross(c[(i + 1) % 4]);
        }
        assert!(area > 0.0);
    }
}
