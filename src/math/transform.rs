use super::vec2::Vec2;

/// Rigid placement of a shape: rotate about the local origin, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64, // radians
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    /// Maps a local point into world space.
    pub fn apply(self, point: Vec2) -> Vec2 {
        point.rotate(self.rotation) + self.position
    }

    /// Maps a local direction into world space. Directions ignore translation,
    /// so normals stay unit length.
    pub fn apply_vector(self, vector: Vec2) -> Vec2 {
        vector.rotate(self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_transform_identity() {
        let t = Transform::new(Vec2::ZERO, 0.0);
        let p = Vec2::new(5.0, -3.0);
        assert!(t.apply(p).distance(p) < EPSILON);
        assert!(t.apply_vector(p).distance(p) < EPSILON);
    }

    #[test]
    fn test_transform_apply_combined() {
        // Rotation of (1,0) -> (0,1), then translation -> (10, 6)
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 2.0);
        let tp = t.apply(Vec2::new(1.0, 0.0));
        assert!((tp.x - 10.0).abs() < EPSILON);
        assert!((tp.y - 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_vector_ignores_translation() {
        let t = Transform::new(Vec2::new(10.0, 5.0), PI / 2.0);
        let v = t.apply_vector(Vec2::X);
        assert!(v.x.abs() < EPSILON);
        assert!((v.y - 1.0).abs() < EPSILON);
    }
}
