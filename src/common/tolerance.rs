//! Numeric tolerances used by contact generation.

/// Tolerances controlling how contact features are picked and clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Maximum |cos| between an edge and the contact normal for the edge to
    /// be treated as a face contact rather than a vertex contact.
    pub angular: f64,
    /// Lengths at or below this are treated as zero (e.g. a clipped contact
    /// interval collapses to a single point).
    pub linear: f64,
}

impl Tolerance {
    /// Creates a tolerance set; values are clamped to sane ranges.
    pub fn new(angular: f64, linear: f64) -> Self {
        Tolerance {
            angular: angular.clamp(0.0, 1.0),
            linear: linear.max(0.0),
        }
    }
}

impl Default for Tolerance {
    /// About 0.06 degrees of slack for face contacts.
    fn default() -> Self {
        Tolerance {
            angular: 1e-3,
            linear: 1e-9,
        }
    }
}
