use crate::common::Tolerance;
use crate::math::vec2::Vec2;
use crate::shapes::{Hull, LineSegment, Shape2D};
use super::manifold::{ContactPoint, Manifold};

// Slack for vertices lying exactly on the outer boundary.
const CONTAINMENT_SLOP: f64 = 1e-9;

/// Collects the axes the separating-axis test has to try for two hulls:
/// every edge normal of both cores, plus the direction from each core vertex
/// to the closest point of the other core (which covers the rounded parts).
fn candidate_axes(a: &Hull, b: &Hull) -> Vec<Vec2> {
    let mut axes = Vec::with_capacity(a.edge_count() + b.edge_count() + a.vertices().len() + b.vertices().len());
    for hull in [a, b] {
        for i in 0..hull.edge_count() {
            axes.push(hull.edge_normal(i));
        }
    }
    for (from, to) in [(a, b), (b, a)] {
        for &vertex in from.vertices() {
            if to.core_contains(vertex) {
                continue;
            }
            let towards = to.closest_point(vertex) - vertex;
            // Ignore axes that failed to normalize
            if towards.magnitude_squared() > 1e-24 {
                axes.push(towards.normalize());
            }
        }
    }
    axes
}

/// Separating-axis test between two hulls.
///
/// Returns the minimum translation as `(normal, depth)`, the normal pointing
/// from `a` towards `b`, or `None` if some axis separates them. Touching hulls
/// overlap with depth zero.
pub fn penetration(a: &Hull, b: &Hull) -> Option<(Vec2, f64)> {
    let mut axes = candidate_axes(a, b);
    if axes.is_empty() {
        // Coincident cores give no direction at all
        log::debug!("no separating axis candidates, falling back to {:?}", Vec2::UP);
        axes.push(Vec2::UP);
    }

    let mut min_overlap = f64::INFINITY;
    let mut mtv_axis = Vec2::UP;

    for axis in axes {
        let (min_a, max_a) = a.project(axis);
        let (min_b, max_b) = b.project(axis);

        let forward = max_a - min_b;
        let backward = max_b - min_a;

        if forward < 0.0 || backward < 0.0 {
            log::trace!("separated along {:?}", axis);
            return None;
        }

        let (overlap, normal) = if forward <= backward { (forward, axis) } else { (backward, -axis) };
        if overlap < min_overlap {
            min_overlap = overlap;
            mtv_axis = normal;
        }
    }

    Some((mtv_axis, min_overlap))
}

pub fn overlaps(a: &Hull, b: &Hull) -> bool {
    penetration(a, b).is_some()
}

/// Whether the inflated hull `inner` lies entirely inside `outer`.
///
/// Both regions are convex, so it is enough that every core vertex of
/// `inner` keeps at least `inner`'s radius of clearance inside `outer`.
pub fn contains(outer: &Hull, inner: &Hull) -> bool {
    inner
        .vertices()
        .iter()
        .all(|&vertex| outer.clearance(vertex) + CONTAINMENT_SLOP >= inner.radius())
}

/// The part of a hull core that faces a given direction.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Feature {
    Vertex(Vec2),
    Edge(LineSegment),
}

/// Support feature of `hull` along `direction`: an edge when one of the
/// edges next to the support vertex is perpendicular to `direction` within
/// `tolerance.angular`, the vertex otherwise.
fn support_feature(hull: &Hull, direction: Vec2, tolerance: &Tolerance) -> Feature {
    let vertices = hull.vertices();
    let index = hull.support_index(direction);
    let n = vertices.len();

    let neighbours = match n {
        0 | 1 => vec![],
        2 => vec![0],
        _ => vec![(index + n - 1) % n, index],
    };

    let mut best: Option<(f64, LineSegment)> = None;
    for edge_index in neighbours {
        let edge = hull.edge(edge_index);
        let along = edge.direction();
        if along.magnitude_squared() <= 1e-24 {
            continue;
        }
        let alignment = along.normalize().dot(direction).abs();
        if alignment <= tolerance.angular && best.map_or(true, |(current, _)| alignment < current) {
            best = Some((alignment, edge));
        }
    }

    match best {
        Some((_, edge)) => Feature::Edge(edge),
        None => Feature::Vertex(vertices[index]),
    }
}

/// Point of `edge` whose projection on `tangent` equals `s`.
fn point_at_tangent(edge: &LineSegment, tangent: Vec2, s: f64) -> Vec2 {
    let span = edge.direction().dot(tangent);
    if span.abs() < 1e-12 {
        return edge.a;
    }
    edge.a.lerp(edge.b, (s - edge.a.dot(tangent)) / span)
}

fn tangent_interval(edge: &LineSegment, tangent: Vec2) -> (f64, f64) {
    let (s0, s1) = (edge.a.dot(tangent), edge.b.dot(tangent));
    (s0.min(s1), s0.max(s1))
}

/// Clips two facing edges against each other along the tangent of
/// `normal`. Gives one contact per end of the shared span, or one in the
/// middle when the span is shorter than `tolerance.linear`. `None` when the
/// edges do not overlap along the tangent.
fn clip_edges(
    edge_a: &LineSegment,
    radius_a: f64,
    edge_b: &LineSegment,
    radius_b: f64,
    normal: Vec2,
    tolerance: &Tolerance,
) -> Option<Vec<ContactPoint>> {
    let tangent = normal.perpendicular();
    let (a_lo, a_hi) = tangent_interval(edge_a, tangent);
    let (b_lo, b_hi) = tangent_interval(edge_b, tangent);
    let lo = a_lo.max(b_lo);
    let hi = a_hi.min(b_hi);
    if hi < lo {
        return None;
    }

    let stations = if hi - lo <= tolerance.linear { vec![(lo + hi) / 2.0] } else { vec![lo, hi] };
    let points = stations
        .into_iter()
        .map(|s| {
            let on_a = point_at_tangent(edge_a, tangent, s) + normal * radius_a;
            let on_b = point_at_tangent(edge_b, tangent, s) - normal * radius_b;
            ContactPoint::new(on_a, normal, (on_b - on_a).dot(normal))
        })
        .collect();
    Some(points)
}

/// Contact points for hulls already known to overlap along `normal` by
/// `depth`.
fn contact_points(a: &Hull, b: &Hull, normal: Vec2, depth: f64, tolerance: &Tolerance) -> Vec<ContactPoint> {
    let feature_a = support_feature(a, normal, tolerance);
    let feature_b = support_feature(b, -normal, tolerance);

    if let (Feature::Edge(edge_a), Feature::Edge(edge_b)) = (feature_a, feature_b) {
        if let Some(points) = clip_edges(&edge_a, a.radius(), &edge_b, b.radius(), normal, tolerance) {
            return points;
        }
    }

    match (feature_a, feature_b) {
        (Feature::Vertex(vertex), _) => {
            vec![ContactPoint::new(vertex + normal * a.radius(), normal, -depth)]
        }
        _ => {
            let vertex_b = b.vertices()[b.support_index(-normal)];
            let point_on_b = vertex_b - normal * b.radius();
            vec![ContactPoint::new(point_on_b + normal * depth, normal, -depth)]
        }
    }
}

/// Narrow-phase contact between two shapes.
///
/// Returns `None` when the shapes are disjoint. Otherwise the manifold holds
/// one point for vertex contacts and up to two for edge-on-edge contacts,
/// with normals pointing out of `shape_a`.
pub fn contact<'a>(
    shape_a: &'a dyn Shape2D,
    shape_b: &'a dyn Shape2D,
    tolerance: &Tolerance,
) -> Option<Manifold<'a>> {
    if !shape_a.bounds().overlaps(&shape_b.bounds()) {
        return None;
    }

    let hull_a = shape_a.hull();
    let hull_b = shape_b.hull();
    let (normal, depth) = penetration(&hull_a, &hull_b)?;
    let points = contact_points(&hull_a, &hull_b, normal, depth, tolerance);
    log::debug!("contact along {:?}, depth {}, {} point(s)", normal, depth, points.len());
    Some(Manifold::from_parts(shape_a, shape_b, points))
}
