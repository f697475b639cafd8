//! Distance and nearest-point queries over whole geometries.
//!
//! The per-pair algorithms are `geo`'s (`EuclideanDistance`,
//! `ClosestPoint`, `line_intersection`); this module only picks the
//! candidate pairs and guards empty input.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Closest, ClosestPoint, Coord, EuclideanDistance, Geometry, Line, Point};

use crate::geometry::{segments, vertices, without_empty_points};
use crate::predicate::intersects;

/// Pair of closest points, first on `a`, second on `b`.
pub type NearestPair = (Coord<f64>, Coord<f64>);

pub fn closest_coord(closest: Closest<f64>) -> Option<Coord<f64>> {
    match closest {
        Closest::Intersection(p) | Closest::SinglePoint(p) => Some(p.0),
        Closest::Indeterminate => None,
    }
}

pub fn pair_distance(pair: &NearestPair) -> f64 {
    Point(pair.0).euclidean_distance(&Point(pair.1))
}

/// A point shared by two edges, if they touch.
pub fn edge_crossing(a: &Line<f64>, b: &Line<f64>) -> Option<Coord<f64>> {
    match line_intersection(*a, *b)? {
        LineIntersection::SinglePoint { intersection, .. } => Some(intersection),
        LineIntersection::Collinear { intersection } => Some(intersection.start),
    }
}

/// Keep the closer of `best` and `candidate`.
pub fn closer(best: Option<NearestPair>, candidate: NearestPair) -> Option<NearestPair> {
    match best {
        Some(current) if pair_distance(&current) <= pair_distance(&candidate) => Some(current),
        _ => Some(candidate),
    }
}

/// Closest pair found by projecting every vertex of each geometry onto the
/// other one.
fn vertex_projection(a: &Geometry<f64>, b: &Geometry<f64>) -> Option<NearestPair> {
    let mut best = None;
    for c in vertices(b) {
        if let Some(p) = closest_coord(a.closest_point(&Point(c))) {
            best = closer(best, (p, c));
        }
    }
    for c in vertices(a) {
        if let Some(q) = closest_coord(b.closest_point(&Point(c))) {
            best = closer(best, (c, q));
        }
    }
    best
}

/// Closest points between two geometries. Intersecting geometries yield a
/// common point twice.
///
/// `None` when either geometry is empty.
pub fn nearest_points(a: &Geometry<f64>, b: &Geometry<f64>) -> Option<NearestPair> {
    let (a, b) = (without_empty_points(a)?, without_empty_points(b)?);
    let best = vertex_projection(&a, &b);
    if best.map_or(false, |pair| pair_distance(&pair) == 0.0) || !intersects(&a, &b) {
        return best;
    }
    // Edges cross away from any vertex.
    let b_edges = segments(&b);
    segments(&a)
        .iter()
        .flat_map(|ea| b_edges.iter().filter_map(move |eb| edge_crossing(ea, eb)))
        .next()
        .map(|c| (c, c))
        .or(best)
}

/// Euclidean distance between two geometries; zero when either is empty.
pub fn distance(a: &Geometry<f64>, b: &Geometry<f64>) -> f64 {
    match (without_empty_points(a), without_empty_points(b)) {
        (Some(a), Some(b)) => a.euclidean_distance(b.as_ref()),
        _ => 0.0,
    }
}
