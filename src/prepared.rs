//! Prepared geometries and the single-slot cache that reuses them.
//!
//! A [`PreparedGeometry`] indexes the edges of one geometry in an R-tree so
//! that repeated predicate and distance queries against it skip most of
//! the work. [`PreparedCache`] keeps the most recent one, keyed by the
//! [`GeometryId`] of the operand it was built from.

use geo::{BoundingRect, ClosestPoint, Coord, EuclideanDistance, Geometry, Intersects, Line, Point, Rect};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use crate::error::OpResult;
use crate::geometry::{segments, vertices, without_empty_points};
use crate::measure::{closer, closest_coord, edge_crossing, pair_distance, NearestPair};
use crate::operand::{GeometryId, Operand};
use crate::predicate::{self, relate_matches, CONTAINS, CONTAINS_PROPERLY, COVERS};

/// An indexed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge(pub Line<f64>);

impl RTreeObject for Edge {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.0.start.x, self.0.start.y],
            [self.0.end.x, self.0.end.y],
        )
    }
}

impl PointDistance for Edge {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d = self.0.euclidean_distance(&Point::new(point[0], point[1]));
        d * d
    }
}

impl Edge {
    fn closest_to(&self, c: Coord<f64>) -> Option<Coord<f64>> {
        closest_coord(self.0.closest_point(&Point(c)))
    }
}

fn edge_index(geometry: &Geometry<f64>) -> RTree<Edge> {
    RTree::bulk_load(segments(geometry).into_iter().map(Edge).collect())
}

/// Bounding rectangle, ignoring empty points.
fn extent(geometry: &Geometry<f64>) -> Option<Rect<f64>> {
    without_empty_points(geometry).and_then(|g| g.bounding_rect())
}

fn rect_contains(outer: &Rect<f64>, inner: &Rect<f64>) -> bool {
    outer.min().x <= inner.min().x
        && outer.min().y <= inner.min().y
        && outer.max().x >= inner.max().x
        && outer.max().y >= inner.max().y
}

/// Geometry A with its edge index and bounds.
pub struct PreparedGeometry {
    geometry: Geometry<f64>,
    bounds: Option<Rect<f64>>,
    vertices: Vec<Coord<f64>>,
    edges: RTree<Edge>,
}

impl PreparedGeometry {
    pub fn new(geometry: &Geometry<f64>) -> Self {
        Self {
            bounds: extent(geometry),
            vertices: vertices(geometry),
            edges: edge_index(geometry),
            geometry: geometry.clone(),
        }
    }

    pub fn geometry(&self) -> &Geometry<f64> {
        &self.geometry
    }

    fn envelope_covers(&self, other: &Geometry<f64>) -> bool {
        match (&self.bounds, extent(other)) {
            (Some(outer), Some(inner)) => rect_contains(outer, &inner),
            _ => false,
        }
    }

    pub fn intersects(&self, other: &Geometry<f64>) -> bool {
        let (Some(bounds), Some(other_bounds)) = (&self.bounds, extent(other)) else {
            return false;
        };
        if !bounds.intersects(&other_bounds) {
            return false;
        }
        for edge in segments(other) {
            let window = Edge(edge).envelope();
            let crossing = self
                .edges
                .locate_in_envelope_intersecting(&window)
                .any(|candidate| edge_crossing(&candidate.0, &edge).is_some());
            if crossing {
                return true;
            }
        }
        // No edges cross, so only containment can make them intersect.
        predicate::intersects(&self.geometry, other)
    }

    pub fn contains(&self, other: &Geometry<f64>) -> OpResult<bool> {
        if !self.envelope_covers(other) {
            return Ok(false);
        }
        relate_matches(&self.geometry, other, CONTAINS)
    }

    pub fn contains_properly(&self, other: &Geometry<f64>) -> OpResult<bool> {
        if !self.envelope_covers(other) {
            return Ok(false);
        }
        relate_matches(&self.geometry, other, CONTAINS_PROPERLY)
    }

    pub fn covers(&self, other: &Geometry<f64>) -> OpResult<bool> {
        if !self.envelope_covers(other) {
            return Ok(false);
        }
        relate_matches(&self.geometry, other, COVERS)
    }

    /// Closest points, first on the prepared geometry, second on `other`.
    ///
    /// The edge index picks the candidate edge for each vertex; the closest
    /// point on that edge comes from `geo`.
    pub fn nearest_points(&self, other: &Geometry<f64>) -> Option<NearestPair> {
        let other_vertices = vertices(other);
        if self.vertices.is_empty() || other_vertices.is_empty() {
            return None;
        }
        if self.intersects(other) {
            if let Some(pair) = crate::measure::nearest_points(&self.geometry, other) {
                return Some(pair);
            }
        }

        let mut best = None;
        for c in &other_vertices {
            if let Some(p) = self
                .edges
                .nearest_neighbor(&[c.x, c.y])
                .and_then(|edge| edge.closest_to(*c))
            {
                best = closer(best, (p, *c));
            }
        }
        let other_edges = edge_index(other);
        for c in &self.vertices {
            if let Some(q) = other_edges
                .nearest_neighbor(&[c.x, c.y])
                .and_then(|edge| edge.closest_to(*c))
            {
                best = closer(best, (*c, q));
            }
        }
        best
    }

    pub fn distance(&self, other: &Geometry<f64>) -> f64 {
        self.nearest_points(other)
            .map_or(0.0, |pair| pair_distance(&pair))
    }
}

/// Single-slot cache of the most recently prepared operand.
///
/// Reuse is keyed on operand identity, not value: a different operand with
/// equal coordinates still triggers a rebuild.
#[derive(Default)]
pub struct PreparedCache {
    slot: Option<(GeometryId, PreparedGeometry)>,
    rebuilds: usize,
}

impl PreparedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepared form of `operand`, rebuilt only when the cached identity
    /// differs.
    pub fn prepare(&mut self, operand: &Operand) -> &PreparedGeometry {
        if self.cached_id() != Some(operand.id()) {
            debug!(id = ?operand.id(), "rebuilding prepared geometry");
            self.slot = None;
            self.rebuilds += 1;
        }
        let (_, prepared) = self
            .slot
            .get_or_insert_with(|| (operand.id(), PreparedGeometry::new(operand.geometry())));
        prepared
    }

    /// How many times a prepared form has been built.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    pub fn cached_id(&self) -> Option<GeometryId> {
        self.slot.as_ref().map(|(id, _)| *id)
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
