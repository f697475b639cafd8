//! Built-in geometry operations.
//!
//! The algorithms come from `geo`; this module only adapts them to the
//! operation families in [`Implementation`] and normalizes their results.

use geo::{
    Area, BooleanOps, BoundingRect, Centroid, ConvexHull, Coord, EuclideanLength, Geometry,
    GeometryCollection, InteriorPoint, LineString, MapCoords, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Simplify, TriangulateSpade,
};

use crate::error::{OpError, OpResult};
use crate::geometry::{
    empty_point, empty_polygon, num_points, type_name, vertices, without_empty_points,
};
use crate::measure;
use crate::outcome::Outcome;
use crate::predicate::{self, relate_matches, relate_matrix, CONTAINS, COVERS};
use crate::prepared::PreparedGeometry;
use crate::registry::Implementation;

/// One entry of the built-in table. Entries without a description get the
/// generated `computes <name> for geometry A`.
pub(crate) struct Builtin {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub implementation: Implementation,
}

const fn unary(name: &'static str, f: crate::registry::UnaryFn) -> Builtin {
    Builtin {
        name,
        description: None,
        implementation: Implementation::Unary(f),
    }
}

const fn described(
    name: &'static str,
    description: &'static str,
    implementation: Implementation,
) -> Builtin {
    Builtin {
        name,
        description: Some(description),
        implementation,
    }
}

pub(crate) const BUILTINS: &[Builtin] = &[
    unary("area", area),
    unary("boundary", boundary),
    unary("centroid", centroid),
    unary("convexHull", convex_hull),
    unary("copy", copy),
    described(
        "delaunay",
        "computes the Delaunay Triangulation of geometry A vertices",
        Implementation::Unary(delaunay),
    ),
    unary("envelope", envelope),
    unary("interiorPoint", interior_point),
    unary("length", length),
    described("numPoints", "counts the vertices of geometry A", Implementation::Unary(num_points_op)),
    described("reverse", "reverses geometry A", Implementation::Unary(reverse)),
    unary("unaryUnion", unary_union),
    described(
        "reducePrecision",
        "reduces precision of geometry to a precision scale factor",
        Implementation::UnaryWithParam(reduce_precision),
    ),
    described(
        "simplify",
        "simplifies geometry A to within a distance tolerance",
        Implementation::UnaryWithParam(simplify),
    ),
    described("contains", "tests if geometry A contains geometry B", Implementation::Binary(contains)),
    described("covers", "tests if geometry A covers geometry B", Implementation::Binary(covers)),
    described("intersects", "tests if geometry A and B intersect", Implementation::Binary(intersects)),
    described(
        "distance",
        "computes distance between geometry A and B",
        Implementation::Binary(distance),
    ),
    described(
        "nearestPoints",
        "computes nearest points of geometry A and B",
        Implementation::Binary(nearest_points),
    ),
    described("relate", "computes DE-9IM matrix for geometry A and B", Implementation::Binary(relate)),
    described(
        "difference",
        "computes difference of geometry A from B",
        Implementation::Binary(difference),
    ),
    described(
        "intersection",
        "computes intersection of geometry A and B",
        Implementation::Binary(intersection),
    ),
    described(
        "symDifference",
        "computes symmetric difference of geometry A and B",
        Implementation::Binary(sym_difference),
    ),
    described("union", "computes union of geometry A and B", Implementation::Binary(union)),
    described(
        "differenceSR",
        "computes difference of geometry A from B, snap-rounding to a precision scale factor",
        Implementation::BinaryWithParam(difference_sr),
    ),
    described(
        "intersectionSR",
        "computes intersection of geometry A and B, snap-rounding to a precision scale factor",
        Implementation::BinaryWithParam(intersection_sr),
    ),
    described(
        "symDifferenceSR",
        "computes symmetric difference of geometry A and B, snap-rounding to a precision scale factor",
        Implementation::BinaryWithParam(sym_difference_sr),
    ),
    described(
        "unionSR",
        "computes union of geometry A and B, snap-rounding to a precision scale factor",
        Implementation::BinaryWithParam(union_sr),
    ),
    described(
        "containsPrep",
        "tests if geometry A contains geometry B, using PreparedGeometry",
        Implementation::Prepared(contains_prep),
    ),
    described(
        "containsProperlyPrep",
        "tests if geometry A properly contains geometry B using PreparedGeometry",
        Implementation::Prepared(contains_properly_prep),
    ),
    described(
        "coversPrep",
        "tests if geometry A covers geometry B using PreparedGeometry",
        Implementation::Prepared(covers_prep),
    ),
    described(
        "intersectsPrep",
        "tests if geometry A intersects B using PreparedGeometry",
        Implementation::Prepared(intersects_prep),
    ),
    described(
        "distancePrep",
        "computes distance between geometry A and B using PreparedGeometry",
        Implementation::Prepared(distance_prep),
    ),
    described(
        "nearestPointsPrep",
        "computes nearest points of geometry A and B using PreparedGeometry",
        Implementation::Prepared(nearest_points_prep),
    ),
];

// Unary

fn area(g: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(g.unsigned_area().into())
}

fn boundary(g: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(boundary_of(g)?.into())
}

fn boundary_of(g: &Geometry<f64>) -> OpResult<Geometry<f64>> {
    let geometry = match g {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {
            Geometry::GeometryCollection(GeometryCollection(vec![]))
        }
        Geometry::Line(line) => line_endpoints(&[LineString::from(vec![line.start, line.end])]),
        Geometry::LineString(ls) => line_endpoints(std::slice::from_ref(ls)),
        Geometry::MultiLineString(mls) => line_endpoints(&mls.0),
        Geometry::Polygon(polygon) => polygon_boundary(polygon),
        Geometry::Rect(rect) => polygon_boundary(&rect.to_polygon()),
        Geometry::Triangle(triangle) => polygon_boundary(&triangle.to_polygon()),
        Geometry::MultiPolygon(mp) => Geometry::MultiLineString(MultiLineString(
            mp.0.iter().flat_map(polygon_rings).collect(),
        )),
        Geometry::GeometryCollection(_) => {
            return Err(OpError::Unsupported {
                operation: "boundary",
                geometry: "GeometryCollection",
            })
        }
    };
    Ok(geometry)
}

fn polygon_rings(polygon: &Polygon<f64>) -> Vec<LineString<f64>> {
    std::iter::once(polygon.exterior().clone())
        .chain(polygon.interiors().iter().cloned())
        .collect()
}

fn polygon_boundary(polygon: &Polygon<f64>) -> Geometry<f64> {
    if polygon.interiors().is_empty() {
        Geometry::LineString(polygon.exterior().clone())
    } else {
        Geometry::MultiLineString(MultiLineString(polygon_rings(polygon)))
    }
}

/// Endpoints under the mod-2 rule: an endpoint shared by an even number of
/// open lines is interior.
fn line_endpoints(lines: &[LineString<f64>]) -> Geometry<f64> {
    let mut counts: Vec<(Coord<f64>, usize)> = Vec::new();
    for ls in lines {
        if ls.0.is_empty() || ls.is_closed() {
            continue;
        }
        for end in [ls.0[0], ls.0[ls.0.len() - 1]] {
            match counts.iter_mut().find(|(c, _)| *c == end) {
                Some((_, count)) => *count += 1,
                None => counts.push((end, 1)),
            }
        }
    }
    Geometry::MultiPoint(MultiPoint(
        counts
            .into_iter()
            .filter(|(_, count)| count % 2 == 1)
            .map(|(c, _)| Point(c))
            .collect(),
    ))
}

fn centroid(g: &Geometry<f64>) -> OpResult<Outcome> {
    let point = g.centroid().unwrap_or_else(empty_point);
    Ok(Geometry::Point(point).into())
}

fn distinct_vertices(g: &Geometry<f64>) -> Vec<Coord<f64>> {
    let mut distinct: Vec<Coord<f64>> = Vec::new();
    for c in vertices(g) {
        if !distinct.contains(&c) {
            distinct.push(c);
        }
    }
    distinct
}

fn convex_hull(g: &Geometry<f64>) -> OpResult<Outcome> {
    let distinct = distinct_vertices(g);
    let hull = match distinct.len() {
        0 => Geometry::GeometryCollection(GeometryCollection(vec![])),
        1 => Geometry::Point(Point(distinct[0])),
        2 => Geometry::LineString(LineString::new(distinct)),
        _ => Geometry::Polygon(
            MultiPoint(distinct.into_iter().map(Point).collect()).convex_hull(),
        ),
    };
    Ok(hull.into())
}

fn copy(g: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(g.clone().into())
}

fn envelope(g: &Geometry<f64>) -> OpResult<Outcome> {
    let geometry = match g.bounding_rect() {
        None => Geometry::Polygon(empty_polygon()),
        Some(rect) if rect.min() == rect.max() => Geometry::Point(Point(rect.min())),
        Some(rect) if rect.width() == 0.0 || rect.height() == 0.0 => {
            Geometry::LineString(LineString::new(vec![rect.min(), rect.max()]))
        }
        Some(rect) => Geometry::Polygon(rect.to_polygon()),
    };
    Ok(geometry.into())
}

/// Delaunay triangles over the distinct vertices of A, each an owned
/// polygon.
fn delaunay(g: &Geometry<f64>) -> OpResult<Outcome> {
    let sites = distinct_vertices(g);
    if sites.len() < 3 {
        return Ok(Vec::<Geometry<f64>>::new().into());
    }
    let triangles = LineString::new(sites)
        .unconstrained_triangulation()
        .map_err(|e| OpError::Triangulation(format!("{:?}", e)))?;
    let polygons: Vec<Geometry<f64>> = triangles
        .into_iter()
        .map(|triangle| Geometry::Polygon(triangle.to_polygon()))
        .collect();
    Ok(polygons.into())
}

fn interior_point(g: &Geometry<f64>) -> OpResult<Outcome> {
    let point = without_empty_points(g)
        .and_then(|g| g.interior_point())
        .unwrap_or_else(empty_point);
    Ok(Geometry::Point(point).into())
}

/// Line length, or perimeter for polygons.
fn length_of(g: &Geometry<f64>) -> f64 {
    match g {
        Geometry::Point(_) | Geometry::MultiPoint(_) => 0.0,
        Geometry::Line(line) => line.euclidean_length(),
        Geometry::LineString(ls) => ls.euclidean_length(),
        Geometry::MultiLineString(mls) => mls.euclidean_length(),
        Geometry::Polygon(polygon) => polygon_rings(polygon).iter().map(|r| r.euclidean_length()).sum(),
        Geometry::MultiPolygon(mp) => mp
            .0
            .iter()
            .flat_map(polygon_rings)
            .map(|r| r.euclidean_length())
            .sum(),
        Geometry::Rect(rect) => length_of(&Geometry::Polygon(rect.to_polygon())),
        Geometry::Triangle(triangle) => length_of(&Geometry::Polygon(triangle.to_polygon())),
        Geometry::GeometryCollection(gc) => gc.0.iter().map(length_of).sum(),
    }
}

fn length(g: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(length_of(g).into())
}

fn num_points_op(g: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(Outcome::Int(num_points(g) as i64))
}

fn reverse(g: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(reversed(g).into())
}

fn reversed_line(ls: &LineString<f64>) -> LineString<f64> {
    LineString::new(ls.0.iter().rev().copied().collect())
}

fn reversed_polygon(polygon: &Polygon<f64>) -> Polygon<f64> {
    Polygon::new(
        reversed_line(polygon.exterior()),
        polygon.interiors().iter().map(reversed_line).collect(),
    )
}

fn reversed(g: &Geometry<f64>) -> Geometry<f64> {
    match g {
        Geometry::Line(line) => Geometry::Line(geo::Line::new(line.end, line.start)),
        Geometry::LineString(ls) => Geometry::LineString(reversed_line(ls)),
        Geometry::MultiLineString(mls) => {
            Geometry::MultiLineString(MultiLineString(mls.0.iter().map(reversed_line).collect()))
        }
        Geometry::Polygon(polygon) => Geometry::Polygon(reversed_polygon(polygon)),
        Geometry::MultiPolygon(mp) => {
            Geometry::MultiPolygon(MultiPolygon(mp.0.iter().map(reversed_polygon).collect()))
        }
        Geometry::Rect(rect) => Geometry::Polygon(reversed_polygon(&rect.to_polygon())),
        Geometry::Triangle(triangle) => Geometry::Polygon(reversed_polygon(&triangle.to_polygon())),
        Geometry::GeometryCollection(gc) => {
            Geometry::GeometryCollection(GeometryCollection(gc.0.iter().map(reversed).collect()))
        }
        Geometry::Point(_) | Geometry::MultiPoint(_) => g.clone(),
    }
}

fn unary_union(g: &Geometry<f64>) -> OpResult<Outcome> {
    let polygons: Vec<MultiPolygon<f64>> = match g {
        Geometry::GeometryCollection(gc) => gc
            .0
            .iter()
            .map(|child| polygonal("unaryUnion", child))
            .collect::<OpResult<_>>()?,
        Geometry::MultiPolygon(mp) => mp.0.iter().map(|p| MultiPolygon(vec![p.clone()])).collect(),
        other => vec![polygonal("unaryUnion", other)?],
    };
    let merged = polygons
        .iter()
        .fold(MultiPolygon(vec![]), |acc, next| acc.union(next));
    Ok(normalize(merged).into())
}

/// Coordinates rounded to the grid `1 / scale`.
fn snapped(g: &Geometry<f64>, scale: f64) -> OpResult<Geometry<f64>> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(OpError::InvalidParameter {
            name: "scale",
            value: scale,
            reason: "must be a positive finite number",
        });
    }
    Ok(g.map_coords(|c| Coord {
        x: (c.x * scale).round() / scale,
        y: (c.y * scale).round() / scale,
    }))
}

fn reduce_precision(g: &Geometry<f64>, scale: f64) -> OpResult<Outcome> {
    Ok(snapped(g, scale)?.into())
}

fn simplify(g: &Geometry<f64>, tolerance: f64) -> OpResult<Outcome> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(OpError::InvalidParameter {
            name: "tolerance",
            value: tolerance,
            reason: "must be a non-negative finite number",
        });
    }
    Ok(simplified(g, tolerance).into())
}

fn simplified(g: &Geometry<f64>, tolerance: f64) -> Geometry<f64> {
    match g {
        Geometry::LineString(ls) => Geometry::LineString(ls.simplify(&tolerance)),
        Geometry::MultiLineString(mls) => Geometry::MultiLineString(mls.simplify(&tolerance)),
        Geometry::Polygon(polygon) => Geometry::Polygon(polygon.simplify(&tolerance)),
        Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(mp.simplify(&tolerance)),
        Geometry::GeometryCollection(gc) => Geometry::GeometryCollection(GeometryCollection(
            gc.0.iter().map(|child| simplified(child, tolerance)).collect(),
        )),
        other => other.clone(),
    }
}

// Binary

fn contains(a: &Geometry<f64>, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(relate_matches(a, b, CONTAINS)?.into())
}

fn covers(a: &Geometry<f64>, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(relate_matches(a, b, COVERS)?.into())
}

fn intersects(a: &Geometry<f64>, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(predicate::intersects(a, b).into())
}

fn distance(a: &Geometry<f64>, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(measure::distance(a, b).into())
}

fn nearest_line(pair: Option<measure::NearestPair>) -> Outcome {
    Outcome::Geometry(pair.map(|(p, q)| Geometry::LineString(LineString::new(vec![p, q]))))
}

fn nearest_points(a: &Geometry<f64>, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(nearest_line(measure::nearest_points(a, b)))
}

fn relate(a: &Geometry<f64>, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(relate_matrix(a, b)?.into())
}

/// Polygonal input as a multipolygon, for the overlay operations.
fn polygonal(operation: &'static str, g: &Geometry<f64>) -> OpResult<MultiPolygon<f64>> {
    match g {
        Geometry::Polygon(p) => Ok(MultiPolygon(vec![p.clone()])),
        Geometry::MultiPolygon(mp) => Ok(mp.clone()),
        Geometry::Rect(rect) => Ok(MultiPolygon(vec![rect.to_polygon()])),
        Geometry::Triangle(triangle) => Ok(MultiPolygon(vec![triangle.to_polygon()])),
        other => Err(OpError::Unsupported {
            operation,
            geometry: type_name(other),
        }),
    }
}

/// Collapse an overlay result: no parts is an empty polygon, one part a
/// polygon.
fn normalize(mut result: MultiPolygon<f64>) -> Geometry<f64> {
    match result.0.len() {
        0 => Geometry::Polygon(empty_polygon()),
        1 => Geometry::Polygon(result.0.remove(0)),
        _ => Geometry::MultiPolygon(result),
    }
}

type Overlay = fn(&MultiPolygon<f64>, &MultiPolygon<f64>) -> MultiPolygon<f64>;

fn overlay(
    operation: &'static str,
    a: &Geometry<f64>,
    b: &Geometry<f64>,
    op: Overlay,
) -> OpResult<Geometry<f64>> {
    let (a, b) = (polygonal(operation, a)?, polygonal(operation, b)?);
    Ok(normalize(op(&a, &b)))
}

/// Overlay of the inputs snapped to the `scale` grid, with the result
/// snapped again.
fn snap_rounded(
    operation: &'static str,
    a: &Geometry<f64>,
    b: &Geometry<f64>,
    scale: f64,
    op: Overlay,
) -> OpResult<Outcome> {
    let result = overlay(operation, &snapped(a, scale)?, &snapped(b, scale)?, op)?;
    Ok(snapped(&result, scale)?.into())
}

fn difference(a: &Geometry<f64>, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(overlay("difference", a, b, |a, b| a.difference(b))?.into())
}

fn intersection(a: &Geometry<f64>, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(overlay("intersection", a, b, |a, b| a.intersection(b))?.into())
}

fn sym_difference(a: &Geometry<f64>, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(overlay("symDifference", a, b, |a, b| a.xor(b))?.into())
}

fn union(a: &Geometry<f64>, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(overlay("union", a, b, |a, b| a.union(b))?.into())
}

fn difference_sr(a: &Geometry<f64>, b: &Geometry<f64>, scale: f64) -> OpResult<Outcome> {
    snap_rounded("differenceSR", a, b, scale, |a, b| a.difference(b))
}

fn intersection_sr(a: &Geometry<f64>, b: &Geometry<f64>, scale: f64) -> OpResult<Outcome> {
    snap_rounded("intersectionSR", a, b, scale, |a, b| a.intersection(b))
}

fn sym_difference_sr(a: &Geometry<f64>, b: &Geometry<f64>, scale: f64) -> OpResult<Outcome> {
    snap_rounded("symDifferenceSR", a, b, scale, |a, b| a.xor(b))
}

fn union_sr(a: &Geometry<f64>, b: &Geometry<f64>, scale: f64) -> OpResult<Outcome> {
    snap_rounded("unionSR", a, b, scale, |a, b| a.union(b))
}

// Prepared

fn contains_prep(a: &PreparedGeometry, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(a.contains(b)?.into())
}

fn contains_properly_prep(a: &PreparedGeometry, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(a.contains_properly(b)?.into())
}

fn covers_prep(a: &PreparedGeometry, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(a.covers(b)?.into())
}

fn intersects_prep(a: &PreparedGeometry, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(a.intersects(b).into())
}

fn distance_prep(a: &PreparedGeometry, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(a.distance(b).into())
}

fn nearest_points_prep(a: &PreparedGeometry, b: &Geometry<f64>) -> OpResult<Outcome> {
    Ok(nearest_line(a.nearest_points(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{line_string, point, polygon};

    fn square(x0: f64, y0: f64, size: f64) -> Geometry<f64> {
        polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size)
        ]
        .into()
    }

    fn as_double(outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Double(v) => v,
            other => panic!("expected double, got {:?}", other),
        }
    }

    fn as_geometry(outcome: Outcome) -> Geometry<f64> {
        match outcome {
            Outcome::Geometry(Some(g)) => g,
            other => panic!("expected geometry, got {:?}", other),
        }
    }

    #[test]
    fn test_area_and_length() {
        let sq = square(0.0, 0.0, 3.0);
        assert_relative_eq!(as_double(area(&sq).unwrap()), 9.0);
        assert_relative_eq!(as_double(length(&sq).unwrap()), 12.0);

        let line: Geometry<f64> = line_string![(x: 0.0, y: 0.0), (x: 3.0, y: 4.0)].into();
        assert_relative_eq!(as_double(length(&line).unwrap()), 5.0);
        assert_eq!(as_double(area(&line).unwrap()), 0.0);
    }

    #[test]
    fn test_boundary() {
        let line: Geometry<f64> =
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 1.0)].into();
        assert_eq!(
            as_geometry(boundary(&line).unwrap()),
            Geometry::MultiPoint(MultiPoint(vec![point!(x: 0.0, y: 0.0), point!(x: 2.0, y: 1.0)]))
        );

        let sq = square(0.0, 0.0, 1.0);
        assert_eq!(
            as_geometry(boundary(&sq).unwrap()),
            Geometry::LineString(LineString::from(vec![
                (0.0, 0.0),
                (1.0, 0.0),
                (1.0, 1.0),
                (0.0, 1.0),
                (0.0, 0.0)
            ]))
        );

        let gc = Geometry::GeometryCollection(GeometryCollection(vec![sq]));
        assert!(matches!(boundary(&gc), Err(OpError::Unsupported { .. })));
    }

    #[test]
    fn test_centroid_and_envelope() {
        let sq = square(0.0, 0.0, 2.0);
        let Geometry::Point(c) = as_geometry(centroid(&sq).unwrap()) else {
            panic!("expected point");
        };
        assert_relative_eq!(c.x(), 1.0);
        assert_relative_eq!(c.y(), 1.0);
        assert_eq!(
            as_geometry(envelope(&sq).unwrap()),
            Geometry::Polygon(geo::Rect::new((0.0, 0.0), (2.0, 2.0)).to_polygon())
        );

        let p: Geometry<f64> = point!(x: 4.0, y: 5.0).into();
        assert_eq!(as_geometry(envelope(&p).unwrap()), p);
    }

    #[test]
    fn test_convex_hull() {
        let points = Geometry::MultiPoint(MultiPoint(vec![
            point!(x: 0.0, y: 0.0),
            point!(x: 4.0, y: 0.0),
            point!(x: 2.0, y: 1.0),
            point!(x: 4.0, y: 4.0),
            point!(x: 0.0, y: 4.0),
        ]));
        let hull = as_geometry(convex_hull(&points).unwrap());
        assert_eq!(crate::geometry::type_name(&hull), "Polygon");
        assert_relative_eq!(hull.unsigned_area(), 16.0);

        let single: Geometry<f64> = point!(x: 1.0, y: 1.0).into();
        assert_eq!(as_geometry(convex_hull(&single).unwrap()), single);
    }

    #[test]
    fn test_num_points_is_int() {
        let outcome = num_points_op(&square(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(outcome, Outcome::Int(5));
        assert_eq!(outcome.metadata(), "int");
    }

    #[test]
    fn test_delaunay_triangles_are_owned_copies() {
        let sites = Geometry::MultiPoint(MultiPoint(vec![
            point!(x: 0.0, y: 0.0),
            point!(x: 4.0, y: 0.0),
            point!(x: 5.0, y: 5.0),
            point!(x: 0.0, y: 4.0),
            point!(x: 0.0, y: 0.0),
        ]));
        let outcome = delaunay(&sites).unwrap();
        drop(sites);
        let Outcome::GeometryList(list) = outcome else {
            panic!("expected a geometry list");
        };
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|g| matches!(g, Geometry::Polygon(_))));
        let total: f64 = list.iter().map(|g| g.unsigned_area()).sum();
        assert_relative_eq!(total, 20.0);

        let collinear: Geometry<f64> =
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0), (x: 2.0, y: 2.0)].into();
        assert_eq!(delaunay(&collinear).unwrap().to_string(), "Geometry[0]");
        let pair: Geometry<f64> = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)].into();
        assert_eq!(delaunay(&pair).unwrap().to_string(), "Geometry[0]");
    }

    #[test]
    fn test_interior_point() {
        let sq = square(0.0, 0.0, 2.0);
        let inside = as_geometry(interior_point(&sq).unwrap());
        assert!(relate_matches(&sq, &inside, CONTAINS).unwrap());

        let empty: Geometry<f64> = empty_point().into();
        assert_eq!(interior_point(&empty).unwrap().to_string(), "POINT EMPTY");
    }

    #[test]
    fn test_reverse() {
        let line: Geometry<f64> = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 2.0)].into();
        assert_eq!(
            as_geometry(reverse(&line).unwrap()),
            line_string![(x: 1.0, y: 2.0), (x: 0.0, y: 0.0)].into()
        );
    }

    #[test]
    fn test_reduce_precision() {
        let p: Geometry<f64> = point!(x: 1.234, y: 5.678).into();
        assert_eq!(
            reduce_precision(&p, 10.0).unwrap().to_string(),
            "POINT(1.2 5.7)"
        );
        assert!(matches!(
            reduce_precision(&p, 0.0),
            Err(OpError::InvalidParameter { name: "scale", .. })
        ));
    }

    #[test]
    fn test_simplify() {
        let line: Geometry<f64> = line_string![
            (x: 0.0, y: 0.0),
            (x: 5.0, y: 0.1),
            (x: 10.0, y: 0.0)
        ]
        .into();
        let simple = as_geometry(simplify(&line, 1.0).unwrap());
        assert_eq!(num_points(&simple), 2);
        assert!(simplify(&line, -1.0).is_err());
    }

    #[test]
    fn test_predicates() {
        let sq = square(0.0, 0.0, 10.0);
        let inside: Geometry<f64> = point!(x: 5.0, y: 5.0).into();
        let edge: Geometry<f64> = point!(x: 10.0, y: 5.0).into();
        let far: Geometry<f64> = point!(x: 50.0, y: 5.0).into();

        assert_eq!(contains(&sq, &inside).unwrap(), Outcome::Bool(true));
        assert_eq!(contains(&sq, &edge).unwrap(), Outcome::Bool(false));
        assert_eq!(covers(&sq, &edge).unwrap(), Outcome::Bool(true));
        assert_eq!(intersects(&sq, &far).unwrap(), Outcome::Bool(false));
        assert_relative_eq!(as_double(distance(&sq, &far).unwrap()), 40.0);
    }

    #[test]
    fn test_nearest_points() {
        let sq = square(0.0, 0.0, 10.0);
        let far: Geometry<f64> = point!(x: 15.0, y: 5.0).into();
        assert_eq!(
            nearest_points(&sq, &far).unwrap().to_string(),
            "LINESTRING(10 5,15 5)"
        );

        let empty = Geometry::GeometryCollection(GeometryCollection(vec![]));
        assert_eq!(nearest_points(&sq, &empty).unwrap(), Outcome::Geometry(None));
    }

    #[test]
    fn test_relate_matrix() {
        let a: Geometry<f64> = point!(x: 0.0, y: 0.0).into();
        let b: Geometry<f64> = point!(x: 1.0, y: 1.0).into();
        assert_eq!(relate(&a, &b).unwrap().to_string(), "FF0FFF0F2");
        assert_eq!(relate(&a, &a).unwrap().to_string(), "0FFFFFFF2");
    }

    #[test]
    fn test_empty_point_as_either_operand() {
        let empty: Geometry<f64> = empty_point().into();
        let p: Geometry<f64> = point!(x: 1.0, y: 1.0).into();
        let sq = square(0.0, 0.0, 10.0);

        assert_eq!(relate(&empty, &p).unwrap().to_string(), "FFFFFF0F2");
        assert_eq!(relate(&p, &empty).unwrap().to_string(), "FF0FFFFF2");

        for (a, b) in [(&empty, &sq), (&sq, &empty), (&empty, &p), (&p, &empty)] {
            assert_eq!(contains(a, b).unwrap(), Outcome::Bool(false));
            assert_eq!(covers(a, b).unwrap(), Outcome::Bool(false));
            assert_eq!(intersects(a, b).unwrap(), Outcome::Bool(false));
            assert_eq!(as_double(distance(a, b).unwrap()), 0.0);
            assert_eq!(nearest_points(a, b).unwrap(), Outcome::Geometry(None));

            let prepared = PreparedGeometry::new(a);
            assert_eq!(contains_prep(&prepared, b).unwrap(), Outcome::Bool(false));
            assert_eq!(contains_properly_prep(&prepared, b).unwrap(), Outcome::Bool(false));
            assert_eq!(covers_prep(&prepared, b).unwrap(), Outcome::Bool(false));
            assert_eq!(intersects_prep(&prepared, b).unwrap(), Outcome::Bool(false));
            assert_eq!(as_double(distance_prep(&prepared, b).unwrap()), 0.0);
            assert_eq!(nearest_points_prep(&prepared, b).unwrap(), Outcome::Geometry(None));
        }
    }

    #[test]
    fn test_overlay() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 0.0, 2.0);

        assert_relative_eq!(as_geometry(union(&a, &b).unwrap()).unsigned_area(), 6.0);
        assert_relative_eq!(as_geometry(intersection(&a, &b).unwrap()).unsigned_area(), 2.0);
        assert_relative_eq!(as_geometry(difference(&a, &b).unwrap()).unsigned_area(), 2.0);
        assert_relative_eq!(as_geometry(sym_difference(&a, &b).unwrap()).unsigned_area(), 4.0);

        let disjoint = square(10.0, 10.0, 1.0);
        assert_eq!(
            as_geometry(intersection(&a, &disjoint).unwrap()),
            Geometry::Polygon(empty_polygon())
        );
    }

    #[test]
    fn test_snap_rounded_overlay() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.04, 0.0, 2.0);

        assert_relative_eq!(as_geometry(union_sr(&a, &b, 10.0).unwrap()).unsigned_area(), 6.0);
        assert_relative_eq!(
            as_geometry(intersection_sr(&a, &b, 10.0).unwrap()).unsigned_area(),
            2.0
        );
        assert_relative_eq!(
            as_geometry(difference_sr(&a, &b, 10.0).unwrap()).unsigned_area(),
            2.0
        );
        assert_relative_eq!(
            as_geometry(sym_difference_sr(&a, &b, 10.0).unwrap()).unsigned_area(),
            4.0
        );

        let merged = as_geometry(union_sr(&a, &b, 10.0).unwrap());
        assert!(vertices(&merged)
            .iter()
            .all(|c| c.x == (c.x * 10.0).round() / 10.0));

        assert!(matches!(
            union_sr(&a, &b, f64::NAN),
            Err(OpError::InvalidParameter { name: "scale", .. })
        ));
        let line: Geometry<f64> = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)].into();
        assert!(matches!(
            intersection_sr(&a, &line, 10.0),
            Err(OpError::Unsupported { operation: "intersectionSR", geometry: "LineString" })
        ));
    }

    #[test]
    fn test_unary_union() {
        let gc = Geometry::GeometryCollection(GeometryCollection(vec![
            square(0.0, 0.0, 2.0),
            square(1.0, 0.0, 2.0),
        ]));
        assert_relative_eq!(as_geometry(unary_union(&gc).unwrap()).unsigned_area(), 6.0);

        let mixed = Geometry::GeometryCollection(GeometryCollection(vec![
            square(0.0, 0.0, 2.0),
            point!(x: 1.0, y: 1.0).into(),
        ]));
        assert!(matches!(
            unary_union(&mixed),
            Err(OpError::Unsupported { operation: "unaryUnion", geometry: "Point" })
        ));
    }
}
