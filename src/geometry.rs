//! Small geometry helpers shared by the decoder, the operation table and
//! the prepared index.

use std::borrow::Cow;

use geo::{Coord, Geometry, GeometryCollection, Line, LineString, MultiPoint, Point, Polygon};

/// A point with no coordinates.
///
/// `geo` cannot represent an empty point, so one is encoded as NaN x and y.
pub fn empty_point() -> Point<f64> {
    Point::new(f64::NAN, f64::NAN)
}

pub fn is_empty_point(point: &Point<f64>) -> bool {
    point.x().is_nan() && point.y().is_nan()
}

/// An empty polygon: no shell vertices, no holes.
pub fn empty_polygon() -> Polygon<f64> {
    Polygon::new(LineString::new(vec![]), vec![])
}

/// Geometry type name, as reported in result metadata.
pub fn type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) | Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Every vertex of `geometry`, in storage order. Empty points contribute
/// nothing.
pub fn vertices(geometry: &Geometry<f64>) -> Vec<Coord<f64>> {
    let mut out = Vec::new();
    push_vertices(geometry, &mut out);
    out
}

fn push_vertices(geometry: &Geometry<f64>, out: &mut Vec<Coord<f64>>) {
    match geometry {
        Geometry::Point(p) => {
            if !is_empty_point(p) {
                out.push(p.0);
            }
        }
        Geometry::Line(line) => out.extend([line.start, line.end]),
        Geometry::LineString(ls) => out.extend(ls.0.iter().copied()),
        Geometry::Polygon(polygon) => push_polygon_vertices(polygon, out),
        Geometry::MultiPoint(mp) => out.extend(
            mp.0.iter()
                .filter(|p| !is_empty_point(p))
                .map(|p| p.0),
        ),
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                out.extend(ls.0.iter().copied());
            }
        }
        Geometry::MultiPolygon(mp) => {
            for polygon in &mp.0 {
                push_polygon_vertices(polygon, out);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                push_vertices(child, out);
            }
        }
        Geometry::Rect(rect) => push_polygon_vertices(&rect.to_polygon(), out),
        Geometry::Triangle(triangle) => push_polygon_vertices(&triangle.to_polygon(), out),
    }
}

fn push_polygon_vertices(polygon: &Polygon<f64>, out: &mut Vec<Coord<f64>>) {
    out.extend(polygon.exterior().0.iter().copied());
    for hole in polygon.interiors() {
        out.extend(hole.0.iter().copied());
    }
}

pub fn num_points(geometry: &Geometry<f64>) -> usize {
    vertices(geometry).len()
}

/// True when `geometry` has no vertices at all.
pub fn is_empty(geometry: &Geometry<f64>) -> bool {
    num_points(geometry) == 0
}

fn has_empty_point(geometry: &Geometry<f64>) -> bool {
    match geometry {
        Geometry::Point(p) => is_empty_point(p),
        Geometry::MultiPoint(mp) => mp.0.iter().any(is_empty_point),
        Geometry::GeometryCollection(gc) => gc.0.iter().any(has_empty_point),
        _ => false,
    }
}

fn strip_empty_points(geometry: &Geometry<f64>) -> Geometry<f64> {
    match geometry {
        Geometry::MultiPoint(mp) => Geometry::MultiPoint(MultiPoint(
            mp.0.iter().copied().filter(|p| !is_empty_point(p)).collect(),
        )),
        Geometry::GeometryCollection(gc) => Geometry::GeometryCollection(GeometryCollection(
            gc.0.iter()
                .filter(|child| !matches!(child, Geometry::Point(p) if is_empty_point(p)))
                .map(strip_empty_points)
                .collect(),
        )),
        other => other.clone(),
    }
}

/// `geometry` with its empty points dropped, ready for `geo` algorithms
/// that cannot take NaN coordinates. `None` when nothing is left.
pub fn without_empty_points(geometry: &Geometry<f64>) -> Option<Cow<'_, Geometry<f64>>> {
    if is_empty(geometry) {
        None
    } else if has_empty_point(geometry) {
        Some(Cow::Owned(strip_empty_points(geometry)))
    } else {
        Some(Cow::Borrowed(geometry))
    }
}

/// Every edge of `geometry`. Points become zero-length edges so that
/// distance queries see them.
pub fn segments(geometry: &Geometry<f64>) -> Vec<Line<f64>> {
    let mut out = Vec::new();
    push_segments(geometry, &mut out);
    out
}

fn push_segments(geometry: &Geometry<f64>, out: &mut Vec<Line<f64>>) {
    match geometry {
        Geometry::Point(p) => {
            if !is_empty_point(p) {
                out.push(Line::new(p.0, p.0));
            }
        }
        Geometry::Line(line) => out.push(*line),
        Geometry::LineString(ls) => push_line_string_segments(ls, out),
        Geometry::Polygon(polygon) => push_polygon_segments(polygon, out),
        Geometry::MultiPoint(mp) => out.extend(
            mp.0.iter()
                .filter(|p| !is_empty_point(p))
                .map(|p| Line::new(p.0, p.0)),
        ),
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                push_line_string_segments(ls, out);
            }
        }
        Geometry::MultiPolygon(mp) => {
            for polygon in &mp.0 {
                push_polygon_segments(polygon, out);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                push_segments(child, out);
            }
        }
        Geometry::Rect(rect) => push_polygon_segments(&rect.to_polygon(), out),
        Geometry::Triangle(triangle) => push_polygon_segments(&triangle.to_polygon(), out),
    }
}

fn push_line_string_segments(ls: &LineString<f64>, out: &mut Vec<Line<f64>>) {
    match ls.0.len() {
        0 => {}
        1 => out.push(Line::new(ls.0[0], ls.0[0])),
        _ => out.extend(ls.lines()),
    }
}

fn push_polygon_segments(polygon: &Polygon<f64>, out: &mut Vec<Line<f64>>) {
    push_line_string_segments(polygon.exterior(), out);
    for hole in polygon.interiors() {
        push_line_string_segments(hole, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, polygon};

    #[test]
    fn test_empty_point_round_trip() {
        assert!(is_empty_point(&empty_point()));
        assert!(!is_empty_point(&point!(x: 0.0, y: 0.0)));
    }

    #[test]
    fn test_num_points_skips_empty_points() {
        let geometry = Geometry::MultiPoint(MultiPoint(vec![
            empty_point(),
            point!(x: 1.0, y: 1.0),
        ]));
        assert_eq!(num_points(&geometry), 1);
        assert_eq!(num_points(&Geometry::Point(empty_point())), 0);
    }

    #[test]
    fn test_polygon_counts_holes() {
        let polygon = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 0.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0), (x: 1.0, y: 1.0)]]
        );
        let geometry = Geometry::Polygon(polygon);
        assert_eq!(num_points(&geometry), 8);
        assert_eq!(segments(&geometry).len(), 6);
        assert_eq!(type_name(&geometry), "Polygon");
    }

    #[test]
    fn test_without_empty_points() {
        assert!(without_empty_points(&Geometry::Point(empty_point())).is_none());

        let plain: Geometry<f64> = point!(x: 1.0, y: 1.0).into();
        assert!(matches!(without_empty_points(&plain), Some(Cow::Borrowed(_))));

        let mixed = Geometry::GeometryCollection(GeometryCollection(vec![
            Geometry::Point(empty_point()),
            point!(x: 2.0, y: 3.0).into(),
        ]));
        let stripped = without_empty_points(&mixed).unwrap();
        assert_eq!(
            stripped.into_owned(),
            Geometry::GeometryCollection(GeometryCollection(vec![point!(x: 2.0, y: 3.0).into()]))
        );
    }

    #[test]
    fn test_collection_segments_include_points() {
        let geometry = Geometry::GeometryCollection(GeometryCollection(vec![
            Geometry::Point(point!(x: 5.0, y: 5.0)),
            Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])),
        ]));
        let edges = segments(&geometry);
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].start, edges[0].end);
    }
}
