//! Canonical text form of a geometry (WKT), written through the `wkt` crate.

use geo::{Coord, Geometry, LineString, Point, Polygon};
use wkt::Wkt;

use crate::geometry::is_empty_point;

fn coord_to_wkt(coord: &Coord<f64>) -> wkt::types::Coord<f64> {
    wkt::types::Coord {
        x: coord.x,
        y: coord.y,
        z: None,
        m: None,
    }
}

/// NaN coordinates mark an empty point.
fn point_to_wkt(point: &Point<f64>) -> wkt::types::Point<f64> {
    if is_empty_point(point) {
        wkt::types::Point(None)
    } else {
        wkt::types::Point(Some(coord_to_wkt(&point.0)))
    }
}

fn line_string_to_wkt(line_string: &LineString<f64>) -> wkt::types::LineString<f64> {
    wkt::types::LineString(line_string.0.iter().map(coord_to_wkt).collect())
}

fn polygon_to_wkt(polygon: &Polygon<f64>) -> wkt::types::Polygon<f64> {
    let mut rings = vec![];
    if !polygon.exterior().0.is_empty() {
        rings.push(line_string_to_wkt(polygon.exterior()));
    }
    polygon
        .interiors()
        .iter()
        .for_each(|interior| rings.push(line_string_to_wkt(interior)));
    wkt::types::Polygon(rings)
}

/// Convert a geometry into its `wkt` representation.
///
/// `Line` is written as a two-point LineString, `Rect` and `Triangle` as
/// Polygons.
pub fn geometry_to_wkt(geometry: &Geometry<f64>) -> Wkt<f64> {
    match geometry {
        Geometry::Point(point) => Wkt::Point(point_to_wkt(point)),
        Geometry::Line(line) => Wkt::LineString(wkt::types::LineString(vec![
            coord_to_wkt(&line.start),
            coord_to_wkt(&line.end),
        ])),
        Geometry::LineString(ls) => Wkt::LineString(line_string_to_wkt(ls)),
        Geometry::Polygon(polygon) => Wkt::Polygon(polygon_to_wkt(polygon)),
        Geometry::MultiPoint(mp) => {
            Wkt::MultiPoint(wkt::types::MultiPoint(mp.0.iter().map(point_to_wkt).collect()))
        }
        Geometry::MultiLineString(mls) => Wkt::MultiLineString(wkt::types::MultiLineString(
            mls.0.iter().map(line_string_to_wkt).collect(),
        )),
        Geometry::MultiPolygon(mp) => Wkt::MultiPolygon(wkt::types::MultiPolygon(
            mp.0.iter().map(polygon_to_wkt).collect(),
        )),
        Geometry::GeometryCollection(gc) => Wkt::GeometryCollection(
            wkt::types::GeometryCollection(gc.0.iter().map(geometry_to_wkt).collect()),
        ),
        Geometry::Rect(rect) => Wkt::Polygon(polygon_to_wkt(&rect.to_polygon())),
        Geometry::Triangle(triangle) => Wkt::Polygon(polygon_to_wkt(&triangle.to_polygon())),
    }
}

/// Render `geometry` as WKT, e.g. `POINT(1 2)` or `POLYGON EMPTY`.
pub fn to_wkt(geometry: &Geometry<f64>) -> String {
    geometry_to_wkt(geometry).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point, polygon, GeometryCollection, Line};

    use crate::geometry::{empty_point, empty_polygon};

    #[test]
    fn test_point() {
        assert_eq!(to_wkt(&point!(x: 1.0, y: 2.5).into()), "POINT(1 2.5)");
        assert_eq!(to_wkt(&empty_point().into()), "POINT EMPTY");
    }

    #[test]
    fn test_empty_point_converts_to_coordless_point() {
        let Wkt::Point(point) = geometry_to_wkt(&empty_point().into()) else {
            panic!("expected a point");
        };
        assert!(point.0.is_none());
    }

    #[test]
    fn test_line_string() {
        let ls = line_string![(x: 0.0, y: 0.0), (x: -1.5, y: 3.0)];
        assert_eq!(to_wkt(&ls.into()), "LINESTRING(0 0,-1.5 3)");
        assert_eq!(
            to_wkt(&Geometry::LineString(LineString::new(vec![]))),
            "LINESTRING EMPTY"
        );
    }

    #[test]
    fn test_line_written_as_line_string() {
        let line = Line::new((0.0, 0.0), (1.0, 1.0));
        assert_eq!(to_wkt(&line.into()), "LINESTRING(0 0,1 1)");
    }

    #[test]
    fn test_polygon_with_hole() {
        let polygon = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 0.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0), (x: 1.0, y: 1.0)]]
        );
        let Wkt::Polygon(rings) = geometry_to_wkt(&polygon.into()) else {
            panic!("expected a polygon");
        };
        assert_eq!(rings.0.len(), 2);
        assert_eq!(rings.0[1].0[0].x, 1.0);
        assert_eq!(to_wkt(&empty_polygon().into()), "POLYGON EMPTY");
    }

    #[test]
    fn test_collection_members_convert_in_order() {
        let geometry = Geometry::GeometryCollection(GeometryCollection(vec![
            point!(x: 1.0, y: 1.0).into(),
            empty_point().into(),
        ]));
        let Wkt::GeometryCollection(members) = geometry_to_wkt(&geometry) else {
            panic!("expected a collection");
        };
        assert_eq!(members.0.len(), 2);
        assert!(matches!(&members.0[1], Wkt::Point(p) if p.0.is_none()));
        assert_eq!(
            to_wkt(&Geometry::GeometryCollection(GeometryCollection(vec![]))),
            "GEOMETRYCOLLECTION EMPTY"
        );
    }
}
