//! GeoJSON decoding into `geo` geometries and features.
//!
//! Both entry points dispatch on the top-level `type`:
//! `Feature`, `FeatureCollection`, or any of the seven geometry types.
//! Decoding is all-or-nothing; the first structural problem aborts with a
//! [`ParseError`].

use std::collections::BTreeMap;

use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use serde_json::Value;
use tracing::debug;

use crate::error::ParseError;
use crate::feature::{Feature, FeatureCollection};
use crate::geometry::{empty_point, empty_polygon};
use crate::property::PropertyValue;

type Result<T> = std::result::Result<T, ParseError>;

/// Decode a GeoJSON document into a single geometry.
///
/// A `Feature` yields its geometry; a `FeatureCollection` yields a geometry
/// collection of every feature's geometry, in document order.
pub fn decode_geometry(text: &str) -> Result<Geometry<f64>> {
    let json: Value = serde_json::from_str(text)?;
    match type_of(&json)? {
        "Feature" => read_feature_geometry(&json),
        "FeatureCollection" => {
            let features = array_field(&json, "features")?;
            debug!(features = features.len(), "decoding FeatureCollection as geometry");
            let geometries = features
                .iter()
                .map(read_feature_geometry)
                .collect::<Result<Vec<_>>>()?;
            Ok(Geometry::GeometryCollection(GeometryCollection(geometries)))
        }
        _ => read_geometry(&json),
    }
}

/// Decode a GeoJSON document into features, keeping properties.
///
/// A bare geometry or a single `Feature` becomes a one-element collection.
pub fn decode_features(text: &str) -> Result<FeatureCollection> {
    let json: Value = serde_json::from_str(text)?;
    match type_of(&json)? {
        "Feature" => Ok(FeatureCollection::from(vec![read_feature(&json)?])),
        "FeatureCollection" => {
            let features = array_field(&json, "features")?;
            debug!(features = features.len(), "decoding FeatureCollection");
            let features = features
                .iter()
                .map(read_feature)
                .collect::<Result<Vec<_>>>()?;
            Ok(FeatureCollection::from(features))
        }
        _ => Ok(FeatureCollection::from(vec![Feature::new(read_geometry(
            &json,
        )?)])),
    }
}

fn type_of(json: &Value) -> Result<&str> {
    field(json, "type")?
        .as_str()
        .ok_or(ParseError::InvalidValue("type"))
}

fn field<'a>(json: &'a Value, name: &'static str) -> Result<&'a Value> {
    json.get(name).ok_or(ParseError::MissingField(name))
}

fn array_field<'a>(json: &'a Value, name: &'static str) -> Result<&'a [Value]> {
    as_array(field(json, name)?, name)
}

fn as_array<'a>(json: &'a Value, name: &'static str) -> Result<&'a [Value]> {
    json.as_array()
        .map(Vec::as_slice)
        .ok_or(ParseError::InvalidValue(name))
}

fn read_feature_geometry(json: &Value) -> Result<Geometry<f64>> {
    match field(json, "geometry")? {
        // Unlocated feature
        Value::Null => Ok(Geometry::GeometryCollection(GeometryCollection(vec![]))),
        geometry => read_geometry(geometry),
    }
}

fn read_feature(json: &Value) -> Result<Feature> {
    let geometry = read_feature_geometry(json)?;
    let properties = match json.get("properties") {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(map)) => read_properties(map),
        Some(_) => return Err(ParseError::InvalidProperties),
    };
    Ok(Feature {
        geometry,
        properties,
    })
}

fn read_properties(map: &serde_json::Map<String, Value>) -> BTreeMap<String, PropertyValue> {
    map.iter()
        .map(|(key, value)| (key.clone(), PropertyValue::from(value.clone())))
        .collect()
}

fn read_geometry(json: &Value) -> Result<Geometry<f64>> {
    let geometry = match type_of(json)? {
        "Point" => Geometry::Point(read_point(field(json, "coordinates")?)?),
        "LineString" => {
            Geometry::LineString(LineString::new(read_positions(field(json, "coordinates")?)?))
        }
        "Polygon" => Geometry::Polygon(read_polygon(field(json, "coordinates")?)?),
        "MultiPoint" => {
            let coords = read_positions(field(json, "coordinates")?)?;
            Geometry::MultiPoint(MultiPoint(coords.into_iter().map(Point::from).collect()))
        }
        "MultiLineString" => {
            let lines = as_array(field(json, "coordinates")?, "coordinates")?
                .iter()
                .map(|line| read_positions(line).map(LineString::new))
                .collect::<Result<Vec<_>>>()?;
            Geometry::MultiLineString(MultiLineString(lines))
        }
        "MultiPolygon" => {
            let polygons = as_array(field(json, "coordinates")?, "coordinates")?
                .iter()
                .map(read_polygon)
                .collect::<Result<Vec<_>>>()?;
            Geometry::MultiPolygon(MultiPolygon(polygons))
        }
        "GeometryCollection" => {
            let geometries = array_field(json, "geometries")?
                .iter()
                .map(read_geometry)
                .collect::<Result<Vec<_>>>()?;
            Geometry::GeometryCollection(GeometryCollection(geometries))
        }
        other => return Err(ParseError::UnknownType(other.to_string())),
    };
    Ok(geometry)
}

fn read_number(json: &Value) -> Result<f64> {
    json.as_f64().ok_or(ParseError::InvalidValue("coordinates"))
}

fn read_point(coordinates: &Value) -> Result<Point<f64>> {
    let values = as_array(coordinates, "coordinates")?;
    match values.len() {
        0 => Ok(empty_point()),
        1 => Err(ParseError::OneCoordinate),
        _ => Ok(Point::new(read_number(&values[0])?, read_number(&values[1])?)),
    }
}

/// A position inside a line, ring or multipoint. Values past x and y are
/// ignored.
fn read_position(json: &Value) -> Result<Coord<f64>> {
    let values = as_array(json, "coordinates")?;
    if values.len() < 2 {
        return Err(ParseError::ShortPosition(values.len()));
    }
    Ok((read_number(&values[0])?, read_number(&values[1])?).into())
}

fn read_positions(json: &Value) -> Result<Vec<Coord<f64>>> {
    as_array(json, "coordinates")?
        .iter()
        .map(read_position)
        .collect()
}

/// First ring is the shell, any remaining rings are holes in order.
fn read_polygon(json: &Value) -> Result<Polygon<f64>> {
    let mut rings = as_array(json, "coordinates")?
        .iter()
        .map(|ring| read_positions(ring).map(LineString::new))
        .collect::<Result<Vec<_>>>()?;

    if rings.is_empty() {
        return Ok(empty_polygon());
    }
    let holes = rings.split_off(1);
    let exterior = rings.remove(0);
    Ok(Polygon::new(exterior, holes))
}
