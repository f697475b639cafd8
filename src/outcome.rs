//! The value returned by a geometry operation.

use std::fmt;

use geo::Geometry;

use crate::geometry::{num_points, type_name};
use crate::to_wkt::to_wkt;

/// Result of evaluating one operation.
///
/// A geometry list owns its members outright: pieces taken from a larger
/// result are copied in, so the list never outlives what it refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Geometry(Option<Geometry<f64>>),
    GeometryList(Vec<Geometry<f64>>),
}

impl Outcome {
    pub fn is_geometry(&self) -> bool {
        matches!(self, Self::Geometry(_))
    }

    pub fn is_geometry_list(&self) -> bool {
        matches!(self, Self::GeometryList(_))
    }

    /// Short description of the value: the type name for scalars,
    /// `Polygon( 5 )` for a geometry, `Geometry[3]` for a list.
    pub fn metadata(&self) -> String {
        match self {
            Self::Bool(_) => "bool".to_string(),
            Self::Int(_) => "int".to_string(),
            Self::Double(_) => "double".to_string(),
            Self::String(_) => "string".to_string(),
            Self::Geometry(None) => "null".to_string(),
            Self::Geometry(Some(geometry)) => {
                format!("{}( {} )", type_name(geometry), num_points(geometry))
            }
            Self::GeometryList(list) => format!("Geometry[{}]", list.len()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
            Self::Geometry(None) => f.write_str("null"),
            Self::Geometry(Some(geometry)) => f.write_str(&to_wkt(geometry)),
            Self::GeometryList(_) => f.write_str(&self.metadata()),
        }
    }
}

impl From<bool> for Outcome {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Outcome {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Outcome {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<String> for Outcome {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Geometry<f64>> for Outcome {
    fn from(value: Geometry<f64>) -> Self {
        Self::Geometry(Some(value))
    }
}

impl From<Option<Geometry<f64>>> for Outcome {
    fn from(value: Option<Geometry<f64>>) -> Self {
        Self::Geometry(value)
    }
}

impl From<Vec<Geometry<f64>>> for Outcome {
    fn from(value: Vec<Geometry<f64>>) -> Self {
        Self::GeometryList(value)
    }
}
