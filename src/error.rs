//! Error types for GeoJSON decoding and operation dispatch

use thiserror::Error;

/// Failure to turn GeoJSON text into geometries or features.
///
/// Decoding is all-or-nothing: when this is returned no partial
/// geometry or feature has been produced.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Error parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required member: {0}")]
    MissingField(&'static str),

    #[error("Member {0} has the wrong JSON type")]
    InvalidValue(&'static str),

    #[error("Expected two coordinates found one")]
    OneCoordinate,

    #[error("Position has {0} values, expected at least 2")]
    ShortPosition(usize),

    #[error("Unknown geometry type: {0}")]
    UnknownType(String),

    #[error("Feature properties must be a JSON object")]
    InvalidProperties,
}

/// Failure raised while evaluating a geometry operation.
#[derive(Error, Debug)]
pub enum OpError {
    #[error("{operation} requires {argument}")]
    MissingArgument {
        operation: String,
        argument: &'static str,
    },

    #[error("{operation} does not support {geometry} input")]
    Unsupported {
        operation: &'static str,
        geometry: &'static str,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Relate error: {0}")]
    Relate(String),

    #[error("Triangulation failed: {0}")]
    Triangulation(String),
}

/// Result type alias for operation implementations
pub type OpResult<T> = std::result::Result<T, OpError>;
