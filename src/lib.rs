//! GeoJSON decoding and a registry of named geometry operations.
//!
//! Text is decoded into [`geo`] geometries and [`Feature`]s, wrapped in
//! [`Operand`]s, and evaluated by name through a [`Registry`]. Operations
//! that benefit from an indexed form of their first argument go through a
//! [`PreparedCache`] owned by the caller.

pub mod decoder;
pub mod dispatch;
pub mod error;
pub mod feature;
mod functions;
pub mod geometry;
pub mod logging;
pub mod measure;
pub mod operand;
pub mod outcome;
pub mod predicate;
pub mod prepared;
pub mod property;
pub mod registry;
pub mod to_wkt;

pub use decoder::{decode_features, decode_geometry};
pub use dispatch::{execute, Dispatcher};
pub use error::{OpError, OpResult, ParseError};
pub use feature::{Feature, FeatureCollection};
pub use operand::{GeometryId, Operand};
pub use outcome::Outcome;
pub use prepared::{PreparedCache, PreparedGeometry};
pub use property::PropertyValue;
pub use registry::{Implementation, Operation, Registry};
