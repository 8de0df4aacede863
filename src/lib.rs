//! Codec between the TopoJSON wire format and a layered dataset model.
//!
//! A [`Topology`] is the parsed wire object: named geometry objects whose
//! paths reference a shared pool of arcs, optionally quantized and
//! delta-encoded. [`import_topology`] decodes the arcs and resolves every
//! object into a [`Layer`] of shapes over a shared [`ArcStore`];
//! [`export_topology`] performs the inverse, re-quantizing and
//! delta-encoding a [`Dataset`] into a fresh wire object.

mod arcs;
mod dataset;
mod decode;
mod error;
mod export;
mod geometry;
mod import;
mod stringify;
mod to_geojson;
mod topojson;
mod transform;
mod util;

pub mod json {
    pub use serde::{Deserialize, Deserializer, Serialize, Serializer};
    pub use serde_json::{Map, Value};
    pub type JsonObject = Map<String, Value>;
    pub type JsonValue = Value;
}

/// Bounding box as `[xmin, ymin, xmax, ymax]`
pub type Bbox = Vec<f64>;
/// A single coordinate position
pub type Position = Vec<f64>;
/// A sequence of positions forming one arc
pub type Arc = Vec<Position>;
/// Signed arc indexes: `i >= 0` is arc `i` forward, `i < 0` is arc
/// `-i - 1` traversed in reverse
pub type ArcIndexes = Vec<i32>;

pub use crate::arcs::ArcStore;
pub use crate::dataset::{Dataset, DatasetInfo, GeometryType, Layer, Shape, ShapeRecord};
pub use crate::decode::decode_arcs;
pub use crate::error::Error;
pub use crate::export::{export_files, export_topology, ExportOptions, OutputFile};
pub use crate::geometry::{Geometry, NamedGeometry, Value};
pub use crate::import::{import_topology, ImportOptions, NoopCleaner, ShapeCleaner};
pub use crate::stringify::{stringify, stringify_pretty};
pub use crate::to_geojson::{layer_to_geojson, to_geojson};
pub use crate::topojson::{TopoJson, Topology};
pub use crate::transform::Transform;
