// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The internal dataset model produced by import and consumed by export:
//! layers of shapes referencing the shared [`ArcStore`].

use std::fmt;

use crate::json::{JsonObject, JsonValue};
use crate::{ArcIndexes, ArcStore, Position};

/// Geometry kind of a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryType {
    Point,
    Polyline,
    Polygon,
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            GeometryType::Point => "point",
            GeometryType::Polyline => "polyline",
            GeometryType::Polygon => "polygon",
        })
    }
}

/// One shape of a layer.
///
/// Path shapes hold signed arc indexes into the dataset's [`ArcStore`],
/// never coordinates. For polygons the paths are grouped per part; within
/// a part the first ring is the exterior and the rest are holes, so
/// Polygon/MultiPolygon structure survives a round-trip.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Points(Vec<Position>),
    Lines(Vec<ArcIndexes>),
    Rings(Vec<Vec<ArcIndexes>>),
}

impl Shape {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Shape::Points(..) => GeometryType::Point,
            Shape::Lines(..) => GeometryType::Polyline,
            Shape::Rings(..) => GeometryType::Polygon,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Shape::Points(points) => points.is_empty(),
            Shape::Lines(paths) => paths.is_empty(),
            Shape::Rings(parts) => parts.is_empty(),
        }
    }

    /// Visits every signed arc index of a path shape.
    pub fn arc_indexes(&self) -> Vec<i32> {
        match self {
            Shape::Points(..) => vec![],
            Shape::Lines(paths) => paths.iter().flatten().copied().collect(),
            Shape::Rings(parts) => parts.iter().flatten().flatten().copied().collect(),
        }
    }
}

/// Attributes carried by one shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeRecord {
    pub id: Option<JsonValue>,
    pub properties: Option<JsonObject>,
}

/// A named layer: shapes of a single geometry kind plus their records.
///
/// `geometry_type` is `None` only for a layer imported from an empty
/// geometry object.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub name: String,
    pub geometry_type: Option<GeometryType>,
    pub shapes: Vec<Shape>,
    /// One record per shape.
    pub records: Vec<ShapeRecord>,
}

impl Layer {
    pub fn has_paths(&self) -> bool {
        matches!(
            self.geometry_type,
            Some(GeometryType::Polyline) | Some(GeometryType::Polygon)
        )
    }
}

/// Auxiliary dataset metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetInfo {
    /// Source files this dataset was read from, used to derive the output
    /// filename.
    pub input_files: Vec<String>,
}

/// The unit the editing pipeline operates on: layers plus the arc store
/// they share. `arcs` is absent only when no layer has paths.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub layers: Vec<Layer>,
    pub arcs: Option<ArcStore>,
    pub info: DatasetInfo,
}

pub(crate) fn expand_bounds(bounds: Option<[f64; 4]>, x: f64, y: f64) -> [f64; 4] {
    match bounds {
        None => [x, y, x, y],
        Some(b) => [b[0].min(x), b[1].min(y), b[2].max(x), b[3].max(y)],
    }
}
