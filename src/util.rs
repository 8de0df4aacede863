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

//! JsonObject extraction helpers shared by the wire-model parsers.
//!
//! Members are removed from the object as they are consumed; whatever is
//! left at the end becomes the foreign members.

use crate::json::{JsonObject, JsonValue};
use crate::{Arc, ArcIndexes, Bbox, Error, Geometry, NamedGeometry, Position};

pub fn take_property(object: &mut JsonObject, name: &'static str) -> Result<JsonValue, Error> {
    object
        .remove(name)
        .ok_or_else(|| Error::ExpectedProperty(name.to_string()))
}

/// Removes and returns the `type` tag of a wire object.
pub fn take_type(object: &mut JsonObject) -> Result<String, Error> {
    match take_property(object, "type")? {
        JsonValue::String(tag) => Ok(tag),
        _ => Err(Error::ExpectedStringValue),
    }
}

pub fn expect_object(value: &JsonValue) -> Result<&JsonObject, Error> {
    value.as_object().ok_or(Error::ExpectedObjectValue)
}

fn into_array(value: JsonValue) -> Result<Vec<JsonValue>, Error> {
    match value {
        JsonValue::Array(items) => Ok(items),
        _ => Err(Error::ExpectedArrayValue),
    }
}

fn into_object(value: JsonValue) -> Result<JsonObject, Error> {
    match value {
        JsonValue::Object(object) => Ok(object),
        _ => Err(Error::ExpectedObjectValue),
    }
}

fn position_from_json(value: &JsonValue) -> Result<Position, Error> {
    let items = value.as_array().ok_or(Error::ExpectedArrayValue)?;
    if items.len() < 2 {
        return Err(Error::PositionTooShort(items.len()));
    }
    items
        .iter()
        .map(|c| c.as_f64().ok_or(Error::ExpectedF64Value))
        .collect()
}

fn positions_from_json(value: &JsonValue) -> Result<Vec<Position>, Error> {
    value
        .as_array()
        .ok_or(Error::ExpectedArrayValue)?
        .iter()
        .map(position_from_json)
        .collect()
}

fn arc_indexes_from_json(value: &JsonValue) -> Result<ArcIndexes, Error> {
    value
        .as_array()
        .ok_or(Error::ExpectedArrayValue)?
        .iter()
        .map(|ix| {
            ix.as_i64()
                .map(|v| v as i32)
                .ok_or(Error::ExpectedI32Value)
        })
        .collect()
}

/// `coordinates` of a Point.
pub fn take_position(object: &mut JsonObject) -> Result<Position, Error> {
    position_from_json(&take_property(object, "coordinates")?)
}

/// `coordinates` of a MultiPoint.
pub fn take_positions(object: &mut JsonObject) -> Result<Vec<Position>, Error> {
    positions_from_json(&take_property(object, "coordinates")?)
}

/// `arcs` of a LineString.
pub fn take_arc_indexes(object: &mut JsonObject) -> Result<ArcIndexes, Error> {
    arc_indexes_from_json(&take_property(object, "arcs")?)
}

/// `arcs` of a MultiLineString or Polygon.
pub fn take_arc_indexes_1d(object: &mut JsonObject) -> Result<Vec<ArcIndexes>, Error> {
    take_property(object, "arcs")?
        .as_array()
        .ok_or(Error::ExpectedArrayValue)?
        .iter()
        .map(arc_indexes_from_json)
        .collect()
}

/// `arcs` of a MultiPolygon.
pub fn take_arc_indexes_2d(object: &mut JsonObject) -> Result<Vec<Vec<ArcIndexes>>, Error> {
    take_property(object, "arcs")?
        .as_array()
        .ok_or(Error::ExpectedArrayValue)?
        .iter()
        .map(|part| {
            part.as_array()
                .ok_or(Error::ExpectedArrayValue)?
                .iter()
                .map(arc_indexes_from_json)
                .collect()
        })
        .collect()
}

/// `geometries` of a GeometryCollection.
pub fn take_geometries(object: &mut JsonObject) -> Result<Vec<Geometry>, Error> {
    let children = into_array(take_property(object, "geometries")?)?;
    children
        .into_iter()
        .map(|child| Geometry::from_json_object(into_object(child)?))
        .collect()
}

pub fn take_id(object: &mut JsonObject) -> Option<JsonValue> {
    object.remove("id")
}

pub fn take_properties(object: &mut JsonObject) -> Result<Option<JsonObject>, Error> {
    match object.remove("properties") {
        Some(JsonValue::Object(properties)) => Ok(Some(properties)),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(Error::PropertiesExpectedObjectOrNull),
    }
}

pub fn take_bbox(object: &mut JsonObject) -> Result<Option<Bbox>, Error> {
    let bbox = match object.remove("bbox") {
        Some(JsonValue::Array(items)) => items,
        Some(_) => return Err(Error::BboxExpectedArray),
        None => return Ok(None),
    };
    bbox.into_iter()
        .map(|v| v.as_f64().ok_or(Error::BboxExpectedNumericValues))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Remaining members of an already-consumed wire object.
pub fn foreign_members(object: JsonObject) -> Option<JsonObject> {
    if object.is_empty() {
        None
    } else {
        Some(object)
    }
}

/// `objects` member of a Topology, in wire order.
pub fn take_objects(object: &mut JsonObject) -> Result<Vec<NamedGeometry>, Error> {
    match object.remove("objects") {
        Some(JsonValue::Object(entries)) => entries
            .into_iter()
            .map(|(name, value)| {
                Ok(NamedGeometry {
                    name,
                    geometry: Geometry::from_json_object(into_object(value)?)?,
                })
            })
            .collect(),
        Some(_) | None => Err(Error::TopologyExpectedObjects),
    }
}

/// `arcs` member of a Topology: raw wire arcs, deltas when the topology
/// carries a transform.
pub fn take_wire_arcs(object: &mut JsonObject) -> Result<Vec<Arc>, Error> {
    match object.remove("arcs") {
        Some(value) => into_array(value)?
            .into_iter()
            .map(|arc| positions_from_json(&arc))
            .collect(),
        None => Err(Error::TopologyExpectedArcs),
    }
}
