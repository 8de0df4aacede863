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

use crate::json::{Deserialize, Deserializer, JsonObject, JsonValue, Serialize, Serializer};
use crate::{util, ArcIndexes, Bbox, Error, Position};

/// The underlying geometry value: literal positions for point variants,
/// signed arc indexes for path variants.
///
/// [TopoJSON Format Specification § 2.2](https://github.com/topojson/topojson-specification#22-geometry-objects)
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(ArcIndexes),
    MultiLineString(Vec<ArcIndexes>),
    Polygon(Vec<ArcIndexes>),
    MultiPolygon(Vec<Vec<ArcIndexes>>),
    GeometryCollection(Vec<Geometry>),
}

impl Value {
    pub fn type_tag(&self) -> &'static str {
        match *self {
            Value::Point(..) => "Point",
            Value::MultiPoint(..) => "MultiPoint",
            Value::LineString(..) => "LineString",
            Value::MultiLineString(..) => "MultiLineString",
            Value::Polygon(..) => "Polygon",
            Value::MultiPolygon(..) => "MultiPolygon",
            Value::GeometryCollection(..) => "GeometryCollection",
        }
    }

    /// Name of the wire member holding this value.
    fn member_key(&self) -> &'static str {
        match *self {
            Value::Point(..) | Value::MultiPoint(..) => "coordinates",
            Value::GeometryCollection(..) => "geometries",
            _ => "arcs",
        }
    }

    fn to_json_value(&self) -> JsonValue {
        match *self {
            Value::Point(ref pos) => JsonValue::from(pos.clone()),
            Value::MultiPoint(ref positions) => JsonValue::from(positions.clone()),
            Value::LineString(ref ixs) => JsonValue::from(ixs.clone()),
            Value::MultiLineString(ref paths) => JsonValue::from(paths.clone()),
            Value::Polygon(ref rings) => JsonValue::from(rings.clone()),
            Value::MultiPolygon(ref parts) => JsonValue::from(parts.clone()),
            Value::GeometryCollection(ref children) => JsonValue::Array(
                children
                    .iter()
                    .map(|child| JsonValue::Object(JsonObject::from(child)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json_value().serialize(serializer)
    }
}

/// A TopoJSON geometry object.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    pub value: Value,
    pub bbox: Option<Bbox>,
    pub id: Option<JsonValue>,
    pub properties: Option<JsonObject>,
    pub foreign_members: Option<JsonObject>,
}

impl Geometry {
    /// Returns a new `Geometry` carrying only the given `value`.
    pub fn new(value: Value) -> Self {
        Geometry {
            value,
            bbox: None,
            id: None,
            properties: None,
            foreign_members: None,
        }
    }

    pub fn from_json_object(mut object: JsonObject) -> Result<Self, Error> {
        let value = match util::take_type(&mut object)?.as_str() {
            "Point" => Value::Point(util::take_position(&mut object)?),
            "MultiPoint" => Value::MultiPoint(util::take_positions(&mut object)?),
            "LineString" => Value::LineString(util::take_arc_indexes(&mut object)?),
            "MultiLineString" => Value::MultiLineString(util::take_arc_indexes_1d(&mut object)?),
            "Polygon" => Value::Polygon(util::take_arc_indexes_1d(&mut object)?),
            "MultiPolygon" => Value::MultiPolygon(util::take_arc_indexes_2d(&mut object)?),
            "GeometryCollection" => {
                Value::GeometryCollection(util::take_geometries(&mut object)?)
            }
            tag => return Err(Error::UnsupportedGeometryType(tag.to_string())),
        };
        Ok(Geometry {
            value,
            bbox: util::take_bbox(&mut object)?,
            id: util::take_id(&mut object),
            properties: util::take_properties(&mut object)?,
            foreign_members: util::foreign_members(object),
        })
    }
}

impl<'a> From<&'a Geometry> for JsonObject {
    fn from(geometry: &'a Geometry) -> JsonObject {
        let mut map = JsonObject::new();
        map.insert(
            String::from("type"),
            JsonValue::from(geometry.value.type_tag()),
        );
        map.insert(
            String::from(geometry.value.member_key()),
            geometry.value.to_json_value(),
        );
        if let Some(ref bbox) = geometry.bbox {
            map.insert(String::from("bbox"), JsonValue::from(bbox.clone()));
        }
        if let Some(ref id) = geometry.id {
            map.insert(String::from("id"), id.clone());
        }
        if let Some(ref properties) = geometry.properties {
            map.insert(
                String::from("properties"),
                JsonValue::Object(properties.clone()),
            );
        }
        if let Some(ref foreign_members) = geometry.foreign_members {
            for (key, value) in foreign_members {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }
}

impl Serialize for Geometry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        JsonObject::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D>(deserializer: D) -> Result<Geometry, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as SerdeError;

        let object = JsonObject::deserialize(deserializer)?;
        Geometry::from_json_object(object).map_err(|e| D::Error::custom(e.to_string()))
    }
}

/// One entry of the `objects` member of a Topology.
///
/// [TopoJSON Format Specification § 2.1.5](https://github.com/topojson/topojson-specification#215-objects)
#[derive(Clone, Debug, PartialEq)]
pub struct NamedGeometry {
    pub name: String,
    pub geometry: Geometry,
}

#[cfg(test)]
mod tests {
    use crate::{Error, Geometry, TopoJson, Value};

    fn encode(geometry: &Geometry) -> String {
        serde_json::to_string(geometry).unwrap()
    }

    fn decode(json_string: &str) -> Geometry {
        match json_string.parse().unwrap() {
            TopoJson::Geometry(g) => g,
            _ => unreachable!(),
        }
    }

    #[test]
    fn decode_linestring_without_arcs_member() {
        let result = r#"{"type":"LineString","coordinates":[0]}"#.parse::<TopoJson>();
        assert_eq!(
            result.unwrap_err(),
            Error::ExpectedProperty(String::from("arcs"))
        );
    }

    #[test]
    fn encode_decode_point() {
        let json_str = r#"{"type":"Point","coordinates":[1.1,2.1]}"#;
        let geometry = Geometry::new(Value::Point(vec![1.1, 2.1]));

        assert_eq!(encode(&geometry), json_str);
        assert_eq!(decode(json_str), geometry);
    }

    #[test]
    fn encode_decode_linestring() {
        let json_str = r#"{"type":"LineString","arcs":[0,-1]}"#;
        let geometry = Geometry::new(Value::LineString(vec![0, -1]));

        assert_eq!(encode(&geometry), json_str);
        assert_eq!(decode(json_str), geometry);
    }

    #[test]
    fn encode_decode_polygon() {
        let json_str = r#"{"type":"Polygon","arcs":[[1]]}"#;
        let geometry = Geometry::new(Value::Polygon(vec![vec![1]]));

        assert_eq!(encode(&geometry), json_str);
        assert_eq!(decode(json_str), geometry);
    }

    #[test]
    fn encode_decode_multipolygon() {
        let json_str = r#"{"type":"MultiPolygon","arcs":[[[0,1]],[[-3]]]}"#;
        let geometry = Geometry::new(Value::MultiPolygon(vec![vec![vec![0, 1]], vec![vec![-3]]]));

        assert_eq!(encode(&geometry), json_str);
        assert_eq!(decode(json_str), geometry);
    }

    #[test]
    fn encode_decode_point_with_properties_and_id() {
        let json_str = r#"{"type":"Point","coordinates":[1.1,2.1],"id":"a1","properties":{"prop0":0}}"#;
        let mut properties = crate::json::JsonObject::new();
        properties.insert(String::from("prop0"), serde_json::to_value(0).unwrap());
        let geometry = Geometry {
            value: Value::Point(vec![1.1, 2.1]),
            bbox: None,
            id: Some(serde_json::to_value("a1").unwrap()),
            properties: Some(properties),
            foreign_members: None,
        };

        assert_eq!(encode(&geometry), json_str);
        assert_eq!(decode(json_str), geometry);
    }

    #[test]
    fn encode_decode_point_with_foreign_member() {
        let json_str = r#"{"type":"Point","coordinates":[1.1,2.1],"other_member":true}"#;
        let mut foreign_members = crate::json::JsonObject::new();
        foreign_members.insert(
            String::from("other_member"),
            serde_json::to_value(true).unwrap(),
        );
        let geometry = Geometry {
            value: Value::Point(vec![1.1, 2.1]),
            bbox: None,
            id: None,
            properties: None,
            foreign_members: Some(foreign_members),
        };

        assert_eq!(encode(&geometry), json_str);
        assert_eq!(decode(json_str), geometry);
    }

    #[test]
    fn encode_decode_geometry_collection() {
        let json_str = r#"{"type":"GeometryCollection","geometries":[{"type":"Point","coordinates":[100.0,0.0]},{"type":"LineString","arcs":[0]}]}"#;
        let collection = Geometry::new(Value::GeometryCollection(vec![
            Geometry::new(Value::Point(vec![100.0, 0.0])),
            Geometry::new(Value::LineString(vec![0])),
        ]));

        assert_eq!(encode(&collection), json_str);
        assert_eq!(decode(json_str), collection);
    }

    #[test]
    fn decode_unknown_type_fails() {
        let result = r#"{"type":"Blob","coordinates":[0,0]}"#.parse::<TopoJson>();
        assert_eq!(
            result.unwrap_err(),
            Error::UnknownType(String::from("Blob"))
        );
    }
}
