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

use std::fmt;
use std::str::FromStr;

use crate::json::{Deserialize, Deserializer, JsonObject, JsonValue, Serialize, Serializer};
use crate::{util, Arc, Bbox, Error, Geometry, NamedGeometry, Transform};

const GEOMETRY_TAGS: [&str; 7] = [
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
];

/// A parsed Topology object.
///
/// `arcs` holds the raw wire arcs: integer deltas when `transform` is
/// present, absolute positions otherwise. Decoding them is the importer's
/// job, see [`crate::decode_arcs`].
///
/// [TopoJSON Format Specification § 2.1](https://github.com/topojson/topojson-specification#21-topology-objects)
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    pub objects: Vec<NamedGeometry>,
    pub arcs: Vec<Arc>,
    pub transform: Option<Transform>,
    pub bbox: Option<Bbox>,
    pub foreign_members: Option<JsonObject>,
}

impl Topology {
    pub fn from_json_object(mut object: JsonObject) -> Result<Self, Error> {
        match util::take_type(&mut object)?.as_str() {
            "Topology" => (),
            tag => return Err(Error::UnknownType(tag.to_string())),
        }
        let transform = match object.remove("transform") {
            Some(value) => Some(Transform::from_json(&value)?),
            None => None,
        };
        Ok(Topology {
            objects: util::take_objects(&mut object)?,
            arcs: util::take_wire_arcs(&mut object)?,
            transform,
            bbox: util::take_bbox(&mut object)?,
            foreign_members: util::foreign_members(object),
        })
    }

    /// Looks up a named geometry object.
    pub fn object(&self, name: &str) -> Option<&Geometry> {
        self.objects
            .iter()
            .find(|named| named.name == name)
            .map(|named| &named.geometry)
    }
}

impl<'a> From<&'a Topology> for JsonObject {
    fn from(topo: &'a Topology) -> JsonObject {
        let mut map = JsonObject::new();
        map.insert(String::from("type"), JsonValue::from("Topology"));
        let mut objects = JsonObject::new();
        for named in &topo.objects {
            objects.insert(
                named.name.clone(),
                JsonValue::Object(JsonObject::from(&named.geometry)),
            );
        }
        map.insert(String::from("objects"), JsonValue::Object(objects));
        map.insert(String::from("arcs"), JsonValue::from(topo.arcs.clone()));
        if let Some(ref transform) = topo.transform {
            map.insert(
                String::from("transform"),
                JsonValue::Object(transform.to_json_object()),
            );
        }
        if let Some(ref bbox) = topo.bbox {
            map.insert(String::from("bbox"), JsonValue::from(bbox.clone()));
        }
        if let Some(ref foreign_members) = topo.foreign_members {
            for (key, value) in foreign_members {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }
}

impl Serialize for Topology {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        JsonObject::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Topology {
    fn deserialize<D>(deserializer: D) -> Result<Topology, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as SerdeError;

        let object = JsonObject::deserialize(deserializer)?;
        Topology::from_json_object(object).map_err(|e| D::Error::custom(e.to_string()))
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        serde_json::to_string(self)
            .map_err(|_| fmt::Error)
            .and_then(|s| f.write_str(&s))
    }
}

/// Any top-level TopoJSON object.
///
/// [TopoJSON Format Specification § 2](https://github.com/topojson/topojson-specification#2-topojson-objects)
#[derive(Clone, Debug, PartialEq)]
pub enum TopoJson {
    Geometry(Geometry),
    Topology(Topology),
}

impl TopoJson {
    pub fn from_json_object(object: JsonObject) -> Result<Self, Error> {
        let tag = match object.get("type") {
            Some(JsonValue::String(t)) => t.clone(),
            _ => return Err(Error::ExpectedProperty(String::from("type"))),
        };
        if tag == "Topology" {
            Topology::from_json_object(object).map(TopoJson::Topology)
        } else if GEOMETRY_TAGS.contains(&tag.as_str()) {
            Geometry::from_json_object(object).map(TopoJson::Geometry)
        } else {
            Err(Error::UnknownType(tag))
        }
    }
}

impl From<Geometry> for TopoJson {
    fn from(geometry: Geometry) -> Self {
        TopoJson::Geometry(geometry)
    }
}

impl From<Topology> for TopoJson {
    fn from(topo: Topology) -> Self {
        TopoJson::Topology(topo)
    }
}

impl From<TopoJson> for Option<Topology> {
    fn from(topo: TopoJson) -> Self {
        match topo {
            TopoJson::Topology(t) => Some(t),
            TopoJson::Geometry(_) => None,
        }
    }
}

impl<'a> From<&'a TopoJson> for JsonObject {
    fn from(topo: &'a TopoJson) -> JsonObject {
        match *topo {
            TopoJson::Geometry(ref geometry) => geometry.into(),
            TopoJson::Topology(ref topology) => topology.into(),
        }
    }
}

impl Serialize for TopoJson {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        JsonObject::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TopoJson {
    fn deserialize<D>(deserializer: D) -> Result<TopoJson, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as SerdeError;

        let object = JsonObject::deserialize(deserializer)?;
        TopoJson::from_json_object(object).map_err(|e| D::Error::custom(e.to_string()))
    }
}

impl FromStr for TopoJson {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let object = match serde_json::from_str(s) {
            Ok(JsonValue::Object(object)) => object,
            _ => return Err(Error::MalformedJson),
        };
        TopoJson::from_json_object(object)
    }
}

impl fmt::Display for TopoJson {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        serde_json::to_string(self)
            .map_err(|_| fmt::Error)
            .and_then(|s| f.write_str(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn decode_topology(json_str: &str) -> Topology {
        match json_str.parse::<TopoJson>().unwrap() {
            TopoJson::Topology(t) => t,
            _ => unreachable!(),
        }
    }

    #[test]
    fn decode_invalid_topologies() {
        for json_str in [
            "{}",
            r#"{"type":"foo"}"#,
            r#"{"type":"Topology"}"#,
            r#"{"type":"Topology","objects":{}}"#,
        ] {
            assert!(json_str.parse::<TopoJson>().is_err(), "{}", json_str);
        }
    }

    #[test]
    fn decode_topology_missing_arcs() {
        let result = r#"{"type":"Topology","objects":{}}"#.parse::<TopoJson>();
        assert_eq!(result.unwrap_err(), Error::TopologyExpectedArcs);
    }

    #[test]
    fn decode_simple_topology_from_spec() {
        // Non-quantized example from the TopoJSON specification.
        let topo = decode_topology(
            r#"{"type":"Topology","objects":{"example":{"type":"GeometryCollection","geometries":[{"type":"Point","properties":{"prop0":"value0"},"coordinates":[102.0,0.5]},{"type":"LineString","arcs":[0]},{"type":"Polygon","arcs":[[-2]]}]}},"arcs":[[[102.0,0.0],[103.0,1.0],[104.0,0.0],[105.0,1.0]],[[100.0,0.0],[101.0,0.0],[101.0,1.0],[100.0,1.0],[100.0,0.0]]]}"#,
        );
        assert!(topo.transform.is_none());
        assert_eq!(topo.arcs.len(), 2);
        assert_eq!(topo.arcs[1].len(), 5);
        let example = topo.object("example").unwrap();
        match &example.value {
            Value::GeometryCollection(children) => {
                assert_eq!(children.len(), 3);
                assert_eq!(children[1].value, Value::LineString(vec![0]));
                assert_eq!(children[2].value, Value::Polygon(vec![vec![-2]]));
            }
            _ => panic!("expected a GeometryCollection"),
        }
    }

    #[test]
    fn decode_quantized_topology_keeps_raw_deltas() {
        let topo = decode_topology(
            r#"{"type":"Topology","transform":{"scale":[0.0005,0.0001],"translate":[100,0]},"objects":{"example":{"type":"LineString","arcs":[0]}},"arcs":[[[4000,0],[1999,9999],[2000,-9999]]]}"#,
        );
        let transform = topo.transform.unwrap();
        assert_eq!(transform.translate, [100.0, 0.0]);
        // Raw deltas are untouched until the importer decodes them.
        assert_eq!(topo.arcs[0][1], vec![1999.0, 9999.0]);
    }

    #[test]
    fn encode_decode_topology_round_trip() {
        let topo = decode_topology(
            r#"{"type":"Topology","objects":{"lines":{"type":"MultiLineString","arcs":[[0],[-1]]}},"arcs":[[[0.0,0.0],[1.0,2.0]]],"bbox":[0.0,0.0,1.0,2.0]}"#,
        );
        let encoded = serde_json::to_string(&topo).unwrap();
        assert_eq!(decode_topology(&encoded), topo);
    }

    #[test]
    fn objects_keep_wire_order() {
        let topo = decode_topology(
            r#"{"type":"Topology","objects":{"zebra":{"type":"Point","coordinates":[0,0]},"aardvark":{"type":"Point","coordinates":[1,1]}},"arcs":[]}"#,
        );
        let names: Vec<&str> = topo.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["zebra", "aardvark"]);
    }
}
