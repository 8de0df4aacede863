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

use geojson::{Feature, FeatureCollection, Geometry as GeoJsonGeometry, Value as GeoJsonValue};

use crate::json::JsonValue;
use crate::{ArcIndexes, ArcStore, Dataset, Error, Layer, Position, Shape};

/// Converts one named layer of a dataset to a GeoJSON feature collection,
/// resolving every signed arc reference into literal coordinates.
///
/// (Comparable to the [topojson.feature](https://github.com/topojson/topojson-client#feature)
/// function of the reference client.)
pub fn to_geojson(dataset: &Dataset, name: &str) -> Result<FeatureCollection, Error> {
    let layer = dataset
        .layers
        .iter()
        .find(|layer| layer.name == name)
        .ok_or_else(|| Error::UnknownObjectKey(name.to_string()))?;
    layer_to_geojson(layer, dataset.arcs.as_ref())
}

pub fn layer_to_geojson(
    layer: &Layer,
    arcs: Option<&ArcStore>,
) -> Result<FeatureCollection, Error> {
    let mut features = Vec::with_capacity(layer.shapes.len());
    for (i, shape) in layer.shapes.iter().enumerate() {
        let value = match shape {
            Shape::Points(points) => {
                if points.len() == 1 {
                    GeoJsonValue::Point(points[0].clone())
                } else {
                    GeoJsonValue::MultiPoint(points.clone())
                }
            }
            Shape::Lines(paths) => {
                let store = arcs.ok_or(Error::MissingArcStore)?;
                if paths.len() == 1 {
                    GeoJsonValue::LineString(stitch_path(store, &paths[0])?)
                } else {
                    GeoJsonValue::MultiLineString(
                        paths
                            .iter()
                            .map(|path| stitch_path(store, path))
                            .collect::<Result<_, _>>()?,
                    )
                }
            }
            Shape::Rings(parts) => {
                let store = arcs.ok_or(Error::MissingArcStore)?;
                let mut polygons = Vec::with_capacity(parts.len());
                for rings in parts {
                    polygons.push(
                        rings
                            .iter()
                            .map(|ring| stitch_path(store, ring))
                            .collect::<Result<Vec<_>, _>>()?,
                    );
                }
                if polygons.len() == 1 {
                    GeoJsonValue::Polygon(polygons.remove(0))
                } else {
                    GeoJsonValue::MultiPolygon(polygons)
                }
            }
        };
        let record = layer.records.get(i);
        features.push(Feature {
            bbox: None,
            geometry: Some(GeoJsonGeometry::new(value)),
            id: record.and_then(|r| feature_id(&r.id)),
            properties: record.and_then(|r| r.properties.clone()),
            foreign_members: None,
        });
    }
    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Concatenates the referenced arcs into one path, dropping the duplicated
/// vertex where consecutive arcs join.
fn stitch_path(store: &ArcStore, indexes: &ArcIndexes) -> Result<Vec<Position>, Error> {
    let mut line: Vec<Position> = Vec::new();
    for &index in indexes {
        let mut points = store.resolve(index)?;
        if let (Some(last), Some(first)) = (line.last(), points.first()) {
            if last == first {
                points.remove(0);
            }
        }
        line.append(&mut points);
    }
    Ok(line)
}

fn feature_id(id: &Option<JsonValue>) -> Option<geojson::feature::Id> {
    match id {
        Some(JsonValue::String(s)) => Some(geojson::feature::Id::String(s.clone())),
        Some(JsonValue::Number(n)) => Some(geojson::feature::Id::Number(n.clone())),
        _ => None,
    }
}
