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

use log::debug;

use crate::decode::decode_position;
use crate::{
    decode_arcs, ArcStore, Dataset, DatasetInfo, Error, Geometry, GeometryType, Layer, Shape,
    ShapeRecord, Topology, Transform, Value,
};

#[derive(Clone, Debug, Default)]
pub struct ImportOptions {
    /// Snap every imported coordinate to the nearest multiple of this
    /// value. Lossy.
    pub precision: Option<f64>,
}

/// Post-import shape repair, performed by an external collaborator.
///
/// Decoding can introduce degenerate artifacts (zero-length arcs,
/// duplicate vertices); the importer hands every path-bearing layer's
/// shapes to the cleaner before accepting the layer.
pub trait ShapeCleaner {
    fn clean(
        &self,
        shapes: Vec<Shape>,
        arcs: &ArcStore,
        geometry_type: GeometryType,
    ) -> Vec<Shape>;
}

/// Cleaner that accepts shapes as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCleaner;

impl ShapeCleaner for NoopCleaner {
    fn clean(&self, shapes: Vec<Shape>, _arcs: &ArcStore, _: GeometryType) -> Vec<Shape> {
        shapes
    }
}

/// Converts a parsed wire topology into a [`Dataset`].
///
/// The topology is consumed: its arcs are decoded into the dataset's
/// [`ArcStore`] and each named object becomes one [`Layer`], in wire
/// order. Fails without producing a dataset on any invalid arc index or
/// on an object mixing geometry kinds.
pub fn import_topology(
    topology: Topology,
    options: &ImportOptions,
    cleaner: &dyn ShapeCleaner,
) -> Result<Dataset, Error> {
    let Topology {
        objects,
        arcs,
        transform,
        ..
    } = topology;

    let store = if arcs.is_empty() {
        None
    } else {
        let decoded = decode_arcs(arcs, transform.as_ref(), options.precision)?;
        Some(ArcStore::new(decoded))
    };

    let mut layers = Vec::with_capacity(objects.len());
    for named in objects {
        let mut layer = import_object(
            named.name,
            named.geometry,
            transform.as_ref(),
            options.precision,
        )?;
        let arc_count = store.as_ref().map_or(0, ArcStore::len);
        check_arc_indexes(&layer, arc_count)?;
        if layer.has_paths() {
            if let (Some(store), Some(geometry_type)) = (store.as_ref(), layer.geometry_type) {
                layer.shapes = cleaner.clean(std::mem::take(&mut layer.shapes), store, geometry_type);
            }
        }
        debug!(
            "imported layer '{}': {} {} shape(s)",
            layer.name,
            layer.shapes.len(),
            layer
                .geometry_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "empty".to_string()),
        );
        layers.push(layer);
    }

    Ok(Dataset {
        layers,
        arcs: store,
        info: DatasetInfo::default(),
    })
}

fn import_object(
    name: String,
    geometry: Geometry,
    transform: Option<&Transform>,
    precision: Option<f64>,
) -> Result<Layer, Error> {
    let mut shapes = Vec::new();
    let mut records = Vec::new();
    collect_shapes(geometry, transform, precision, &mut shapes, &mut records)?;

    // The layer kind is decided by the first non-empty shape; every other
    // shape must agree with it.
    let geometry_type = shapes
        .iter()
        .find(|s| !s.is_empty())
        .or_else(|| shapes.first())
        .map(Shape::geometry_type);
    if let Some(expected) = geometry_type {
        for shape in &shapes {
            let found = shape.geometry_type();
            if found != expected {
                return Err(Error::MixedGeometryCollection { expected, found });
            }
        }
    }

    Ok(Layer {
        name,
        geometry_type,
        shapes,
        records,
    })
}

fn collect_shapes(
    geometry: Geometry,
    transform: Option<&Transform>,
    precision: Option<f64>,
    shapes: &mut Vec<Shape>,
    records: &mut Vec<ShapeRecord>,
) -> Result<(), Error> {
    let Geometry {
        value,
        id,
        properties,
        ..
    } = geometry;
    match value {
        Value::GeometryCollection(children) => {
            for child in children {
                collect_shapes(child, transform, precision, shapes, records)?;
            }
        }
        value => {
            shapes.push(shape_from_value(value, transform, precision)?);
            records.push(ShapeRecord { id, properties });
        }
    }
    Ok(())
}

fn shape_from_value(
    value: Value,
    transform: Option<&Transform>,
    precision: Option<f64>,
) -> Result<Shape, Error> {
    Ok(match value {
        Value::Point(pos) => Shape::Points(vec![decode_position(pos, transform, precision)?]),
        Value::MultiPoint(positions) => Shape::Points(
            positions
                .into_iter()
                .map(|pos| decode_position(pos, transform, precision))
                .collect::<Result<_, _>>()?,
        ),
        Value::LineString(path) => Shape::Lines(vec![path]),
        Value::MultiLineString(paths) => Shape::Lines(paths),
        Value::Polygon(rings) => Shape::Rings(vec![rings]),
        Value::MultiPolygon(parts) => Shape::Rings(parts),
        Value::GeometryCollection(..) => unreachable!("flattened by collect_shapes"),
    })
}

fn check_arc_indexes(layer: &Layer, arc_count: usize) -> Result<(), Error> {
    for shape in &layer.shapes {
        for index in shape.arc_indexes() {
            let resolved = if index < 0 {
                (-(index as i64) - 1) as usize
            } else {
                index as usize
            };
            if resolved >= arc_count {
                return Err(Error::ArcIndexOutOfBounds { index, arc_count });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TopoJson;

    fn parse(json_str: &str) -> Topology {
        match json_str.parse::<TopoJson>().unwrap() {
            TopoJson::Topology(t) => t,
            _ => unreachable!(),
        }
    }

    fn import(json_str: &str) -> Result<Dataset, Error> {
        import_topology(parse(json_str), &ImportOptions::default(), &NoopCleaner)
    }

    #[test]
    fn import_polygon_layer() {
        let dataset = import(
            r#"{"type":"Topology","objects":{"land":{"type":"GeometryCollection","geometries":[{"type":"Polygon","arcs":[[0,1]]},{"type":"MultiPolygon","arcs":[[[-1]],[[1]]]}]}},"arcs":[[[0.0,0.0],[1.0,1.0]],[[1.0,1.0],[0.0,0.0]]]}"#,
        )
        .unwrap();
        assert_eq!(dataset.layers.len(), 1);
        let layer = &dataset.layers[0];
        assert_eq!(layer.name, "land");
        assert_eq!(layer.geometry_type, Some(GeometryType::Polygon));
        assert_eq!(
            layer.shapes,
            vec![
                Shape::Rings(vec![vec![vec![0, 1]]]),
                Shape::Rings(vec![vec![vec![-1]], vec![vec![1]]]),
            ]
        );
        assert_eq!(dataset.arcs.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn import_decodes_quantized_arcs_and_points() {
        let dataset = import(
            r#"{"type":"Topology","transform":{"scale":[0.5,0.25],"translate":[100.0,0.0]},"objects":{"line":{"type":"LineString","arcs":[0]},"spot":{"type":"Point","coordinates":[4,8]}},"arcs":[[[4,0],[2,4],[-2,4]]]}"#,
        )
        .unwrap();
        let store = dataset.arcs.as_ref().unwrap();
        assert_eq!(
            store.arc(0).unwrap(),
            &vec![vec![102.0, 0.0], vec![103.0, 1.0], vec![102.0, 2.0]]
        );
        assert_eq!(
            dataset.layers[1].shapes,
            vec![Shape::Points(vec![vec![102.0, 2.0]])]
        );
    }

    #[test]
    fn import_without_arcs_produces_point_dataset() {
        let dataset = import(
            r#"{"type":"Topology","arcs":[],"objects":{"point":{"type":"GeometryCollection","geometries":[{"type":"Point","coordinates":[0.0,0.0]}]}}}"#,
        )
        .unwrap();
        assert!(dataset.arcs.is_none());
        assert_eq!(dataset.layers[0].geometry_type, Some(GeometryType::Point));
    }

    #[test]
    fn mixed_point_and_path_collection_fails() {
        let result = import(
            r#"{"type":"Topology","objects":{"mix":{"type":"GeometryCollection","geometries":[{"type":"Point","coordinates":[0.0,0.0]},{"type":"LineString","arcs":[0]}]}},"arcs":[[[0.0,0.0],[1.0,1.0]]]}"#,
        );
        assert_eq!(
            result.unwrap_err(),
            Error::MixedGeometryCollection {
                expected: GeometryType::Point,
                found: GeometryType::Polyline,
            }
        );
    }

    #[test]
    fn out_of_bounds_arc_index_fails() {
        let result = import(
            r#"{"type":"Topology","objects":{"line":{"type":"LineString","arcs":[5]}},"arcs":[[[0.0,0.0],[1.0,1.0]],[[1.0,1.0],[2.0,0.0]],[[2.0,0.0],[3.0,1.0]]]}"#,
        );
        assert_eq!(
            result.unwrap_err(),
            Error::ArcIndexOutOfBounds {
                index: 5,
                arc_count: 3
            }
        );
    }

    #[test]
    fn path_object_without_arcs_fails() {
        let result = import(
            r#"{"type":"Topology","arcs":[],"objects":{"line":{"type":"LineString","arcs":[0]}}}"#,
        );
        assert_eq!(
            result.unwrap_err(),
            Error::ArcIndexOutOfBounds {
                index: 0,
                arc_count: 0
            }
        );
    }

    #[test]
    fn import_precision_snaps_coordinates() {
        let topo = parse(
            r#"{"type":"Topology","objects":{"line":{"type":"LineString","arcs":[0]}},"arcs":[[[0.26,0.74],[1.01,1.49]]]}"#,
        );
        let options = ImportOptions {
            precision: Some(0.5),
        };
        let dataset = import_topology(topo, &options, &NoopCleaner).unwrap();
        assert_eq!(
            dataset.arcs.as_ref().unwrap().arc(0).unwrap(),
            &vec![vec![0.5, 0.5], vec![1.0, 1.5]]
        );
    }

    #[test]
    fn records_follow_shapes() {
        let dataset = import(
            r#"{"type":"Topology","objects":{"line":{"type":"GeometryCollection","geometries":[{"type":"LineString","arcs":[0],"id":7,"properties":{"name":"border"}}]}},"arcs":[[[0.0,0.0],[1.0,1.0]]]}"#,
        )
        .unwrap();
        let record = &dataset.layers[0].records[0];
        assert_eq!(record.id, Some(serde_json::to_value(7).unwrap()));
        assert_eq!(
            record.properties.as_ref().unwrap().get("name").unwrap(),
            "border"
        );
    }

    #[test]
    fn cleaner_replaces_layer_shapes() {
        struct DropLast;
        impl ShapeCleaner for DropLast {
            fn clean(
                &self,
                mut shapes: Vec<Shape>,
                _: &ArcStore,
                _: GeometryType,
            ) -> Vec<Shape> {
                shapes.pop();
                shapes
            }
        }

        let topo = parse(
            r#"{"type":"Topology","objects":{"lines":{"type":"MultiLineString","arcs":[[0],[0]]}},"arcs":[[[0.0,0.0],[1.0,1.0]]]}"#,
        );
        let dataset = import_topology(topo, &ImportOptions::default(), &DropLast).unwrap();
        assert!(dataset.layers[0].shapes.is_empty());
    }
}
