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

use crate::dataset::expand_bounds;
use crate::stringify::{stringify, stringify_pretty};
use crate::{
    Arc, ArcStore, Dataset, DatasetInfo, Error, Geometry, Layer, NamedGeometry, Position, Shape,
    Topology, Transform, Value,
};

#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Coordinate precision the quantization grid must not exceed.
    pub precision: Option<f64>,
    /// Quantize and delta-encode arcs. On by default; skipped when the
    /// dataset has no arcs to encode.
    pub quantize: bool,
    /// Emit a top-level bbox member.
    pub bbox: bool,
    /// Render coordinate arrays on single lines, see
    /// [`crate::stringify_pretty`].
    pub prettify: bool,
    pub output_file: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            precision: None,
            quantize: true,
            bbox: false,
            prettify: false,
            output_file: None,
        }
    }
}

/// Serialized topology paired with its resolved output filename.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputFile {
    pub filename: String,
    pub content: String,
}

/// Converts a dataset back into a wire topology.
///
/// A fresh `Topology` is allocated on every call; the dataset and its arc
/// store are never mutated. When quantizing, the transform is fitted to
/// the bounding box of every arc vertex and every point-shape coordinate,
/// and each arc is re-encoded as integer deltas with an absolute first
/// point.
pub fn export_topology(dataset: &Dataset, options: &ExportOptions) -> Result<Topology, Error> {
    let store = dataset.arcs.as_ref();
    let references_arcs = dataset
        .layers
        .iter()
        .any(|layer| layer.has_paths() && layer.shapes.iter().any(|s| !s.is_empty()));
    if references_arcs && store.map_or(true, ArcStore::is_empty) {
        // A prior stage dropped the arc store out from under its layers.
        return Err(Error::MissingArcStore);
    }

    let bounds = dataset_bounds(dataset);

    let transform = match (options.quantize, store, bounds) {
        (true, Some(store), Some(bounds)) if !store.is_empty() => {
            let tr = Transform::fit(&bounds, options.precision)?;
            debug!(
                "export transform: scale {:?}, translate {:?}",
                tr.scale, tr.translate
            );
            Some(tr)
        }
        _ => None,
    };

    let arcs = match store {
        Some(store) => match &transform {
            Some(tr) => encode_arcs(store, tr),
            None => store.iter().cloned().collect(),
        },
        None => Vec::new(),
    };

    let mut objects = Vec::with_capacity(dataset.layers.len());
    for layer in &dataset.layers {
        objects.push(NamedGeometry {
            name: layer.name.clone(),
            geometry: export_layer(layer, transform.as_ref()),
        });
    }

    Ok(Topology {
        objects,
        arcs,
        transform,
        bbox: match (options.bbox, bounds) {
            (true, Some(b)) => Some(b.to_vec()),
            _ => None,
        },
        foreign_members: None,
    })
}

/// Serializes a dataset and resolves where to write it: the explicit
/// `output_file` option, else the common basename of the recorded input
/// files, else a fixed default.
pub fn export_files(dataset: &Dataset, options: &ExportOptions) -> Result<Vec<OutputFile>, Error> {
    let topology = export_topology(dataset, options)?;
    let content = if options.prettify {
        stringify_pretty(&topology)
    } else {
        stringify(&topology)
    };
    Ok(vec![OutputFile {
        filename: output_filename(options, &dataset.info),
        content,
    }])
}

fn dataset_bounds(dataset: &Dataset) -> Option<[f64; 4]> {
    let mut bounds = dataset.arcs.as_ref().and_then(ArcStore::bounds);
    for layer in &dataset.layers {
        for shape in &layer.shapes {
            if let Shape::Points(points) = shape {
                for point in points {
                    bounds = Some(expand_bounds(bounds, point[0], point[1]));
                }
            }
        }
    }
    bounds
}

fn encode_arcs(store: &ArcStore, transform: &Transform) -> Vec<Arc> {
    store
        .iter()
        .map(|arc| {
            let mut encoded = Vec::with_capacity(arc.len());
            let mut previous: Option<(i64, i64)> = None;
            for point in arc {
                let (qx, qy) = transform.to_quantized(point[0], point[1]);
                let delta = match previous {
                    // First point is absolute.
                    None => vec![qx as f64, qy as f64],
                    Some((px, py)) => vec![(qx - px) as f64, (qy - py) as f64],
                };
                previous = Some((qx, qy));
                encoded.push(delta);
            }
            encoded
        })
        .collect()
}

fn export_layer(layer: &Layer, transform: Option<&Transform>) -> Geometry {
    let mut children = Vec::with_capacity(layer.shapes.len());
    for (i, shape) in layer.shapes.iter().enumerate() {
        let value = match shape {
            Shape::Points(points) => {
                let mut points: Vec<Position> = points
                    .iter()
                    .map(|p| encode_position(p, transform))
                    .collect();
                if points.len() == 1 {
                    Value::Point(points.remove(0))
                } else {
                    Value::MultiPoint(points)
                }
            }
            Shape::Lines(paths) => {
                if paths.len() == 1 {
                    Value::LineString(paths[0].clone())
                } else {
                    Value::MultiLineString(paths.clone())
                }
            }
            Shape::Rings(parts) => {
                if parts.len() == 1 {
                    Value::Polygon(parts[0].clone())
                } else {
                    Value::MultiPolygon(parts.clone())
                }
            }
        };
        let record = layer.records.get(i).cloned().unwrap_or_default();
        children.push(Geometry {
            value,
            bbox: None,
            id: record.id,
            properties: record.properties,
            foreign_members: None,
        });
    }
    Geometry::new(Value::GeometryCollection(children))
}

fn encode_position(position: &Position, transform: Option<&Transform>) -> Position {
    match transform {
        Some(tr) => {
            let (qx, qy) = tr.to_quantized(position[0], position[1]);
            vec![qx as f64, qy as f64]
        }
        None => position.clone(),
    }
}

fn output_filename(options: &ExportOptions, info: &DatasetInfo) -> String {
    if let Some(ref name) = options.output_file {
        name.clone()
    } else if !info.input_files.is_empty() {
        let base = common_file_base(&info.input_files).unwrap_or_else(|| String::from("output"));
        format!("{}.json", base)
    } else {
        String::from("output.json")
    }
}

fn file_base(path: &str) -> &str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(ix) => &name[..ix],
    }
}

/// Longest shared basename prefix across input files, trimmed of dangling
/// separators.
fn common_file_base(names: &[String]) -> Option<String> {
    let mut iter = names.iter();
    let first = file_base(iter.next()?);
    let mut common = first.len();
    for name in iter {
        let base = file_base(name);
        common = first[..common]
            .chars()
            .zip(base.chars())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.len_utf8())
            .sum();
    }
    let base = first[..common].trim_end_matches(['-', '_', '.', ' ']);
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}
