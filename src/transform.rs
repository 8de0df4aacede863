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

use crate::json::{JsonObject, JsonValue, Serialize, Serializer};
use crate::{util, Error};

/// Grid steps used when quantizing without an explicit precision.
const DEFAULT_QUANTA: f64 = 1e4;

/// Affine mapping between quantized integer space and real coordinate
/// space.
///
/// [TopoJSON Format Specification § 2.1.2](https://github.com/topojson/topojson-specification#212-transforms)
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl Transform {
    /// Builds a transform, rejecting zero or non-finite scale components.
    pub fn new(scale: [f64; 2], translate: [f64; 2]) -> Result<Self, Error> {
        if scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(Error::DegenerateScale);
        }
        if translate.iter().any(|t| !t.is_finite()) {
            return Err(Error::TransformExpectedNumericValues);
        }
        Ok(Transform { scale, translate })
    }

    /// Maps a quantized position to real coordinate space.
    pub fn to_real(&self, qx: f64, qy: f64) -> (f64, f64) {
        (
            qx * self.scale[0] + self.translate[0],
            qy * self.scale[1] + self.translate[1],
        )
    }

    /// Maps a real position onto the quantization grid. Inverse of
    /// [`Transform::to_real`] up to integer rounding.
    pub fn to_quantized(&self, x: f64, y: f64) -> (i64, i64) {
        (
            ((x - self.translate[0]) / self.scale[0]).round() as i64,
            ((y - self.translate[1]) / self.scale[1]).round() as i64,
        )
    }

    /// Computes the export transform for a dataset with the given bounds.
    ///
    /// With an explicit precision `p` the grid step is exactly `p` per
    /// axis, the coarsest grid whose rounding error stays within the
    /// requested bound. Without one, each axis is split into
    /// `DEFAULT_QUANTA - 1` steps; a degenerate extent falls back to a
    /// unit step.
    pub fn fit(bounds: &[f64; 4], precision: Option<f64>) -> Result<Self, Error> {
        let scale = match precision {
            Some(p) => {
                if !(p.is_finite() && p > 0.0) {
                    return Err(Error::InvalidPrecision);
                }
                [p, p]
            }
            None => {
                let span = |min: f64, max: f64| {
                    let w = max - min;
                    if w > 0.0 {
                        w / (DEFAULT_QUANTA - 1.0)
                    } else {
                        1.0
                    }
                };
                [span(bounds[0], bounds[2]), span(bounds[1], bounds[3])]
            }
        };
        Transform::new(scale, [bounds[0], bounds[1]])
    }

    /// Parses the wire `transform` member.
    pub fn from_json(value: &JsonValue) -> Result<Self, Error> {
        let object = util::expect_object(value)?;
        let scale = transform_pair(object, "scale", Error::TransformExpectedScale)?;
        let translate = transform_pair(object, "translate", Error::TransformExpectedTranslate)?;
        Transform::new(scale, translate)
    }

    pub fn to_json_object(&self) -> JsonObject {
        let mut map = JsonObject::new();
        map.insert(
            String::from("scale"),
            JsonValue::from(self.scale.to_vec()),
        );
        map.insert(
            String::from("translate"),
            JsonValue::from(self.translate.to_vec()),
        );
        map
    }
}

fn transform_pair(
    object: &JsonObject,
    name: &str,
    missing: Error,
) -> Result<[f64; 2], Error> {
    let array = match object.get(name) {
        Some(JsonValue::Array(a)) => a,
        Some(_) => return Err(Error::ExpectedArrayValue),
        None => return Err(missing),
    };
    if array.len() != 2 {
        return Err(Error::TransformExpectedPair);
    }
    let x = array[0]
        .as_f64()
        .ok_or(Error::TransformExpectedNumericValues)?;
    let y = array[1]
        .as_f64()
        .ok_or(Error::TransformExpectedNumericValues)?;
    Ok([x, y])
}

impl Serialize for Transform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json_object().serialize(serializer)
    }
}
