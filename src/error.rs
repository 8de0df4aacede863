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

use crate::GeometryType;

/// Errors raised while parsing, importing or exporting a topology.
///
/// All of them are fatal to the single conversion that raised them: no
/// partial dataset or wire object is ever produced on failure.
#[derive(Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    // Malformed input text or wire structure.
    MalformedJson,
    ExpectedProperty(String),
    ExpectedStringValue,
    ExpectedF64Value,
    ExpectedI32Value,
    ExpectedArrayValue,
    ExpectedObjectValue,
    UnknownType(String),
    PositionTooShort(usize),
    BboxExpectedArray,
    BboxExpectedNumericValues,
    PropertiesExpectedObjectOrNull,
    TopologyExpectedObjects,
    TopologyExpectedArcs,

    // Malformed transform or options.
    TransformExpectedScale,
    TransformExpectedTranslate,
    TransformExpectedPair,
    TransformExpectedNumericValues,
    DegenerateScale,
    InvalidPrecision,

    // Topology violations.
    ArcIndexOutOfBounds { index: i32, arc_count: usize },
    ArcTooShort(usize),
    MissingArcStore,

    // Unsupported or inconsistent geometry objects.
    UnsupportedGeometryType(String),
    MixedGeometryCollection {
        expected: GeometryType,
        found: GeometryType,
    },

    UnknownObjectKey(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::MalformedJson => write!(f, "Encountered malformed JSON."),
            Error::ExpectedProperty(ref name) => {
                write!(f, "Expected TopoJSON property '{}'.", name)
            }
            Error::ExpectedStringValue => write!(f, "Expected a string value."),
            Error::ExpectedF64Value => write!(f, "Expected a floating-point value."),
            Error::ExpectedI32Value => write!(f, "Expected an integer value."),
            Error::ExpectedArrayValue => write!(f, "Expected an array."),
            Error::ExpectedObjectValue => write!(f, "Expected an object."),
            Error::UnknownType(ref tag) => {
                write!(f, "Encountered unknown TopoJSON object type '{}'.", tag)
            }
            Error::PositionTooShort(len) => {
                write!(f, "A position must have at least two elements, found {}.", len)
            }
            Error::BboxExpectedArray => {
                write!(f, "Encountered non-array type for a 'bbox' object.")
            }
            Error::BboxExpectedNumericValues => {
                write!(f, "Encountered non-numeric value within 'bbox' array.")
            }
            Error::PropertiesExpectedObjectOrNull => write!(
                f,
                "Encountered neither object type nor null type for 'properties' object."
            ),
            Error::TopologyExpectedObjects => {
                write!(f, "Expected member with the name 'objects' in Topology.")
            }
            Error::TopologyExpectedArcs => {
                write!(f, "Expected member with the name 'arcs' in Topology.")
            }
            Error::TransformExpectedScale => {
                write!(f, "Transform must have a member with the name 'scale'.")
            }
            Error::TransformExpectedTranslate => {
                write!(f, "Transform must have a member with the name 'translate'.")
            }
            Error::TransformExpectedPair => write!(
                f,
                "Both 'scale' and 'translate' must be two-element arrays."
            ),
            Error::TransformExpectedNumericValues => {
                write!(f, "Encountered non-numeric value within a transform member.")
            }
            Error::DegenerateScale => {
                write!(f, "Transform scale components must be finite and non-zero.")
            }
            Error::InvalidPrecision => {
                write!(f, "Precision must be a finite positive number.")
            }
            Error::ArcIndexOutOfBounds { index, arc_count } => write!(
                f,
                "Arc index {} out of bounds for a pool of {} arcs.",
                index, arc_count
            ),
            Error::ArcTooShort(len) => {
                write!(f, "An arc must have at least two points, found {}.", len)
            }
            Error::MissingArcStore => write!(
                f,
                "Path layers reference arcs but the dataset has no arc store."
            ),
            Error::UnsupportedGeometryType(ref tag) => {
                write!(f, "Unsupported geometry type '{}'.", tag)
            }
            Error::MixedGeometryCollection { expected, found } => write!(
                f,
                "GeometryCollection mixes {} and {} geometries in one object.",
                expected, found
            ),
            Error::UnknownObjectKey(ref key) => {
                write!(f, "No layer with name '{}' in the given dataset.", key)
            }
        }
    }
}

impl std::error::Error for Error {}
