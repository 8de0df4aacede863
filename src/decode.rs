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

use crate::{Arc, Error, Position, Transform};

/// Decodes raw wire arcs into absolute real coordinates.
///
/// With a transform, each arc's points are integer deltas: the first point
/// is absolute, every later point is an offset from its predecessor; the
/// running sums are then dequantized. Without a transform the coordinates
/// are already absolute and pass through unchanged. An optional `precision`
/// snaps every component to the nearest multiple of that value afterwards,
/// which is lossy and may make previously distinct vertices coincide.
///
/// The wire arcs are consumed: once decoded there is no delta-encoded
/// array left to decode a second time.
pub fn decode_arcs(
    arcs: Vec<Arc>,
    transform: Option<&Transform>,
    precision: Option<f64>,
) -> Result<Vec<Arc>, Error> {
    let precision = check_precision(precision)?;
    let mut decoded = Vec::with_capacity(arcs.len());
    for arc in arcs {
        if arc.len() < 2 {
            return Err(Error::ArcTooShort(arc.len()));
        }
        let mut points = Vec::with_capacity(arc.len());
        let (mut x, mut y) = (0.0, 0.0);
        for mut point in arc {
            if point.len() < 2 {
                return Err(Error::PositionTooShort(point.len()));
            }
            if let Some(tr) = transform {
                x += point[0];
                y += point[1];
                let (rx, ry) = tr.to_real(x, y);
                point[0] = rx;
                point[1] = ry;
            }
            if let Some(p) = precision {
                point[0] = snap(point[0], p);
                point[1] = snap(point[1], p);
            }
            points.push(point);
        }
        decoded.push(points);
    }
    Ok(decoded)
}

/// Decodes a literal point coordinate of a quantized topology.
pub(crate) fn decode_position(
    mut position: Position,
    transform: Option<&Transform>,
    precision: Option<f64>,
) -> Result<Position, Error> {
    if position.len() < 2 {
        return Err(Error::PositionTooShort(position.len()));
    }
    let precision = check_precision(precision)?;
    if let Some(tr) = transform {
        let (x, y) = tr.to_real(position[0], position[1]);
        position[0] = x;
        position[1] = y;
    }
    if let Some(p) = precision {
        position[0] = snap(position[0], p);
        position[1] = snap(position[1], p);
    }
    Ok(position)
}

fn check_precision(precision: Option<f64>) -> Result<Option<f64>, Error> {
    match precision {
        Some(p) if !(p.is_finite() && p > 0.0) => Err(Error::InvalidPrecision),
        other => Ok(other),
    }
}

/// Nearest multiple of `precision`.
fn snap(value: f64, precision: f64) -> f64 {
    (value / precision).round() * precision
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_transform_coordinates_pass_through_unchanged() {
        let arcs = vec![vec![vec![102.5, 0.25], vec![103.0, 1.0]]];
        let decoded = decode_arcs(arcs.clone(), None, None).unwrap();
        assert_eq!(decoded, arcs);
    }

    #[test]
    fn quantized_arc_decodes_to_absolute_coordinates() {
        let tr = Transform::new([0.5, 0.25], [100.0, 0.0]).unwrap();
        let arcs = vec![vec![vec![4.0, 0.0], vec![2.0, 4.0], vec![-2.0, 4.0]]];
        let decoded = decode_arcs(arcs, Some(&tr), None).unwrap();
        assert_eq!(
            decoded,
            vec![vec![vec![102.0, 0.0], vec![103.0, 1.0], vec![102.0, 2.0]]]
        );
    }

    #[test]
    fn precision_snaps_to_nearest_multiple() {
        let arcs = vec![vec![vec![1.26, -0.74], vec![2.49, 0.76]]];
        let decoded = decode_arcs(arcs, None, Some(0.5)).unwrap();
        assert_eq!(decoded, vec![vec![vec![1.5, -0.5], vec![2.5, 1.0]]]);
    }

    #[test]
    fn precision_rounding_never_grows_the_value_set() {
        let arcs = vec![vec![
            vec![0.1, 0.0],
            vec![0.2, 0.0],
            vec![0.3, 0.0],
            vec![0.9, 0.0],
        ]];
        let before: std::collections::BTreeSet<String> = arcs[0]
            .iter()
            .map(|p| format!("{:?}", p))
            .collect();
        let decoded = decode_arcs(arcs.clone(), None, Some(0.5)).unwrap();
        let after: std::collections::BTreeSet<String> = decoded[0]
            .iter()
            .map(|p| format!("{:?}", p))
            .collect();
        assert!(after.len() <= before.len());
    }

    #[test]
    fn non_positive_precision_is_rejected() {
        let arcs = vec![vec![vec![0.0, 0.0], vec![1.0, 1.0]]];
        assert_eq!(
            decode_arcs(arcs.clone(), None, Some(0.0)).unwrap_err(),
            Error::InvalidPrecision
        );
        assert_eq!(
            decode_arcs(arcs, None, Some(f64::NAN)).unwrap_err(),
            Error::InvalidPrecision
        );
    }

    #[test]
    fn single_point_arc_is_rejected() {
        let arcs = vec![vec![vec![0.0, 0.0]]];
        assert_eq!(
            decode_arcs(arcs, None, None).unwrap_err(),
            Error::ArcTooShort(1)
        );
    }

    #[test]
    fn decode_position_dequantizes_points() {
        let tr = Transform::new([0.5, 0.25], [100.0, 0.0]).unwrap();
        let pos = decode_position(vec![4.0, 8.0], Some(&tr), None).unwrap();
        assert_eq!(pos, vec![102.0, 2.0]);
    }
}
