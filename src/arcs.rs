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

use crate::{Arc, Error, Position};

/// The shared pool of absolute-coordinate arcs of a dataset.
///
/// Arcs are owned here exactly once; every path of every layer references
/// them by signed index, so a border shared between two polygons is stored
/// a single time.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcStore {
    arcs: Vec<Arc>,
}

impl ArcStore {
    pub fn new(arcs: Vec<Arc>) -> Self {
        ArcStore { arcs }
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc> {
        self.arcs.iter()
    }

    pub fn arc(&self, index: usize) -> Option<&Arc> {
        self.arcs.get(index)
    }

    /// Maps a signed index to the underlying arc position, validating
    /// bounds. Negative `index` refers to arc `-index - 1` reversed.
    pub fn check(&self, index: i32) -> Result<usize, Error> {
        let resolved = if index < 0 {
            (-(index as i64) - 1) as usize
        } else {
            index as usize
        };
        if resolved < self.arcs.len() {
            Ok(resolved)
        } else {
            Err(Error::ArcIndexOutOfBounds {
                index,
                arc_count: self.arcs.len(),
            })
        }
    }

    /// Resolves a signed index to the referenced point sequence, reversing
    /// the point order for negative indexes.
    pub fn resolve(&self, index: i32) -> Result<Vec<Position>, Error> {
        let arc = &self.arcs[self.check(index)?];
        if index < 0 {
            Ok(arc.iter().rev().cloned().collect())
        } else {
            Ok(arc.clone())
        }
    }

    /// Min/max bounds over every vertex, as `[xmin, ymin, xmax, ymax]`.
    pub fn bounds(&self) -> Option<[f64; 4]> {
        let mut bounds: Option<[f64; 4]> = None;
        for point in self.arcs.iter().flatten() {
            bounds = Some(crate::dataset::expand_bounds(bounds, point[0], point[1]));
        }
        bounds
    }
}
