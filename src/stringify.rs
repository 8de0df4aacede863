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

use crate::json::{JsonObject, JsonValue};
use crate::Topology;

/// Keys whose array values stay on a single line in pretty output. Large
/// coordinate arrays dominate a topology; indenting them element by
/// element would multiply the output size.
const INLINE_KEYS: [&str; 5] = ["coordinates", "arcs", "bbox", "translate", "scale"];

/// Plain single-line JSON encoding of a topology.
pub fn stringify(topology: &Topology) -> String {
    JsonValue::Object(JsonObject::from(topology)).to_string()
}

/// Indented JSON encoding with coordinate-bearing arrays kept compact.
pub fn stringify_pretty(topology: &Topology) -> String {
    let mut out = String::new();
    write_value(
        &JsonValue::Object(JsonObject::from(topology)),
        0,
        &mut out,
    );
    out
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_value(value: &JsonValue, depth: usize, out: &mut String) {
    match value {
        JsonValue::Object(map) if !map.is_empty() => {
            out.push_str("{\n");
            for (i, (key, child)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                push_indent(out, depth + 1);
                out.push_str(&JsonValue::from(key.as_str()).to_string());
                out.push_str(": ");
                if INLINE_KEYS.contains(&key.as_str()) {
                    out.push_str(&child.to_string());
                } else {
                    write_value(child, depth + 1, out);
                }
            }
            out.push('\n');
            push_indent(out, depth);
            out.push('}');
        }
        JsonValue::Array(items) if !items.is_empty() => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                push_indent(out, depth + 1);
                write_value(item, depth + 1, out);
            }
            out.push('\n');
            push_indent(out, depth);
            out.push(']');
        }
        other => out.push_str(&other.to_string()),
    }
}
