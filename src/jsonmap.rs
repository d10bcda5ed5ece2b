/*!
 * Structural helpers for JSON object maps.
 *
 * These utilities back the "translate only the missing keys" workflow: diff
 * a source document against an already partially translated target, extract
 * just the missing values, translate them, and merge the result back in.
 */

use anyhow::{anyhow, Result};
use serde_json::{Map, Value};

/// A sequence of keys addressing one value inside a nested JSON object
pub type JsonPath = Vec<String>;

/// Paths that exist in `source` but are missing from `target`.
///
/// Nested objects are compared recursively; a key whose source value is an
/// object missing entirely from the target contributes one path per leaf.
/// Returns an error when a nested source object meets a non-object target
/// value.
pub fn diff(source: &Map<String, Value>, target: &Map<String, Value>) -> Result<Vec<JsonPath>> {
    let mut paths = Vec::new();

    for (key, value) in source {
        match value {
            Value::Object(source_child) => match target.get(key) {
                Some(Value::Object(target_child)) => {
                    for mut path in diff(source_child, target_child)? {
                        path.insert(0, key.clone());
                        paths.push(path);
                    }
                }
                Some(_) => {
                    return Err(anyhow!("target value at {key:?} is not an object"));
                }
                None => {
                    for mut path in leaf_paths(source_child) {
                        path.insert(0, key.clone());
                        paths.push(path);
                    }
                }
            },
            _ => {
                if !target.contains_key(key) {
                    paths.push(vec![key.clone()]);
                }
            }
        }
    }

    Ok(paths)
}

/// Parse two JSON documents and diff them
pub fn diff_slices(source: &[u8], target: &[u8]) -> Result<Vec<JsonPath>> {
    let source: Map<String, Value> =
        serde_json::from_slice(source).map_err(|err| anyhow!("parse source: {err}"))?;
    let target: Map<String, Value> =
        serde_json::from_slice(target).map_err(|err| anyhow!("parse target: {err}"))?;
    diff(&source, &target)
}

/// Project `data` onto the given paths, keeping the nested object structure.
///
/// Returns an error when a path does not exist or crosses a non-object
/// value; the partial output built so far is discarded.
pub fn extract_paths(data: &Map<String, Value>, paths: &[JsonPath]) -> Result<Map<String, Value>> {
    let mut out = Map::new();
    for path in paths {
        extract_path(data, path, &mut out)?;
    }
    Ok(out)
}

fn extract_path(data: &Map<String, Value>, path: &[String], out: &mut Map<String, Value>) -> Result<()> {
    let Some((key, rest)) = path.split_first() else {
        return Ok(());
    };

    let value = data
        .get(key)
        .ok_or_else(|| anyhow!("key {key:?} not found"))?;

    if rest.is_empty() {
        out.insert(key.clone(), value.clone());
        return Ok(());
    }

    let child = value
        .as_object()
        .ok_or_else(|| anyhow!("value at {key:?} is not an object"))?;

    let slot = out
        .entry(key.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    let out_child = slot
        .as_object_mut()
        .ok_or_else(|| anyhow!("output value at {key:?} is not an object"))?;

    extract_path(child, rest, out_child)
}

/// Deep-merge `from` into `into`. Matching keys are overwritten; nested
/// objects are merged recursively.
pub fn merge(into: &mut Map<String, Value>, from: &Map<String, Value>) {
    for (key, value) in from {
        match value {
            Value::Object(from_child) => {
                let slot = into
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                match slot {
                    Value::Object(into_child) => merge(into_child, from_child),
                    other => *other = Value::Object(from_child.clone()),
                }
            }
            _ => {
                into.insert(key.clone(), value.clone());
            }
        }
    }
}

/// One path per non-object leaf of `map`
fn leaf_paths(map: &Map<String, Value>) -> Vec<JsonPath> {
    let mut paths = Vec::new();
    for (key, value) in map {
        match value {
            Value::Object(child) => {
                for mut path in leaf_paths(child) {
                    path.insert(0, key.clone());
                    paths.push(path);
                }
            }
            _ => paths.push(vec![key.clone()]),
        }
    }
    paths
}
