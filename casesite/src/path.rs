//! Dotted-path access over nested JSON objects.
//!
//! `set_path` is a shallow path copy: every object along the path is cloned
//! (or created), while siblings off the path are cloned along with their
//! parent map. Readers tolerate missing segments and non-object
//! intermediates by returning `None`.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("path `{0}` has an empty segment")]
    EmptySegment(String),
}

/// Split and validate a dotted path.
///
/// # Errors
///
/// Rejects the empty string and paths such as `a..b`, `.a`, or `a.`.
pub fn segments(path: &str) -> Result<Vec<&str>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(PathError::EmptySegment(path.to_owned()));
    }
    Ok(parts)
}

/// Read the value at `path`, or `None` when any segment is missing.
#[must_use]
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let parts = segments(path).ok()?;
    parts.into_iter().try_fold(root, |node, key| node.as_object()?.get(key))
}

/// Return a copy of `root` with `value` written at `path`.
///
/// # Errors
///
/// Returns [`PathError`] for empty paths or empty segments.
pub fn set_path(root: &Value, path: &str, value: Value) -> Result<Value, PathError> {
    let mut out = root.clone();
    set_path_in_place(&mut out, path, value)?;
    Ok(out)
}

/// Write `value` at `path`, creating intermediate objects as needed.
///
/// Non-object values found along the path are replaced by empty objects.
///
/// # Errors
///
/// Returns [`PathError`] for empty paths or empty segments.
pub fn set_path_in_place(root: &mut Value, path: &str, value: Value) -> Result<(), PathError> {
    let parts = segments(path)?;
    let Some((leaf, parents)) = parts.split_last() else {
        return Err(PathError::Empty);
    };

    let mut node = root;
    for key in parents {
        node = ensure_object(node)
            .entry((*key).to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    ensure_object(node).insert((*leaf).to_owned(), value);
    Ok(())
}

/// Top-level keys of `incoming` overwrite those in `target`; a non-object
/// `target` becomes an object first.
pub fn merge_shallow(target: &mut Value, incoming: Value) {
    match incoming {
        Value::Object(incoming) => ensure_object(target).extend(incoming),
        other => *target = other,
    }
}

/// Every leaf path in `root`, in document order. Arrays count as leaves.
#[must_use]
pub fn leaf_paths(root: &Value) -> Vec<String> {
    let mut out = Vec::new();
    collect_leaves(root, String::new(), &mut out);
    out
}

fn collect_leaves(node: &Value, prefix: String, out: &mut Vec<String>) {
    match node {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let next = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
                collect_leaves(child, next, out);
            }
        }
        _ if !prefix.is_empty() => out.push(prefix),
        _ => {}
    }
}

fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced by an object"),
    }
}
