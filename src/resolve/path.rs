//! Dotted/bracketed path access into JSON-shaped values.
//!
//! Paths look like `a.b[0].c`. Bracketed integer indices are rewritten to
//! dotted segments (`a.b.0.c`) before walking, so `items[2]` and `items.2`
//! address the same element.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static BRACKET_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("Invalid bracket index regex"));

/// Split a path into its normalized segments.
///
/// Empty segments are kept (`a..b` yields `["a", "", "b"]`); they simply fail
/// to match anything during the walk.
pub(crate) fn split_path(path: &str) -> Vec<String> {
    BRACKET_INDEX
        .replace_all(path, ".$1")
        .split('.')
        .map(str::to_string)
        .collect()
}

/// Index one level into a value.
///
/// Objects are indexed by key, arrays by a non-negative integer segment.
/// Scalars have no children.
fn index<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Walk already-split segments starting from `start`.
pub(crate) fn walk<'a, S: AsRef<str>>(start: &'a Value, segments: &[S]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(start, |current, segment| index(current, segment.as_ref()))
}

/// Look up `path` inside `root`.
///
/// Returns `None` ("undefined") when the root is null, the path is empty, or
/// any segment along the way is missing. A terminal `null` is returned as
/// `Some(&Value::Null)`; it is present, just null.
///
/// # Examples
///
/// ```
/// use dot0n::resolve::deep_get;
/// use serde_json::json;
///
/// let data = json!({"a": {"b": [{"c": 5}]}});
/// assert_eq!(deep_get(&data, "a.b[0].c"), Some(&json!(5)));
/// assert_eq!(deep_get(&data, "a.b[1].c"), None);
/// ```
pub fn deep_get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if root.is_null() || path.is_empty() {
        return None;
    }
    walk(root, &split_path(path))
}

/// Look up `path` inside a bare object map.
///
/// Same semantics as [`deep_get`], without having to wrap the map in a
/// `Value::Object` first.
pub fn deep_get_map<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let segments = split_path(path);
    let (first, rest) = segments.split_first()?;
    map.get(first).and_then(|value| walk(value, rest))
}
