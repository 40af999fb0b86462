//! Subset matching rules.
//!
//! Shape mismatches are plain non-matches; nothing here returns an error.

use serde_json::{Map, Value};

/// Does `element` satisfy `candidate`?
///
/// Map candidates require a map element containing the candidate as a subset.
/// Every other candidate is compared by exact equality, so `true` never
/// matches `1` and a scalar never matches a list that contains it.
pub fn element_matches(element: &Value, candidate: &Value) -> bool {
    match (candidate, element) {
        (Value::Object(pattern), Value::Object(actual)) => map_matches(actual, pattern),
        (Value::Object(_), _) => false,
        _ => element == candidate,
    }
}

/// Every key of `pattern` is present in `actual` with a matching value.
/// Keys of `actual` not named by `pattern` are ignored.
pub fn map_matches(actual: &Map<String, Value>, pattern: &Map<String, Value>) -> bool {
    pattern.iter().all(|(key, expected)| {
        actual
            .get(key)
            .is_some_and(|value| value_matches(value, expected))
    })
}

/// Per-key rule used inside map patterns.
///
/// - map pattern: `actual` must be a map, matched recursively;
/// - list pattern: `actual` must be a list containing every pattern item
///   (order and duplicates ignored, items compared by equality);
/// - anything else: exact equality.
pub fn value_matches(actual: &Value, pattern: &Value) -> bool {
    match (pattern, actual) {
        (Value::Object(pattern), Value::Object(actual)) => map_matches(actual, pattern),
        (Value::Array(required), Value::Array(present)) => {
            required.iter().all(|item| present.contains(item))
        }
        (Value::Object(_), _) | (Value::Array(_), _) => false,
        _ => actual == pattern,
    }
}
