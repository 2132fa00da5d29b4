//! Field accessor — resolves a [`FieldPath`] against a record.
//!
//! Resolution is total: a missing key, an out-of-range index, a segment
//! applied to a scalar, or an explicit JSON `null` all yield `None`.

use crate::types::{FieldPath, Record};
use serde_json::Value;

/// Walk `path` through `record`, one segment at a time.
pub fn resolve<'a>(record: &'a Record, path: &FieldPath) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.segments() {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Resolve `path` and keep the result only when it is a string.
pub fn resolve_str<'a>(record: &'a Record, path: &FieldPath) -> Option<&'a str> {
    resolve(record, path).and_then(Value::as_str)
}

/// Text shown for a record: strings verbatim, numbers and booleans
/// formatted, anything else (or a missing value) as the empty string.
pub fn display_text(record: &Record, path: &FieldPath) -> String {
    match resolve(record, path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
