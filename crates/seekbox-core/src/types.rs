//! Shared record and field-path types.
//!
//! A [`Record`] is any JSON value. Records are never mutated by the engine;
//! searches and selections work on borrows or clones of the caller's data.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One entry of the searchable dataset.
pub type Record = Value;

/// Key whose value identifies a record across searches and selections.
pub const ID_KEY: &str = "id";

/// Returns the value that identifies `record` for exclusion and dedup.
///
/// Records with a non-null top-level `id` are identified by it; everything
/// else falls back to the whole record, so two id-less records are the same
/// only when they are structurally equal.
pub fn record_identity(record: &Record) -> &Value {
    match record.get(ID_KEY) {
        Some(id) if !id.is_null() => id,
        _ => record,
    }
}

/// True when both records share an identity.
pub fn same_record(a: &Record, b: &Record) -> bool {
    record_identity(a) == record_identity(b)
}

/// Split a parsed JSON document into dataset records.
///
/// The document must be an array; each element becomes one record.
pub fn dataset_from_json(document: Value) -> Result<Vec<Record>> {
    match document {
        Value::Array(records) => Ok(records),
        other => Err(Error::Dataset(format!(
            "expected a JSON array of records, found {}",
            kind_name(&other)
        ))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// FieldPath
// ---------------------------------------------------------------------------

/// Address of a (possibly nested) value inside a record.
///
/// Built either from a dotted string (`"address.city"`) or from an explicit
/// list of segments, which allows keys that themselves contain dots.
/// Numeric segments index into arrays (`"tags.0"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawFieldPath", into = "Vec<String>")]
pub struct FieldPath {
    segments: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldPath {
    Dotted(String),
    Segments(Vec<String>),
}

impl From<RawFieldPath> for FieldPath {
    fn from(raw: RawFieldPath) -> Self {
        match raw {
            RawFieldPath::Dotted(s) => FieldPath::parse(&s),
            RawFieldPath::Segments(segments) => FieldPath::from_segments(segments),
        }
    }
}

impl FieldPath {
    /// Split a dotted path. An empty string yields a path with one empty
    /// segment, which never resolves.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        FieldPath::parse("name")
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath::parse(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        FieldPath::parse(&path)
    }
}

impl From<Vec<String>> for FieldPath {
    fn from(segments: Vec<String>) -> Self {
        FieldPath::from_segments(segments)
    }
}

impl<const N: usize> From<[&str; N]> for FieldPath {
    fn from(segments: [&str; N]) -> Self {
        FieldPath::from_segments(segments)
    }
}

impl From<FieldPath> for Vec<String> {
    fn from(path: FieldPath) -> Self {
        path.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_prefers_id() {
        let a = json!({"id": 7, "name": "Apple"});
        let b = json!({"id": 7, "name": "Renamed"});
        assert!(same_record(&a, &b));
        assert_eq!(record_identity(&a), &json!(7));
    }

    #[test]
    fn identity_falls_back_to_structure() {
        let a = json!({"name": "Apple"});
        let b = json!({"name": "Apple"});
        let c = json!({"name": "Banana"});
        assert!(same_record(&a, &b));
        assert!(!same_record(&a, &c));
    }

    #[test]
    fn null_id_is_not_an_identity() {
        let a = json!({"id": null, "name": "Apple"});
        let b = json!({"id": null, "name": "Banana"});
        assert!(!same_record(&a, &b));
    }

    #[test]
    fn dotted_and_segment_paths_agree() {
        assert_eq!(FieldPath::from("a.b.c"), FieldPath::from(["a", "b", "c"]));
        assert_eq!(FieldPath::from("a.b").to_string(), "a.b");
    }

    #[test]
    fn field_path_deserializes_from_string_or_list() {
        let paths: Vec<FieldPath> = serde_json::from_value(json!(["a.b", ["c.d", "e"]])).unwrap();
        assert_eq!(paths[0].segments(), ["a", "b"]);
        assert_eq!(paths[1].segments(), ["c.d", "e"]);
    }

    #[test]
    fn dataset_must_be_an_array() {
        assert_eq!(dataset_from_json(json!([{"id": 1}])).unwrap().len(), 1);
        let err = dataset_from_json(json!({"id": 1})).unwrap_err();
        assert!(err.to_string().contains("an object"));
    }
}
