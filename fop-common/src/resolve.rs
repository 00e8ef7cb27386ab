//! Record field resolution and text coercion
//!
//! Upstream records arrive in one of several nesting shapes depending on
//! which backend produced them. Rather than probing containers at every call
//! site, screens declare an ordered candidate list per logical attribute and
//! hand it to [`resolve`].
//!
//! # Shapes
//!
//! For a candidate `name`, the following locations are probed in order:
//!
//! | Shape | Location |
//! |---|---|
//! | [`RecordShape::Flat`] | `record[name]` |
//! | [`RecordShape::Fields`] | `record.fields[name]` |
//! | [`RecordShape::Attributes`] | `record.attributes[name]` |
//! | [`RecordShape::Record`] | `record.record[name]` |
//! | [`RecordShape::RecordFields`] | `record.record.fields[name]` |
//!
//! # Examples
//!
//! ```
//! use fop_common::resolve::{resolve, resolve_text};
//! use serde_json::json;
//!
//! let record = json!({ "attributes": { "Title": "", "Subject": "Yard closed" } });
//! assert_eq!(resolve_text(&record, &["Title", "Subject"]), "Yard closed");
//! assert!(resolve(&record, &["Missing"]).is_none());
//! ```

use serde_json::Value;

/// Container in which a candidate field may live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// `record[name]`
    Flat,
    /// `record.fields[name]`
    Fields,
    /// `record.attributes[name]`
    Attributes,
    /// `record.record[name]`
    Record,
    /// `record.record.fields[name]`
    RecordFields,
}

impl RecordShape {
    /// All shapes in probe order
    pub const ALL: [RecordShape; 5] = [
        RecordShape::Flat,
        RecordShape::Fields,
        RecordShape::Attributes,
        RecordShape::Record,
        RecordShape::RecordFields,
    ];

    /// Path of container keys leading to the field map for this shape
    pub fn path(&self) -> &'static [&'static str] {
        match self {
            RecordShape::Flat => &[],
            RecordShape::Fields => &["fields"],
            RecordShape::Attributes => &["attributes"],
            RecordShape::Record => &["record"],
            RecordShape::RecordFields => &["record", "fields"],
        }
    }

    /// Look up `name` inside this shape's container, if the container exists
    pub fn probe<'a>(&self, record: &'a Value, name: &str) -> Option<&'a Value> {
        let mut container = record;
        for key in self.path() {
            container = container.as_object()?.get(*key)?;
        }
        container.as_object()?.get(name)
    }
}

/// Coerce any value to display text
///
/// Absent and null become the empty string. Strings are returned verbatim,
/// numbers and booleans in their JSON form, arrays and objects as compact JSON.
pub fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// True if the value's coerced text is empty after trimming
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(other) => coerce_text(Some(other)).trim().is_empty(),
    }
}

/// Resolve the first non-blank value among `candidates`
///
/// Each candidate is probed through every [`RecordShape`] before moving on to
/// the next candidate, so candidate order is the priority order. The original
/// (uncoerced) value is returned; `None` is the blank sentinel.
pub fn resolve<'a>(record: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates.iter().find_map(|name| probe_all(record, name))
}

/// Resolve and coerce to text in one step; blank resolves to `""`
pub fn resolve_text(record: &Value, candidates: &[&str]) -> String {
    coerce_text(resolve(record, candidates))
}

/// First non-blank value for a single field name across all shapes
pub fn probe_all<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    RecordShape::ALL
        .iter()
        .filter_map(|shape| shape.probe(record, name))
        .find(|value| !is_blank(Some(value)))
}

/// View a record collection as a slice
///
/// An absent or non-array collection is treated as empty.
pub fn records_from(collection: Option<&Value>) -> &[Value] {
    collection
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
