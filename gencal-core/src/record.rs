//! The record capability the calendar needs from application objects.
//!
//! Records are opaque to the calendar. Each concrete type describes its fields
//! once through a [`RecordSchema`], and exposes field values by name, a label,
//! and optionally a detail-page URL.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Classification of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Date,
    DateTime,
    Text,
    Integer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        FieldSpec {
            name: name.into(),
            kind,
        }
    }
}

/// The declared shape of a record type. Fields keep declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    pub type_name: String,
    pub fields: Vec<FieldSpec>,
}

impl RecordSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        RecordSchema {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec::new(name, kind));
        self
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Append the fields of `other` this schema does not declare yet.
    pub fn merge(&mut self, other: &RecordSchema) {
        for spec in &other.fields {
            if !self.has_field(&spec.name) {
                self.fields.push(spec.clone());
            }
        }
    }

    fn extend_from_values(&mut self, values: &[(String, FieldValue)]) {
        for (name, value) in values {
            if !self.has_field(name) {
                self.fields.push(FieldSpec::new(name.clone(), value.kind()));
            }
        }
    }
}

/// A single field value read from a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::DateTime(_) => FieldKind::DateTime,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Text(_) => FieldKind::Text,
        }
    }

    /// The calendar date of a date-like value; date-times are truncated.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::DateTime(dt) => Some(dt.date()),
            FieldValue::Integer(_) | FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldValue::Date(d) => write!(f, "{}", d),
            FieldValue::DateTime(dt) => write!(f, "{}", dt),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// An application object that can be placed on a calendar.
pub trait Record: Send + Sync {
    fn schema(&self) -> &RecordSchema;

    /// Value of the named field, or None when absent or null.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Human-readable label.
    fn label(&self) -> String;

    /// Detail-page URL, if the type has one.
    fn detail_url(&self) -> Option<String> {
        None
    }
}

/// Shared handle to a record; calendars never own or mutate records.
pub type RecordRef = Arc<dyn Record>;

/// An untyped key-value record, e.g. one row of a JSON or TOML file.
///
/// Values keep the order they were given in. Rows of one type should share a
/// schema; [`MapRecord::batch`] builds one for a whole set of rows.
#[derive(Debug, Clone)]
pub struct MapRecord {
    schema: Arc<RecordSchema>,
    values: Vec<(String, FieldValue)>,
    label_key: String,
    url: Option<String>,
}

impl MapRecord {
    /// A record with a schema derived from its own values.
    pub fn new(
        type_name: impl Into<String>,
        values: Vec<(String, FieldValue)>,
        label_key: impl Into<String>,
    ) -> Self {
        let mut schema = RecordSchema::new(type_name);
        schema.extend_from_values(&values);
        Self::with_schema(Arc::new(schema), values, label_key)
    }

    pub fn with_schema(
        schema: Arc<RecordSchema>,
        values: Vec<(String, FieldValue)>,
        label_key: impl Into<String>,
    ) -> Self {
        MapRecord {
            schema,
            values,
            label_key: label_key.into(),
            url: None,
        }
    }

    /// Records for `rows` of one type, sharing a single schema: every field seen
    /// in any row, in first-seen order, typed by its first value.
    pub fn batch(
        type_name: impl Into<String>,
        rows: Vec<Vec<(String, FieldValue)>>,
        label_key: &str,
    ) -> Vec<MapRecord> {
        let mut schema = RecordSchema::new(type_name);
        for row in &rows {
            schema.extend_from_values(row);
        }
        let schema = Arc::new(schema);

        rows.into_iter()
            .map(|values| MapRecord::with_schema(schema.clone(), values, label_key))
            .collect()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn values(&self) -> &[(String, FieldValue)] {
        &self.values
    }

    fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.iter().find(|(key, _)| key == name).map(|(_, v)| v)
    }
}

impl Record for MapRecord {
    fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.value(name).cloned()
    }

    fn label(&self) -> String {
        self.value(&self.label_key)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    fn detail_url(&self) -> Option<String> {
        self.url.clone()
    }
}
