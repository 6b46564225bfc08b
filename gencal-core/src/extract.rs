//! Finding the date of a record whose concrete type is not known up front.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;
use tracing::trace;

use crate::error::{GencalError, GencalResult};
use crate::record::{FieldKind, FieldSpec, Record, RecordSchema};

/// Pick the field that holds a schema's date.
///
/// The first `Date` field in declaration order wins; without one, the first
/// `DateTime` field is used. A type with several date fields therefore always
/// resolves to the first of them.
pub fn resolve_date_field(schema: &RecordSchema) -> Option<&str> {
    let first_of = |kind: FieldKind| schema.fields.iter().find(|f| f.kind == kind);

    first_of(FieldKind::Date)
        .or_else(|| first_of(FieldKind::DateTime))
        .map(|f| f.name.as_str())
}

/// Strategy for reading the calendar date of a record.
pub trait DateExtractor {
    fn extract_date(&self, record: &dyn Record) -> Option<NaiveDate>;
}

/// Reads one explicitly named field from every record.
///
/// Used for untyped key-value records, where there is no declared schema to
/// resolve against.
#[derive(Debug, Clone)]
pub struct NamedField(pub String);

impl Default for NamedField {
    fn default() -> Self {
        NamedField("date".to_string())
    }
}

impl DateExtractor for NamedField {
    fn extract_date(&self, record: &dyn Record) -> Option<NaiveDate> {
        record.field(&self.0)?.as_date()
    }
}

/// A resolved date field, valid only for the field list it was resolved from.
#[derive(Debug, Clone)]
struct CachedField {
    fields: Vec<FieldSpec>,
    field: Option<String>,
}

/// Resolves date fields per record type, caching the answer by type name.
///
/// Explicit registrations take precedence over schema inspection, which lets
/// an application pin the right field for types that declare more than one.
/// A cached answer is only reused for a schema with the same fields; untyped
/// records of one type name may not all carry the same ones.
#[derive(Debug, Default)]
pub struct DateFieldResolver {
    registered: HashMap<String, String>,
    cache: RwLock<HashMap<String, CachedField>>,
}

impl DateFieldResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin `field` as the date field of `type_name`.
    pub fn register(&mut self, type_name: impl Into<String>, field: impl Into<String>) {
        self.registered.insert(type_name.into(), field.into());
    }

    /// The date field for a schema, or None if it has none.
    pub fn date_field(&self, schema: &RecordSchema) -> Option<String> {
        if let Some(field) = self.registered.get(&schema.type_name) {
            return Some(field.clone());
        }

        if let Ok(cache) = self.cache.read() {
            match cache.get(&schema.type_name) {
                Some(cached) if cached.fields == schema.fields => return cached.field.clone(),
                _ => {}
            }
        }

        let resolved = resolve_date_field(schema).map(str::to_string);
        trace!(record_type = %schema.type_name, field = ?resolved, "resolved date field");

        // A poisoned cache only costs a recomputation next time.
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(
                schema.type_name.clone(),
                CachedField {
                    fields: schema.fields.clone(),
                    field: resolved.clone(),
                },
            );
        }
        resolved
    }

    /// Like [`Self::date_field`], but a missing field is an error.
    pub fn require_date_field(&self, schema: &RecordSchema) -> GencalResult<String> {
        self.date_field(schema)
            .ok_or_else(|| GencalError::UnresolvableDateField(schema.type_name.clone()))
    }
}

impl DateExtractor for DateFieldResolver {
    fn extract_date(&self, record: &dyn Record) -> Option<NaiveDate> {
        let field = self.date_field(record.schema())?;
        record.field(&field)?.as_date()
    }
}
