//! Calendar groups: named collections of record types shown on one calendar.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GencalError, GencalResult};
use crate::month::CalendarMonth;
use crate::record::RecordRef;

/// Storage query capability for calendar groups.
pub trait RecordSource {
    /// All records of `record_type` whose date falls in `month`.
    ///
    /// Answers [`GencalError::StorageFieldMismatch`] when the type has no field
    /// that can be filtered by date.
    fn records_in_month(
        &self,
        record_type: &str,
        month: CalendarMonth,
    ) -> GencalResult<Vec<RecordRef>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarGroup {
    pub name: String,
    pub slug: String,
    /// Record type identifiers, in the order they are queried.
    pub record_types: Vec<String>,
}

impl CalendarGroup {
    /// A group whose slug is derived from its name.
    pub fn new(name: impl Into<String>, record_types: Vec<String>) -> Self {
        let name = name.into();
        let mut slug = slug::slugify(&name);
        if slug.is_empty() {
            slug = "calendar".to_string();
        }

        let mut group = CalendarGroup {
            name,
            slug,
            record_types: Vec::new(),
        };
        for record_type in record_types {
            group.add_record_type(record_type);
        }
        group
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Add a record type; a type already in the group is ignored.
    pub fn add_record_type(&mut self, record_type: impl Into<String>) {
        let record_type = record_type.into();
        if !self.record_types.contains(&record_type) {
            self.record_types.push(record_type);
        }
    }

    /// Record type names joined for display, e.g. "event, deadline".
    pub fn record_types_label(&self) -> String {
        self.record_types.join(", ")
    }

    /// Every record of the group's types dated within `month`.
    ///
    /// Filtering is by month only. A type that cannot be filtered by date, or
    /// that the source does not know, contributes nothing.
    pub fn records_for_month<S>(&self, source: &S, month: CalendarMonth) -> GencalResult<Vec<RecordRef>>
    where
        S: RecordSource + ?Sized,
    {
        let mut records = Vec::new();

        for record_type in &self.record_types {
            match source.records_in_month(record_type, month) {
                Ok(found) => records.extend(found),
                Err(GencalError::StorageFieldMismatch(_)) => {
                    debug!(calendar = %self.slug, %record_type, "record type has no date field, skipping");
                }
                Err(GencalError::UnknownRecordType(_)) => {
                    warn!(calendar = %self.slug, %record_type, "unknown record type in calendar");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(records)
    }
}

impl fmt::Display for CalendarGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The set of persisted calendar groups, unique by slug.
#[derive(Debug, Clone, Default)]
pub struct GroupDirectory {
    groups: Vec<CalendarGroup>,
}

impl GroupDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: CalendarGroup) -> GencalResult<()> {
        if self.groups.iter().any(|g| g.slug == group.slug) {
            return Err(GencalError::DuplicateSlug(group.slug));
        }
        self.groups.push(group);
        Ok(())
    }

    pub fn find(&self, slug: &str) -> GencalResult<&CalendarGroup> {
        self.groups
            .iter()
            .find(|g| g.slug == slug)
            .ok_or_else(|| GencalError::MissingCalendarGroup(slug.to_string()))
    }

    /// All groups, ordered by name.
    pub fn all(&self) -> Vec<&CalendarGroup> {
        let mut groups: Vec<&CalendarGroup> = self.groups.iter().collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
