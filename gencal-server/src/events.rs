//! Record types of the "events" demo app.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use gencal_core::{FieldKind, FieldValue, Record, RecordSchema};
use serde::{Deserialize, Serialize};

pub const EVENT_TYPE: &str = "events.event";
pub const DEADLINE_TYPE: &str = "events.deadline";

static EVENT_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(EVENT_TYPE)
        .field("id", FieldKind::Integer)
        .field("name", FieldKind::Text)
        .field("date", FieldKind::Date)
});

static DEADLINE_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::new(DEADLINE_TYPE)
        .field("id", FieldKind::Integer)
        .field("created", FieldKind::DateTime)
        .field("title", FieldKind::Text)
        .field("due", FieldKind::DateTime)
});

/// A named, dated event with its own detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
}

impl Event {
    pub fn record_schema() -> &'static RecordSchema {
        &EVENT_SCHEMA
    }

    pub fn url(&self) -> String {
        format!("/events/{}/", self.id)
    }
}

impl Record for Event {
    fn schema(&self) -> &RecordSchema {
        &EVENT_SCHEMA
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Integer(self.id)),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "date" => Some(FieldValue::Date(self.date)),
            _ => None,
        }
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn detail_url(&self) -> Option<String> {
        Some(self.url())
    }
}

/// A deadline. It has no detail page, and two date-time fields; left to
/// schema resolution it would land on `created`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deadline {
    pub id: i64,
    pub title: String,
    pub created: NaiveDateTime,
    pub due: Option<NaiveDateTime>,
}

impl Deadline {
    pub fn record_schema() -> &'static RecordSchema {
        &DEADLINE_SCHEMA
    }
}

impl Record for Deadline {
    fn schema(&self) -> &RecordSchema {
        &DEADLINE_SCHEMA
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Integer(self.id)),
            "title" => Some(FieldValue::Text(self.title.clone())),
            "created" => Some(FieldValue::DateTime(self.created)),
            "due" => self.due.map(FieldValue::DateTime),
            _ => None,
        }
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gencal_core::resolve_date_field;

    #[test]
    fn test_event_resolves_to_date_field() {
        assert_eq!(resolve_date_field(Event::record_schema()), Some("date"));
    }

    #[test]
    fn test_deadline_resolves_to_first_datetime() {
        assert_eq!(resolve_date_field(Deadline::record_schema()), Some("created"));
    }

    #[test]
    fn test_event_detail_url() {
        let event = Event {
            id: 7,
            name: "Kickoff".into(),
            date: NaiveDate::from_ymd_opt(2009, 1, 5).unwrap(),
        };
        assert_eq!(event.detail_url().as_deref(), Some("/events/7/"));
        assert_eq!(event.label(), "Kickoff");
    }

    #[test]
    fn test_deadline_without_due_has_no_value() {
        let deadline = Deadline {
            id: 1,
            title: "Report".into(),
            created: NaiveDate::from_ymd_opt(2009, 1, 2)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            due: None,
        };
        assert!(deadline.field("due").is_none());
        assert!(deadline.detail_url().is_none());
    }
}
