//! Core types for generic calendars.
//!
//! A generic calendar shows records of several unrelated types on one month grid:
//! - `grid` builds the weeks of a month, padded with neighbouring days
//! - `extract` and `bucket` place each record on the day it belongs to
//! - `render` turns the populated grid into markup-agnostic render units
//! - `group` aggregates the records of a named calendar for one month

pub mod bucket;
pub mod config;
pub mod error;
pub mod extract;
pub mod grid;
pub mod group;
pub mod month;
pub mod record;
pub mod render;

pub use bucket::{RecordDateMapping, bucket};
pub use config::GencalConfig;
pub use error::{GencalError, GencalResult};
pub use extract::{DateExtractor, DateFieldResolver, NamedField, resolve_date_field};
pub use grid::{GridDay, MonthGrid, WeekRow, weekday_from_index};
pub use group::{CalendarGroup, GroupDirectory, RecordSource};
pub use month::CalendarMonth;
pub use record::{FieldKind, FieldValue, MapRecord, Record, RecordRef, RecordSchema};
pub use render::{
    CalendarRenderer, DayUnit, LinkStrategy, MonthUnit, NoLinks, PathLinks, RecordEntry,
    WeekUnit, WeekdayHeader, weekday_header,
};
