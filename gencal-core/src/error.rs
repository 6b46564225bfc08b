//! Error types for gencal.

use thiserror::Error;

/// Errors that can occur while building or rendering a calendar.
#[derive(Error, Debug)]
pub enum GencalError {
    #[error("Invalid month {year}-{month}: month must be 1-12 and year 1-9999")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid first weekday {0}: expected 0 (Monday) to 6 (Sunday)")]
    InvalidWeekday(u8),

    #[error("Record type '{0}' has no date or datetime field")]
    UnresolvableDateField(String),

    #[error("Calendar not found: {0}")]
    MissingCalendarGroup(String),

    #[error("Record type '{0}' cannot be filtered by date")]
    StorageFieldMismatch(String),

    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    #[error("Duplicate calendar slug: {0}")]
    DuplicateSlug(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for gencal operations.
pub type GencalResult<T> = Result<T, GencalError>;
