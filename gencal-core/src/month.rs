//! A (year, month) pair with rollover-aware navigation.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{GencalError, GencalResult};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month. `month` is always within 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> GencalResult<Self> {
        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(GencalError::InvalidMonth { year, month });
        }
        Ok(CalendarMonth { year, month })
    }

    /// Normalize any month number onto the calendar, so month 0 is December of the
    /// previous year and month 13 is January of the next.
    pub fn rolled(year: i32, month: i64) -> GencalResult<Self> {
        let zero_based = month - 1;
        let year = i64::from(year) + zero_based.div_euclid(12);
        let month = zero_based.rem_euclid(12) + 1;

        let year = i32::try_from(year).map_err(|_| GencalError::InvalidMonth {
            year: i32::MAX,
            month: month as u32,
        })?;
        Self::new(year, month as u32)
    }

    /// The month containing `today`.
    pub fn current(today: NaiveDate) -> Self {
        CalendarMonth {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn previous(&self) -> GencalResult<Self> {
        Self::rolled(self.year, i64::from(self.month) - 1)
    }

    pub fn next(&self) -> GencalResult<Self> {
        Self::rolled(self.year, i64::from(self.month) + 1)
    }

    pub fn first_day(&self) -> NaiveDate {
        // Year and month were validated on construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// English month name, e.g. "January".
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// "January 2009", or just "January" without the year.
    pub fn heading(&self, with_year: bool) -> String {
        if with_year {
            format!("{} {}", self.name(), self.year)
        } else {
            self.name().to_string()
        }
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_month() {
        assert!(matches!(
            CalendarMonth::new(2009, 0),
            Err(GencalError::InvalidMonth { year: 2009, month: 0 })
        ));
        assert!(CalendarMonth::new(2009, 13).is_err());
        assert!(CalendarMonth::new(0, 5).is_err());
        assert!(CalendarMonth::new(-3, 5).is_err());
    }

    #[test]
    fn test_january_previous_rolls_to_december() {
        let jan = CalendarMonth::new(2009, 1).unwrap();
        let prev = jan.previous().unwrap();
        assert_eq!((prev.year(), prev.month()), (2008, 12));
    }

    #[test]
    fn test_december_next_rolls_to_january() {
        let dec = CalendarMonth::new(2009, 12).unwrap();
        let next = dec.next().unwrap();
        assert_eq!((next.year(), next.month()), (2010, 1));
    }

    #[test]
    fn test_rolled_normalizes_zero_and_thirteen() {
        assert_eq!(
            CalendarMonth::rolled(2009, 0).unwrap(),
            CalendarMonth::new(2008, 12).unwrap()
        );
        assert_eq!(
            CalendarMonth::rolled(2009, 13).unwrap(),
            CalendarMonth::new(2010, 1).unwrap()
        );
        assert_eq!(
            CalendarMonth::rolled(2009, 6).unwrap(),
            CalendarMonth::new(2009, 6).unwrap()
        );
    }

    #[test]
    fn test_navigation_past_supported_range_fails() {
        let last = CalendarMonth::new(MAX_YEAR, 12).unwrap();
        assert!(last.next().is_err());
        let first = CalendarMonth::new(MIN_YEAR, 1).unwrap();
        assert!(first.previous().is_err());
    }

    #[test]
    fn test_first_and_last_day() {
        let feb = CalendarMonth::new(2008, 2).unwrap();
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2008, 2, 1).unwrap());
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2008, 2, 29).unwrap());

        let dec = CalendarMonth::new(2009, 12).unwrap();
        assert_eq!(dec.last_day(), NaiveDate::from_ymd_opt(2009, 12, 31).unwrap());
    }

    #[test]
    fn test_heading() {
        let month = CalendarMonth::new(2009, 1).unwrap();
        assert_eq!(month.heading(true), "January 2009");
        assert_eq!(month.heading(false), "January");
        assert_eq!(month.to_string(), "2009-01");
    }
}
