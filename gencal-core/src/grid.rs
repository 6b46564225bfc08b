//! Month grid construction.
//!
//! A grid is the run of complete weeks needed to show every day of a month,
//! padded with days borrowed from the neighbouring months.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::{GencalError, GencalResult};
use crate::month::CalendarMonth;

pub const DAYS_PER_WEEK: usize = 7;

/// Map a 0-based weekday index (0 = Monday, 6 = Sunday) to a `Weekday`.
pub fn weekday_from_index(index: u8) -> GencalResult<Weekday> {
    match index {
        0 => Ok(Weekday::Mon),
        1 => Ok(Weekday::Tue),
        2 => Ok(Weekday::Wed),
        3 => Ok(Weekday::Thu),
        4 => Ok(Weekday::Fri),
        5 => Ok(Weekday::Sat),
        6 => Ok(Weekday::Sun),
        other => Err(GencalError::InvalidWeekday(other)),
    }
}

/// Position of `weekday` within a week that starts on `first_weekday`.
pub fn weekday_offset(weekday: Weekday, first_weekday: Weekday) -> u8 {
    let days = 7 + weekday.num_days_from_monday() - first_weekday.num_days_from_monday();
    (days % 7) as u8
}

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDay {
    pub date: NaiveDate,
    /// 0-6, relative to the grid's first weekday.
    pub weekday: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRow {
    pub days: [GridDay; DAYS_PER_WEEK],
}

impl WeekRow {
    pub fn first_date(&self) -> NaiveDate {
        self.days[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.days[DAYS_PER_WEEK - 1].date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub month: CalendarMonth,
    pub first_weekday: Weekday,
    pub weeks: Vec<WeekRow>,
}

impl MonthGrid {
    /// Build the grid for `year`/`month` with weeks starting on `first_weekday`.
    pub fn build(year: i32, month: u32, first_weekday: Weekday) -> GencalResult<Self> {
        let month = CalendarMonth::new(year, month)?;
        Ok(Self::for_month(month, first_weekday))
    }

    pub fn for_month(month: CalendarMonth, first_weekday: Weekday) -> Self {
        let first = month.first_day();
        let last = month.last_day();

        let lead = u64::from(weekday_offset(first.weekday(), first_weekday));
        let trail = 6 - u64::from(weekday_offset(last.weekday(), first_weekday));
        let start = first - Days::new(lead);
        let total = lead + u64::from(last.day()) + trail;

        let weeks = (0..total / DAYS_PER_WEEK as u64)
            .map(|week| {
                let days = std::array::from_fn(|i| {
                    let date = start + Days::new(week * DAYS_PER_WEEK as u64 + i as u64);
                    GridDay {
                        date,
                        weekday: i as u8,
                    }
                });
                WeekRow { days }
            })
            .collect();

        MonthGrid {
            month,
            first_weekday,
            weeks,
        }
    }

    /// Every date in the grid, in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks.iter().flat_map(|w| w.days.iter().map(|d| d.date))
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.weeks.first().map(WeekRow::first_date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.weeks.last().map(WeekRow::last_date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => first <= date && date <= last,
            _ => false,
        }
    }
}
