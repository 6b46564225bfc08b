//! Markup-agnostic render units for a populated month grid.
//!
//! The renderer walks a [`MonthGrid`] and its [`RecordDateMapping`] and produces
//! plain structures a template layer can turn into HTML, text, or anything else.
//! URLs are never built here; they come from a [`LinkStrategy`].

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::Serialize;

use crate::bucket::{RecordDateMapping, bucket};
use crate::extract::DateExtractor;
use crate::grid::{DAYS_PER_WEEK, GridDay, MonthGrid, WeekRow};
use crate::month::CalendarMonth;
use crate::record::{Record, RecordRef};

/// Source of the URLs shown on a calendar.
pub trait LinkStrategy {
    /// Link for a single day cell.
    fn day_link(&self, _slug: &str, _date: NaiveDate) -> Option<String> {
        None
    }

    /// Link to the month view of the calendar identified by `slug`.
    fn month_link(&self, slug: &str, month: CalendarMonth) -> Option<String>;
}

/// No links anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLinks;

impl LinkStrategy for NoLinks {
    fn month_link(&self, _slug: &str, _month: CalendarMonth) -> Option<String> {
        None
    }
}

/// Links of the form `{base}{slug}/{year}/{month}/` and, when `link_days` is
/// set, `{base}{slug}/{year}/{month}/{day}/`.
#[derive(Debug, Clone)]
pub struct PathLinks {
    pub base: String,
    pub link_days: bool,
}

impl PathLinks {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        PathLinks {
            base,
            link_days: false,
        }
    }

    pub fn with_day_links(mut self) -> Self {
        self.link_days = true;
        self
    }
}

impl LinkStrategy for PathLinks {
    fn day_link(&self, slug: &str, date: NaiveDate) -> Option<String> {
        self.link_days.then(|| {
            format!("{}{}/{}/", self.base, slug, date.format("%Y/%m/%d"))
        })
    }

    fn month_link(&self, slug: &str, month: CalendarMonth) -> Option<String> {
        Some(format!(
            "{}{}/{:04}/{:02}/",
            self.base,
            slug,
            month.year(),
            month.month()
        ))
    }
}

/// A record as shown inside a day cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordEntry {
    pub label: String,
    pub url: Option<String>,
}

impl RecordEntry {
    pub fn from_record(record: &dyn Record) -> Self {
        RecordEntry {
            label: record.label(),
            url: record.detail_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayUnit {
    pub date: NaiveDate,
    pub weekday: u8,
    /// Day of month, or 0 for a day borrowed from a neighbouring month.
    pub day_number: u32,
    pub is_today: bool,
    pub link: Option<String>,
    pub records: Vec<RecordEntry>,
}

impl DayUnit {
    pub fn is_padding(&self) -> bool {
        self.day_number == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekUnit {
    pub days: Vec<DayUnit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayHeader {
    pub css_class: &'static str,
    pub abbr: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthUnit {
    pub slug: String,
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    /// "January 2009", or "January" when rendered without the year.
    pub heading: String,
    pub week_header: Vec<WeekdayHeader>,
    pub weeks: Vec<WeekUnit>,
    pub previous_month: Option<CalendarMonth>,
    pub next_month: Option<CalendarMonth>,
    pub previous_month_link: Option<String>,
    pub next_month_link: Option<String>,
}

fn weekday_labels(weekday: Weekday) -> WeekdayHeader {
    let (css_class, abbr) = match weekday {
        Weekday::Mon => ("mon", "Mon"),
        Weekday::Tue => ("tue", "Tue"),
        Weekday::Wed => ("wed", "Wed"),
        Weekday::Thu => ("thu", "Thu"),
        Weekday::Fri => ("fri", "Fri"),
        Weekday::Sat => ("sat", "Sat"),
        Weekday::Sun => ("sun", "Sun"),
    };
    WeekdayHeader { css_class, abbr }
}

/// Weekday headings in display order for weeks starting on `first_weekday`.
pub fn weekday_header(first_weekday: Weekday) -> Vec<WeekdayHeader> {
    std::iter::successors(Some(first_weekday), |d| Some(d.succ()))
        .take(DAYS_PER_WEEK)
        .map(weekday_labels)
        .collect()
}

/// Turns a grid and its bucketed records into render units.
pub struct CalendarRenderer<'a> {
    slug: String,
    first_weekday: Weekday,
    today: NaiveDate,
    with_year: bool,
    links: &'a dyn LinkStrategy,
}

impl<'a> CalendarRenderer<'a> {
    pub fn new(slug: impl Into<String>, first_weekday: Weekday) -> Self {
        CalendarRenderer {
            slug: slug.into(),
            first_weekday,
            today: Local::now().date_naive(),
            with_year: true,
            links: &NoLinks,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_year(mut self, with_year: bool) -> Self {
        self.with_year = with_year;
        self
    }

    pub fn with_links(mut self, links: &'a dyn LinkStrategy) -> Self {
        self.links = links;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Build the grid for `month`, bucket `records` onto it, and render it.
    pub fn render<E>(
        &self,
        month: CalendarMonth,
        records: &[RecordRef],
        extractor: &E,
    ) -> MonthUnit
    where
        E: DateExtractor + ?Sized,
    {
        let grid = MonthGrid::for_month(month, self.first_weekday);
        let mapping = bucket(&grid, records, extractor);
        self.format_month(&grid, &mapping)
    }

    pub fn format_day(
        &self,
        day: &GridDay,
        mapping: &RecordDateMapping,
        current_month: CalendarMonth,
    ) -> DayUnit {
        let day_number = if current_month.contains(day.date) {
            day.date.day()
        } else {
            0
        };

        DayUnit {
            date: day.date,
            weekday: day.weekday,
            day_number,
            is_today: day.date == self.today,
            link: self.links.day_link(&self.slug, day.date),
            records: mapping
                .records_on(day.date)
                .iter()
                .map(|r| RecordEntry::from_record(r.as_ref()))
                .collect(),
        }
    }

    pub fn format_week(
        &self,
        week: &WeekRow,
        mapping: &RecordDateMapping,
        current_month: CalendarMonth,
    ) -> WeekUnit {
        WeekUnit {
            days: week
                .days
                .iter()
                .map(|day| self.format_day(day, mapping, current_month))
                .collect(),
        }
    }

    pub fn format_month(&self, grid: &MonthGrid, mapping: &RecordDateMapping) -> MonthUnit {
        let month = grid.month;
        // Navigation stops at the edge of the supported year range.
        let previous_month = month.previous().ok();
        let next_month = month.next().ok();

        MonthUnit {
            slug: self.slug.clone(),
            year: month.year(),
            month: month.month(),
            month_name: month.name(),
            heading: month.heading(self.with_year),
            week_header: weekday_header(grid.first_weekday),
            weeks: grid
                .weeks
                .iter()
                .map(|week| self.format_week(week, mapping, month))
                .collect(),
            previous_month,
            next_month,
            previous_month_link: previous_month.and_then(|m| self.links.month_link(&self.slug, m)),
            next_month_link: next_month.and_then(|m| self.links.month_link(&self.slug, m)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::NamedField;
    use crate::record::{FieldValue, MapRecord};
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(name: &str, when: NaiveDate, url: Option<&str>) -> RecordRef {
        let values = vec![
            ("name".to_string(), FieldValue::Text(name.to_string())),
            ("date".to_string(), FieldValue::Date(when)),
        ];
        let record = MapRecord::new("row", values, "name");
        match url {
            Some(url) => Arc::new(record.with_url(url)),
            None => Arc::new(record),
        }
    }

    fn render_january(links: &dyn LinkStrategy, records: &[RecordRef]) -> MonthUnit {
        CalendarRenderer::new("events", Weekday::Mon)
            .with_today(date(2009, 1, 14))
            .with_links(links)
            .render(CalendarMonth::new(2009, 1).unwrap(), records, &NamedField::default())
    }

    #[test]
    fn test_padding_days_have_day_number_zero() {
        let unit = render_january(&NoLinks, &[]);

        let first_week = &unit.weeks[0];
        let numbers: Vec<u32> = first_week.days.iter().map(|d| d.day_number).collect();
        assert_eq!(numbers, vec![0, 0, 0, 1, 2, 3, 4]);

        let last_week = &unit.weeks[4];
        assert_eq!(last_week.days[6].date, date(2009, 2, 1));
        assert!(last_week.days[6].is_padding());
    }

    #[test]
    fn test_today_flag_and_records() {
        let records = vec![
            record("Launch", date(2009, 1, 14), Some("/events/1/")),
            record("Retro", date(2009, 1, 14), None),
        ];
        let unit = render_january(&NoLinks, &records);

        let today: Vec<&DayUnit> = unit
            .weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .filter(|d| d.is_today)
            .collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2009, 1, 14));
        assert_eq!(
            today[0].records,
            vec![
                RecordEntry {
                    label: "Launch".into(),
                    url: Some("/events/1/".into())
                },
                RecordEntry {
                    label: "Retro".into(),
                    url: None
                },
            ]
        );
    }

    #[test]
    fn test_month_navigation_links() {
        let links = PathLinks::new("/gencal");
        let unit = render_january(&links, &[]);

        assert_eq!(unit.heading, "January 2009");
        assert_eq!(unit.previous_month, Some(CalendarMonth::new(2008, 12).unwrap()));
        assert_eq!(unit.next_month, Some(CalendarMonth::new(2009, 2).unwrap()));
        assert_eq!(
            unit.previous_month_link.as_deref(),
            Some("/gencal/events/2008/12/")
        );
        assert_eq!(unit.next_month_link.as_deref(), Some("/gencal/events/2009/02/"));
    }

    #[test]
    fn test_day_links_follow_strategy() {
        let without = render_january(&PathLinks::new("/gencal/"), &[]);
        assert!(without.weeks[0].days.iter().all(|d| d.link.is_none()));

        let with = render_january(&PathLinks::new("/gencal/").with_day_links(), &[]);
        assert_eq!(
            with.weeks[0].days[0].link.as_deref(),
            Some("/gencal/events/2008/12/29/")
        );
    }

    #[test]
    fn test_week_header_follows_first_weekday() {
        let abbrs: Vec<&str> = weekday_header(Weekday::Sun).iter().map(|h| h.abbr).collect();
        assert_eq!(abbrs, vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);

        let unit = render_january(&NoLinks, &[]);
        assert_eq!(unit.week_header[0].css_class, "mon");
        assert_eq!(unit.weeks.len(), 5);
        assert!(unit.weeks.iter().all(|w| w.days.len() == 7));
    }

    #[test]
    fn test_heading_without_year() {
        let unit = CalendarRenderer::new("events", Weekday::Mon)
            .with_year(false)
            .render(CalendarMonth::new(2009, 12).unwrap(), &[], &NamedField::default());
        assert_eq!(unit.heading, "December");
        assert_eq!(unit.next_month, Some(CalendarMonth::new(2010, 1).unwrap()));
    }

    #[test]
    fn test_month_unit_serializes() {
        let unit = render_january(&NoLinks, &[record("A", date(2009, 1, 5), None)]);
        let json = serde_json::to_value(&unit).unwrap();

        assert_eq!(json["month_name"], "January");
        assert_eq!(json["weeks"][1]["days"][0]["records"][0]["label"], "A");
    }
}
