//! HTML for calendars and the events demo app.
//!
//! A month table is assembled from five fragments: day cell, week row,
//! weekday header, month name row, and the month table itself. How a day cell
//! looks is chosen by a [`DayTemplate`].

use chrono::Datelike;
use gencal_core::{CalendarGroup, DayUnit, MonthUnit, RecordEntry, WeekUnit, WeekdayHeader};
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::events::Event;

const CSS: &str = r#"
body { font-family: sans-serif; margin: 2em; }
table.month { border-collapse: collapse; }
table.month td, table.month th { border: 1px solid #ccc; padding: 0.3em; vertical-align: top; width: 8em; }
table.month td.noday { background: #f4f4f4; color: #999; }
table.month td.today { background: #fff6cc; }
table.month ul { margin: 0.2em 0 0 0; padding-left: 1.2em; }
th.month a { text-decoration: none; padding: 0 0.5em; }
"#;

/// Renders the contents of one day cell.
pub trait DayTemplate {
    fn render_day(&self, day: &DayUnit) -> Markup;
}

fn day_classes(day: &DayUnit) -> Option<String> {
    let mut classes = Vec::new();
    if day.is_padding() {
        classes.push("noday");
    }
    if day.is_today {
        classes.push("today");
    }
    (!classes.is_empty()).then(|| classes.join(" "))
}

/// A bare cell: the day number, linked when the day has a link. Days from
/// neighbouring months are left blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedDay;

impl DayTemplate for LinkedDay {
    fn render_day(&self, day: &DayUnit) -> Markup {
        html! {
            td class=[day_classes(day)] {
                @if day.is_padding() {
                    (PreEscaped("&nbsp;"))
                } @else {
                    @if let Some(link) = &day.link {
                        a href=(link) { (day.day_number) }
                    } @else {
                        (day.day_number)
                    }
                }
            }
        }
    }
}

/// A cell listing the day's records, each linked to its detail page when it
/// has one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordListDay;

impl DayTemplate for RecordListDay {
    fn render_day(&self, day: &DayUnit) -> Markup {
        let number = day.date.day();
        html! {
            td class=[day_classes(day)] {
                @if let Some(link) = &day.link {
                    a href=(link) { (number) }
                } @else {
                    (number)
                }
                @if !day.records.is_empty() {
                    ul {
                        @for record in &day.records {
                            li { (record_entry(record)) }
                        }
                    }
                }
            }
        }
    }
}

fn record_entry(record: &RecordEntry) -> Markup {
    html! {
        @if let Some(url) = &record.url {
            a href=(url) { (record.label) }
        } @else {
            (record.label)
        }
    }
}

pub fn week_row(week: &WeekUnit, days: &dyn DayTemplate) -> Markup {
    html! {
        tr {
            @for day in &week.days {
                (days.render_day(day))
            }
        }
    }
}

pub fn weekday_header_row(header: &[WeekdayHeader]) -> Markup {
    html! {
        tr {
            @for weekday in header {
                th class=(weekday.css_class) { (weekday.abbr) }
            }
        }
    }
}

pub fn month_name_row(unit: &MonthUnit) -> Markup {
    html! {
        tr {
            th colspan="7" class="month" {
                @if let Some(prev) = &unit.previous_month_link {
                    a.prev href=(prev) { (PreEscaped("&laquo;")) }
                }
                (unit.heading)
                @if let Some(next) = &unit.next_month_link {
                    a.next href=(next) { (PreEscaped("&raquo;")) }
                }
            }
        }
    }
}

pub fn month_table(unit: &MonthUnit, days: &dyn DayTemplate) -> Markup {
    html! {
        table.month border="0" cellpadding="0" cellspacing="0" {
            (month_name_row(unit))
            (weekday_header_row(&unit.week_header))
            @for week in &unit.weeks {
                (week_row(week, days))
            }
        }
    }
}

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body { (body) }
        }
    }
}

pub fn calendar_page(group: &CalendarGroup, unit: &MonthUnit, list_url: &str) -> Markup {
    page(
        &format!("{} - {}", group.name, unit.heading),
        html! {
            p { a href=(list_url) { "All calendars" } }
            h1 { (group.name) }
            (month_table(unit, &RecordListDay))
        },
    )
}

pub fn calendar_list_page(groups: &[&CalendarGroup], prefix: &str) -> Markup {
    page(
        "Calendars",
        html! {
            h1 { "Calendars" }
            @if groups.is_empty() {
                p { "No calendars yet." }
            } @else {
                table {
                    tr { th { "Name" } th { "Slug" } th { "Record types" } }
                    @for group in groups {
                        tr {
                            td { a href={ (prefix) "/" (group.slug) "/" } { (group.name) } }
                            td { (group.slug) }
                            td { (group.record_types_label()) }
                        }
                    }
                }
            }
        },
    )
}

pub fn event_list_page(events: &[std::sync::Arc<Event>], month: &MonthUnit) -> Markup {
    page(
        "Events",
        html! {
            h1 { "Events" }
            (month_table(month, &LinkedDay))
            ul {
                @for event in events {
                    li {
                        a href=(event.url()) { (event.name) }
                        " " (event.date.format("%Y-%m-%d").to_string())
                    }
                }
            }
        },
    )
}

pub fn event_detail_page(event: &Event) -> Markup {
    page(
        &event.name,
        html! {
            p { a href="/events/" { "All events" } }
            h1 { (event.name) }
            p.date { (event.date.format("%A, %B %-d, %Y").to_string()) }
        },
    )
}
