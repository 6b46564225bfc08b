//! Terminal rendering for gencal-core render units.
//!
//! Extension traits that turn month units into colored text using owo_colors.

use chrono::Datelike;
use gencal_core::{DayUnit, MonthUnit, WeekUnit};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Width of one day column, including the marker.
const CELL_WIDTH: usize = 5;

impl Render for DayUnit {
    fn render(&self) -> String {
        let marker = if self.records.is_empty() { ' ' } else { '*' };
        let number = if self.is_padding() {
            // Neighbouring months still show their date, faintly
            format!("{:>3}", self.date.day())
        } else {
            format!("{:>3}", self.day_number)
        };

        let number = if self.is_padding() {
            number.dimmed().to_string()
        } else if self.is_today {
            number.reversed().to_string()
        } else if !self.records.is_empty() {
            number.cyan().to_string()
        } else {
            number
        };

        format!(" {}{}", number, marker.cyan())
    }
}

impl Render for WeekUnit {
    fn render(&self) -> String {
        self.days.iter().map(Render::render).collect()
    }
}

impl Render for MonthUnit {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let width = CELL_WIDTH * self.week_header.len();
        let heading = format!("{:^width$}", self.heading, width = width);
        lines.push(heading.bold().to_string());

        let header: String = self
            .week_header
            .iter()
            .map(|weekday| format!(" {:>3} ", weekday.abbr))
            .collect();
        lines.push(header.dimmed().to_string());

        for week in &self.weeks {
            lines.push(week.render());
        }

        let listing = render_listing(self);
        if !listing.is_empty() {
            lines.push(String::new());
            lines.extend(listing);
        }

        lines.join("\n")
    }
}

/// One line per day of the month that has records, in date order.
fn render_listing(unit: &MonthUnit) -> Vec<String> {
    unit.weeks
        .iter()
        .flat_map(|week| &week.days)
        .filter(|day| !day.is_padding() && !day.records.is_empty())
        .map(|day| {
            let labels: Vec<&str> = day.records.iter().map(|r| r.label.as_str()).collect();
            format!(
                "{}  {}",
                day.date.format("%a %b %e").to_string().bold(),
                labels.join(", ")
            )
        })
        .collect()
}
