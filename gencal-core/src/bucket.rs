//! Assigning records to the days of a month grid.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::extract::DateExtractor;
use crate::grid::MonthGrid;
use crate::record::RecordRef;

/// Records per grid date, in input order. Every date of the grid is a key.
#[derive(Clone, Default)]
pub struct RecordDateMapping {
    days: BTreeMap<NaiveDate, Vec<RecordRef>>,
}

impl RecordDateMapping {
    /// Records on `date`; empty for dates with nothing on them or outside the grid.
    pub fn records_on(&self, date: NaiveDate) -> &[RecordRef] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[RecordRef])> {
        self.days.iter().map(|(d, r)| (*d, r.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total number of records placed on the grid.
    pub fn record_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Labels per date, for comparing mappings structurally.
    pub fn labels(&self) -> BTreeMap<NaiveDate, Vec<String>> {
        self.days
            .iter()
            .map(|(d, records)| (*d, records.iter().map(|r| r.label()).collect()))
            .collect()
    }
}

impl std::fmt::Debug for RecordDateMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_map().entries(self.labels()).finish()
    }
}

/// Bucket `records` onto the dates of `grid`.
///
/// Records without a date, or dated outside the grid, are dropped.
pub fn bucket<E>(grid: &MonthGrid, records: &[RecordRef], extractor: &E) -> RecordDateMapping
where
    E: DateExtractor + ?Sized,
{
    let mut days: BTreeMap<NaiveDate, Vec<RecordRef>> =
        grid.dates().map(|date| (date, Vec::new())).collect();

    for record in records {
        let Some(date) = extractor.extract_date(record.as_ref()) else {
            debug!(
                record_type = %record.schema().type_name,
                label = %record.label(),
                "record has no date, leaving it off the calendar"
            );
            continue;
        };

        match days.get_mut(&date) {
            Some(list) => list.push(record.clone()),
            None => debug!(
                record_type = %record.schema().type_name,
                %date,
                "record falls outside the grid"
            ),
        }
    }

    RecordDateMapping { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{DateFieldResolver, NamedField};
    use crate::record::{FieldKind, FieldValue, MapRecord, Record, RecordSchema};
    use chrono::Weekday;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(name: &str, when: NaiveDate) -> RecordRef {
        let values = vec![
            ("name".to_string(), FieldValue::Text(name.to_string())),
            ("date".to_string(), FieldValue::Date(when)),
        ];
        Arc::new(MapRecord::new("row", values, "name"))
    }

    fn undated_row(name: &str) -> RecordRef {
        let values = vec![("name".to_string(), FieldValue::Text(name.to_string()))];
        Arc::new(MapRecord::new("row", values, "name"))
    }

    struct Memo {
        schema: RecordSchema,
        text: &'static str,
    }

    impl Record for Memo {
        fn schema(&self) -> &RecordSchema {
            &self.schema
        }

        fn field(&self, _name: &str) -> Option<FieldValue> {
            None
        }

        fn label(&self) -> String {
            self.text.to_string()
        }
    }

    fn january() -> MonthGrid {
        MonthGrid::build(2009, 1, Weekday::Mon).unwrap()
    }

    #[test]
    fn test_two_records_same_day_keep_input_order() {
        let grid = january();
        let records = vec![row("A", date(2009, 1, 5)), row("B", date(2009, 1, 5))];

        let mapping = bucket(&grid, &records, &NamedField::default());
        let labels = mapping.labels();

        assert_eq!(labels[&date(2009, 1, 5)], vec!["A", "B"]);
        assert_eq!(mapping.len(), 35);
        let empty_days = labels.values().filter(|l| l.is_empty()).count();
        assert_eq!(empty_days, 34, "All other dates should map to []");
    }

    #[test]
    fn test_stable_for_three_records() {
        let grid = january();
        let records = vec![
            row("R1", date(2009, 1, 20)),
            row("R2", date(2009, 1, 20)),
            row("R3", date(2009, 1, 20)),
        ];

        let mapping = bucket(&grid, &records, &NamedField::default());
        let on_day: Vec<String> = mapping
            .records_on(date(2009, 1, 20))
            .iter()
            .map(|r| r.label())
            .collect();
        assert_eq!(on_day, vec!["R1", "R2", "R3"]);
    }

    #[test]
    fn test_every_grid_date_is_a_key() {
        let grid = january();
        let mapping = bucket(&grid, &[], &NamedField::default());

        for day in grid.dates() {
            assert!(mapping.contains_date(day), "missing key {day}");
            assert!(mapping.records_on(day).is_empty());
        }
        assert_eq!(mapping.record_count(), 0);
    }

    #[test]
    fn test_padding_days_receive_records() {
        let grid = january();
        let records = vec![row("NYE", date(2008, 12, 31)), row("Feb", date(2009, 2, 1))];

        let mapping = bucket(&grid, &records, &NamedField::default());
        assert_eq!(mapping.records_on(date(2008, 12, 31)).len(), 1);
        assert_eq!(mapping.records_on(date(2009, 2, 1)).len(), 1);
    }

    #[test]
    fn test_undated_and_out_of_range_records_are_dropped() {
        let grid = january();
        let memo: RecordRef = Arc::new(Memo {
            schema: RecordSchema::new("memo").field("body", FieldKind::Text),
            text: "no date here",
        });
        let records = vec![memo, row("Later", date(2009, 3, 1)), row("Kept", date(2009, 1, 9))];

        let mapping = bucket(&grid, &records, &DateFieldResolver::new());
        assert_eq!(mapping.record_count(), 1);
        assert!(
            mapping
                .iter()
                .all(|(_, records)| records.iter().all(|r| r.label() != "no date here"))
        );
    }

    #[test]
    fn test_bucketing_twice_is_structurally_equal() {
        let grid = january();
        let records = vec![row("A", date(2009, 1, 5)), row("B", date(2009, 1, 6))];
        let resolver = DateFieldResolver::new();

        let first = bucket(&grid, &records, &resolver);
        let second = bucket(&grid, &records, &resolver);
        assert_eq!(first.labels(), second.labels());
    }

    #[test]
    fn test_undated_row_does_not_hide_later_rows_of_its_type() {
        let grid = january();
        let records = vec![undated_row("Someday"), row("Kickoff", date(2009, 1, 5))];

        let mapping = bucket(&grid, &records, &DateFieldResolver::new());
        assert_eq!(mapping.record_count(), 1);
        assert_eq!(mapping.labels()[&date(2009, 1, 5)], vec!["Kickoff"]);
    }

    #[test]
    fn test_batch_rows_bucket_with_shared_schema() {
        let grid = january();
        let records: Vec<RecordRef> = MapRecord::batch(
            "row",
            vec![
                vec![("name".to_string(), FieldValue::Text("Someday".into()))],
                vec![
                    ("name".to_string(), FieldValue::Text("Kickoff".into())),
                    ("date".to_string(), FieldValue::Date(date(2009, 1, 5))),
                ],
            ],
            "name",
        )
        .into_iter()
        .map(|r| Arc::new(r) as RecordRef)
        .collect();

        let mapping = bucket(&grid, &records, &DateFieldResolver::new());
        assert_eq!(mapping.labels()[&date(2009, 1, 5)], vec!["Kickoff"]);
    }
}
