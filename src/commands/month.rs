use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use gencal_core::{
    CalendarMonth, CalendarRenderer, FieldValue, GencalConfig, MapRecord, NamedField, RecordRef,
    weekday_from_index,
};
use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

use crate::render::Render;

pub struct MonthArgs {
    pub records: PathBuf,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub first_weekday: Option<u8>,
    pub date_field: String,
    pub label_field: String,
}

/// Top level of a records file: `{"records": [...]}` or `[[records]]`.
#[derive(Debug, Default, Deserialize)]
struct RecordsFile {
    #[serde(default)]
    records: Vec<Row>,
}

/// One record's fields in file order. Nulls count as absent fields.
#[derive(Debug, Default)]
struct Row(Vec<(String, FieldValue)>);

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of record fields")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Row, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields: Vec<(String, FieldValue)> = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Option<FieldValue>>()? {
                    // A repeated key keeps its last value
                    fields.retain(|(existing, _)| *existing != key);
                    if let Some(value) = value {
                        fields.push((key, value));
                    }
                }
                Ok(Row(fields))
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

pub fn run(args: MonthArgs) -> Result<()> {
    let config = GencalConfig::load()?;
    let first_weekday = weekday_from_index(args.first_weekday.unwrap_or(config.first_weekday))?;

    let records = load_records(&args.records, &args.label_field)?;

    let renderer = CalendarRenderer::new(type_name(&args.records), first_weekday)
        .with_year(config.with_year);
    let current = CalendarMonth::current(renderer.today());
    let month = CalendarMonth::new(
        args.year.unwrap_or(current.year()),
        args.month.unwrap_or(current.month()),
    )?;

    let unit = renderer.render(month, &records, &NamedField(args.date_field));
    println!("{}", unit.render());

    Ok(())
}

/// The file stem names the record type, e.g. `meetings.json` holds "meetings".
fn type_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "records".to_string())
}

fn load_records(path: &Path, label_field: &str) -> Result<Vec<RecordRef>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let file = parse_records(path, &content)
        .with_context(|| format!("Invalid records file {}", path.display()))?;

    let rows = file.records.into_iter().map(|row| row.0).collect();
    Ok(MapRecord::batch(type_name(path), rows, label_field)
        .into_iter()
        .map(|record| Arc::new(record) as RecordRef)
        .collect())
}

fn parse_records(path: &Path, content: &str) -> Result<RecordsFile> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(serde_json::from_str(content)?),
        Some("toml") => Ok(toml::from_str(content)?),
        _ => bail!("Records file must end in .json or .toml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gencal_core::FieldKind;
    use std::io::Write;

    fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("meetings")
            .suffix(suffix)
            .tempfile()
            .unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_json_records() {
        let file = write_file(
            ".json",
            r#"{"records": [
                {"name": "Kickoff", "date": "2009-01-05", "room": 4},
                {"name": "Undated", "date": null}
            ]}"#,
        );

        let records = load_records(file.path(), "name").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label(), "Kickoff");
        assert_eq!(
            records[0].field("date"),
            Some(FieldValue::Date(NaiveDate::from_ymd_opt(2009, 1, 5).unwrap()))
        );
        assert_eq!(records[0].field("room"), Some(FieldValue::Integer(4)));
        assert!(records[1].field("date").is_none());
    }

    #[test]
    fn test_load_toml_records() {
        let file = write_file(
            ".toml",
            "[[records]]\nname = \"Standup\"\nwhen = \"2009-01-06T09:30:00\"\n",
        );

        let records = load_records(file.path(), "name").unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].schema().type_name.starts_with("meetings"));
        assert_eq!(
            records[0].field("when").and_then(|v| v.as_date()),
            NaiveDate::from_ymd_opt(2009, 1, 6)
        );
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let file = write_file(".csv", "name,date\n");
        assert!(load_records(file.path(), "name").is_err());
    }

    #[test]
    fn test_type_name_from_stem() {
        assert_eq!(type_name(Path::new("/tmp/meetings.json")), "meetings");
    }

    #[test]
    fn test_file_order_decides_date_field() {
        let file = write_file(
            ".json",
            r#"{"records": [
                {"name": "Deploy", "updated": "2009-01-20T10:00:00", "created": "2009-01-02T09:00:00"}
            ]}"#,
        );

        let records = load_records(file.path(), "name").unwrap();
        let names: Vec<&str> = records[0]
            .schema()
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["name", "updated", "created"]);
        assert_eq!(
            gencal_core::resolve_date_field(records[0].schema()),
            Some("updated")
        );
    }

    #[test]
    fn test_toml_keeps_file_order() {
        let file = write_file(
            ".toml",
            "[[records]]\nname = \"Deploy\"\nupdated = \"2009-01-20T10:00:00\"\ncreated = \"2009-01-02T09:00:00\"\n",
        );

        let records = load_records(file.path(), "name").unwrap();
        assert_eq!(
            gencal_core::resolve_date_field(records[0].schema()),
            Some("updated")
        );
    }

    #[test]
    fn test_undated_first_row_keeps_type_dated() {
        let file = write_file(
            ".json",
            r#"{"records": [
                {"name": "Someday"},
                {"name": "Kickoff", "date": "2009-01-05"}
            ]}"#,
        );

        let records = load_records(file.path(), "name").unwrap();
        let schema = records[0].schema();
        assert!(schema.has_field("date"));
        assert_eq!(schema.fields[1].kind, FieldKind::Date);
        assert_eq!(records[0].schema(), records[1].schema());
    }
}
