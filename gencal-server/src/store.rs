//! In-memory storage seeded from a TOML data file.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use gencal_core::{
    CalendarGroup, CalendarMonth, DateFieldResolver, GencalError, GencalResult, GroupDirectory,
    RecordRef, RecordSchema, RecordSource,
};
use serde::Deserialize;

use crate::events::{Deadline, Event};

/// A calendar as written in the seed file. The slug defaults to one derived
/// from the name.
#[derive(Debug, Deserialize)]
pub struct SeedCalendar {
    pub name: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub record_types: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub calendars: Vec<SeedCalendar>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub deadlines: Vec<Deadline>,
}

impl Seed {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read data file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid data file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

struct Collection {
    schema: RecordSchema,
    records: Vec<RecordRef>,
}

/// Calendar groups plus every record, by record type.
pub struct Store {
    groups: GroupDirectory,
    collections: BTreeMap<String, Collection>,
    events: Vec<Arc<Event>>,
    resolver: DateFieldResolver,
}

impl Store {
    pub fn new(resolver: DateFieldResolver) -> Self {
        Store {
            groups: GroupDirectory::new(),
            collections: BTreeMap::new(),
            events: Vec::new(),
            resolver,
        }
    }

    pub fn from_seed(seed: Seed, resolver: DateFieldResolver) -> GencalResult<Self> {
        let mut store = Store::new(resolver);

        store.register_type(Event::record_schema().clone());
        store.register_type(Deadline::record_schema().clone());

        for event in seed.events {
            store.add_event(event);
        }
        for deadline in seed.deadlines {
            store.add_record(Arc::new(deadline));
        }
        for calendar in seed.calendars {
            let mut group = CalendarGroup::new(calendar.name, calendar.record_types);
            if let Some(slug) = calendar.slug {
                group = group.with_slug(slug);
            }
            store.insert_group(group)?;
        }

        Ok(store)
    }

    /// Make a record type known to the store, even before it has records.
    /// Fields not yet declared for a known type are added to its schema.
    pub fn register_type(&mut self, schema: RecordSchema) {
        match self.collections.entry(schema.type_name.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().schema.merge(&schema),
            Entry::Vacant(entry) => {
                entry.insert(Collection {
                    schema,
                    records: Vec::new(),
                });
            }
        }
    }

    pub fn add_record(&mut self, record: RecordRef) {
        let schema = record.schema().clone();
        let type_name = schema.type_name.clone();
        self.register_type(schema);
        if let Some(collection) = self.collections.get_mut(&type_name) {
            collection.records.push(record);
        }
    }

    pub fn add_event(&mut self, event: Event) {
        let event = Arc::new(event);
        self.events.push(event.clone());
        self.add_record(event);
    }

    pub fn insert_group(&mut self, group: CalendarGroup) -> GencalResult<()> {
        self.groups.insert(group)
    }

    pub fn groups(&self) -> &GroupDirectory {
        &self.groups
    }

    pub fn resolver(&self) -> &DateFieldResolver {
        &self.resolver
    }

    /// Events ordered by date.
    pub fn events(&self) -> Vec<Arc<Event>> {
        let mut events = self.events.clone();
        events.sort_by_key(|e| (e.date, e.id));
        events
    }

    pub fn event(&self, id: i64) -> Option<Arc<Event>> {
        self.events.iter().find(|e| e.id == id).cloned()
    }

    pub fn record_count(&self) -> usize {
        self.collections.values().map(|c| c.records.len()).sum()
    }
}

impl RecordSource for Store {
    fn records_in_month(
        &self,
        record_type: &str,
        month: CalendarMonth,
    ) -> GencalResult<Vec<RecordRef>> {
        let collection = self
            .collections
            .get(record_type)
            .ok_or_else(|| GencalError::UnknownRecordType(record_type.to_string()))?;

        let field = self
            .resolver
            .date_field(&collection.schema)
            .ok_or_else(|| GencalError::StorageFieldMismatch(record_type.to_string()))?;

        Ok(collection
            .records
            .iter()
            .filter(|record| {
                record
                    .field(&field)
                    .and_then(|value| value.as_date())
                    .is_some_and(|date| month.contains(date))
            })
            .cloned()
            .collect())
    }
}
