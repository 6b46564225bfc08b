use std::sync::Arc;

use chrono::{Local, NaiveDate, Weekday};
use gencal_core::{GencalResult, PathLinks};

use crate::config::ServerConfig;
use crate::store::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    config: Arc<ServerConfig>,
    // Pinned in tests so "today" is deterministic
    today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(store: Store, config: ServerConfig) -> Self {
        AppState {
            store: Arc::new(store),
            config: Arc::new(config),
            today: None,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn first_weekday(&self) -> GencalResult<Weekday> {
        self.config.calendar.weekday()
    }

    /// Month navigation links under the calendar prefix.
    pub fn links(&self) -> PathLinks {
        PathLinks::new(self.list_url())
    }

    /// URL of the calendar list, always with a trailing slash.
    pub fn list_url(&self) -> String {
        format!("{}/", self.config.calendar_prefix)
    }
}
