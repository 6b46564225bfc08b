//! Calendar display configuration.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{GencalError, GencalResult};
use crate::grid::weekday_from_index;

/// Sunday, with 0 = Monday.
pub const DEFAULT_FIRST_WEEKDAY: u8 = 6;

fn default_first_weekday() -> u8 {
    DEFAULT_FIRST_WEEKDAY
}

fn default_with_year() -> bool {
    true
}

/// Configuration at ~/.config/gencal/config.toml, overridable with
/// `GENCAL_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GencalConfig {
    /// First day of each displayed week, 0 (Monday) to 6 (Sunday).
    #[serde(default = "default_first_weekday")]
    pub first_weekday: u8,

    /// Whether month headings include the year.
    #[serde(default = "default_with_year")]
    pub with_year: bool,
}

impl Default for GencalConfig {
    fn default() -> Self {
        GencalConfig {
            first_weekday: DEFAULT_FIRST_WEEKDAY,
            with_year: true,
        }
    }
}

impl GencalConfig {
    pub fn config_path() -> GencalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GencalError::Config("Could not determine config directory".into()))?
            .join("gencal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path. A missing file is not an error.
    pub fn load() -> GencalResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> GencalResult<Self> {
        let config: GencalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("GENCAL"))
            .build()
            .map_err(|e| GencalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| GencalError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GencalResult<()> {
        self.weekday().map(|_| ())
    }

    pub fn weekday(&self) -> GencalResult<Weekday> {
        weekday_from_index(self.first_weekday)
    }

    pub fn to_toml(&self) -> GencalResult<String> {
        toml::to_string_pretty(self).map_err(|e| GencalError::Serialization(e.to_string()))
    }
}
