//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use gencal_core::GencalConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 4096;

fn default_bind() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_calendar_prefix() -> String {
    "/gencal".to_string()
}

/// Configuration at ~/.config/gencal/server.toml (or `$GENCAL_CONFIG`).
///
/// Every key can be overridden with a `GENCAL_` environment variable; nested
/// keys use a double underscore, e.g. `GENCAL_CALENDAR__FIRST_WEEKDAY=0`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    /// TOML file the in-memory store is seeded from.
    pub data_file: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where the calendar views are mounted.
    #[serde(default = "default_calendar_prefix")]
    pub calendar_prefix: String,

    #[serde(default)]
    pub calendar: GencalConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: default_bind(),
            port: DEFAULT_PORT,
            data_file: None,
            log_level: default_log_level(),
            calendar_prefix: default_calendar_prefix(),
            calendar: GencalConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os("GENCAL_CONFIG") {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("gencal");
        Ok(config_dir.join("server.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config: ServerConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("GENCAL")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true),
            )
            .build()?
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        config.calendar.validate()?;
        config.calendar_prefix = normalize_prefix(&config.calendar_prefix);
        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// "/gencal/" and "gencal" both become "/gencal"; the root stays "".
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
