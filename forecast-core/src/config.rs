use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{
    chart::{Locale, locale_from_tag, system_locale},
    model::Coordinates,
};

pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v3.1";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_QUERY: &str = "India";

/// Base URLs of the two HTTP collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub countries_url: String,
    pub forecast_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

/// Size of the drawing surface the chart is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self { width: 900.0, height: 320.0 }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Searched on startup when there are no recent searches.
    pub default_query: String,

    /// `tracing` filter directive, e.g. "forecast_core=debug".
    pub log_filter: Option<String>,

    /// Locale for weekday labels, e.g. "fr_FR". Unset means `LC_ALL`/`LC_TIME`/`LANG`.
    pub locale: Option<String>,

    /// Example TOML:
    /// [endpoints]
    /// countries_url = "https://restcountries.com/v3.1"
    pub endpoints: Endpoints,

    pub chart: ChartSize,

    /// Where "use my location" points when the device can't tell us.
    pub home: Option<Coordinates>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_query: DEFAULT_QUERY.to_string(),
            log_filter: None,
            locale: None,
            endpoints: Endpoints::default(),
            chart: ChartSize::default(),
            home: None,
        }
    }
}

impl Config {
    /// Configured locale if it is a known one, otherwise the system locale.
    pub fn label_locale(&self) -> Locale {
        match self.locale.as_deref() {
            Some(tag) => locale_from_tag(tag).unwrap_or_else(|| {
                tracing::warn!("Unknown locale '{tag}' in config, using the system locale");
                system_locale()
            }),
            None => system_locale(),
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "forecast-widget", "forecast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Path to the key-value store holding unit preference and recent searches.
    pub fn store_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("store.json"))
    }

    pub fn set_home(&mut self, latitude: f64, longitude: f64) {
        self.home = Some(Coordinates::new(latitude, longitude));
    }
}
