//! Configuration management for the weather dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::DashboardError;
use crate::models::coordinate::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Forecast API settings
    pub weather: WeatherConfig,
    /// How "now" is determined for current-hour matching
    pub clock: ClockConfig,
    /// Where saved coordinates live
    pub storage: StorageConfig,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Coordinates used before the user saves any
    pub defaults: DefaultsConfig,
}

/// Forecast API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL for the forecast API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Retries for transient failures (0 disables retrying)
    pub max_retries: u32,
    /// Hourly metrics to request
    pub hourly: Vec<String>,
    /// Current-conditions metrics to request; empty leaves the block out
    pub current: Vec<String>,
    /// Daily metrics to request; empty leaves the block out
    pub daily: Vec<String>,
    /// `timezone` parameter sent to the API (`auto` resolves from coordinates)
    pub timezone: Option<String>,
    /// Number of forecast days, provider default when unset
    pub forecast_days: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// IANA time zone for "now"; the host's local time when unset
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the settings keyspace
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with a prebuilt frontend to serve at `/`
    pub static_dir: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub latitude: f64,
    pub longitude: f64,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_hourly_metrics() -> Vec<String> {
    [
        "temperature_2m",
        "rain",
        "cloud_cover",
        "uv_index",
        "direct_radiation",
        "snowfall",
        "apparent_temperature",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_storage_location() -> String {
    dirs::data_local_dir()
        .map(|dir| dir.join("weatherdash"))
        .unwrap_or_else(|| PathBuf::from(".weatherdash"))
        .to_string_lossy()
        .into_owned()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: 30,
            max_retries: 0,
            hourly: default_hourly_metrics(),
            current: Vec::new(),
            daily: Vec::new(),
            timezone: Some("auto".to_string()),
            forecast_days: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            location: default_storage_location(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from `config_path`, or the default location when
    /// `None`, then apply environment overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHERDASH_SERVER__PORT=8080 overrides server.port
        builder = builder.add_source(
            Environment::with_prefix("WEATHERDASH")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("weather.hourly")
                .with_list_parse_key("weather.current")
                .with_list_parse_key("weather.daily")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: DashboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherdash").join("config.toml"))
    }

    /// Parsed clock time zone, `None` for host local time
    pub fn clock_timezone(&self) -> Result<Option<Tz>> {
        self.clock
            .timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>().map_err(|_| {
                    anyhow::Error::from(DashboardError::config(format!(
                        "Unknown time zone '{name}'"
                    )))
                })
            })
            .transpose()
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.clock_timezone()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(DashboardError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.weather.max_retries > 10 {
            return Err(DashboardError::config("Weather API max retries cannot exceed 10").into());
        }

        if let Some(days) = self.weather.forecast_days {
            if !(1..=16).contains(&days) {
                return Err(
                    DashboardError::config("Forecast days must be between 1 and 16").into(),
                );
            }
        }

        if self.server.port == 0 {
            return Err(DashboardError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(DashboardError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.weather.hourly.is_empty() && self.weather.current.is_empty() {
            return Err(DashboardError::config(
                "At least one hourly or current metric must be requested",
            )
            .into());
        }

        if self.storage.location.is_empty() {
            return Err(DashboardError::config("Storage location cannot be empty").into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.weather.max_retries, 0);
        assert_eq!(config.weather.hourly.len(), 7);
        assert_eq!(config.weather.timezone.as_deref(), Some("auto"));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.latitude, 55.60);
        assert_eq!(config.defaults.longitude, 13.00);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = DashboardConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = DashboardConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout must be"));

        let mut config = DashboardConfig::default();
        config.weather.forecast_days = Some(30);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = DashboardConfig::default();
        config.weather.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clock_timezone() {
        let mut config = DashboardConfig::default();
        assert!(config.clock_timezone().unwrap().is_none());

        config.clock.timezone = Some("Europe/Stockholm".to_string());
        assert_eq!(
            config.clock_timezone().unwrap(),
            Some(chrono_tz::Europe::Stockholm)
        );

        config.clock.timezone = Some("Mars/Olympus_Mons".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[weather]
base_url = "http://localhost:9999/v1"
current = ["temperature_2m", "relative_humidity_2m"]

[server]
port = 8080

[defaults]
latitude = 59.33
longitude = 18.07
"#
        )
        .unwrap();

        let config = DashboardConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.weather.base_url, "http://localhost:9999/v1");
        assert_eq!(config.weather.current.len(), 2);
        // untouched sections keep their defaults
        assert_eq!(config.weather.hourly.len(), 7);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.defaults.latitude, 59.33);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = DashboardConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weatherdash"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
