use anyhow::{Context, Result};

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Photo grid settings
    #[serde(default)]
    pub photos: PhotosConfig,

    /// Weather screen settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotosConfig {
    /// Photos requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Grid columns
    #[serde(default = "default_columns")]
    pub columns: usize,

    /// Gap between tiles, in logical pixels
    #[serde(default = "default_item_margin")]
    pub item_margin: f64,

    /// Directory browsed when no library is given on the command line
    #[serde(default = "default_library_dir_str")]
    pub library_dir: String,
}

fn default_page_size() -> usize {
    20
}

fn default_columns() -> usize {
    4
}

fn default_item_margin() -> f64 {
    1.0
}

fn default_library_dir_str() -> String {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .to_string_lossy()
        .into_owned()
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            columns: default_columns(),
            item_margin: default_item_margin(),
            library_dir: default_library_dir_str(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// City queried when the screen is first shown
    #[serde(default = "default_city")]
    pub default_city: String,

    /// City search endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Current conditions endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_city() -> String {
    "San Francisco".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("glance");

        Self {
            config_dir,
            photos: PhotosConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, writing defaults there if it is missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns `ConfigError::Invalid` if validation fails; warnings are logged.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.checked()?;
        Ok((config, validation))
    }

    /// Validate, turning errors into `ConfigError::Invalid`
    pub fn checked(&self) -> Result<ValidationResult, ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(validation)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.photos.page_size == 0 {
            result.add_error("photos.page_size", "Page size must be greater than 0");
        } else if self.photos.page_size > 500 {
            result.add_warning(
                "photos.page_size",
                "Page size is unusually large (>500)",
            );
        }

        if self.photos.columns == 0 {
            result.add_error("photos.columns", "Grid must have at least one column");
        }

        if !self.photos.item_margin.is_finite() || self.photos.item_margin < 0.0 {
            result.add_error(
                "photos.item_margin",
                "Item margin must be a non-negative number",
            );
        }

        let library = PathBuf::from(&self.photos.library_dir);
        if !library.is_dir() {
            result.add_warning(
                "photos.library_dir",
                format!("Not a directory: {}", library.display()),
            );
        }

        if self.weather.default_city.trim().is_empty() {
            result.add_warning(
                "weather.default_city",
                "No default city; the weather screen starts empty",
            );
        }

        self.validate_url(&self.weather.geocoding_url, "weather.geocoding_url", &mut result);
        self.validate_url(&self.weather.forecast_url, "weather.forecast_url", &mut result);

        if self.weather.timeout_secs == 0 {
            result.add_error("weather.timeout_secs", "Timeout must be greater than 0");
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("glance");

        Ok(config_dir.join("config.toml"))
    }
}
