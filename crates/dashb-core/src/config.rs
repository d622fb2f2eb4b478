use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;
use crate::locale::Locale;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_FEED_URL: &str = "https://www.ansa.it/sito/ansait_rss.xml";

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

/// Layout variant. Both share the pipeline and differ only in how much of it
/// they populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Desktop/tablet layout: multi-day forecast and agenda.
    #[default]
    Full,
    /// Reduced TV layout: single-day forecast, longer headline list.
    Tv,
}

impl Variant {
    /// Maximum number of hourly forecast labels.
    pub fn hourly_cap(self) -> usize {
        match self {
            Variant::Full => 4,
            Variant::Tv => 6,
        }
    }

    /// Maximum number of daily forecast labels (0 disables the daily list).
    pub fn daily_cap(self) -> usize {
        match self {
            Variant::Full => 5,
            Variant::Tv => 0,
        }
    }

    /// Value sent as `forecast_days` to the forecast endpoint.
    pub fn forecast_days(self) -> u8 {
        match self {
            Variant::Full => 6,
            Variant::Tv => 1,
        }
    }

    /// Default number of headlines kept per refresh.
    pub fn news_cap(self) -> usize {
        match self {
            Variant::Full => 6,
            Variant::Tv => 8,
        }
    }

    pub fn shows_agenda(self) -> bool {
        matches!(self, Variant::Full)
    }

    pub fn default_title_policy(self) -> TitlePolicyKind {
        match self {
            Variant::Full => TitlePolicyKind::Position,
            Variant::Tv => TitlePolicyKind::FilteredFirst,
        }
    }
}

/// What to do when a refresh is triggered while another one is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Ignore the new trigger; the in-flight refresh covers it.
    #[default]
    Coalesce,
    /// Start another refresh; each field keeps whichever result lands last.
    AllowOverlap,
}

/// How feed item titles are picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitlePolicyKind {
    /// The `<title>` that is a direct child of `<item>`.
    Position,
    /// The first `<title>` inside `<item>` not containing `excluded_title`.
    FilteredFirst,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub variant: Variant,

    /// Refresh interval in minutes
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u32,

    #[serde(default)]
    pub overlap_policy: OverlapPolicy,

    #[serde(default)]
    pub locale: Locale,
}

fn default_refresh_minutes() -> u32 {
    15
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            refresh_minutes: default_refresh_minutes(),
            overlap_policy: OverlapPolicy::default(),
            locale: Locale::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Text sent to the geocoder
    pub city_query: String,

    /// City shown before the first successful fetch
    pub display_city: String,

    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
}

fn default_geocoding_url() -> String {
    DEFAULT_GEOCODING_URL.to_string()
}

fn default_forecast_url() -> String {
    DEFAULT_FORECAST_URL.to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            city_query: "Forli".to_string(),
            display_city: "Forlì".to_string(),
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Label attached to every headline
    #[serde(default = "default_source_label")]
    pub source_label: String,

    /// Overrides the variant's title policy when set
    #[serde(default)]
    pub title_policy: Option<TitlePolicyKind>,

    /// Substring skipped by the filtered-first policy (case-insensitive)
    #[serde(default = "default_excluded_title")]
    pub excluded_title: String,

    /// Overrides the variant's headline cap when set
    #[serde(default)]
    pub max_items: Option<usize>,
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_source_label() -> String {
    "ANSA".to_string()
}

fn default_excluded_title() -> String {
    "ANSA".to_string()
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            source_label: default_source_label(),
            title_policy: None,
            excluded_title: default_excluded_title(),
            max_items: None,
        }
    }
}

impl NewsConfig {
    pub fn effective_max_items(&self, variant: Variant) -> usize {
        self.max_items.unwrap_or_else(|| variant.news_cap())
    }

    pub fn effective_title_policy(&self, variant: Variant) -> TitlePolicyKind {
        self.title_policy
            .unwrap_or_else(|| variant.default_title_policy())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub news: NewsConfig,
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config_path = Self::config_path()?;
        Self::load_validated_from(&config_path)
    }

    /// [`Config::load_validated`] against an explicit path
    pub fn load_validated_from(path: &Path) -> Result<(Self, ValidationResult)> {
        let config = Self::load_from(path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Interval between scheduled refreshes. Never zero.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.dashboard.refresh_minutes.max(1)) * 60)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.geocoding_url, "weather.geocoding_url", &mut result);
        self.validate_url(&self.weather.forecast_url, "weather.forecast_url", &mut result);
        self.validate_url(&self.news.feed_url, "news.feed_url", &mut result);

        if self.weather.city_query.trim().is_empty() {
            result.add_error("weather.city_query", "City must not be empty");
        }

        if self.dashboard.refresh_minutes == 0 {
            result.add_error(
                "dashboard.refresh_minutes",
                "Refresh interval must be at least 1 minute",
            );
        } else if self.dashboard.refresh_minutes > 1440 {
            result.add_warning(
                "dashboard.refresh_minutes",
                "Refresh interval is more than 24 hours",
            );
        }

        if self.news.max_items == Some(0) {
            result.add_warning("news.max_items", "Headline list disabled (0 items)");
        }

        if self.news.effective_title_policy(self.dashboard.variant)
            == TitlePolicyKind::FilteredFirst
            && self.news.excluded_title.trim().is_empty()
        {
            result.add_warning(
                "news.excluded_title",
                "Filtered-first title policy has nothing to filter",
            );
        }

        if self.news.source_label.trim().is_empty() {
            result.add_warning("news.source_label", "Headlines will have no source label");
        }

        result
    }

    /// Validate a URL field
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

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound("user config directory".to_string()))?
            .join("dashb");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_default_refresh_is_fifteen_minutes() {
        let config = Config::default();
        assert_eq!(config.refresh_interval(), Duration::from_secs(15 * 60));
    }

    #[test]
    fn test_zero_refresh_is_error_but_interval_is_clamped() {
        let mut config = Config::default();
        config.dashboard.refresh_minutes = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "dashboard.refresh_minutes"));
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.news.feed_url = "ftp://example.com/feed.xml".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.forecast_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "weather.forecast_url"));
    }

    #[test]
    fn test_blank_city_is_error() {
        let mut config = Config::default();
        config.weather.city_query = "   ".to_string();
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_variant_presets() {
        assert_eq!(Variant::Full.hourly_cap(), 4);
        assert_eq!(Variant::Full.daily_cap(), 5);
        assert_eq!(Variant::Full.forecast_days(), 6);
        assert_eq!(Variant::Tv.hourly_cap(), 6);
        assert_eq!(Variant::Tv.daily_cap(), 0);
        assert_eq!(Variant::Tv.forecast_days(), 1);
        assert!(Variant::Full.shows_agenda());
        assert!(!Variant::Tv.shows_agenda());
    }

    #[test]
    fn test_news_overrides() {
        let mut news = NewsConfig::default();
        assert_eq!(news.effective_max_items(Variant::Full), 6);
        assert_eq!(news.effective_max_items(Variant::Tv), 8);
        assert_eq!(
            news.effective_title_policy(Variant::Tv),
            TitlePolicyKind::FilteredFirst
        );

        news.max_items = Some(3);
        news.title_policy = Some(TitlePolicyKind::Position);
        assert_eq!(news.effective_max_items(Variant::Tv), 3);
        assert_eq!(
            news.effective_title_policy(Variant::Tv),
            TitlePolicyKind::Position
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [dashboard]
            variant = "tv"
            overlap_policy = "allow_overlap"
            locale = "it"
            "#,
        )
        .unwrap();

        assert_eq!(config.dashboard.variant, Variant::Tv);
        assert_eq!(config.dashboard.overlap_policy, OverlapPolicy::AllowOverlap);
        assert_eq!(config.dashboard.locale, Locale::It);
        assert_eq!(config.dashboard.refresh_minutes, 15);
        assert_eq!(config.news.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.weather.city_query, "Forli");
    }
}
