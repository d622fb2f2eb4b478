use async_trait::async_trait;
use dashb_core::http::parse_url;
use dashb_core::{Config, DataShapeError, HttpJsonClient, Locale};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::geocode::geocode_city;
use crate::labels::{daily_labels, hourly_labels, temperature_label};
use crate::types::{map_weather_code, GeocodedLocation, WeatherError, WeatherSnapshot};

const CURRENT_FIELDS: &str = "temperature_2m,weather_code";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

/// Anything that can produce a weather snapshot for a city.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_weather(&self, city_query: &str) -> Result<WeatherSnapshot, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
    hourly: Option<HourlyBlock>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f64>,
    weather_code: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Option<Vec<String>>,
    temperature_2m: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Option<Vec<String>>,
    temperature_2m_max: Option<Vec<f64>>,
    temperature_2m_min: Option<Vec<f64>>,
}

/// Open-Meteo backed weather source: geocode, then forecast.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    http: HttpJsonClient,
    geocoding_url: Url,
    forecast_url: Url,
    locale: Locale,
    hourly_cap: usize,
    daily_cap: usize,
    forecast_days: u8,
}

impl WeatherProvider {
    pub fn from_config(config: &Config, http: HttpJsonClient) -> Result<Self, WeatherError> {
        let variant = config.dashboard.variant;
        Ok(Self {
            http,
            geocoding_url: parse_url(&config.weather.geocoding_url)?,
            forecast_url: parse_url(&config.weather.forecast_url)?,
            locale: config.dashboard.locale,
            hourly_cap: variant.hourly_cap(),
            daily_cap: variant.daily_cap(),
            forecast_days: variant.forecast_days(),
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Forecast URL for the given coordinates.
    pub fn forecast_url(&self, location: &GeocodedLocation) -> Url {
        let mut url = self.forecast_url.clone();
        url.query_pairs_mut()
            .append_pair("latitude", &location.latitude.to_string())
            .append_pair("longitude", &location.longitude.to_string())
            .append_pair("current", CURRENT_FIELDS)
            .append_pair("hourly", HOURLY_FIELDS)
            .append_pair("daily", DAILY_FIELDS)
            .append_pair("forecast_days", &self.forecast_days.to_string())
            .append_pair("timezone", "auto");
        url
    }

    /// Geocode `city_query`, fetch its forecast and build the snapshot.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, city_query: &str) -> Result<WeatherSnapshot, WeatherError> {
        let location = geocode_city(&self.http, &self.geocoding_url, city_query, self.locale).await?;

        let body = self.http.get_json(&self.forecast_url(&location)).await?;
        let forecast: ForecastResponse =
            serde_json::from_value(body).map_err(|e| DataShapeError::InvalidValue {
                field: "forecast".to_string(),
                value: e.to_string(),
            })?;

        let snapshot = self.build_snapshot(location.name, forecast)?;
        tracing::info!(
            "Weather for {}: {} {}",
            snapshot.city,
            snapshot.temperature_label,
            snapshot.description
        );
        Ok(snapshot)
    }

    fn build_snapshot(
        &self,
        city: String,
        forecast: ForecastResponse,
    ) -> Result<WeatherSnapshot, DataShapeError> {
        let current = forecast.current.ok_or_else(|| missing("current"))?;
        let temperature = current
            .temperature_2m
            .ok_or_else(|| missing("current.temperature_2m"))?;
        let code = current
            .weather_code
            .ok_or_else(|| missing("current.weather_code"))?;

        let hourly = forecast.hourly.ok_or_else(|| missing("hourly"))?;
        let times = hourly.time.ok_or_else(|| missing("hourly.time"))?;
        let temperatures = hourly
            .temperature_2m
            .ok_or_else(|| missing("hourly.temperature_2m"))?;
        let next_hours = hourly_labels(&times, &temperatures, self.hourly_cap)?;

        let next_days = if self.daily_cap == 0 {
            Vec::new()
        } else {
            let daily = forecast.daily.ok_or_else(|| missing("daily"))?;
            let days = daily.time.ok_or_else(|| missing("daily.time"))?;
            let maxima = daily
                .temperature_2m_max
                .ok_or_else(|| missing("daily.temperature_2m_max"))?;
            let minima = daily
                .temperature_2m_min
                .ok_or_else(|| missing("daily.temperature_2m_min"))?;
            daily_labels(&days, &maxima, &minima, self.daily_cap, self.locale)?
        };

        Ok(WeatherSnapshot {
            city,
            temperature_label: temperature_label(temperature),
            description: map_weather_code(code, self.locale).to_string(),
            next_hours,
            next_days,
        })
    }
}

#[async_trait]
impl WeatherSource for WeatherProvider {
    async fn fetch_weather(&self, city_query: &str) -> Result<WeatherSnapshot, WeatherError> {
        self.fetch(city_query).await
    }
}

fn missing(field: &str) -> DataShapeError {
    DataShapeError::MissingField(field.to_string())
}
