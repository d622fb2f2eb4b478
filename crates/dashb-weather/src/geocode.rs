//! Forward geocoding: turn a city name into coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use dashb_core::{DataShapeError, HttpJsonClient, Locale};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::types::{GeocodedLocation, WeatherError};

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
}

/// Build the search URL for `query` on top of the configured endpoint.
pub fn geocode_url(base: &Url, query: &str, locale: Locale) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("name", query)
        .append_pair("count", "1")
        .append_pair("language", locale.code())
        .append_pair("format", "json");
    url
}

/// Resolve `query` to the first matching place.
///
/// An absent or empty `results` array is a [`DataShapeError::EmptyResults`].
#[instrument(skip(http, base), level = "info")]
pub async fn geocode_city(
    http: &HttpJsonClient,
    base: &Url,
    query: &str,
    locale: Locale,
) -> Result<GeocodedLocation, WeatherError> {
    let body = http.get_json(&geocode_url(base, query, locale)).await?;

    let response: GeocodeResponse =
        serde_json::from_value(body).map_err(|e| DataShapeError::InvalidValue {
            field: "results".to_string(),
            value: e.to_string(),
        })?;

    let first = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| DataShapeError::EmptyResults(query.to_string()))?;

    tracing::info!(
        "Geocoded {} to {} ({}, {})",
        query,
        first.name,
        first.latitude,
        first.longitude
    );

    Ok(GeocodedLocation {
        name: first.name,
        latitude: first.latitude,
        longitude: first.longitude,
    })
}
