//! Forward geocoding: turn a city name into a location identifier.
//! Uses the Open-Meteo geocoding search - free, no API key required.

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{LocationId, WeatherError};

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Absent, not empty, when nothing matches
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: i64,
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

/// Resolve `city` to the best matching place
#[instrument(skip(client, base_url), level = "info")]
pub async fn lookup_city(
    client: &Client,
    base_url: &str,
    city: &str,
) -> Result<LocationId, WeatherError> {
    let url = format!("{}/v1/search", base_url.trim_end_matches('/'));

    let response = client
        .get(&url)
        .query(&[("name", city), ("count", "1"), ("format", "json")])
        .send()
        .await?;

    if !response.status().is_success() {
        tracing::debug!("City lookup returned status {}", response.status());
        return Err(WeatherError::Status {
            status: response.status().as_u16(),
            endpoint: "geocoding",
        });
    }

    let body: SearchResponse = response
        .json()
        .await
        .map_err(|e| WeatherError::Parse(e.to_string()))?;

    let place = body
        .results
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::LocationNotFound(city.to_string()))?;

    tracing::info!("Resolved {} to {} ({})", city, place.name, place.id);
    Ok(LocationId {
        id: place.id,
        name: place.name,
        latitude: place.latitude,
        longitude: place.longitude,
        country: place.country,
    })
}
