use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::geocode::{self, GEOCODING_URL};
use crate::types::{LocationId, WeatherCondition, WeatherError, WeatherReport};

pub const FORECAST_URL: &str = "https://api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Glance/0.1.0";

/// The two remote calls behind the weather screen
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Resolve a city name to a location identifier
    async fn lookup_location(&self, city: &str) -> Result<LocationId, WeatherError>;

    /// Current conditions for a resolved location
    async fn fetch_weather(&self, location: &LocationId) -> Result<WeatherReport, WeatherError>;
}

/// Lookup followed by forecast, the full query for one city
pub async fn query_city(api: &dyn WeatherApi, city: &str) -> Result<WeatherReport, WeatherError> {
    let location = api.lookup_location(city).await?;
    api.fetch_weather(&location).await
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    weather_code: i32,
}

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    client: Arc<Client>,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoProvider {
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_urls(
            GEOCODING_URL,
            FORECAST_URL,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn with_base_urls(
        geocoding_url: &str,
        forecast_url: &str,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            geocoding_url: geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: forecast_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl WeatherApi for OpenMeteoProvider {
    async fn lookup_location(&self, city: &str) -> Result<LocationId, WeatherError> {
        geocode::lookup_city(&self.client, &self.geocoding_url, city).await
    }

    #[instrument(skip(self, location), fields(location = %location.name), level = "info")]
    async fn fetch_weather(&self, location: &LocationId) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/v1/forecast", self.forecast_url);
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", "temperature_2m,weather_code"),
                ("temperature_unit", "celsius"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Forecast returned status {}", response.status());
            return Err(WeatherError::Status {
                status: response.status().as_u16(),
                endpoint: "forecast",
            });
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let condition = WeatherCondition::from_wmo_code(body.current.weather_code);
        Ok(WeatherReport {
            location: location.name.clone(),
            weather: condition.description().to_string(),
            temperature: body.current.temperature_2m,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedApi {
        lookups: Mutex<Vec<String>>,
        fail_lookup: bool,
    }

    #[async_trait]
    impl WeatherApi for ScriptedApi {
        async fn lookup_location(&self, city: &str) -> Result<LocationId, WeatherError> {
            self.lookups.lock().unwrap().push(city.to_string());
            if self.fail_lookup {
                return Err(WeatherError::LocationNotFound(city.to_string()));
            }
            Ok(LocationId {
                id: 7,
                name: city.to_string(),
                latitude: 0.0,
                longitude: 0.0,
                country: None,
            })
        }

        async fn fetch_weather(
            &self,
            location: &LocationId,
        ) -> Result<WeatherReport, WeatherError> {
            Ok(WeatherReport {
                location: location.name.clone(),
                weather: "Fog".to_string(),
                temperature: 3.2,
            })
        }
    }

    #[test]
    fn test_forecast_response_parses_current_block() {
        let body: ForecastResponse = serde_json::from_str(
            r#"{"latitude":37.76,"longitude":-122.41,
                "current":{"time":"2026-10-18T12:00","interval":900,
                "temperature_2m":18.7,"weather_code":0}}"#,
        )
        .unwrap();
        assert_eq!(body.current.weather_code, 0);
        assert!((body.current.temperature_2m - 18.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_base_urls_are_normalized() {
        let provider = OpenMeteoProvider::with_base_urls(
            "http://geo.test/",
            "http://wx.test//",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(provider.geocoding_url, "http://geo.test");
        assert_eq!(provider.forecast_url, "http://wx.test");
    }

    #[tokio::test]
    async fn test_query_city_chains_lookup_and_forecast() {
        let api = ScriptedApi {
            lookups: Mutex::new(Vec::new()),
            fail_lookup: false,
        };
        let report = query_city(&api, "Oslo").await.unwrap();
        assert_eq!(report.location, "Oslo");
        assert_eq!(*api.lookups.lock().unwrap(), vec!["Oslo".to_string()]);
    }

    #[tokio::test]
    async fn test_query_city_stops_after_failed_lookup() {
        let api = ScriptedApi {
            lookups: Mutex::new(Vec::new()),
            fail_lookup: true,
        };
        let err = query_city(&api, "Nowhereville").await.unwrap_err();
        assert!(matches!(err, WeatherError::LocationNotFound(_)));
    }
}
