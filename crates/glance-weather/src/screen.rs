//! State machine of the weather lookup screen.
//!
//! `submit_city` moves the screen into loading and hands back the city to
//! query; whoever runs the query reports back through `apply`. The screen
//! never talks to the network itself.

use crate::background::background_for;
use crate::provider::{query_city, WeatherApi};
use crate::types::{WeatherError, WeatherReport};

pub const DEFAULT_CITY: &str = "San Francisco";

/// Shown for any failed query, whichever call failed
pub const ERROR_MESSAGE: &str = "Could not load weather, please try a different city.";

/// Raw screen fields.
///
/// A failed query only flips `error`; the previous report stays in the fields
/// but is no longer rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScreenState {
    pub loading: bool,
    pub error: bool,
    pub location: String,
    pub weather: String,
    pub temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// What the screen renders
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherView {
    Idle,
    Loading,
    Failed {
        message: &'static str,
    },
    Report {
        location: String,
        weather: String,
        temperature: String,
    },
}

/// Temperature label, rounded half up: 18.7 -> "19° C", -2.5 -> "-2° C"
pub fn display_temperature(celsius: f64) -> String {
    format!("{}° C", (celsius + 0.5).floor() as i64)
}

#[derive(Debug, Clone)]
pub struct WeatherScreen {
    state: ScreenState,
    default_city: String,
    activated: bool,
    has_report: bool,
}

impl Default for WeatherScreen {
    fn default() -> Self {
        Self::new(DEFAULT_CITY)
    }
}

impl WeatherScreen {
    pub fn new(default_city: impl Into<String>) -> Self {
        Self {
            state: ScreenState::default(),
            default_city: default_city.into(),
            activated: false,
            has_report: false,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.loading {
            Phase::Loading
        } else if self.state.error {
            Phase::Error
        } else if self.has_report {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    /// First display of the screen: query the default city. Runs once.
    pub fn activate(&mut self) -> Option<String> {
        if self.activated {
            return None;
        }
        self.activated = true;
        let city = self.default_city.clone();
        self.submit_city(&city)
    }

    /// Start a query for `city`.
    ///
    /// The input is trimmed, so padded names query the bare name and
    /// whitespace-only input is ignored like empty input. Nothing happens
    /// while a query is still running; only one is ever in flight.
    pub fn submit_city(&mut self, city: &str) -> Option<String> {
        if self.state.loading {
            tracing::debug!("Weather query already in flight, ignoring {}", city);
            return None;
        }

        let city = city.trim();
        if city.is_empty() {
            return None;
        }

        tracing::debug!("Loading weather for {}", city);
        self.state.loading = true;
        Some(city.to_string())
    }

    /// Record the outcome of the query started by `submit_city`
    pub fn apply(&mut self, result: Result<WeatherReport, WeatherError>) {
        match result {
            Ok(report) => {
                tracing::info!("Weather for {}: {}", report.location, report.weather);
                self.state = ScreenState {
                    loading: false,
                    error: false,
                    location: report.location,
                    weather: report.weather,
                    temperature: report.temperature,
                };
                self.has_report = true;
            }
            Err(e) => {
                tracing::error!("Failed to load weather: {}", e);
                self.state.loading = false;
                self.state.error = true;
            }
        }
    }

    /// Query `city` and wait for the answer in place
    pub async fn submit_and_wait(&mut self, api: &dyn WeatherApi, city: &str) -> bool {
        match self.submit_city(city) {
            Some(city) => {
                let result = query_city(api, &city).await;
                self.apply(result);
                true
            }
            None => false,
        }
    }

    /// `activate` followed by the default-city query
    pub async fn activate_and_wait(&mut self, api: &dyn WeatherApi) -> bool {
        match self.activate() {
            Some(city) => {
                let result = query_city(api, &city).await;
                self.apply(result);
                true
            }
            None => false,
        }
    }

    pub fn view(&self) -> WeatherView {
        match self.phase() {
            Phase::Idle => WeatherView::Idle,
            Phase::Loading => WeatherView::Loading,
            Phase::Error => WeatherView::Failed {
                message: ERROR_MESSAGE,
            },
            Phase::Success => WeatherView::Report {
                location: self.state.location.clone(),
                weather: self.state.weather.clone(),
                temperature: display_temperature(self.state.temperature),
            },
        }
    }

    /// Background asset for the last known condition
    pub fn background(&self) -> &'static str {
        background_for(&self.state.weather)
    }

    /// The search field is hidden while a query runs
    pub fn accepts_input(&self) -> bool {
        !self.state.loading
    }
}
