//! Weather lookup screen for Glance
//!
//! Resolves a city name through the Open-Meteo geocoding API, fetches its
//! current conditions and keeps the screen state that renders them.

pub mod background;
pub mod geocode;
pub mod model;
pub mod provider;
pub mod screen;
pub mod service;
pub mod types;

pub use background::background_for;
pub use model::WeatherModel;
pub use provider::{query_city, OpenMeteoProvider, WeatherApi};
pub use screen::{display_temperature, Phase, ScreenState, WeatherScreen, WeatherView};
pub use service::WeatherServiceMessage;
pub use types::*;
