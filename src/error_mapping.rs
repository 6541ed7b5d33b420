//! Maps screen crate errors to glance_core::AppError for consistent user-facing messages.

use glance_core::error::ReqwestErrorExt;
use glance_core::{AppError, ConfigError, PhotoError, WeatherError};
use glance_photos::PhotoError as GridPhotoError;
use glance_weather::WeatherError as ScreenWeatherError;

pub fn weather_error(e: ScreenWeatherError) -> AppError {
    match e {
        ScreenWeatherError::Network(e) => AppError::Network(e.into_network_error()),
        ScreenWeatherError::LocationNotFound(city) => {
            AppError::Weather(WeatherError::LocationNotFound(city))
        }
        ScreenWeatherError::Status { status, endpoint } => AppError::Weather(
            WeatherError::ApiError(format!("{} returned {}", endpoint, status)),
        ),
        ScreenWeatherError::Parse(s) => AppError::Weather(WeatherError::ApiError(s)),
    }
}

pub fn photo_error(e: GridPhotoError) -> AppError {
    match e {
        GridPhotoError::Unavailable(s) => AppError::Photos(PhotoError::LibraryUnavailable(s)),
        GridPhotoError::InvalidCursor(s) | GridPhotoError::Read(s) => {
            AppError::Photos(PhotoError::FetchFailed(s))
        }
    }
}

/// Config and file failures from `App::new`; anything else is `Other`
pub fn startup_error(e: anyhow::Error) -> AppError {
    let e = match e.downcast::<ConfigError>() {
        Ok(config) => return AppError::Config(config),
        Err(e) => e,
    };
    match e.downcast::<std::io::Error>() {
        Ok(io) => AppError::Io(io),
        Err(e) => AppError::Other(e),
    }
}
