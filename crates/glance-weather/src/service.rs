//! Weather backend: async weather fetching.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::provider::{query_city, WeatherApi};
use crate::types::{WeatherError, WeatherReport};

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of a city query started with `request_query`
    QueryDone(Result<WeatherReport, WeatherError>),
}

/// Request a lookup and forecast for `city` asynchronously.
/// Sends `QueryDone` on the channel when complete.
pub fn request_query(
    tx: &Sender<WeatherServiceMessage>,
    runtime: &tokio::runtime::Handle,
    api: Arc<dyn WeatherApi>,
    city: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = query_city(api.as_ref(), &city).await;
        if tx.send(WeatherServiceMessage::QueryDone(result)).is_err() {
            tracing::debug!("Weather screen gone before {} arrived", city);
        }
    });
}
