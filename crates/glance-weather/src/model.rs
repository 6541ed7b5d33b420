use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use crate::provider::WeatherApi;
use crate::screen::{WeatherScreen, WeatherView};
use crate::service::{self, WeatherServiceMessage};

/// Weather screen wired to a provider and the runtime.
///
/// Queries run on the runtime; `poll_channel` applies their results on the
/// caller's thread.
pub struct WeatherModel {
    screen: WeatherScreen,
    api: Arc<dyn WeatherApi>,
    runtime: tokio::runtime::Handle,
    tx: Sender<WeatherServiceMessage>,
    rx: Receiver<WeatherServiceMessage>,
}

impl WeatherModel {
    pub fn new(
        screen: WeatherScreen,
        api: Arc<dyn WeatherApi>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        Self {
            screen,
            api,
            runtime,
            tx,
            rx,
        }
    }

    pub fn screen(&self) -> &WeatherScreen {
        &self.screen
    }

    pub fn view(&self) -> WeatherView {
        self.screen.view()
    }

    /// Query the default city when the screen is first shown
    pub fn activate(&mut self) -> bool {
        let city = self.screen.activate();
        self.dispatch(city)
    }

    /// Search field submission
    pub fn submit_city(&mut self, city: &str) -> bool {
        let city = self.screen.submit_city(city);
        self.dispatch(city)
    }

    fn dispatch(&self, city: Option<String>) -> bool {
        match city {
            Some(city) => {
                service::request_query(&self.tx, &self.runtime, self.api.clone(), city);
                true
            }
            None => false,
        }
    }

    /// Apply a finished query, if one arrived. Call from the UI thread.
    pub fn poll_channel(&mut self) -> bool {
        match self.rx.try_recv() {
            Ok(WeatherServiceMessage::QueryDone(result)) => {
                self.screen.apply(result);
                true
            }
            Err(_) => false,
        }
    }
}
