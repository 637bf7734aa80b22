//! The three outside collaborators: place search, forecast API and device location.

use crate::{
    Config,
    model::{Coordinates, Place},
    provider::{fixed::FixedLocation, openmeteo::OpenMeteo, restcountries::RestCountries},
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod fixed;
pub mod openmeteo;
pub mod restcountries;

/// Name search returning candidates in the service's relevance order.
#[async_trait]
pub trait PlaceSearch: Send + Sync + Debug {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<Place>>;
}

/// Forecast lookup; the payload is handed to `normalize` untouched.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn forecast(&self, at: Coordinates) -> anyhow::Result<serde_json::Value>;
}

/// Options passed along with a one-shot location request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRequest {
    pub high_accuracy: bool,
    pub timeout: Duration,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self { high_accuracy: true, timeout: Duration::from_secs(10) }
    }
}

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn locate(&self, request: &LocationRequest) -> anyhow::Result<Coordinates>;
}

/// Everything the orchestrator talks to over the network or the device.
#[derive(Debug)]
pub struct Collaborators {
    pub places: Box<dyn PlaceSearch>,
    pub weather: Box<dyn WeatherSource>,
    pub locator: Box<dyn LocationProvider>,
}

impl Collaborators {
    /// Real HTTP collaborators using the configured endpoints.
    pub fn from_config(config: &Config) -> Self {
        Self {
            places: Box::new(RestCountries::new(config.endpoints.countries_url.clone())),
            weather: Box::new(OpenMeteo::new(config.endpoints.forecast_url.clone())),
            locator: Box::new(FixedLocation::new(config.home)),
        }
    }

    pub fn with_locator(mut self, locator: Box<dyn LocationProvider>) -> Self {
        self.locator = locator;
        self
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_request_defaults_to_ten_seconds_high_accuracy() {
        let req = LocationRequest::default();
        assert!(req.high_accuracy);
        assert_eq!(req.timeout, Duration::from_secs(10));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let short = "not found";
        assert_eq!(truncate_body(short), short);

        let long = "é".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[tokio::test]
    async fn from_config_wires_home_location() {
        let mut cfg = Config::default();
        cfg.set_home(1.5, 2.5);

        let collaborators = Collaborators::from_config(&cfg);
        let at = collaborators
            .locator
            .locate(&LocationRequest::default())
            .await
            .expect("home is configured");
        assert_eq!(at, Coordinates::new(1.5, 2.5));
    }
}
