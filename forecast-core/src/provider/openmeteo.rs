use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::model::Coordinates;

use super::{WeatherSource, truncate_body};

const DAILY: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max";

/// Forecasts from the Open-Meteo API.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    base_url: String,
    http: Client,
}

impl OpenMeteo {
    pub fn new(base_url: String) -> Self {
        Self { base_url, http: Client::new() }
    }
}

#[async_trait]
impl WeatherSource for OpenMeteo {
    async fn forecast(&self, at: Coordinates) -> Result<Value> {
        let url = format!("{}/v1/forecast", self.base_url.trim_end_matches('/'));

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", at.latitude.to_string().as_str()),
                ("longitude", at.longitude.to_string().as_str()),
                ("current_weather", "true"),
                ("timezone", "auto"),
                ("hourly", "precipitation"),
                ("daily", DAILY),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let payload: Value =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo JSON")?;

        tracing::info!("Fetched forecast for {at}");
        Ok(payload)
    }
}
