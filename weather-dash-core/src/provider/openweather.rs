use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    Location,
    config::Units,
    payload::{CurrentPayload, ForecastPayload},
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    api_key: String,
    units: Units,
    base_url: String,
    http: Client,
}

/// Error body OpenWeather returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

impl OpenWeatherSource {
    pub fn new(api_key: String, units: Units, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            units,
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        })
    }

    /// Point the source at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get(&self, endpoint: &str, location: &Location) -> Result<String> {
        let url = format!("{}/{endpoint}", self.base_url);

        let mut query = location.query();
        query.push(("appid", self.api_key.clone()));
        query.push(("units", self.units.as_str().to_string()));

        tracing::debug!(%location, endpoint, "requesting OpenWeather data");

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({endpoint})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {endpoint} response body"))?;

        if !status.is_success() {
            tracing::warn!(%status, endpoint, "OpenWeather request failed");
            return Err(anyhow!(
                "OpenWeather {endpoint} request failed with status {}: {}",
                status,
                error_message(&body),
            ));
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    async fn fetch_current(&self, location: &Location) -> Result<CurrentPayload> {
        let body = self.get("weather", location).await?;
        let payload = CurrentPayload::from_json(&body)?;
        Ok(payload)
    }

    async fn fetch_forecast(&self, location: &Location) -> Result<ForecastPayload> {
        let body = self.get("forecast", location).await?;
        let payload = ForecastPayload::from_json(&body)?;
        tracing::debug!(entries = payload.list.len(), "received forecast list");
        Ok(payload)
    }
}

/// The provider's own `message` when present, otherwise a truncated body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
