use crate::{
    Config, Location,
    payload::{CurrentPayload, ForecastPayload},
    provider::openweather::OpenWeatherSource,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

/// The external collaborator that hands the engine its raw payloads.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(&self, location: &Location) -> anyhow::Result<CurrentPayload>;

    async fn fetch_forecast(&self, location: &Location) -> anyhow::Result<ForecastPayload>;
}

/// Construct the OpenWeather source from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weather-dash configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let mut source = OpenWeatherSource::new(
        api_key.to_owned(),
        config.units,
        Duration::from_secs(config.timeout_secs),
    )?;
    if let Some(base_url) = &config.base_url {
        source = source.with_base_url(base_url.clone());
    }

    Ok(Box::new(source))
}
