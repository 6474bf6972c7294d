//! Shapes of the provider's JSON envelopes.
//!
//! Nested blocks are optional at the serde level so that a missing block is
//! reported as [`CoreError::MalformedPayload`] naming that block, instead of a
//! generic decode error or a silently defaulted value.

use serde::Deserialize;

use crate::{
    error::CoreError,
    model::{Place, RawSample},
};

#[derive(Debug, Clone, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWeather {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWind {
    pub speed: f64,
    pub deg: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwSys {
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Body of the `weather` (current conditions) endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentPayload {
    pub name: String,
    pub dt: i64,
    pub main: Option<OwMain>,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub wind: Option<OwWind>,
    pub sys: Option<OwSys>,
    pub visibility: Option<u32>,
    pub timezone: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwCity {
    pub name: String,
    pub country: Option<String>,
    pub timezone: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: Option<OwMain>,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub wind: Option<OwWind>,
}

/// Body of the `forecast` endpoint: three-hourly samples under `list`.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    pub list: Vec<ForecastEntry>,
    pub city: Option<OwCity>,
}

fn parse<T: for<'de> Deserialize<'de>>(json: &str, what: &str) -> Result<T, CoreError> {
    serde_json::from_str(json)
        .map_err(|e| CoreError::MalformedPayload(format!("{what} payload: {e}")))
}

impl CurrentPayload {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        parse(json, "current")
    }

    pub fn place(&self) -> Result<Place, CoreError> {
        let sys = self.sys.as_ref().ok_or_else(|| CoreError::missing("sys"))?;
        Ok(Place {
            city: self.name.clone(),
            country: sys.country.clone(),
        })
    }

    /// Flatten the envelope into a [`RawSample`], failing on any missing block.
    pub fn sample(&self) -> Result<RawSample, CoreError> {
        let main = self.main.as_ref().ok_or_else(|| CoreError::missing("main"))?;
        let weather = self.weather.first().ok_or_else(|| CoreError::missing("weather[0]"))?;
        let wind = self.wind.as_ref().ok_or_else(|| CoreError::missing("wind"))?;
        let sys = self.sys.as_ref().ok_or_else(|| CoreError::missing("sys"))?;
        let timezone = self.timezone.ok_or_else(|| CoreError::missing("timezone"))?;

        Ok(RawSample {
            timestamp: self.dt,
            temperature: main.temp,
            temperature_min: main.temp_min,
            temperature_max: main.temp_max,
            feels_like: main.feels_like,
            humidity: main.humidity,
            wind_speed: wind.speed,
            wind_direction: wind.deg,
            pressure: main.pressure,
            description: weather.description.clone(),
            icon: weather.icon.clone(),
            sunrise: Some(sys.sunrise),
            sunset: Some(sys.sunset),
            visibility: self.visibility,
            timezone_offset: Some(timezone),
        })
    }
}

impl ForecastEntry {
    pub fn sample(&self) -> Result<RawSample, CoreError> {
        let main = self.main.as_ref().ok_or_else(|| CoreError::missing("list[].main"))?;
        let weather = self
            .weather
            .first()
            .ok_or_else(|| CoreError::missing("list[].weather[0]"))?;
        let wind = self.wind.as_ref().ok_or_else(|| CoreError::missing("list[].wind"))?;

        Ok(RawSample {
            timestamp: self.dt,
            temperature: main.temp,
            temperature_min: main.temp_min,
            temperature_max: main.temp_max,
            feels_like: main.feels_like,
            humidity: main.humidity,
            wind_speed: wind.speed,
            wind_direction: wind.deg,
            pressure: main.pressure,
            description: weather.description.clone(),
            icon: weather.icon.clone(),
            sunrise: None,
            sunset: None,
            visibility: None,
            timezone_offset: None,
        })
    }
}

impl ForecastPayload {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        parse(json, "forecast")
    }

    /// Offset used to compute each sample's local time of day; UTC when the
    /// provider omits it.
    pub fn utc_offset(&self) -> i32 {
        self.city.as_ref().and_then(|c| c.timezone).unwrap_or(0)
    }

    pub fn samples(&self) -> Result<Vec<RawSample>, CoreError> {
        self.list.iter().map(ForecastEntry::sample).collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const CURRENT_JSON: &str = r#"{
        "coord": {"lon": -74.006, "lat": 40.7143},
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
        "main": {"temp": 22.5, "feels_like": 22.49, "temp_min": 19.5, "temp_max": 24.44,
                 "pressure": 1012, "humidity": 65},
        "visibility": 10000,
        "wind": {"speed": 5.2, "deg": 120},
        "dt": 1621260000,
        "sys": {"country": "US", "sunrise": 1621232421, "sunset": 1621284048},
        "timezone": -14400,
        "name": "New York"
    }"#;
}
