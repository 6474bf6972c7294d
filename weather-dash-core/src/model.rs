use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    condition::{self, Theme},
    daylight::{self, DaylightPoint},
    error::CoreError,
};

/// Where to look up the weather.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl Location {
    /// Query pairs understood by the provider's `weather` and `forecast` endpoints.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Location::City(name) => vec![("q", name.clone())],
            Location::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::City(name) => f.write_str(name),
            Location::Coordinates { lat, lon } => write!(f, "{lat:.4},{lon:.4}"),
        }
    }
}

/// One provider reading at a single instant, flattened out of its JSON envelope.
///
/// The trailing optional fields are only ever present on the "current" sample.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub timestamp: i64,
    pub temperature: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub pressure: f64,
    pub description: String,
    pub icon: String,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub visibility: Option<u32>,
    pub timezone_offset: Option<i32>,
}

/// Place metadata carried by the current-conditions envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub city: String,
    pub country: String,
}

/// Canonical current conditions: temperatures in whole degrees, the rest untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentReading {
    pub observed_at: i64,
    pub temperature: i32,
    pub temperature_min: i32,
    pub temperature_max: i32,
    pub feels_like: i32,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub pressure: f64,
    pub description: String,
    pub icon: String,
    pub sunrise: i64,
    pub sunset: i64,
    pub visibility: Option<u32>,
    pub timezone_offset: i32,
}

impl CurrentReading {
    /// Daylight curve for this reading's sunrise/sunset in the location's local time.
    pub fn daylight_curve(&self, now: DateTime<Utc>) -> Result<Vec<DaylightPoint>, CoreError> {
        daylight::daylight_curve_from_epoch(
            self.sunrise,
            self.sunset,
            now.timestamp(),
            self.timezone_offset,
        )
    }

    pub fn theme(&self) -> Theme {
        condition::classify(&self.icon)
    }
}

/// One day of the outlook, represented by the sample closest to local noon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub weekday: String,
    pub sampled_at: i64,
    pub temperature: i32,
    pub temperature_min: i32,
    pub temperature_max: i32,
    pub humidity: u8,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
}

/// Everything presentation needs for one lookup.
///
/// `forecast` is strictly increasing by date and holds at most
/// [`crate::outlook::OUTLOOK_DAYS`] entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub current: CurrentReading,
    pub forecast: Vec<DailySummary>,
    pub retrieved_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_location_queries_by_name() {
        let loc = Location::City("Oslo".into());
        assert_eq!(loc.query(), vec![("q", "Oslo".to_string())]);
        assert_eq!(loc.to_string(), "Oslo");
    }

    #[test]
    fn coordinate_location_queries_by_lat_lon() {
        let loc = Location::Coordinates { lat: 59.91, lon: 10.75 };
        assert_eq!(
            loc.query(),
            vec![("lat", "59.91".to_string()), ("lon", "10.75".to_string())]
        );
        assert_eq!(loc.to_string(), "59.9100,10.7500");
    }
}
