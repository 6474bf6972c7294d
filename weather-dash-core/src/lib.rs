//! Core library for the `weather-dash` dashboard.
//!
//! This crate defines:
//! - The forecast aggregation engine (normalize, bucket, outlook)
//! - The daylight curve and condition/theme classification
//! - Provider payload shapes and the OpenWeather collaborator
//! - Configuration handling
//!
//! Everything except [`provider`], [`config`] and [`snapshot::fetch_snapshot`]
//! is a pure function of its input.

pub mod bucket;
pub mod condition;
pub mod config;
pub mod daylight;
pub mod error;
pub mod model;
pub mod normalize;
pub mod outlook;
pub mod payload;
pub mod provider;
pub mod snapshot;

pub use bucket::{bucketize, bucketize_forecast};
pub use condition::{ConditionCategory, ConditionFamily, Theme, categorize, classify};
pub use config::{Config, Units};
pub use daylight::{DaylightPoint, daylight_curve, daylight_curve_from_epoch};
pub use error::CoreError;
pub use model::{CurrentReading, DailySummary, Location, Place, RawSample, WeatherSnapshot};
pub use normalize::{normalize_current, round_temp};
pub use outlook::{OUTLOOK_DAYS, select_outlook};
pub use payload::{CurrentPayload, ForecastPayload};
pub use provider::{WeatherSource, openweather::OpenWeatherSource, source_from_config};
pub use snapshot::{build_snapshot, fetch_snapshot};
