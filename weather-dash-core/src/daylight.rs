//! Synthetic 24-hour daylight intensity curve.
//!
//! Between sunrise and sunset the intensity follows an inverted parabola that
//! peaks at 100 halfway through the day and reaches 0 at both ends; every hour
//! outside that window is 0.

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const HOURS_PER_DAY: u32 = 24;
pub const MAX_INTENSITY: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaylightPoint {
    pub hour: u32,
    pub label: String,
    pub intensity: f64,
    pub is_current: bool,
    pub is_sunrise_hour: bool,
    pub is_sunset_hour: bool,
}

fn fractional_hour(at: &DateTime<FixedOffset>) -> f64 {
    f64::from(at.hour()) + f64::from(at.minute()) / 60.0
}

/// Hour bucket the "now" marker sits on; it moves to the next hour at :30.
fn marker_hour(now: &DateTime<FixedOffset>) -> u32 {
    let bump = u32::from(now.minute() >= 30);
    (now.hour() + bump) % HOURS_PER_DAY
}

/// Build the 24 hourly points, hour 0 first.
///
/// Local hours come from each instant's own offset. Fails with
/// [`CoreError::InvalidInterval`] when sunrise is not strictly before sunset,
/// or when their local clock times do not form a positive span (sunset past
/// local midnight).
pub fn daylight_curve(
    sunrise: DateTime<FixedOffset>,
    sunset: DateTime<FixedOffset>,
    now: DateTime<FixedOffset>,
) -> Result<Vec<DaylightPoint>, CoreError> {
    if sunrise >= sunset {
        return Err(CoreError::InvalidInterval(format!(
            "sunrise {sunrise} is not before sunset {sunset}"
        )));
    }

    let rise = fractional_hour(&sunrise);
    let set = fractional_hour(&sunset);
    let half_span = (set - rise) / 2.0;
    if !half_span.is_finite() || half_span <= 0.0 {
        return Err(CoreError::InvalidInterval(format!(
            "local daylight span {rise:.2}h..{set:.2}h is empty"
        )));
    }
    let mid = (rise + set) / 2.0;

    let current = marker_hour(&now);
    let sunrise_hour = rise.floor() as u32;
    let sunset_hour = set.floor() as u32;

    let points = (0..HOURS_PER_DAY)
        .map(|hour| {
            let h = f64::from(hour);
            let intensity = if h < rise || h > set {
                0.0
            } else {
                let ratio = (h - mid).abs() / half_span;
                (MAX_INTENSITY * (1.0 - ratio * ratio)).clamp(0.0, MAX_INTENSITY)
            };

            DaylightPoint {
                hour,
                label: format!("{hour:02}:00"),
                intensity,
                is_current: hour == current,
                is_sunrise_hour: hour == sunrise_hour,
                is_sunset_hour: hour == sunset_hour,
            }
        })
        .collect();

    Ok(points)
}

fn at_offset(timestamp: i64, offset: FixedOffset) -> Result<DateTime<FixedOffset>, CoreError> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.with_timezone(&offset))
        .ok_or_else(|| CoreError::InvalidInterval(format!("timestamp {timestamp} out of range")))
}

/// [`daylight_curve`] over raw epoch seconds, viewed at `utc_offset` seconds
/// east of UTC.
pub fn daylight_curve_from_epoch(
    sunrise: i64,
    sunset: i64,
    now: i64,
    utc_offset: i32,
) -> Result<Vec<DaylightPoint>, CoreError> {
    let offset = FixedOffset::east_opt(utc_offset)
        .ok_or_else(|| CoreError::InvalidInterval(format!("utc offset {utc_offset}s out of range")))?;

    daylight_curve(
        at_offset(sunrise, offset)?,
        at_offset(sunset, offset)?,
        at_offset(now, offset)?,
    )
}
