//! Grouping of forecast samples into calendar days.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};

use crate::{
    error::CoreError,
    model::{DailySummary, RawSample},
    normalize::round_temp,
    payload::ForecastPayload,
};

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const NOON_HOUR: i64 = 12;

/// UTC calendar day a timestamp falls on.
pub fn date_key(timestamp: i64) -> Result<NaiveDate, CoreError> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| CoreError::MalformedPayload(format!("timestamp {timestamp} out of range")))
}

/// Whole hours between the sample's local hour of day and 12.
///
/// Minutes are ignored: 12:00 and 12:50 are both distance 0.
fn distance_from_noon(timestamp: i64, utc_offset: i32) -> i64 {
    let local_secs = (timestamp + i64::from(utc_offset)).rem_euclid(SECONDS_PER_DAY);
    (local_secs / SECONDS_PER_HOUR - NOON_HOUR).abs()
}

/// Sample closest to local noon; on a tie the one seen first is kept.
fn representative<'a>(samples: &[&'a RawSample], utc_offset: i32) -> Option<&'a RawSample> {
    samples
        .iter()
        .fold(None, |best: Option<(&'a RawSample, i64)>, &sample| {
            let distance = distance_from_noon(sample.timestamp, utc_offset);
            match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((sample, distance)),
            }
        })
        .map(|(sample, _)| sample)
}

fn summarize(date: NaiveDate, sample: &RawSample) -> DailySummary {
    DailySummary {
        date,
        weekday: date.format("%a").to_string(),
        sampled_at: sample.timestamp,
        temperature: round_temp(sample.temperature),
        temperature_min: round_temp(sample.temperature_min),
        temperature_max: round_temp(sample.temperature_max),
        humidity: sample.humidity,
        wind_speed: sample.wind_speed,
        description: sample.description.clone(),
        icon: sample.icon.clone(),
    }
}

/// One summary per distinct UTC date in `samples`.
///
/// The result carries no ordering guarantee; [`crate::outlook::select_outlook`]
/// sorts it. An empty input yields an empty list.
pub fn bucketize(samples: &[RawSample], utc_offset: i32) -> Result<Vec<DailySummary>, CoreError> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut groups: Vec<(NaiveDate, Vec<&RawSample>)> = Vec::new();

    for sample in samples {
        let date = date_key(sample.timestamp)?;
        let slot = *index.entry(date).or_insert_with(|| {
            groups.push((date, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(sample);
    }

    let summaries: Vec<DailySummary> = groups
        .iter()
        .filter_map(|(date, members)| {
            representative(members, utc_offset).map(|sample| summarize(*date, sample))
        })
        .collect();

    tracing::debug!(
        samples = samples.len(),
        days = summaries.len(),
        "bucketized forecast samples"
    );

    Ok(summaries)
}

/// Extract every entry of the forecast envelope and bucketize it using the
/// envelope's timezone offset.
pub fn bucketize_forecast(payload: &ForecastPayload) -> Result<Vec<DailySummary>, CoreError> {
    let samples = payload.samples()?;
    bucketize(&samples, payload.utc_offset())
}
