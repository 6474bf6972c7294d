use crate::{
    error::CoreError,
    model::{CurrentReading, Place, RawSample},
    payload::CurrentPayload,
};

/// Round to the nearest whole degree, halves away from zero (`-2.5 -> -3`).
///
/// Every temperature shown to the user goes through this one rule. Values
/// beyond the `i32` range saturate at `i32::MIN`/`i32::MAX`; the input must be
/// finite.
pub fn round_temp(value: f64) -> i32 {
    debug_assert!(value.is_finite(), "non-finite temperature {value}");
    value.round() as i32
}

/// Turn the current-conditions sample into a [`CurrentReading`].
///
/// The sample must come from the current envelope: sunrise, sunset and the
/// timezone offset are required here.
pub fn normalize_sample(sample: &RawSample) -> Result<CurrentReading, CoreError> {
    let sunrise = sample.sunrise.ok_or_else(|| CoreError::missing("sys.sunrise"))?;
    let sunset = sample.sunset.ok_or_else(|| CoreError::missing("sys.sunset"))?;
    let timezone_offset = sample
        .timezone_offset
        .ok_or_else(|| CoreError::missing("timezone"))?;

    Ok(CurrentReading {
        observed_at: sample.timestamp,
        temperature: round_temp(sample.temperature),
        temperature_min: round_temp(sample.temperature_min),
        temperature_max: round_temp(sample.temperature_max),
        feels_like: round_temp(sample.feels_like),
        humidity: sample.humidity,
        wind_speed: sample.wind_speed,
        wind_direction: sample.wind_direction,
        pressure: sample.pressure,
        description: sample.description.clone(),
        icon: sample.icon.clone(),
        sunrise,
        sunset,
        visibility: sample.visibility,
        timezone_offset,
    })
}

/// Extract and normalize the current reading along with its place metadata.
pub fn normalize_current(payload: &CurrentPayload) -> Result<(Place, CurrentReading), CoreError> {
    let sample = payload.sample()?;
    let place = payload.place()?;
    Ok((place, normalize_sample(&sample)?))
}
