use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::{
    bucket::bucketize_forecast,
    error::CoreError,
    model::{Location, WeatherSnapshot},
    normalize::normalize_current,
    outlook::select_outlook,
    payload::{CurrentPayload, ForecastPayload},
    provider::WeatherSource,
};

/// Combine the two provider payloads into one snapshot stamped `retrieved_at`.
pub fn build_snapshot(
    current: &CurrentPayload,
    forecast: &ForecastPayload,
    retrieved_at: DateTime<Utc>,
) -> Result<WeatherSnapshot, CoreError> {
    let (place, reading) = normalize_current(current)?;
    let outlook = select_outlook(bucketize_forecast(forecast)?);

    tracing::debug!(
        city = %place.city,
        days = outlook.len(),
        "assembled weather snapshot"
    );

    Ok(WeatherSnapshot {
        city: place.city,
        country: place.country,
        current: reading,
        forecast: outlook,
        retrieved_at,
    })
}

/// Fetch both payloads for `location` and assemble them.
pub async fn fetch_snapshot(
    source: &dyn WeatherSource,
    location: &Location,
) -> Result<WeatherSnapshot> {
    let current = source.fetch_current(location).await?;
    let forecast = source.fetch_forecast(location).await?;

    let snapshot = build_snapshot(&current, &forecast, Utc::now())
        .with_context(|| format!("Failed to process weather data for {location}"))?;

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::fixtures::CURRENT_JSON;
    use async_trait::async_trait;

    fn forecast_json(start: i64, entries: i64) -> String {
        let list: Vec<String> = (0..entries)
            .map(|i| {
                format!(
                    r#"{{"dt": {}, "main": {{"temp": {}.6, "feels_like": 1.0, "temp_min": 0.5,
                        "temp_max": 3.5, "pressure": 1010, "humidity": 70}},
                        "weather": [{{"description": "overcast clouds", "icon": "04d"}}],
                        "wind": {{"speed": 2.1, "deg": 45}}}}"#,
                    start + i * 3 * 3_600,
                    i
                )
            })
            .collect();
        format!(
            r#"{{"list": [{}], "city": {{"name": "New York", "country": "US", "timezone": 0}}}}"#,
            list.join(",")
        )
    }

    #[test]
    fn builds_snapshot_from_both_payloads() {
        let current = CurrentPayload::from_json(CURRENT_JSON).expect("valid");
        let forecast = ForecastPayload::from_json(&forecast_json(1_709_510_400, 40)).expect("valid");
        let at = DateTime::from_timestamp(1_709_500_000, 0).unwrap();

        let snapshot = build_snapshot(&current, &forecast, at).expect("complete payloads");

        assert_eq!(snapshot.city, "New York");
        assert_eq!(snapshot.country, "US");
        assert_eq!(snapshot.current.temperature, 23);
        assert_eq!(snapshot.forecast.len(), 5);
        assert!(snapshot.forecast.windows(2).all(|w| w[0].date < w[1].date));
        // noon sample of day zero is entry #4 (temp 4.6)
        assert_eq!(snapshot.forecast[0].temperature, 5);
        assert_eq!(snapshot.retrieved_at, at);

        assert_eq!(build_snapshot(&current, &forecast, at).unwrap(), snapshot);
    }

    #[test]
    fn empty_forecast_list_is_a_valid_snapshot() {
        let current = CurrentPayload::from_json(CURRENT_JSON).expect("valid");
        let forecast = ForecastPayload::from_json(r#"{"list": []}"#).expect("valid");

        let snapshot = build_snapshot(&current, &forecast, Utc::now()).expect("valid");
        assert!(snapshot.forecast.is_empty());
    }

    #[derive(Debug)]
    struct CannedSource;

    #[async_trait]
    impl WeatherSource for CannedSource {
        async fn fetch_current(&self, _: &Location) -> Result<CurrentPayload> {
            Ok(CurrentPayload::from_json(CURRENT_JSON)?)
        }

        async fn fetch_forecast(&self, _: &Location) -> Result<ForecastPayload> {
            Ok(ForecastPayload::from_json(r#"{"list": [{"dt": 1709510400}]}"#)?)
        }
    }

    #[tokio::test]
    async fn fetch_snapshot_surfaces_core_errors() {
        let err = fetch_snapshot(&CannedSource, &Location::City("New York".into()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to process weather data for New York"));
        assert_eq!(
            err.downcast_ref::<CoreError>(),
            Some(&CoreError::MalformedPayload("missing `list[].main`".into()))
        );
    }
}
