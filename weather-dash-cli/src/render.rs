use std::fmt;

use chrono::{DateTime, FixedOffset};
use weather_dash_core::{DaylightPoint, Units, WeatherSnapshot};

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
const BAR_WIDTH: usize = 20;

fn compass(deg: f64) -> &'static str {
    let idx = ((deg.rem_euclid(360.0) + 22.5) / 45.0) as usize % COMPASS.len();
    COMPASS[idx]
}

fn local_clock(timestamp: i64, offset_secs: i32) -> String {
    FixedOffset::east_opt(offset_secs)
        .and_then(|tz| DateTime::from_timestamp(timestamp, 0).map(|dt| dt.with_timezone(&tz)))
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Text view of a snapshot; `Display` writes the whole report.
pub struct SnapshotView<'a> {
    pub snapshot: &'a WeatherSnapshot,
    pub units: Units,
}

impl fmt::Display for SnapshotView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.units.temperature_symbol();
        let snapshot = self.snapshot;
        let c = &snapshot.current;

        writeln!(f, "{}, {}  [{}]", snapshot.city, snapshot.country, c.theme())?;
        writeln!(
            f,
            "{}{t} (feels like {}{t}), {}",
            c.temperature, c.feels_like, c.description
        )?;
        writeln!(f, "Low {}{t} / High {}{t}", c.temperature_min, c.temperature_max)?;
        writeln!(
            f,
            "Humidity {}%  Wind {} {} {}  Pressure {} hPa",
            c.humidity,
            c.wind_speed,
            self.units.speed_symbol(),
            compass(c.wind_direction),
            c.pressure
        )?;
        if let Some(visibility) = c.visibility {
            writeln!(f, "Visibility {:.1} km", f64::from(visibility) / 1000.0)?;
        }
        writeln!(
            f,
            "Sunrise {}  Sunset {}",
            local_clock(c.sunrise, c.timezone_offset),
            local_clock(c.sunset, c.timezone_offset)
        )?;

        if snapshot.forecast.is_empty() {
            writeln!(f, "\nNo forecast available.")?;
        } else {
            writeln!(f, "\nOutlook")?;
            for day in &snapshot.forecast {
                let high = format!("{}{t}", day.temperature_max);
                writeln!(
                    f,
                    "  {} {}  {:>4}{t}  {:>4}{t}/{high:<4}  {}",
                    day.weekday,
                    day.date.format("%m-%d"),
                    day.temperature,
                    day.temperature_min,
                    day.description
                )?;
            }
        }

        write!(f, "\nUpdated {}", snapshot.retrieved_at.format("%Y-%m-%d %H:%M UTC"))
    }
}

/// One line per hour: `HH ########   now` with markers for sunrise, sunset and now.
pub struct DaylightChart<'a>(pub &'a [DaylightPoint]);

impl fmt::Display for DaylightChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Daylight")?;
        for point in self.0 {
            let filled = ((point.intensity / 100.0) * BAR_WIDTH as f64).round() as usize;
            let markers: Vec<&str> = [
                (point.is_sunrise_hour, "sunrise"),
                (point.is_sunset_hour, "sunset"),
                (point.is_current, "now"),
            ]
            .into_iter()
            .filter_map(|(on, name)| on.then_some(name))
            .collect();

            let line = format!(
                "  {:>2} {:<width$} {}",
                &point.label[..2],
                "#".repeat(filled),
                markers.join(","),
                width = BAR_WIDTH
            );
            write!(f, "\n{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_dash_core::{CurrentReading, daylight_curve_from_epoch};

    #[test]
    fn compass_points() {
        assert_eq!(compass(0.0), "N");
        assert_eq!(compass(120.0), "SE");
        assert_eq!(compass(350.0), "N");
        assert_eq!(compass(250.0), "W");
    }

    #[test]
    fn local_clock_applies_offset() {
        assert_eq!(local_clock(0, 3_600), "01:00");
        assert_eq!(local_clock(0, 999_999), "--:--");
    }

    #[test]
    fn daylight_marks_now_and_fills_noon() {
        let curve = daylight_curve_from_epoch(6 * 3_600, 18 * 3_600, 12 * 3_600, 0).expect("valid");
        let text = DaylightChart(&curve).to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 25);
        assert!(lines[13].contains(&"#".repeat(BAR_WIDTH)));
        assert!(lines[13].ends_with("now"));
        assert!(lines[7].ends_with("sunrise"));
        assert!(lines[19].ends_with("sunset"));
    }

    #[test]
    fn snapshot_view_lists_current_and_outlook() {
        let snapshot = WeatherSnapshot {
            city: "Oslo".into(),
            country: "NO".into(),
            current: CurrentReading {
                observed_at: 0,
                temperature: -1,
                temperature_min: -2,
                temperature_max: 0,
                feels_like: -5,
                humidity: 93,
                wind_speed: 6.7,
                wind_direction: 250.0,
                pressure: 998.0,
                description: "light rain".into(),
                icon: "10n".into(),
                sunrise: 6 * 3_600,
                sunset: 18 * 3_600,
                visibility: None,
                timezone_offset: 3_600,
            },
            forecast: Vec::new(),
            retrieved_at: DateTime::from_timestamp(0, 0).unwrap(),
        };

        let text = SnapshotView { snapshot: &snapshot, units: Units::Metric }.to_string();

        assert!(text.starts_with("Oslo, NO  [rainy]"));
        assert!(text.contains("-1°C (feels like -5°C), light rain"));
        assert!(text.contains("Wind 6.7 m/s W"));
        assert!(text.contains("Sunrise 07:00  Sunset 19:00"));
        assert!(text.contains("No forecast available."));
        assert!(!text.contains("Visibility"));
        assert!(text.ends_with("Updated 1970-01-01 00:00 UTC"));
    }
}
