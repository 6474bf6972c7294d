use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use inquire::{Password, Select, Text};
use weather_dash_core::{Config, Location, Units, fetch_snapshot, source_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Weather dashboard in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key, units and default location.
    Configure,

    /// Show current conditions, the 5-day outlook and today's daylight curve.
    Show {
        /// City name; falls back to the configured default location.
        city: Option<String>,

        /// Latitude, used together with --lon instead of a city name.
        #[arg(long, requires = "lon", conflicts_with = "city", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude, used together with --lat.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Print the snapshot as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Instant (RFC 3339) used for the daylight "now" marker; defaults to now.
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                city,
                lat,
                lon,
                json,
                at,
            } => {
                let config = Config::load()?;
                let location = resolve_location(city, lat, lon, &config)?;
                show(&config, &location, json, at.unwrap_or_else(Utc::now)).await
            }
        }
    }
}

fn resolve_location(
    city: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    config: &Config,
) -> anyhow::Result<Location> {
    if let (Some(lat), Some(lon)) = (lat, lon) {
        return Ok(Location::Coordinates { lat, lon });
    }

    match city.or_else(|| config.default_location.clone()) {
        Some(name) if !name.trim().is_empty() => Ok(Location::City(name.trim().to_string())),
        _ => bail!(
            "No location given.\n\
             Hint: pass a city name, --lat/--lon, or set a default with `weather-dash configure`."
        ),
    }
}

async fn show(
    config: &Config,
    location: &Location,
    json: bool,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let source = source_from_config(config)?;
    let snapshot = fetch_snapshot(source.as_ref(), location).await?;

    if json {
        let out = serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "{}",
        render::SnapshotView {
            snapshot: &snapshot,
            units: config.units,
        }
    );

    match snapshot.current.daylight_curve(now) {
        Ok(curve) => println!("{}", render::DaylightChart(&curve)),
        // Polar day/night: nothing sensible to draw.
        Err(err) => tracing::warn!(%err, "skipping daylight curve"),
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !key.trim().is_empty() {
        config.api_key = Some(key.trim().to_string());
    }

    let start = Units::all()
        .iter()
        .position(|u| *u == config.units)
        .unwrap_or(0);
    config.units = Select::new("Units:", Units::all().to_vec())
        .with_starting_cursor(start)
        .prompt()?;

    let current = config.default_location.clone().unwrap_or_default();
    let location = Text::new("Default location:")
        .with_initial_value(&current)
        .prompt()?;
    config.default_location = Some(location.trim().to_string()).filter(|l| !l.is_empty());

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_win_over_default_location() {
        let cfg = Config {
            default_location: Some("Paris".into()),
            ..Config::default()
        };
        let loc = resolve_location(None, Some(1.5), Some(-2.0), &cfg).expect("location");
        assert_eq!(loc, Location::Coordinates { lat: 1.5, lon: -2.0 });
    }

    #[test]
    fn falls_back_to_default_location() {
        let cfg = Config {
            default_location: Some("Paris".into()),
            ..Config::default()
        };
        let loc = resolve_location(None, None, None, &cfg).expect("location");
        assert_eq!(loc, Location::City("Paris".into()));

        let loc = resolve_location(Some(" Lyon ".into()), None, None, &cfg).expect("location");
        assert_eq!(loc, Location::City("Lyon".into()));
    }

    #[test]
    fn errors_without_any_location() {
        let err = resolve_location(None, None, None, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("No location given"));
    }

    #[test]
    fn parses_show_with_coordinates() {
        let cli = Cli::try_parse_from(["weather-dash", "show", "--lat", "-33.9", "--lon", "18.4"])
            .expect("valid args");
        match cli.command {
            Command::Show { lat, lon, city, .. } => {
                assert_eq!(lat, Some(-33.9));
                assert_eq!(lon, Some(18.4));
                assert_eq!(city, None);
            }
            Command::Configure => panic!("expected show"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["weather-dash", "show", "--lat", "1.0"]).is_err());
    }
}
