use serde::{Deserialize, Serialize};

/// Coarse condition grouping encoded in the first two characters of an icon
/// token (`"10d"` -> `10`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionFamily {
    Clear,
    Clouds,
    /// Drizzle, rain and thunderstorm.
    Precipitation,
    Snow,
    /// Mist, smoke, haze, dust and fog.
    Mist,
    Unknown,
}

impl ConditionFamily {
    pub fn from_code(code: &str) -> Self {
        match code {
            "01" => ConditionFamily::Clear,
            "02" | "03" | "04" => ConditionFamily::Clouds,
            "09" | "10" | "11" => ConditionFamily::Precipitation,
            "13" => ConditionFamily::Snow,
            "50" => ConditionFamily::Mist,
            _ => ConditionFamily::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionCategory {
    pub family: ConditionFamily,
    pub is_day: bool,
}

/// Display theme for the dashboard background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Sunny,
    Night,
    Cloudy,
    Rainy,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Sunny => "sunny",
            Theme::Night => "night",
            Theme::Cloudy => "cloudy",
            Theme::Rainy => "rainy",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConditionCategory {
    pub fn theme(&self) -> Theme {
        match (self.family, self.is_day) {
            (ConditionFamily::Clear, true) => Theme::Sunny,
            (ConditionFamily::Clear, false) => Theme::Night,
            (ConditionFamily::Clouds, _) => Theme::Cloudy,
            (ConditionFamily::Precipitation, _) => Theme::Rainy,
            (_, true) => Theme::Sunny,
            (_, false) => Theme::Night,
        }
    }
}

/// Split an icon token into its family and day/night flag.
///
/// Only a trailing `d` counts as daytime; any other token is treated as night.
pub fn categorize(icon: &str) -> ConditionCategory {
    ConditionCategory {
        family: icon.get(..2).map_or(ConditionFamily::Unknown, ConditionFamily::from_code),
        is_day: icon.ends_with('d'),
    }
}

pub fn classify(icon: &str) -> Theme {
    categorize(icon).theme()
}
