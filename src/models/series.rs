//! Chart series models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Age;

/// Per-match metric that can be charted over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    EffectiveApm,
    FeudalUptime,
    CastleUptime,
    ImperialUptime,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::EffectiveApm,
        Metric::FeudalUptime,
        Metric::CastleUptime,
        Metric::ImperialUptime,
    ];

    /// The age an uptime metric refers to.
    pub fn age(&self) -> Option<Age> {
        match self {
            Metric::EffectiveApm => None,
            Metric::FeudalUptime => Some(Age::Feudal),
            Metric::CastleUptime => Some(Age::Castle),
            Metric::ImperialUptime => Some(Age::Imperial),
        }
    }

    /// Dataset label shown in the chart legend.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::EffectiveApm => "geAPM",
            Metric::FeudalUptime => "Feudal Age Uptime",
            Metric::CastleUptime => "Castle Age Uptime",
            Metric::ImperialUptime => "Imperial Age Uptime",
        }
    }

    /// Chart heading.
    pub fn title(&self) -> &'static str {
        match self {
            Metric::EffectiveApm => "Game-Effective APM",
            Metric::FeudalUptime => "Feudal Age Time",
            Metric::CastleUptime => "Castle Age Time",
            Metric::ImperialUptime => "Imperial Age Time",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::EffectiveApm => "effective_apm",
            Metric::FeudalUptime => "feudal_uptime",
            Metric::CastleUptime => "castle_uptime",
            Metric::ImperialUptime => "imperial_uptime",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "effective_apm" | "apm" | "geapm" => Ok(Metric::EffectiveApm),
            "feudal_uptime" | "feudal" => Ok(Metric::FeudalUptime),
            "castle_uptime" | "castle" => Ok(Metric::CastleUptime),
            "imperial_uptime" | "imperial" => Ok(Metric::ImperialUptime),
            other => Err(format!("unknown metric: {}", other)),
        }
    }
}

/// One chart point. `y` is `None` when the match has no value for the metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(with = "us_date")]
    pub x: NaiveDate,
    pub y: Option<f64>,
}

impl SeriesPoint {
    pub fn new(x: NaiveDate, y: Option<f64>) -> Self {
        Self { x, y }
    }
}

/// A rating snapshot from the player's ladder history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPoint {
    /// Unix epoch seconds
    pub timestamp: i64,
    pub rating: f64,
}

impl RatingPoint {
    pub fn new(timestamp: i64, rating: f64) -> Self {
        Self { timestamp, rating }
    }
}

/// Convert epoch seconds to a UTC calendar day.
pub fn epoch_to_date(timestamp: i64) -> NaiveDate {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .date_naive()
}

/// en-US numeric date (`M/D/YYYY`) used on chart axes.
pub mod us_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%-m/%-d/%Y";
    const PARSE_FORMAT: &str = "%m/%d/%Y";

    pub fn format(date: &NaiveDate) -> String {
        date.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, PARSE_FORMAT).map_err(serde::de::Error::custom)
    }
}
