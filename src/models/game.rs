//! Match record model.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchId, ProfileId};

/// Technological era a civilization can advance into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Age {
    Feudal,
    Castle,
    Imperial,
}

impl Age {
    pub const ALL: [Age; 3] = [Age::Feudal, Age::Castle, Age::Imperial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Age::Feudal => "feudal",
            Age::Castle => "castle",
            Age::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player's record within a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGameStats {
    /// Civilization label (e.g., "Franks", "Mongols")
    pub civilization: String,

    /// Build order label; `None` means unclassified
    #[serde(default)]
    pub build_order: Option<String>,

    /// Effective actions per minute
    #[serde(default)]
    pub mean_apm: Option<f64>,

    /// Seconds from game start until each age was reached
    #[serde(default)]
    pub age_up_times: HashMap<Age, f64>,

    /// Whether this player won
    #[serde(default)]
    pub won: bool,
}

impl PlayerGameStats {
    pub fn new(civilization: impl Into<String>) -> Self {
        Self {
            civilization: civilization.into(),
            build_order: None,
            mean_apm: None,
            age_up_times: HashMap::new(),
            won: false,
        }
    }

    /// Builder method to set the build order.
    pub fn with_build_order(mut self, build_order: impl Into<String>) -> Self {
        self.build_order = Some(build_order.into());
        self
    }

    /// Builder method to set the effective APM.
    pub fn with_apm(mut self, apm: f64) -> Self {
        self.mean_apm = Some(apm);
        self
    }

    /// Builder method to record an age-up time in seconds.
    pub fn with_age_up(mut self, age: Age, seconds: f64) -> Self {
        self.age_up_times.insert(age, seconds);
        self
    }

    /// Builder method to set the outcome.
    pub fn with_won(mut self, won: bool) -> Self {
        self.won = won;
        self
    }

    /// Seconds until `age` was reached, if it ever was.
    pub fn age_up(&self, age: Age) -> Option<f64> {
        self.age_up_times.get(&age).copied()
    }
}

/// One played game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: MatchId,

    /// Unix epoch seconds at which the game was recorded
    pub played_at_time: i64,

    pub map_name: String,

    /// Game length in seconds, when known
    #[serde(default)]
    pub duration_seconds: Option<u64>,

    /// Per-player records keyed by profile id
    #[serde(default)]
    pub players: HashMap<ProfileId, PlayerGameStats>,
}

impl Match {
    pub fn new(match_id: impl Into<MatchId>, played_at_time: i64, map_name: impl Into<String>) -> Self {
        Self {
            match_id: match_id.into(),
            played_at_time,
            map_name: map_name.into(),
            duration_seconds: None,
            players: HashMap::new(),
        }
    }

    /// Builder method to add a player's record.
    pub fn with_player(mut self, profile_id: impl Into<ProfileId>, stats: PlayerGameStats) -> Self {
        self.players.insert(profile_id.into(), stats);
        self
    }

    /// Builder method to set the game length.
    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    /// The record of `profile_id`, if that player took part.
    pub fn player(&self, profile_id: &ProfileId) -> Option<&PlayerGameStats> {
        self.players.get(profile_id)
    }

    pub fn has_player(&self, profile_id: &ProfileId) -> bool {
        self.players.contains_key(profile_id)
    }

    /// Timestamp as a UTC datetime. Out-of-range values clamp to the epoch.
    pub fn played_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.played_at_time, 0).unwrap_or_default()
    }

    /// Calendar day the game was played on (UTC).
    pub fn played_on(&self) -> NaiveDate {
        self.played_at().date_naive()
    }
}
