//! Derived statistics models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tier classification based on win rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
}

impl Tier {
    /// Calculate tier from win rate.
    pub fn from_win_rate(win_rate: f64) -> Self {
        if win_rate >= 0.55 {
            Tier::S
        } else if win_rate >= 0.52 {
            Tier::A
        } else if win_rate >= 0.48 {
            Tier::B
        } else if win_rate >= 0.45 {
            Tier::C
        } else {
            Tier::D
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::S => write!(f, "S"),
            Tier::A => write!(f, "A"),
            Tier::B => write!(f, "B"),
            Tier::C => write!(f, "C"),
            Tier::D => write!(f, "D"),
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "S" => Ok(Tier::S),
            "A" => Ok(Tier::A),
            "B" => Ok(Tier::B),
            "C" => Ok(Tier::C),
            "D" => Ok(Tier::D),
            other => Err(format!("unknown tier: {}", other)),
        }
    }
}

/// Won games out of a total, rendered as "wins/total".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WinRecord {
    pub wins: usize,
    pub total: usize,
}

impl WinRecord {
    pub fn new(wins: usize, total: usize) -> Self {
        Self { wins, total }
    }

    pub fn losses(&self) -> usize {
        self.total.saturating_sub(self.wins)
    }

    /// Win rate as a fraction (0.0 to 1.0).
    pub fn win_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.wins as f64 / self.total as f64
        }
    }
}

impl fmt::Display for WinRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.wins, self.total)
    }
}

/// Per-civilization performance of the tracked player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CivPerformance {
    /// Civilization name
    pub name: String,

    /// Tier classification
    pub tier: Tier,

    /// Games played with this civilization
    pub games_played: usize,

    pub wins: usize,

    pub losses: usize,

    /// Win rate (0.0 to 1.0)
    pub win_rate: f64,

    /// Share of all games played with this civilization
    pub play_rate: f64,

    /// Mean effective APM over games that reported it
    pub average_apm: Option<f64>,

    /// Mean feudal age time in seconds over games that reached it
    pub average_feudal_uptime: Option<f64>,

    /// Mean castle age time in seconds over games that reached it
    pub average_castle_uptime: Option<f64>,
}

impl CivPerformance {
    /// Create a CivPerformance with calculated fields.
    pub fn new(name: String, record: WinRecord, total_games: usize) -> Self {
        let win_rate = record.win_rate();
        let play_rate = if total_games > 0 {
            record.total as f64 / total_games as f64
        } else {
            0.0
        };

        Self {
            name,
            tier: Tier::from_win_rate(win_rate),
            games_played: record.total,
            wins: record.wins,
            losses: record.losses(),
            win_rate,
            play_rate,
            average_apm: None,
            average_feudal_uptime: None,
            average_castle_uptime: None,
        }
    }
}

/// Count of games whose length falls in `[from_seconds, to_seconds)`.
/// `to_seconds` is `None` for an open-ended last bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBucket {
    pub from_seconds: u64,
    pub to_seconds: Option<u64>,
    pub games: usize,
}

impl DurationBucket {
    /// Axis label in whole minutes, e.g. "20-25 min" or "180+ min".
    pub fn label(&self) -> String {
        match self.to_seconds {
            Some(to) => format!("{}-{} min", self.from_seconds / 60, to / 60),
            None => format!("{}+ min", self.from_seconds / 60),
        }
    }
}

/// Distribution of game lengths.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DurationStats {
    /// Games with a known length
    pub count: usize,
    pub min_seconds: Option<u64>,
    pub max_seconds: Option<u64>,
    pub mean_seconds: Option<f64>,
    pub median_seconds: Option<f64>,
    /// Contiguous buckets from the shortest to the longest game
    pub buckets: Vec<DurationBucket>,
}

/// Stats block shown next to the rating chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub civs: BTreeMap<String, CivPerformance>,
    pub durations: DurationStats,
}

impl PlayerStats {
    /// Civilizations sorted by win rate (descending), ties by games played.
    pub fn sorted_by_win_rate(&self) -> Vec<&CivPerformance> {
        let mut sorted: Vec<_> = self.civs.values().collect();
        sorted.sort_by(|a, b| {
            b.win_rate
                .total_cmp(&a.win_rate)
                .then(b.games_played.cmp(&a.games_played))
        });
        sorted
    }

    /// Civilizations in a specific tier, best win rate first.
    pub fn in_tier(&self, tier: Tier) -> Vec<&CivPerformance> {
        self.sorted_by_win_rate()
            .into_iter()
            .filter(|c| c.tier == tier)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_win_rate() {
        assert_eq!(Tier::from_win_rate(0.60), Tier::S);
        assert_eq!(Tier::from_win_rate(0.55), Tier::S);
        assert_eq!(Tier::from_win_rate(0.52), Tier::A);
        assert_eq!(Tier::from_win_rate(0.50), Tier::B);
        assert_eq!(Tier::from_win_rate(0.45), Tier::C);
        assert_eq!(Tier::from_win_rate(0.40), Tier::D);
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!("s".parse::<Tier>(), Ok(Tier::S));
        assert_eq!(" D ".parse::<Tier>(), Ok(Tier::D));
        assert!("X".parse::<Tier>().is_err());
    }

    #[test]
    fn test_win_record_display() {
        let record = WinRecord::new(3, 5);
        assert_eq!(record.to_string(), "3/5");
        assert_eq!(record.losses(), 2);
        assert!((record.win_rate() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_win_record_empty() {
        let record = WinRecord::default();
        assert_eq!(record.to_string(), "0/0");
        assert_eq!(record.win_rate(), 0.0);
    }

    #[test]
    fn test_civ_performance_creation() {
        let civ = CivPerformance::new("Franks".to_string(), WinRecord::new(6, 10), 40);

        assert_eq!(civ.games_played, 10);
        assert_eq!(civ.losses, 4);
        assert_eq!(civ.tier, Tier::S);
        assert!((civ.play_rate - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_civ_performance_zero_games() {
        let civ = CivPerformance::new("Goths".to_string(), WinRecord::default(), 0);
        assert_eq!(civ.win_rate, 0.0);
        assert_eq!(civ.play_rate, 0.0);
        assert_eq!(civ.tier, Tier::D);
    }

    #[test]
    fn test_duration_bucket_label() {
        let bucket = DurationBucket {
            from_seconds: 1200,
            to_seconds: Some(1500),
            games: 3,
        };
        assert_eq!(bucket.label(), "20-25 min");

        let open = DurationBucket {
            to_seconds: None,
            ..bucket
        };
        assert_eq!(open.label(), "20+ min");
    }

    #[test]
    fn test_player_stats_queries() {
        let mut civs = BTreeMap::new();
        civs.insert(
            "Franks".to_string(),
            CivPerformance::new("Franks".to_string(), WinRecord::new(2, 4), 8),
        );
        civs.insert(
            "Mongols".to_string(),
            CivPerformance::new("Mongols".to_string(), WinRecord::new(3, 4), 8),
        );
        let stats = PlayerStats {
            civs,
            durations: DurationStats::default(),
        };

        let sorted = stats.sorted_by_win_rate();
        assert_eq!(sorted[0].name, "Mongols");
        assert_eq!(sorted[1].name, "Franks");
        assert_eq!(stats.in_tier(Tier::S).len(), 1);
        assert_eq!(stats.in_tier(Tier::S)[0].name, "Mongols");
        assert_eq!(stats.in_tier(Tier::B)[0].name, "Franks");
        assert!(stats.in_tier(Tier::A).is_empty());
    }
}
