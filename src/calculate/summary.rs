//! Scalar summaries over a match collection.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{
    Age, CivPerformance, DurationBucket, DurationStats, Match, PlayerGameStats, PlayerStats,
    ProfileId, WinRecord,
};

use super::{mean, median};

/// Default width of a game length bucket: five minutes.
pub const DEFAULT_BUCKET_SECONDS: u64 = 300;

/// Upper bound on the number of length buckets. Games past the last bucket
/// are counted in it, and it is left open-ended.
pub const MAX_DURATION_BUCKETS: u64 = 36;

/// Number of matches the tracked player won.
pub fn wins_count(matches: &[Match], profile_id: &ProfileId) -> usize {
    matches
        .iter()
        .filter_map(|m| m.player(profile_id))
        .filter(|p| p.won)
        .count()
}

/// Wins out of all matches in the collection, for the "X/Y won" line.
pub fn win_record(matches: &[Match], profile_id: &ProfileId) -> WinRecord {
    WinRecord::new(wins_count(matches, profile_id), matches.len())
}

/// Outcome statistics of the tracked player, grouped by civilization.
/// Matches without the tracked player are ignored.
pub fn civ_performance(
    matches: &[Match],
    profile_id: &ProfileId,
) -> BTreeMap<String, CivPerformance> {
    let mut by_civ: BTreeMap<&str, Vec<&PlayerGameStats>> = BTreeMap::new();
    for player in matches.iter().filter_map(|m| m.player(profile_id)) {
        by_civ
            .entry(player.civilization.as_str())
            .or_default()
            .push(player);
    }

    let total_games: usize = by_civ.values().map(Vec::len).sum();

    by_civ
        .into_iter()
        .map(|(civ, games)| {
            let wins = games.iter().filter(|p| p.won).count();
            let mut stat =
                CivPerformance::new(civ.to_string(), WinRecord::new(wins, games.len()), total_games);

            let apms: Vec<f64> = games.iter().filter_map(|p| p.mean_apm).collect();
            let feudal: Vec<f64> = games.iter().filter_map(|p| p.age_up(Age::Feudal)).collect();
            let castle: Vec<f64> = games.iter().filter_map(|p| p.age_up(Age::Castle)).collect();
            stat.average_apm = mean(&apms);
            stat.average_feudal_uptime = mean(&feudal);
            stat.average_castle_uptime = mean(&castle);

            (civ.to_string(), stat)
        })
        .collect()
}

/// Distribution of game lengths in fixed-width buckets.
///
/// Matches without a recorded duration are skipped. Buckets are contiguous
/// from the one holding the shortest game to the one holding the longest,
/// so empty buckets in between are kept. At most [`MAX_DURATION_BUCKETS`]
/// are produced; longer outliers land in the final, open-ended bucket.
/// A zero width falls back to [`DEFAULT_BUCKET_SECONDS`].
pub fn duration_stats(matches: &[Match], bucket_seconds: u64) -> DurationStats {
    let width = if bucket_seconds == 0 {
        DEFAULT_BUCKET_SECONDS
    } else {
        bucket_seconds
    };

    let durations: Vec<u64> = matches.iter().filter_map(|m| m.duration_seconds).collect();
    let (Some(&min), Some(&max)) = (durations.iter().min(), durations.iter().max()) else {
        return DurationStats::default();
    };

    let first = min / width;
    let last = (max / width).min(first.saturating_add(MAX_DURATION_BUCKETS - 1));
    let capped = max / width > last;

    // i * width <= some duration, so it cannot overflow
    let mut buckets: Vec<DurationBucket> = (first..=last)
        .map(|i| DurationBucket {
            from_seconds: i * width,
            to_seconds: if capped && i == last {
                None
            } else {
                i.checked_add(1).and_then(|n| n.checked_mul(width))
            },
            games: 0,
        })
        .collect();
    for d in &durations {
        let i = (d / width).min(last);
        buckets[(i - first) as usize].games += 1;
    }

    let as_f64: Vec<f64> = durations.iter().map(|&d| d as f64).collect();

    DurationStats {
        count: durations.len(),
        min_seconds: Some(min),
        max_seconds: Some(max),
        mean_seconds: mean(&as_f64),
        median_seconds: median(&as_f64),
        buckets,
    }
}

/// Civilization and game length stats over every match of the tracked player.
pub fn player_stats(matches: &[Match], profile_id: &ProfileId, bucket_seconds: u64) -> PlayerStats {
    let own: Vec<Match> = matches
        .iter()
        .filter(|m| m.has_player(profile_id))
        .cloned()
        .collect();

    debug!(
        "Computing player stats over {} of {} matches",
        own.len(),
        matches.len()
    );

    PlayerStats {
        civs: civ_performance(&own, profile_id),
        durations: duration_stats(&own, bucket_seconds),
    }
}
