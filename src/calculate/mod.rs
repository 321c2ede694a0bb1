//! Statistics calculation engine.
//!
//! Turns the in-memory match collection into what the dashboard displays:
//! - Filtering by civilization, build order, map and game mode
//! - Selectable filter options per dimension
//! - Per-match time series (effective APM, age uptimes, rating)
//! - Win counts, civilization performance and game length distribution
//!
//! Every function here is pure and synchronous. Callers must not mutate the
//! collection while a calculation borrows it.

pub mod civ_correction;
pub mod dashboard;
pub mod filter;
pub mod options;
pub mod series;
pub mod summary;

pub use civ_correction::{correct_civs_for_older_matches, normalize_civ_name};
pub use dashboard::{find_match, DashboardView, SeriesSet};
pub use filter::filter_matches;
pub use options::{derive_all_options, derive_options, FilterOptions};
pub use series::{project, project_ratings, rating_tick_label, uptime_tick_label};
pub use summary::{civ_performance, duration_stats, player_stats, win_record, wins_count};

/// Arithmetic mean, `None` for an empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Median of the values, `None` for an empty input.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0, 9.0]), Some(5.0));
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[9.0, 1.0, 5.0]), Some(5.0));
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }
}
