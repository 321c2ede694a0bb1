//! Per-match chart series.

use crate::models::{epoch_to_date, Match, Metric, ProfileId, RatingPoint, SeriesPoint};

/// One point per match, in input order: `x` is the calendar day the match was
/// played, `y` the tracked player's value for `metric`.
///
/// `y` stays `None` when the player has no value (an age never reached, no
/// APM recorded, or the player is not in the match). Gaps are kept so the
/// series lines up with the match list; how to draw them is up to the chart.
pub fn project(metric: Metric, matches: &[Match], profile_id: &ProfileId) -> Vec<SeriesPoint> {
    matches
        .iter()
        .map(|m| SeriesPoint::new(m.played_on(), metric_value(metric, m, profile_id)))
        .collect()
}

fn metric_value(metric: Metric, m: &Match, profile_id: &ProfileId) -> Option<f64> {
    let player = m.player(profile_id)?;
    match metric.age() {
        Some(age) => player.age_up(age),
        None => player.mean_apm,
    }
}

/// Rating history as a chronological series.
pub fn project_ratings(ratings: &[RatingPoint]) -> Vec<SeriesPoint> {
    let mut sorted: Vec<&RatingPoint> = ratings.iter().collect();
    sorted.sort_by_key(|r| r.timestamp);

    sorted
        .into_iter()
        .map(|r| SeriesPoint::new(epoch_to_date(r.timestamp), Some(r.rating)))
        .collect()
}

/// Y-axis tick for uptime charts: whole minutes, e.g. 615.0 -> "10:00".
pub fn uptime_tick_label(seconds: f64) -> String {
    format!("{}:00", (seconds / 60.0).floor() as i64)
}

/// Y-axis tick for the rating chart with thousands separators, e.g. 1234 -> "1,234".
pub fn rating_tick_label(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::filter_matches;
    use crate::models::{Age, FilterSelection, PlayerGameStats};
    use chrono::NaiveDate;

    const DAY: i64 = 86_400;

    fn me() -> ProfileId {
        ProfileId::from("42")
    }

    fn game(id: &str, at: i64, stats: PlayerGameStats) -> Match {
        Match::new(id, at, "Arabia").with_player("42", stats)
    }

    fn full_stats() -> PlayerGameStats {
        PlayerGameStats::new("Franks")
            .with_apm(48.0)
            .with_age_up(Age::Feudal, 590.0)
            .with_age_up(Age::Castle, 1080.0)
            .with_age_up(Age::Imperial, 2100.0)
    }

    #[test]
    fn test_project_each_metric() {
        let matches = vec![game("a", 0, full_stats())];

        assert_eq!(project(Metric::EffectiveApm, &matches, &me())[0].y, Some(48.0));
        assert_eq!(project(Metric::FeudalUptime, &matches, &me())[0].y, Some(590.0));
        assert_eq!(project(Metric::CastleUptime, &matches, &me())[0].y, Some(1080.0));
        assert_eq!(project(Metric::ImperialUptime, &matches, &me())[0].y, Some(2100.0));
    }

    #[test]
    fn test_missing_age_keeps_point() {
        let no_castle = PlayerGameStats::new("Franks").with_age_up(Age::Feudal, 600.0);
        let matches = vec![game("a", 0, full_stats()), game("b", DAY, no_castle)];

        let series = project(Metric::CastleUptime, &matches, &me());
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].x, NaiveDate::from_ymd_opt(1970, 1, 2).unwrap());
        assert_eq!(series[1].y, None);
    }

    #[test]
    fn test_x_drops_time_of_day() {
        let matches = vec![game("a", DAY + 3_600, full_stats()), game("b", 2 * DAY - 1, full_stats())];
        let series = project(Metric::EffectiveApm, &matches, &me());
        assert_eq!(series[0].x, series[1].x);
    }

    #[test]
    fn test_length_and_order_follow_filtered_input() {
        let matches = vec![
            game("c", 3 * DAY, full_stats()),
            game("a", DAY, full_stats()),
            game("b", 2 * DAY, full_stats()),
        ];
        let filtered = filter_matches(&matches, &FilterSelection::any(), &me());
        let series = project(Metric::FeudalUptime, &filtered, &me());

        assert_eq!(series.len(), filtered.len());
        assert!(series.windows(2).all(|w| w[0].x <= w[1].x));
    }

    #[test]
    fn test_project_without_tracked_player() {
        let stranger = Match::new("x", 0, "Arabia").with_player("7", full_stats());
        let series = project(Metric::EffectiveApm, &[stranger], &me());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].y, None);
    }

    #[test]
    fn test_project_ratings_sorted() {
        let ratings = vec![
            RatingPoint::new(2 * DAY, 1210.0),
            RatingPoint::new(0, 1190.0),
            RatingPoint::new(DAY, 1201.0),
        ];
        let series = project_ratings(&ratings);
        let ys: Vec<Option<f64>> = series.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![Some(1190.0), Some(1201.0), Some(1210.0)]);
    }

    #[test]
    fn test_uptime_tick_label() {
        assert_eq!(uptime_tick_label(615.0), "10:00");
        assert_eq!(uptime_tick_label(59.0), "0:00");
        assert_eq!(uptime_tick_label(1200.0), "20:00");
    }

    #[test]
    fn test_rating_tick_label() {
        assert_eq!(rating_tick_label(950.0), "950");
        assert_eq!(rating_tick_label(1234.0), "1,234");
        assert_eq!(rating_tick_label(1234567.0), "1,234,567");
        assert_eq!(rating_tick_label(-1500.0), "-1,500");
        assert_eq!(rating_tick_label(0.0), "0");
    }
}
