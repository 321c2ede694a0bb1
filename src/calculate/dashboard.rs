//! The filtered view the dashboard renders.

use serde::{Deserialize, Serialize};

use crate::models::{FilterSelection, Match, MatchId, Metric, ProfileId, SeriesPoint, WinRecord};

use super::{derive_all_options, filter_matches, project, win_record, FilterOptions};

/// The four per-match series of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSet {
    pub effective_apm: Vec<SeriesPoint>,
    pub feudal_uptime: Vec<SeriesPoint>,
    pub castle_uptime: Vec<SeriesPoint>,
    pub imperial_uptime: Vec<SeriesPoint>,
}

impl SeriesSet {
    pub fn project_all(matches: &[Match], profile_id: &ProfileId) -> Self {
        Self {
            effective_apm: project(Metric::EffectiveApm, matches, profile_id),
            feudal_uptime: project(Metric::FeudalUptime, matches, profile_id),
            castle_uptime: project(Metric::CastleUptime, matches, profile_id),
            imperial_uptime: project(Metric::ImperialUptime, matches, profile_id),
        }
    }

    pub fn get(&self, metric: Metric) -> &[SeriesPoint] {
        match metric {
            Metric::EffectiveApm => &self.effective_apm,
            Metric::FeudalUptime => &self.feudal_uptime,
            Metric::CastleUptime => &self.castle_uptime,
            Metric::ImperialUptime => &self.imperial_uptime,
        }
    }
}

/// Everything derived from one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub selection: FilterSelection,
    /// Games matching the selection
    pub games: usize,
    pub record: WinRecord,
    /// "Found N games (W/N won) using the filter criteria." line
    pub summary: String,
    pub options: FilterOptions,
    pub series: SeriesSet,
}

impl DashboardView {
    /// Filter, then derive options, series and win record from the result.
    /// Always recomputes from the full collection.
    pub fn build(matches: &[Match], selection: &FilterSelection, profile_id: &ProfileId) -> Self {
        let filtered = filter_matches(matches, selection, profile_id);
        let record = win_record(&filtered, profile_id);

        Self {
            selection: selection.clone(),
            games: filtered.len(),
            summary: format!(
                "Found {} games ({} won) using the filter criteria.",
                filtered.len(),
                record
            ),
            record,
            options: derive_all_options(&filtered, profile_id),
            series: SeriesSet::project_all(&filtered, profile_id),
        }
    }
}

/// Look up an analyzed match by id.
pub fn find_match<'a>(matches: &'a [Match], match_id: &MatchId) -> Option<&'a Match> {
    matches.iter().find(|m| &m.match_id == match_id)
}
