//! Selectable filter values derived from a match collection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Dimension, FilterOption, Match, ProfileId};

/// Menu entries for every filter dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub build_orders: Vec<FilterOption>,
    pub civilizations: Vec<FilterOption>,
    pub maps: Vec<FilterOption>,
    pub game_modes: Vec<FilterOption>,
}

/// Distinct values of `dimension` in `matches`, followed by a single `Any`.
///
/// Values keep the order in which they first appear, so a time-sorted input
/// lists the earliest played value first. Build order and civilization are
/// read from the tracked player's record; matches without that player and
/// unclassified build orders contribute nothing. Game mode is not recorded
/// on matches, so its menu is only `Any`.
pub fn derive_options(
    dimension: Dimension,
    matches: &[Match],
    profile_id: &ProfileId,
) -> Vec<FilterOption> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut options: Vec<FilterOption> = matches
        .iter()
        .filter_map(|m| dimension_value(dimension, m, profile_id))
        .filter(|value| seen.insert(*value))
        .map(FilterOption::value)
        .collect();

    options.push(FilterOption::any());
    options
}

/// Derive the menus of all four dimensions from the same collection.
pub fn derive_all_options(matches: &[Match], profile_id: &ProfileId) -> FilterOptions {
    FilterOptions {
        build_orders: derive_options(Dimension::BuildOrder, matches, profile_id),
        civilizations: derive_options(Dimension::Civilization, matches, profile_id),
        maps: derive_options(Dimension::Map, matches, profile_id),
        game_modes: derive_options(Dimension::GameMode, matches, profile_id),
    }
}

fn dimension_value<'a>(
    dimension: Dimension,
    m: &'a Match,
    profile_id: &ProfileId,
) -> Option<&'a str> {
    match dimension {
        Dimension::BuildOrder => m.player(profile_id)?.build_order.as_deref(),
        Dimension::Civilization => Some(m.player(profile_id)?.civilization.as_str()),
        Dimension::Map => Some(m.map_name.as_str()),
        Dimension::GameMode => None,
    }
}
