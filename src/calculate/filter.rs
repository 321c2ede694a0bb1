//! Narrow the match collection to the active filter selection.

use tracing::debug;

use crate::models::{FilterSelection, Match, ProfileId};

/// Matches the tracked player took part in that satisfy every dimension of
/// `selection`, sorted by `played_at_time` ascending.
///
/// Build order and civilization are compared against the tracked player's
/// record, map against the match. An absent build order only passes `Any`.
/// The game-mode dimension always passes: match records carry no game mode.
pub fn filter_matches(
    matches: &[Match],
    selection: &FilterSelection,
    profile_id: &ProfileId,
) -> Vec<Match> {
    let mut filtered: Vec<Match> = matches
        .iter()
        .filter(|m| {
            let Some(player) = m.player(profile_id) else {
                return false;
            };
            selection
                .build_order
                .accepts(player.build_order.as_deref())
                && selection
                    .civilization
                    .accepts(Some(player.civilization.as_str()))
                && selection.map.accepts(Some(m.map_name.as_str()))
        })
        .cloned()
        .collect();

    filtered.sort_by_key(|m| m.played_at_time);

    debug!(
        "Filtered {} of {} matches for profile {}",
        filtered.len(),
        matches.len(),
        profile_id
    );
    filtered
}
