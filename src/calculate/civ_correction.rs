//! Civilization label correction for older match records.
//!
//! Older records carry civilization names that were since renamed or were
//! stored in singular form. Stats and filter menus group by label, so these
//! are rewritten to the current name before anything else runs.

use tracing::{debug, info};

use crate::models::Match;

/// Map a civilization label to its current canonical name.
pub fn normalize_civ_name(name: &str) -> String {
    let trimmed = name.trim();
    let lower = trimmed.to_lowercase();
    match lower.as_str() {
        "indians" | "indian" => "Hindustanis".to_string(),
        "hindustani" => "Hindustanis".to_string(),
        "byzantine" => "Byzantines".to_string(),
        "viking" => "Vikings".to_string(),
        "inca" | "incan" => "Incas".to_string(),
        "magyar" => "Magyars".to_string(),
        "saracen" => "Saracens".to_string(),
        "mayan" | "maya" => "Mayans".to_string(),
        "aztec" => "Aztecs".to_string(),
        "frank" => "Franks".to_string(),
        "mongol" => "Mongols".to_string(),
        "briton" => "Britons".to_string(),
        "goth" => "Goths".to_string(),
        "teuton" => "Teutons".to_string(),
        "celt" => "Celts".to_string(),
        "turk" => "Turks".to_string(),
        "slav" => "Slavs".to_string(),
        _ => trimmed.to_string(),
    }
}

/// Rewrite legacy civilization labels of every player in place.
///
/// Returns how many player records changed. Running it again on the same
/// matches changes nothing.
pub fn correct_civs_for_older_matches(matches: &mut [Match]) -> usize {
    let mut changed = 0;

    for m in matches.iter_mut() {
        for (profile_id, player) in m.players.iter_mut() {
            let corrected = normalize_civ_name(&player.civilization);
            if corrected != player.civilization {
                debug!(
                    "Match {}: profile {} civilization \"{}\" -> \"{}\"",
                    m.match_id, profile_id, player.civilization, corrected
                );
                player.civilization = corrected;
                changed += 1;
            }
        }
    }

    if changed > 0 {
        info!("Corrected {} civilization labels", changed);
    }
    changed
}
