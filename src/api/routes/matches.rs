use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{correct_civs_for_older_matches, find_match};
use crate::models::{Match, MatchId};
use crate::storage;

#[derive(Debug, Serialize)]
pub struct AddMatchResponse {
    pub match_id: MatchId,
    pub total_matches: usize,
}

/// Store a newly analyzed match and add it to the in-memory collection.
pub async fn add_match(
    State(state): State<AppState>,
    Json(mut m): Json<Match>,
) -> Result<(StatusCode, Json<AddMatchResponse>), ApiError> {
    if !m.has_player(&state.profile_id) {
        return Err(ApiError::BadRequest(format!(
            "match {} has no record for profile {}",
            m.match_id, state.profile_id
        )));
    }

    correct_civs_for_older_matches(std::slice::from_mut(&mut m));

    let mut dataset = state.dataset.write().await;
    if find_match(&dataset.matches, &m.match_id).is_some() {
        return Err(ApiError::BadRequest(format!(
            "match {} is already analyzed",
            m.match_id
        )));
    }

    // Written while still holding the write guard so appends stay in order.
    let storage_config = state.storage.clone();
    let record = m.clone();
    tokio::task::spawn_blocking(move || storage::append_match(&storage_config, &record))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!("Added analysis for match {}", m.match_id);
    let match_id = m.match_id.clone();
    dataset.matches.push(m);

    Ok((
        StatusCode::CREATED,
        Json(AddMatchResponse {
            match_id,
            total_matches: dataset.matches.len(),
        }),
    ))
}

/// The stored analysis of one match.
pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<Match>, ApiError> {
    let dataset = state.dataset.read().await;
    find_match(&dataset.matches, &MatchId::from(match_id.as_str()))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("match {}", match_id)))
}
