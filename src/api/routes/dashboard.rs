use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{
    derive_options, filter_matches, player_stats, project, project_ratings, DashboardView,
};
use crate::models::{
    Dimension, FilterOption, FilterSelection, Metric, PlayerStats, Selection, SeriesPoint,
};

// ── Filter Parameters ───────────────────────────────────────────

/// Filter query shared by the dashboard endpoints. A missing parameter, a
/// blank one or `*` leaves that dimension unconstrained.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub civilization: Option<String>,
    pub build_order: Option<String>,
    pub map: Option<String>,
    pub game_mode: Option<String>,
}

impl FilterParams {
    pub fn to_selection(&self) -> FilterSelection {
        FilterSelection {
            civilization: Selection::from_param(self.civilization.as_deref()),
            build_order: Selection::from_param(self.build_order.as_deref()),
            map: Selection::from_param(self.map.as_deref()),
            game_mode: Selection::from_param(self.game_mode.as_deref()),
        }
    }
}

// ── Dashboard Endpoint ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub view: DashboardView,
    /// Civilization and game length stats over all of the player's matches
    pub stats: PlayerStats,
    pub ratings: Vec<SeriesPoint>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let selection = params.to_selection();
    let dataset = state.dataset.read().await;

    let view = DashboardView::build(&dataset.matches, &selection, &state.profile_id);
    let stats = player_stats(
        &dataset.matches,
        &state.profile_id,
        state.duration_bucket_seconds,
    );
    let ratings = project_ratings(&dataset.ratings);

    tracing::debug!("Dashboard for {:?}: {} games", selection, view.games);

    Ok(Json(DashboardResponse {
        view,
        stats,
        ratings,
    }))
}

// ── Options Endpoint ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub dimension: Dimension,
    pub options: Vec<FilterOption>,
}

pub async fn options(
    State(state): State<AppState>,
    Path(dimension): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Json<OptionsResponse>, ApiError> {
    let dimension: Dimension = dimension.parse().map_err(ApiError::BadRequest)?;
    let dataset = state.dataset.read().await;

    let filtered = filter_matches(&dataset.matches, &params.to_selection(), &state.profile_id);
    Ok(Json(OptionsResponse {
        dimension,
        options: derive_options(dimension, &filtered, &state.profile_id),
    }))
}

// ── Series Endpoint ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub metric: Metric,
    pub title: &'static str,
    pub label: &'static str,
    pub points: Vec<SeriesPoint>,
}

pub async fn series(
    State(state): State<AppState>,
    Path(metric): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Json<SeriesResponse>, ApiError> {
    let metric: Metric = metric.parse().map_err(ApiError::BadRequest)?;
    let dataset = state.dataset.read().await;

    let filtered = filter_matches(&dataset.matches, &params.to_selection(), &state.profile_id);
    Ok(Json(SeriesResponse {
        metric,
        title: metric.title(),
        label: metric.label(),
        points: project(metric, &filtered, &state.profile_id),
    }))
}

// ── Ratings Endpoint ────────────────────────────────────────────

pub async fn ratings(State(state): State<AppState>) -> Json<Vec<SeriesPoint>> {
    let dataset = state.dataset.read().await;
    Json(project_ratings(&dataset.ratings))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::{AppState, Dataset};
    use crate::models::{Age, Match, PlayerGameStats, ProfileId, RatingPoint};
    use crate::storage::StorageConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn make_match(id: &str, at: i64, map: &str, civ: &str, won: bool) -> Match {
        Match::new(id, at, map).with_duration(1500).with_player(
            "42",
            PlayerGameStats::new(civ)
                .with_build_order("Scouts")
                .with_apm(50.0)
                .with_age_up(Age::Feudal, 600.0)
                .with_won(won),
        )
    }

    fn setup_test_state() -> AppState {
        let dataset = Dataset {
            matches: vec![
                make_match("b", 200_000, "Arena", "Mongols", false),
                make_match("a", 100_000, "Arabia", "Franks", true),
                make_match("c", 300_000, "Arabia", "Franks", true),
            ],
            ratings: vec![RatingPoint::new(100_000, 1200.0)],
        };
        AppState::new(
            StorageConfig::default(),
            dataset,
            ProfileId::from("42"),
            300,
        )
    }

    #[tokio::test]
    async fn test_dashboard_all_any() {
        let app = build_router(setup_test_state());
        let (status, json) = get_json(app, "/api/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["games"], 3);
        assert_eq!(json["record"]["wins"], 2);
        assert_eq!(json["summary"], "Found 3 games (2/3 won) using the filter criteria.");
        assert_eq!(json["series"]["effective_apm"].as_array().unwrap().len(), 3);
        assert_eq!(json["series"]["castle_uptime"][0]["y"], Value::Null);
        assert_eq!(json["stats"]["civs"]["Franks"]["games_played"], 2);
        assert_eq!(json["stats"]["durations"]["count"], 3);
        assert_eq!(json["ratings"][0]["y"], 1200.0);
    }

    #[tokio::test]
    async fn test_dashboard_with_filter() {
        let app = build_router(setup_test_state());
        let (status, json) = get_json(app, "/api/dashboard?civilization=Franks&map=*").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["games"], 2);
        assert_eq!(json["selection"]["civilization"], "Franks");
        assert_eq!(json["selection"]["map"], Value::Null);
        // Stats cover every match regardless of filter
        assert_eq!(json["stats"]["civs"]["Mongols"]["games_played"], 1);
    }

    #[tokio::test]
    async fn test_options_endpoint() {
        let app = build_router(setup_test_state());
        let (status, json) = get_json(app, "/api/options/map").await;

        assert_eq!(status, StatusCode::OK);
        let labels: Vec<&str> = json["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["Arabia", "Arena", "Any"]);
    }

    #[tokio::test]
    async fn test_map_named_any_is_selectable() {
        let state = setup_test_state();
        state
            .dataset
            .write()
            .await
            .matches
            .push(make_match("d", 400_000, "Any", "Mongols", true));
        let app = build_router(state);

        let (_, json) = get_json(app.clone(), "/api/options/map").await;
        let labels: Vec<&str> = json["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["Arabia", "Arena", "Any", "Any"]);
        assert_eq!(json["options"][2]["value"], "Any");
        assert_eq!(json["options"][3]["value"], Value::Null);

        let (status, json) = get_json(app, "/api/dashboard?map=Any").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["games"], 1);
        assert_eq!(json["selection"]["map"], "Any");
    }

    #[tokio::test]
    async fn test_options_unknown_dimension() {
        let app = build_router(setup_test_state());
        let (status, json) = get_json(app, "/api/options/elo").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_series_endpoint_sorted() {
        let app = build_router(setup_test_state());
        let (status, json) = get_json(app, "/api/series/feudal_uptime").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["label"], "Feudal Age Uptime");
        let xs: Vec<&str> = json["points"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["x"].as_str().unwrap())
            .collect();
        assert_eq!(xs, vec!["1/2/1970", "1/3/1970", "1/4/1970"]);
    }

    #[tokio::test]
    async fn test_ratings_endpoint() {
        let app = build_router(setup_test_state());
        let (status, json) = get_json(app, "/api/ratings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(setup_test_state());
        let (status, json) = get_json(app, "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }
}
