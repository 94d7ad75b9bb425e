use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{ActivityFilter, Player};
use crate::pipeline::{self, AwardsResponse, Pagination, PlayerInfo, RosterQuery};

#[derive(Debug, Deserialize)]
pub struct ListPlayersParams {
    pub is_active: Option<bool>,
    pub player_name: Option<String>,
    pub limit: Option<usize>,
    pub page: Option<usize>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<usize>,
}

impl From<ListPlayersParams> for RosterQuery {
    fn from(params: ListPlayersParams) -> Self {
        RosterQuery {
            activity: ActivityFilter::from(params.is_active),
            name: params.player_name,
            limit: params.limit,
            pagination: Pagination::new(params.page, params.page_size),
        }
    }
}

/// GET /players - Roster listing
pub async fn list_players(
    State(state): State<AppState>,
    params: Result<Query<ListPlayersParams>, QueryRejection>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let Query(params) = params?;
    let query = RosterQuery::from(params);
    let players = pipeline::list_players(state.provider.as_ref(), &query).await?;
    Ok(Json(players))
}

#[derive(Debug, Deserialize)]
pub struct PlayerInfoParams {
    pub player_id: Option<u32>,
    pub player_name: Option<String>,
}

/// GET /players/player/info - Profile by id or name
pub async fn player_info(
    State(state): State<AppState>,
    params: Result<Query<PlayerInfoParams>, QueryRejection>,
) -> Result<Json<PlayerInfo>, ApiError> {
    let Query(params) = params?;
    let info = pipeline::resolve(
        state.provider.as_ref(),
        params.player_id,
        params.player_name.as_deref(),
    )
    .await?;
    Ok(Json(info))
}

#[derive(Debug, Deserialize)]
pub struct PlayerAwardsParams {
    pub player_id: Option<u32>,
    #[serde(default)]
    pub detailed: bool,
}

/// GET /players/player/awards - Categorized award summary
pub async fn player_awards(
    State(state): State<AppState>,
    params: Result<Query<PlayerAwardsParams>, QueryRejection>,
) -> Result<Json<AwardsResponse>, ApiError> {
    let Query(params) = params?;
    let awards =
        pipeline::player_awards(state.provider.as_ref(), params.player_id, params.detailed)
            .await?;
    Ok(Json(awards))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::api::test_support::get_json;
    use crate::models::{Cell, Player, Table};
    use crate::upstream::mock::MockProvider;

    fn player(id: u32, full_name: &str, is_active: bool) -> Player {
        let (first, last) = full_name.split_once(' ').unwrap_or((full_name, ""));
        Player {
            id,
            full_name: full_name.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            is_active,
        }
    }

    fn provider() -> Arc<MockProvider> {
        let mut provider = MockProvider::new().with_players(vec![
            player(2544, "LeBron James", true),
            player(1628983, "Shai Gilgeous-Alexander", true),
            player(893, "Michael Jordan", false),
            player(1629029, "Luka Doncic", true),
        ]);
        provider.info.insert(
            2544,
            Table::new(
                "CommonPlayerInfo",
                vec!["PERSON_ID".to_string(), "HEIGHT".to_string()],
            )
            .with_rows(vec![vec![Cell::Int(2544), Cell::from("6-9")]]),
        );
        provider.awards.insert(
            2544,
            vec![
                serde_json::from_value(json!({"description": "All-NBA", "season": "2019-20"}))
                    .unwrap(),
                serde_json::from_value(json!({"description": "All-NBA", "season": "2020-21"}))
                    .unwrap(),
                serde_json::from_value(json!({"description": "NBA Player of the Week"}))
                    .unwrap(),
            ],
        );
        Arc::new(provider)
    }

    #[tokio::test]
    async fn test_list_players_active() {
        let provider = provider();
        let (status, json) = get_json(provider.clone(), "/players?is_active=true").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(provider.calls(), vec!["active_players"]);
    }

    #[tokio::test]
    async fn test_list_players_filters_and_pages() {
        let provider = provider();
        let (status, json) =
            get_json(provider.clone(), "/players?player_name=a&page=2&pageSize=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!([
                {
                    "id": 893,
                    "full_name": "Michael Jordan",
                    "first_name": "Michael",
                    "last_name": "Jordan",
                    "is_active": false
                },
                {
                    "id": 1629029,
                    "full_name": "Luka Doncic",
                    "first_name": "Luka",
                    "last_name": "Doncic",
                    "is_active": true
                }
            ])
        );
    }

    #[tokio::test]
    async fn test_list_players_limit() {
        let (status, json) = get_json(provider(), "/players?limit=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_players_bad_param() {
        let (status, json) = get_json(provider(), "/players?limit=many").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["detail"].is_string());
    }

    #[tokio::test]
    async fn test_player_info_by_id() {
        let (status, json) = get_json(provider(), "/players/player/info?player_id=2544").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({"player_id": 2544, "player_info": {"person_id": 2544, "height": "6-9"}})
        );
    }

    #[tokio::test]
    async fn test_player_info_requires_selector() {
        let (status, json) = get_json(provider(), "/players/player/info").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["detail"],
            "Either player_id or player_name must be provided"
        );
    }

    #[tokio::test]
    async fn test_player_info_unknown_name() {
        let (status, json) =
            get_json(provider(), "/players/player/info?player_name=zzz").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["detail"], "No players found with that name");
    }

    #[tokio::test]
    async fn test_player_awards_summary() {
        let (status, json) =
            get_json(provider(), "/players/player/awards?player_id=2544").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!("2 All-NBA | 1 NBA Player of the Week"));
    }

    #[tokio::test]
    async fn test_player_awards_detailed() {
        let (status, json) = get_json(
            provider(),
            "/players/player/awards?player_id=2544&detailed=true",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["summary"], "2 All-NBA | 1 NBA Player of the Week");
        assert_eq!(json["details"][0]["season"], "2019-20");
    }

    #[tokio::test]
    async fn test_player_awards_missing_id() {
        let (status, json) = get_json(provider(), "/players/player/awards").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "Missing required parameter: player_id");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let mut provider = MockProvider::new();
        provider.fail_with = Some(500);
        let (status, json) = get_json(Arc::new(provider), "/players").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(json["detail"].as_str().unwrap().contains("500"));
    }
}
