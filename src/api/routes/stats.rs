use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{PerMode, SeasonSelector, SeasonType};
use crate::pipeline::{
    self, AdvancedQuery, AdvancedStatsResponse, CareerQuery, CareerStatsResponse, Pagination,
};

#[derive(Debug, Deserialize)]
pub struct CareerStatsParams {
    pub season_type: Option<SeasonType>,
    /// "2023-24", "All", or empty for career totals
    pub season: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// GET /players/stats/career/:player_id
pub async fn career_stats(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    params: Result<Query<CareerStatsParams>, QueryRejection>,
) -> Result<Json<CareerStatsResponse>, ApiError> {
    let Query(params) = params?;
    let query = CareerQuery {
        player_id,
        season_type: params.season_type,
        season: SeasonSelector::parse(params.season.as_deref()),
        pagination: Pagination::new(params.page, params.page_size),
    };
    let response = pipeline::career_stats(state.provider.as_ref(), &query).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct AdvancedStatsParams {
    #[serde(default)]
    pub per_mode: PerMode,
    /// "2022-23" or "All"
    pub season: Option<String>,
    #[serde(default)]
    pub season_type: SeasonType,
}

/// GET /players/stats/advanced/:player_id
pub async fn advanced_stats(
    State(state): State<AppState>,
    player_id: Result<Path<u32>, PathRejection>,
    params: Result<Query<AdvancedStatsParams>, QueryRejection>,
) -> Result<Json<AdvancedStatsResponse>, ApiError> {
    let Path(player_id) = player_id?;
    let Query(params) = params?;
    let query = AdvancedQuery {
        player_id,
        per_mode: params.per_mode,
        season: SeasonSelector::parse(params.season.as_deref()),
        season_type: params.season_type,
    };
    let response = pipeline::advanced_stats(state.provider.as_ref(), &query).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::test_support::get_json;
    use crate::models::{CareerTotals, Cell, Table};
    use crate::upstream::mock::MockProvider;

    fn totals_table(name: &str, rows: Vec<Vec<Cell>>) -> Table {
        Table::new(
            name,
            ["PLAYER_ID", "SEASON_ID", "GP", "PTS", "AST"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .with_rows(rows)
    }

    fn season_row(season: &str, gp: i64, pts: i64, ast: i64) -> Vec<Cell> {
        vec![
            Cell::Int(2544),
            Cell::from(season),
            Cell::Int(gp),
            Cell::Int(pts),
            Cell::Int(ast),
        ]
    }

    fn provider() -> Arc<MockProvider> {
        let mut provider = MockProvider::new();
        provider.career.insert(
            "2544".to_string(),
            CareerTotals {
                season_totals_post_season: totals_table(
                    "SeasonTotalsPostSeason",
                    vec![season_row("2020", 10, 200, 50), season_row("2021", 10, 200, 70)],
                ),
                season_totals_regular_season: totals_table(
                    "SeasonTotalsRegularSeason",
                    vec![season_row("2022-23", 55, 1590, 375)],
                ),
                career_totals_regular_season: Table::new(
                    "CareerTotalsRegularSeason",
                    vec!["PLAYER_ID".to_string(), "GP".to_string(), "PTS".to_string()],
                )
                .with_rows(vec![vec![Cell::Int(2544), Cell::Int(1492), Cell::Int(41000)]]),
                ..Default::default()
            },
        );
        provider.seasons_dashboard = Table::new(
            "ByYearPlayerDashboard",
            ["GROUP_SET", "GROUP_VALUE", "GP", "PTS", "PTS_RANK"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .with_rows(vec![vec![
            Cell::from("By Year"),
            Cell::from("2022-23"),
            Cell::Int(55),
            Cell::Int(1590),
            Cell::Int(3),
        ]]);
        Arc::new(provider)
    }

    #[tokio::test]
    async fn test_career_all_playoffs() {
        let (status, json) = get_json(
            provider(),
            "/players/stats/career/2544?season_type=Playoffs&season=All",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["season_type"], "Playoffs");
        let seasons = json["seasons"].as_array().unwrap();
        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0]["pts_per_game"], json!(20.0));
        assert_eq!(seasons[1]["ast_per_game"], json!(7.0));
    }

    #[tokio::test]
    async fn test_career_totals() {
        let (status, json) = get_json(provider(), "/players/stats/career/2544").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "season_type": "Regular Season",
                "totals": [{"gp": 1492, "pts": 41000, "pts_per_game": 27.5}]
            })
        );
    }

    #[tokio::test]
    async fn test_career_unknown_season() {
        let (status, json) =
            get_json(provider(), "/players/stats/career/2544?season=1984-85").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json["detail"],
            "No season stats found for this player in season 1984-85"
        );
    }

    #[tokio::test]
    async fn test_career_invalid_season_type() {
        let (status, _) =
            get_json(provider(), "/players/stats/career/2544?season_type=Playoff").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_career_page_past_end() {
        let (status, json) = get_json(
            provider(),
            "/players/stats/career/2544?season=All&page=3&page_size=1",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["seasons"], json!([]));
    }

    #[tokio::test]
    async fn test_advanced_all_seasons() {
        let provider = provider();
        let (status, json) = get_json(
            provider.clone(),
            "/players/stats/advanced/2544?season=All&per_mode=PerGame",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "player_id": 2544,
                "per_mode": "PerGame",
                "season": "All",
                "season_type": "Regular Season",
                "stats": [{"group_value": "2022-23", "gp": 55, "pts": 1590}]
            })
        );
        assert_eq!(provider.calls(), vec!["player_seasons_dashboard"]);
    }

    #[tokio::test]
    async fn test_advanced_empty_is_ok() {
        let (status, json) = get_json(
            provider(),
            "/players/stats/advanced/2544?season=2010-11&season_type=Pre%20Season",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["season"], "2010-11");
        assert_eq!(json["season_type"], "Pre Season");
        assert_eq!(json["per_mode"], "Totals");
        assert_eq!(json["stats"], json!([]));
    }

    #[tokio::test]
    async fn test_advanced_non_numeric_id() {
        let (status, json) = get_json(provider(), "/players/stats/advanced/lebron").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["detail"].is_string());
    }

    #[tokio::test]
    async fn test_advanced_invalid_per_mode() {
        let (status, _) =
            get_json(provider(), "/players/stats/advanced/2544?per_mode=PerYear").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
