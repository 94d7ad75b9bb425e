//! Career totals and per-season splits.

use serde::Serialize;
use tracing::debug;

use super::{Pagination, PipelineError};
use crate::models::{CareerDataset, SeasonSelector, SeasonType, StatRecord};
use crate::normalize::{add_per_game_columns, has_no_games, lowercase_columns, to_records};
use crate::upstream::StatsProvider;

/// Column identifying the player, stripped from the response rows.
const PLAYER_ID_COLUMN: &str = "player_id";

const SEASON_ID_COLUMN: &str = "season_id";

/// A career stats request.
#[derive(Debug, Clone)]
pub struct CareerQuery {
    pub player_id: String,
    pub season_type: Option<SeasonType>,
    pub season: SeasonSelector,
    pub pagination: Option<Pagination>,
}

impl CareerQuery {
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            season_type: None,
            season: SeasonSelector::Career,
            pagination: None,
        }
    }
}

/// Rows of the response, keyed `totals` or `seasons`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CareerRows {
    Totals(Vec<StatRecord>),
    Seasons(Vec<StatRecord>),
}

impl CareerRows {
    fn for_season(season: &SeasonSelector, rows: Vec<StatRecord>) -> Self {
        if season.is_all() {
            CareerRows::Seasons(rows)
        } else {
            CareerRows::Totals(rows)
        }
    }

    pub fn rows(&self) -> &[StatRecord] {
        match self {
            CareerRows::Totals(rows) | CareerRows::Seasons(rows) => rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerStatsResponse {
    pub season_type: SeasonType,
    #[serde(flatten)]
    pub rows: CareerRows,
}

/// Pick the career dataset for a season selector and season type.
///
/// `All` reads the season-by-season tables; anything else reads the
/// aggregate career tables. Only playoffs read the post-season tables.
pub fn select_dataset(season: &SeasonSelector, season_type: Option<SeasonType>) -> CareerDataset {
    let playoffs = season_type.is_some_and(|t| t.is_playoffs());
    match (season.is_all(), playoffs) {
        (false, true) => CareerDataset::CareerPostSeason,
        (false, false) => CareerDataset::CareerRegularSeason,
        (true, true) => CareerDataset::SeasonPostSeason,
        (true, false) => CareerDataset::SeasonRegularSeason,
    }
}

/// Career statistics with derived per-game columns.
pub async fn career_stats(
    provider: &dyn StatsProvider,
    query: &CareerQuery,
) -> Result<CareerStatsResponse, PipelineError> {
    let player_id = query.player_id.trim();
    if player_id.is_empty() {
        return Err(PipelineError::InvalidArgument(
            "Param player_id is required".to_string(),
        ));
    }

    let dataset = select_dataset(&query.season, query.season_type);
    debug!(player_id, ?dataset, "Selected career dataset");

    let mut table = provider.player_career_totals(player_id).await?.take(dataset);
    lowercase_columns(&mut table);

    if let SeasonSelector::Specific(season) = &query.season {
        table.retain_where(SEASON_ID_COLUMN, |cell| cell.as_text() == Some(season.as_str()));
        if table.is_empty() {
            return Err(PipelineError::NotFound(format!(
                "No season stats found for this player in season {}",
                season
            )));
        }
    }

    let season_type = query.season_type.unwrap_or_default();

    if has_no_games(&table) {
        debug!(player_id, "No games played, returning empty rows");
        return Ok(CareerStatsResponse {
            season_type,
            rows: CareerRows::for_season(&query.season, Vec::new()),
        });
    }

    add_per_game_columns(&mut table);

    if let Some(pagination) = query.pagination {
        pagination.slice_table(&mut table);
    }

    let records = to_records(&table, &[PLAYER_ID_COLUMN]);

    Ok(CareerStatsResponse {
        season_type,
        rows: CareerRows::for_season(&query.season, records),
    })
}
