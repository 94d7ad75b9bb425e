//! Advanced and fantasy dashboard statistics.
//!
//! Unlike career stats, missing data is never a 404 here: an unknown
//! season or a player without games yields an empty `stats` list.

use serde::Serialize;
use tracing::debug;

use super::PipelineError;
use crate::models::{PerMode, SeasonSelector, SeasonType, StatRecord, Table};
use crate::normalize::{has_no_games, lowercase_columns, to_records};
use crate::upstream::{DashboardParams, StatsProvider};

/// An advanced stats request.
#[derive(Debug, Clone)]
pub struct AdvancedQuery {
    pub player_id: u32,
    pub per_mode: PerMode,
    pub season: SeasonSelector,
    pub season_type: SeasonType,
}

impl AdvancedQuery {
    pub fn new(player_id: u32) -> Self {
        Self {
            player_id,
            per_mode: PerMode::default(),
            season: SeasonSelector::Career,
            season_type: SeasonType::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedStatsResponse {
    pub player_id: u32,
    pub per_mode: PerMode,
    pub season: String,
    pub season_type: SeasonType,
    pub stats: Vec<StatRecord>,
}

/// Ranking, grouping, WNBA fantasy and season columns are not part of the
/// stats payload.
pub fn is_pruned_column(name: &str) -> bool {
    name.contains("_rank")
        || name.contains("group_set")
        || name.contains("wnba_fantasy_pts")
        || name.contains("season")
}

async fn fetch_dashboard(
    provider: &dyn StatsProvider,
    query: &AdvancedQuery,
) -> Result<Table, PipelineError> {
    let params = DashboardParams::new(query.player_id, query.season_type);

    match &query.season {
        // The seasons dashboard already spans every season; per-mode is
        // not forwarded on this path.
        SeasonSelector::All => {
            debug!(player_id = query.player_id, "Using seasons dashboard");
            Ok(provider.player_seasons_dashboard(&params).await?)
        }
        season => {
            let mut params = params.with_per_mode(query.per_mode);
            if let SeasonSelector::Specific(season) = season {
                params = params.with_season(season.clone());
            }
            debug!(player_id = query.player_id, "Using year-over-year dashboard");
            let tables = provider.player_year_over_year_dashboard(&params).await?;
            Ok(Table::concat("PlayerDashboardByYearOverYear", tables))
        }
    }
}

/// Dashboard statistics for a player, pruned of ranking and season columns.
pub async fn advanced_stats(
    provider: &dyn StatsProvider,
    query: &AdvancedQuery,
) -> Result<AdvancedStatsResponse, PipelineError> {
    let mut table = fetch_dashboard(provider, query).await?;
    lowercase_columns(&mut table);

    let stats = if table.is_empty() || has_no_games(&table) {
        debug!(player_id = query.player_id, "No dashboard rows with games");
        Vec::new()
    } else {
        table.drop_columns(is_pruned_column);
        to_records(&table, &[])
    };

    Ok(AdvancedStatsResponse {
        player_id: query.player_id,
        per_mode: query.per_mode,
        season: query.season.label().to_string(),
        season_type: query.season_type,
        stats,
    })
}
