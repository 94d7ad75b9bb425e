//! Roster listings.

use tracing::debug;

use super::lookup::filter_by_name;
use super::{Pagination, PipelineError};
use crate::models::{ActivityFilter, Player};
use crate::upstream::StatsProvider;

/// A roster listing request.
#[derive(Debug, Clone, Default)]
pub struct RosterQuery {
    pub activity: ActivityFilter,
    /// Case-insensitive substring of the full name
    pub name: Option<String>,
    /// Keep only the first N players, before pagination
    pub limit: Option<usize>,
    pub pagination: Option<Pagination>,
}

/// List players.
///
/// Filters run in a fixed order: source selection, name, limit, page.
/// Because the page is cut after the limit, a limit smaller than the
/// page offset yields an empty page.
pub async fn list_players(
    provider: &dyn StatsProvider,
    query: &RosterQuery,
) -> Result<Vec<Player>, PipelineError> {
    let mut players = match query.activity {
        ActivityFilter::Active => provider.active_players().await?,
        ActivityFilter::Inactive => provider.inactive_players().await?,
        ActivityFilter::Any => provider.all_players().await?,
    };

    if let Some(name) = query.name.as_deref().filter(|n| !n.is_empty()) {
        players = filter_by_name(players, name);
    }

    if let Some(limit) = query.limit {
        players.truncate(limit);
    }

    if let Some(pagination) = query.pagination {
        players = pagination.slice(players);
    }

    debug!(
        activity = ?query.activity,
        count = players.len(),
        "Listed players"
    );
    Ok(players)
}
