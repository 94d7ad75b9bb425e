//! Player lookup by id or name.

use serde::Serialize;
use tracing::debug;

use super::PipelineError;
use crate::models::{Player, StatRecord};
use crate::normalize::{lowercase_columns, to_records};
use crate::upstream::StatsProvider;

/// Profile information for the resolved player(s).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlayerInfo {
    /// Looked up by id: a single profile record
    ById {
        player_id: u32,
        player_info: StatRecord,
    },
    /// Looked up by name: one record per matching player
    ByName(Vec<StatRecord>),
}

/// Keep players whose full name contains `needle`, ignoring case.
pub fn filter_by_name(players: Vec<Player>, needle: &str) -> Vec<Player> {
    players
        .into_iter()
        .filter(|p| p.name_matches(needle))
        .collect()
}

async fn info_records(
    provider: &dyn StatsProvider,
    player_id: u32,
) -> Result<Vec<StatRecord>, PipelineError> {
    let mut table = provider.player_info(player_id).await?;
    lowercase_columns(&mut table);
    Ok(to_records(&table, &[]))
}

/// Resolve player profile info by id, or by name substring.
///
/// The id wins when both are given. A zero id or empty name counts as
/// absent.
pub async fn resolve(
    provider: &dyn StatsProvider,
    player_id: Option<u32>,
    player_name: Option<&str>,
) -> Result<PlayerInfo, PipelineError> {
    let player_id = player_id.filter(|id| *id != 0);
    let player_name = player_name.filter(|name| !name.is_empty());

    if let Some(player_id) = player_id {
        debug!(player_id, "Resolving player by id");
        let player_info = info_records(provider, player_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                PipelineError::NotFound(format!("No player found with id {}", player_id))
            })?;
        return Ok(PlayerInfo::ById {
            player_id,
            player_info,
        });
    }

    let Some(name) = player_name else {
        return Err(PipelineError::InvalidArgument(
            "Either player_id or player_name must be provided".to_string(),
        ));
    };

    let matches = filter_by_name(provider.all_players().await?, name);
    if matches.is_empty() {
        return Err(PipelineError::NotFound(
            "No players found with that name".to_string(),
        ));
    }
    debug!(name, count = matches.len(), "Resolving players by name");

    let mut infos = Vec::with_capacity(matches.len());
    for player in &matches {
        infos.extend(info_records(provider, player.id).await?);
    }

    Ok(PlayerInfo::ByName(infos))
}
