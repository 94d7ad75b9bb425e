//! Player awards.

use serde::Serialize;
use tracing::debug;

use super::PipelineError;
use crate::models::{AwardRecord, AwardSummary};
use crate::upstream::StatsProvider;

/// Summary string alone, or summary plus the raw award records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AwardsResponse {
    Summary(String),
    Detailed {
        summary: String,
        details: Vec<AwardRecord>,
    },
}

/// Fetch a player's awards and summarize them by category.
///
/// No awards is a valid, empty answer.
pub async fn player_awards(
    provider: &dyn StatsProvider,
    player_id: Option<u32>,
    detailed: bool,
) -> Result<AwardsResponse, PipelineError> {
    let Some(player_id) = player_id.filter(|id| *id != 0) else {
        return Err(PipelineError::InvalidArgument(
            "Missing required parameter: player_id".to_string(),
        ));
    };

    let awards = provider.player_awards(player_id).await?;
    let summary: AwardSummary = awards.iter().collect();
    debug!(player_id, awards = awards.len(), "Summarized awards");

    let summary = summary.to_string();
    Ok(if detailed {
        AwardsResponse::Detailed {
            summary,
            details: awards,
        }
    } else {
        AwardsResponse::Summary(summary)
    })
}
