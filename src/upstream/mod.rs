//! Upstream statistics provider.
//!
//! The pipelines only see the [`StatsProvider`] trait. [`NbaStatsClient`]
//! talks to a stats.nba.com compatible HTTP API; [`mock::MockProvider`]
//! serves canned tables for tests and offline runs.

pub mod mock;
mod nba;

pub use nba::{current_season, parse_result_sets, players_from_table, NbaStatsClient};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AwardRecord, CareerTotals, PerMode, Player, SeasonType, Table};

/// Errors raised while talking to the upstream provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing result set: {0}")]
    MissingResultSet(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Parameters for the player dashboard endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardParams {
    pub player_id: u32,
    pub season_type: SeasonType,
    /// Caller-chosen per-mode; `None` is sent as `Totals`
    pub per_mode: Option<PerMode>,
    /// Concrete season id; the provider defaults to the current season
    pub season: Option<String>,
}

impl DashboardParams {
    pub fn new(player_id: u32, season_type: SeasonType) -> Self {
        Self {
            player_id,
            season_type,
            per_mode: None,
            season: None,
        }
    }

    pub fn with_per_mode(mut self, per_mode: PerMode) -> Self {
        self.per_mode = Some(per_mode);
        self
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }
}

/// Read-only capabilities of the upstream statistics source.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    async fn active_players(&self) -> Result<Vec<Player>, UpstreamError>;

    async fn inactive_players(&self) -> Result<Vec<Player>, UpstreamError>;

    async fn all_players(&self) -> Result<Vec<Player>, UpstreamError>;

    /// Profile table for one player; empty when the id is unknown.
    async fn player_info(&self, player_id: u32) -> Result<Table, UpstreamError>;

    async fn player_awards(&self, player_id: u32) -> Result<Vec<AwardRecord>, UpstreamError>;

    async fn player_career_totals(&self, player_id: &str) -> Result<CareerTotals, UpstreamError>;

    /// Aggregate one-row-per-season dashboard.
    async fn player_seasons_dashboard(
        &self,
        params: &DashboardParams,
    ) -> Result<Table, UpstreamError>;

    /// Every table of the year-over-year dashboard.
    async fn player_year_over_year_dashboard(
        &self,
        params: &DashboardParams,
    ) -> Result<Vec<Table>, UpstreamError>;
}
