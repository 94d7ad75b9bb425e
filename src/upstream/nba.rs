//! HTTP client for a stats.nba.com compatible API.
//!
//! Every endpoint answers with `resultSets` (or a single `resultSet`):
//! named tables of `headers` plus a `rowSet`. Responses are parsed into
//! [`Table`]s; column names are lower-cased before they leave this module.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::{DashboardParams, StatsProvider, UpstreamError};
use crate::config::UpstreamConfig;
use crate::models::{AwardRecord, CareerDataset, CareerTotals, Cell, Player, Table};
use crate::normalize::{lowercase_columns, to_records};

const ALL_PLAYERS_ENDPOINT: &str = "commonallplayers";
const PLAYER_INFO_ENDPOINT: &str = "commonplayerinfo";
const PLAYER_AWARDS_ENDPOINT: &str = "playerawards";
const CAREER_STATS_ENDPOINT: &str = "playercareerstats";
const YEAR_OVER_YEAR_ENDPOINT: &str = "playerdashboardbyyearoveryear";

const BY_YEAR_RESULT_SET: &str = "ByYearPlayerDashboard";

#[derive(Debug, Deserialize)]
struct RawResultSet {
    #[serde(default)]
    name: String,
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(rename = "resultSets", default)]
    result_sets: Vec<RawResultSet>,
    #[serde(rename = "resultSet")]
    result_set: Option<RawResultSet>,
}

/// Parse a provider response body into its tables, columns lower-cased.
pub fn parse_result_sets(body: &str) -> Result<Vec<Table>, UpstreamError> {
    let raw: RawResponse = serde_json::from_str(body)?;
    let sets: Vec<RawResultSet> = raw.result_sets.into_iter().chain(raw.result_set).collect();

    if sets.is_empty() {
        return Err(UpstreamError::Malformed(
            "response contains no result sets".to_string(),
        ));
    }

    Ok(sets
        .into_iter()
        .map(|set| {
            let rows = set
                .row_set
                .iter()
                .map(|row| row.iter().map(Cell::from).collect())
                .collect();
            let mut table = Table::new(set.name, set.headers).with_rows(rows);
            lowercase_columns(&mut table);
            table
        })
        .collect())
}

fn take_table(tables: &mut Vec<Table>, name: &str) -> Result<Table, UpstreamError> {
    let idx = tables
        .iter()
        .position(|t| t.name() == name)
        .ok_or_else(|| UpstreamError::MissingResultSet(name.to_string()))?;
    Ok(tables.swap_remove(idx))
}

/// Build roster entries from a `CommonAllPlayers` table.
pub fn players_from_table(table: &Table) -> Result<Vec<Player>, UpstreamError> {
    (0..table.len())
        .map(|row| {
            let id = table
                .cell(row, "person_id")
                .and_then(Cell::as_f64)
                .filter(|id| *id >= 0.0 && *id <= u32::MAX as f64)
                .ok_or_else(|| {
                    UpstreamError::Malformed(format!("row {} has no usable person_id", row))
                })? as u32;

            let full_name = table
                .cell(row, "display_first_last")
                .and_then(Cell::as_text)
                .unwrap_or_default()
                .to_string();

            // "James, LeBron"; single-name players have no comma
            let (last_name, first_name) = match table
                .cell(row, "display_last_comma_first")
                .and_then(Cell::as_text)
                .and_then(|s| s.split_once(", "))
            {
                Some((last, first)) => (last.to_string(), first.to_string()),
                None => (full_name.clone(), String::new()),
            };

            let is_active = match table.cell(row, "rosterstatus") {
                Some(Cell::Int(status)) => *status == 1,
                Some(Cell::Text(status)) => status == "1" || status.eq_ignore_ascii_case("active"),
                _ => false,
            };

            Ok(Player {
                id,
                full_name,
                first_name,
                last_name,
                is_active,
            })
        })
        .collect()
}

/// Season id ("2024-25") in progress on `today`. Seasons roll over in October.
pub fn current_season(today: NaiveDate) -> String {
    let start = if today.month() >= 10 {
        today.year()
    } else {
        today.year() - 1
    };
    format!("{}-{:02}", start, (start + 1) % 100)
}

/// Client for the stats.nba.com API.
pub struct NbaStatsClient {
    client: Client,
    base_url: Url,
    league_id: String,
}

impl NbaStatsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("player-stats-api/0.1.0")),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        if let Ok(referer) = HeaderValue::from_str(&config.referer) {
            headers.insert(REFERER, referer);
        }
        if let Ok(origin) = HeaderValue::from_str(&config.origin) {
            headers.insert(ORIGIN, origin);
        }
        headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
        headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            league_id: config.league_id.clone(),
        })
    }

    /// Create a client with default configuration.
    pub fn with_defaults() -> Result<Self, UpstreamError> {
        Self::new(&UpstreamConfig::default())
    }

    /// GET an endpoint and parse its result sets.
    async fn get_tables(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Table>, UpstreamError> {
        let url = self.base_url.join(endpoint)?;
        info!("Fetching {}", endpoint);
        debug!(?query, "Upstream query");

        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream {} returned {}", endpoint, status);
            return Err(UpstreamError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        parse_result_sets(&body)
    }

    async fn roster(&self) -> Result<Vec<Player>, UpstreamError> {
        let query = [
            ("LeagueID", self.league_id.clone()),
            ("Season", current_season(Utc::now().date_naive())),
            ("IsOnlyCurrentSeason", "0".to_string()),
        ];
        let mut tables = self.get_tables(ALL_PLAYERS_ENDPOINT, &query).await?;
        let table = take_table(&mut tables, "CommonAllPlayers")?;
        players_from_table(&table)
    }

    fn dashboard_query(&self, params: &DashboardParams) -> Vec<(&'static str, String)> {
        let season = params
            .season
            .clone()
            .unwrap_or_else(|| current_season(Utc::now().date_naive()));

        // PerMode is mandatory upstream; without a caller choice send Totals.
        let per_mode = params.per_mode.unwrap_or_default();

        vec![
            ("PlayerID", params.player_id.to_string()),
            ("LeagueID", self.league_id.clone()),
            ("Season", season),
            ("SeasonType", params.season_type.as_str().to_string()),
            ("MeasureType", "Base".to_string()),
            ("PaceAdjust", "N".to_string()),
            ("PlusMinus", "N".to_string()),
            ("Rank", "N".to_string()),
            ("LastNGames", "0".to_string()),
            ("Month", "0".to_string()),
            ("OpponentTeamID", "0".to_string()),
            ("PORound", "0".to_string()),
            ("Period", "0".to_string()),
            ("DateFrom", String::new()),
            ("DateTo", String::new()),
            ("GameSegment", String::new()),
            ("Location", String::new()),
            ("Outcome", String::new()),
            ("SeasonSegment", String::new()),
            ("ShotClockRange", String::new()),
            ("VsConference", String::new()),
            ("VsDivision", String::new()),
            ("PerMode", per_mode.as_str().to_string()),
        ]
    }
}

#[async_trait]
impl StatsProvider for NbaStatsClient {
    fn name(&self) -> &'static str {
        "stats.nba.com"
    }

    async fn active_players(&self) -> Result<Vec<Player>, UpstreamError> {
        let mut players = self.roster().await?;
        players.retain(|p| p.is_active);
        Ok(players)
    }

    async fn inactive_players(&self) -> Result<Vec<Player>, UpstreamError> {
        let mut players = self.roster().await?;
        players.retain(|p| !p.is_active);
        Ok(players)
    }

    async fn all_players(&self) -> Result<Vec<Player>, UpstreamError> {
        self.roster().await
    }

    async fn player_info(&self, player_id: u32) -> Result<Table, UpstreamError> {
        let query = [
            ("PlayerID", player_id.to_string()),
            ("LeagueID", self.league_id.clone()),
        ];
        let mut tables = self.get_tables(PLAYER_INFO_ENDPOINT, &query).await?;
        take_table(&mut tables, "CommonPlayerInfo")
    }

    async fn player_awards(&self, player_id: u32) -> Result<Vec<AwardRecord>, UpstreamError> {
        let query = [("PlayerID", player_id.to_string())];
        let mut tables = self.get_tables(PLAYER_AWARDS_ENDPOINT, &query).await?;
        let table = take_table(&mut tables, "PlayerAwards")?;
        Ok(to_records(&table, &[]))
    }

    async fn player_career_totals(&self, player_id: &str) -> Result<CareerTotals, UpstreamError> {
        let query = [
            ("PlayerID", player_id.to_string()),
            ("PerMode", "Totals".to_string()),
            ("LeagueID", self.league_id.clone()),
        ];
        let mut tables = self.get_tables(CAREER_STATS_ENDPOINT, &query).await?;

        Ok(CareerTotals {
            career_totals_post_season: take_table(
                &mut tables,
                CareerDataset::CareerPostSeason.result_set(),
            )?,
            career_totals_regular_season: take_table(
                &mut tables,
                CareerDataset::CareerRegularSeason.result_set(),
            )?,
            season_totals_post_season: take_table(
                &mut tables,
                CareerDataset::SeasonPostSeason.result_set(),
            )?,
            season_totals_regular_season: take_table(
                &mut tables,
                CareerDataset::SeasonRegularSeason.result_set(),
            )?,
        })
    }

    async fn player_seasons_dashboard(
        &self,
        params: &DashboardParams,
    ) -> Result<Table, UpstreamError> {
        let query = self.dashboard_query(params);
        let mut tables = self.get_tables(YEAR_OVER_YEAR_ENDPOINT, &query).await?;
        take_table(&mut tables, BY_YEAR_RESULT_SET)
    }

    async fn player_year_over_year_dashboard(
        &self,
        params: &DashboardParams,
    ) -> Result<Vec<Table>, UpstreamError> {
        let query = self.dashboard_query(params);
        self.get_tables(YEAR_OVER_YEAR_ENDPOINT, &query).await
    }
}
