//! In-memory provider serving canned data.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{DashboardParams, StatsProvider, UpstreamError};
use crate::models::{AwardRecord, CareerTotals, Player, Table};

/// A provider backed by fixed data. Records every call it receives so
/// tests can assert which upstream capability a pipeline used.
#[derive(Default)]
pub struct MockProvider {
    pub players: Vec<Player>,
    pub info: HashMap<u32, Table>,
    pub awards: HashMap<u32, Vec<AwardRecord>>,
    pub career: HashMap<String, CareerTotals>,
    pub seasons_dashboard: Table,
    pub year_over_year: Vec<Table>,
    /// When set, every call fails with this HTTP status
    pub fail_with: Option<u16>,
    calls: Mutex<Vec<String>>,
    dashboard_params: Mutex<Vec<DashboardParams>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(mut self, players: Vec<Player>) -> Self {
        self.players = players;
        self
    }

    /// Names of the capabilities invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Parameters of every dashboard request, in order.
    pub fn dashboard_params(&self) -> Vec<DashboardParams> {
        self.dashboard_params
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: &str) -> Result<(), UpstreamError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.to_string());
        }
        match self.fail_with {
            Some(status) => Err(UpstreamError::HttpStatus {
                status,
                message: "mock failure".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn record_params(&self, params: &DashboardParams) {
        if let Ok(mut seen) = self.dashboard_params.lock() {
            seen.push(params.clone());
        }
    }
}

#[async_trait]
impl StatsProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn active_players(&self) -> Result<Vec<Player>, UpstreamError> {
        self.record("active_players")?;
        Ok(self.players.iter().filter(|p| p.is_active).cloned().collect())
    }

    async fn inactive_players(&self) -> Result<Vec<Player>, UpstreamError> {
        self.record("inactive_players")?;
        Ok(self.players.iter().filter(|p| !p.is_active).cloned().collect())
    }

    async fn all_players(&self) -> Result<Vec<Player>, UpstreamError> {
        self.record("all_players")?;
        Ok(self.players.clone())
    }

    async fn player_info(&self, player_id: u32) -> Result<Table, UpstreamError> {
        self.record("player_info")?;
        Ok(self.info.get(&player_id).cloned().unwrap_or_default())
    }

    async fn player_awards(&self, player_id: u32) -> Result<Vec<AwardRecord>, UpstreamError> {
        self.record("player_awards")?;
        Ok(self.awards.get(&player_id).cloned().unwrap_or_default())
    }

    async fn player_career_totals(&self, player_id: &str) -> Result<CareerTotals, UpstreamError> {
        self.record("player_career_totals")?;
        self.career
            .get(player_id)
            .cloned()
            .ok_or_else(|| UpstreamError::MissingResultSet("CareerTotalsRegularSeason".into()))
    }

    async fn player_seasons_dashboard(
        &self,
        params: &DashboardParams,
    ) -> Result<Table, UpstreamError> {
        self.record("player_seasons_dashboard")?;
        self.record_params(params);
        Ok(self.seasons_dashboard.clone())
    }

    async fn player_year_over_year_dashboard(
        &self,
        params: &DashboardParams,
    ) -> Result<Vec<Table>, UpstreamError> {
        self.record("player_year_over_year_dashboard")?;
        self.record_params(params);
        Ok(self.year_over_year.clone())
    }
}
