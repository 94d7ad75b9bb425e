//! Categorical query parameters: season type, per-mode and season selector.

use serde::{Deserialize, Serialize};

/// Competitive context the statistics belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SeasonType {
    #[default]
    #[serde(rename = "Regular Season")]
    RegularSeason,
    #[serde(rename = "Pre Season")]
    PreSeason,
    #[serde(rename = "Playoffs")]
    Playoffs,
}

impl SeasonType {
    /// Wire value understood by the upstream provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonType::RegularSeason => "Regular Season",
            SeasonType::PreSeason => "Pre Season",
            SeasonType::Playoffs => "Playoffs",
        }
    }

    pub fn is_playoffs(&self) -> bool {
        matches!(self, SeasonType::Playoffs)
    }
}

impl std::fmt::Display for SeasonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalization basis for dashboard statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PerMode {
    #[default]
    Totals,
    PerGame,
    MinutesPer,
    Per48,
    Per40,
    Per36,
    PerMinute,
    PerPossession,
    PerPlay,
    Per100Possessions,
    Per100Plays,
}

impl PerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerMode::Totals => "Totals",
            PerMode::PerGame => "PerGame",
            PerMode::MinutesPer => "MinutesPer",
            PerMode::Per48 => "Per48",
            PerMode::Per40 => "Per40",
            PerMode::Per36 => "Per36",
            PerMode::PerMinute => "PerMinute",
            PerMode::PerPossession => "PerPossession",
            PerMode::PerPlay => "PerPlay",
            PerMode::Per100Possessions => "Per100Possessions",
            PerMode::Per100Plays => "Per100Plays",
        }
    }
}

impl std::fmt::Display for PerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal used by callers to request every season at once.
pub const ALL_SEASONS: &str = "All";

/// Which seasons a stats request covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeasonSelector {
    /// No season given: aggregate career totals
    Career,
    /// `"All"`: one row per season
    All,
    /// A concrete season id such as `"2023-24"`
    Specific(String),
}

impl SeasonSelector {
    /// Interpret the raw `season` query parameter.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => SeasonSelector::Career,
            Some(ALL_SEASONS) => SeasonSelector::All,
            Some(season) => SeasonSelector::Specific(season.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SeasonSelector::All)
    }

    /// Value echoed back to callers: the concrete season, otherwise "All".
    pub fn label(&self) -> &str {
        match self {
            SeasonSelector::Specific(season) => season,
            SeasonSelector::Career | SeasonSelector::All => ALL_SEASONS,
        }
    }
}
