//! Career statistics bundle returned by the upstream career endpoint.

use super::Table;

/// The four datasets of a player's career statistics.
#[derive(Debug, Clone, Default)]
pub struct CareerTotals {
    pub career_totals_post_season: Table,
    pub career_totals_regular_season: Table,
    pub season_totals_post_season: Table,
    pub season_totals_regular_season: Table,
}

/// Selects one of the [`CareerTotals`] datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerDataset {
    CareerPostSeason,
    CareerRegularSeason,
    SeasonPostSeason,
    SeasonRegularSeason,
}

impl CareerDataset {
    /// Upstream result set name.
    pub fn result_set(&self) -> &'static str {
        match self {
            CareerDataset::CareerPostSeason => "CareerTotalsPostSeason",
            CareerDataset::CareerRegularSeason => "CareerTotalsRegularSeason",
            CareerDataset::SeasonPostSeason => "SeasonTotalsPostSeason",
            CareerDataset::SeasonRegularSeason => "SeasonTotalsRegularSeason",
        }
    }
}

impl CareerTotals {
    /// Take ownership of a single dataset, discarding the rest.
    pub fn take(self, dataset: CareerDataset) -> Table {
        match dataset {
            CareerDataset::CareerPostSeason => self.career_totals_post_season,
            CareerDataset::CareerRegularSeason => self.career_totals_regular_season,
            CareerDataset::SeasonPostSeason => self.season_totals_post_season,
            CareerDataset::SeasonRegularSeason => self.season_totals_regular_season,
        }
    }
}
