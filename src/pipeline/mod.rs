//! Query pipelines.
//!
//! Each pipeline takes a typed request, pulls what it needs from a
//! [`StatsProvider`](crate::upstream::StatsProvider) and reshapes the
//! result:
//! - **lookup**: resolve players by id or name
//! - **roster**: filtered, paginated player listings
//! - **career**: career totals and per-season splits with per-game stats
//! - **advanced**: seasons / year-over-year dashboards
//! - **awards**: categorized award summaries

pub mod advanced;
pub mod awards;
pub mod career;
pub mod lookup;
pub mod roster;

pub use advanced::{advanced_stats, AdvancedQuery, AdvancedStatsResponse};
pub use awards::{player_awards, AwardsResponse};
pub use career::{career_stats, CareerQuery, CareerRows, CareerStatsResponse};
pub use lookup::{resolve, PlayerInfo};
pub use roster::{list_players, RosterQuery};

use thiserror::Error;

use crate::models::Table;
use crate::upstream::UpstreamError;

/// Page size used when a page is requested without one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pipeline error types.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required selector or identifier is missing
    #[error("{0}")]
    InvalidArgument(String),

    /// The subject the caller asked about does not exist
    #[error("{0}")]
    NotFound(String),

    #[error("Upstream failure: {0}")]
    Upstream(#[from] UpstreamError),
}

/// Offset pagination over an already filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Pagination {
    /// Pagination applies only when a page was requested. Page 0 is
    /// treated as page 1.
    pub fn new(page: Option<usize>, page_size: Option<usize>) -> Option<Self> {
        page.map(|page| Self {
            page: page.max(1),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn end(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }

    /// Keep the items of this page; out-of-range pages are empty.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size)
            .collect()
    }

    pub fn slice_table(&self, table: &mut Table) {
        table.slice_rows(self.offset(), self.end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_absent_without_page() {
        assert_eq!(Pagination::new(None, Some(5)), None);
    }

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination::new(Some(2), None).unwrap();
        assert_eq!(p.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(p.offset(), 10);
        assert_eq!(p.end(), 20);
    }

    #[test]
    fn test_pagination_page_zero_is_first() {
        let p = Pagination::new(Some(0), Some(3)).unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.slice((1..=10).collect()), vec![1, 2, 3]);
    }

    #[test]
    fn test_pagination_slice() {
        let p = Pagination::new(Some(2), Some(4)).unwrap();
        assert_eq!(p.slice((1..=10).collect()), vec![5, 6, 7, 8]);

        let p = Pagination::new(Some(3), Some(4)).unwrap();
        assert_eq!(p.slice((1..=10).collect()), vec![9, 10]);

        let p = Pagination::new(Some(4), Some(4)).unwrap();
        assert!(p.slice((1..=10).collect::<Vec<i32>>()).is_empty());
    }

    #[test]
    fn test_pipeline_error_messages() {
        let err = PipelineError::NotFound("No players found with that name".into());
        assert_eq!(err.to_string(), "No players found with that name");
    }
}
