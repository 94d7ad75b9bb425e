//! Player roster entries.

use serde::{Deserialize, Serialize};

/// A player as listed in the upstream roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Upstream person identifier
    pub id: u32,

    /// Display name, e.g. "LeBron James"
    pub full_name: String,

    pub first_name: String,

    pub last_name: String,

    /// Whether the player is on a current roster
    pub is_active: bool,
}

impl Player {
    /// Case-insensitive substring match against the full name.
    pub fn name_matches(&self, needle: &str) -> bool {
        self.full_name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

/// Roster partition requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityFilter {
    Active,
    Inactive,
    #[default]
    Any,
}

impl From<Option<bool>> for ActivityFilter {
    fn from(is_active: Option<bool>) -> Self {
        match is_active {
            Some(true) => ActivityFilter::Active,
            Some(false) => ActivityFilter::Inactive,
            None => ActivityFilter::Any,
        }
    }
}
