//! Award records and their categorized summary.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Raw award entry from upstream, keys lower-cased, otherwise untouched.
pub type AwardRecord = Map<String, Value>;

/// Canonical award label derived from a free-text description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AwardCategory {
    AllDefensiveTeam,
    AllStar,
    PlayerOfTheWeek,
    OlympicGoldMedal,
    /// No rule matched; the description itself is the category
    Other(String),
}

impl AwardCategory {
    /// Classify a description. Rules are checked in order and the first
    /// match wins.
    pub fn from_description(description: &str) -> Self {
        if description.contains("All-Defensive") {
            AwardCategory::AllDefensiveTeam
        } else if description.contains("All-Star") {
            AwardCategory::AllStar
        } else if description.contains("Player of the Week") {
            AwardCategory::PlayerOfTheWeek
        } else if description.contains("Gold Medal") {
            AwardCategory::OlympicGoldMedal
        } else {
            AwardCategory::Other(description.to_string())
        }
    }

    /// Classify a raw record by its `description` field (missing → "").
    pub fn from_record(record: &AwardRecord) -> Self {
        let description = record
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("");
        Self::from_description(description)
    }

    pub fn label(&self) -> &str {
        match self {
            AwardCategory::AllDefensiveTeam => "All-Defensive Team",
            AwardCategory::AllStar => "NBA All-Star",
            AwardCategory::PlayerOfTheWeek => "NBA Player of the Week",
            AwardCategory::OlympicGoldMedal => "Olympic Gold Medal",
            AwardCategory::Other(description) => description,
        }
    }
}

impl std::fmt::Display for AwardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Occurrence count per award category.
#[derive(Debug, Clone, Default)]
pub struct AwardSummary {
    counts: HashMap<AwardCategory, u32>,
}

impl AwardSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: AwardCategory) {
        *self.counts.entry(category).or_insert(0) += 1;
    }

    pub fn count(&self, category: &AwardCategory) -> u32 {
        self.counts.get(category).copied().unwrap_or(0)
    }

    /// Categories ranked by descending count, ties by ascending label.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .counts
            .iter()
            .map(|(category, count)| (category.label(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl<'a> FromIterator<&'a AwardRecord> for AwardSummary {
    fn from_iter<I: IntoIterator<Item = &'a AwardRecord>>(iter: I) -> Self {
        let mut summary = AwardSummary::new();
        for record in iter {
            summary.record(AwardCategory::from_record(record));
        }
        summary
    }
}

impl std::fmt::Display for AwardSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (label, count)) in self.ranked().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{} {}", count, label)?;
        }
        Ok(())
    }
}
