//! Configuration options for a dirtying run.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::group::{CorruptionGroup, default_groups};

/// Seed the published fixtures were generated with.
pub const DEFAULT_SEED: u64 = 42;
/// Share of rows dirtied per group, in percent.
pub const DEFAULT_PERCENT: u32 = 1;

/// Allowed values for `Shipment_Status` replacements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct StatusVocabulary {
    values: Vec<String>,
}

impl StatusVocabulary {
    /// Build a vocabulary, dropping repeats while keeping first-seen order.
    ///
    /// At least two distinct, non-empty values are required so that every
    /// status has an alternative.
    pub fn new<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if value.is_empty() {
                return Err(ModelError::InvalidVocabulary {
                    reason: "empty status value".to_string(),
                });
            }
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        if unique.len() < 2 {
            return Err(ModelError::InvalidVocabulary {
                reason: format!("need at least 2 distinct values, got {}", unique.len()),
            });
        }
        Ok(Self { values: unique })
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Every value except `current`, in vocabulary order.
    pub fn alternatives(&self, current: &str) -> Vec<&str> {
        self.values
            .iter()
            .map(String::as_str)
            .filter(|value| *value != current)
            .collect()
    }
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self {
            values: vec![
                "Delayed".to_string(),
                "In Transit".to_string(),
                "Delivered".to_string(),
            ],
        }
    }
}

impl TryFrom<Vec<String>> for StatusVocabulary {
    type Error = ModelError;

    fn try_from(values: Vec<String>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<StatusVocabulary> for Vec<String> {
    fn from(vocabulary: StatusVocabulary) -> Self {
        vocabulary.values
    }
}

/// Options controlling a dirtying run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirtyOptions {
    /// Seed for the single random generator shared by all passes.
    pub seed: u64,
    /// Percentage of rows dirtied per group (at least one row).
    pub percent: u32,
    pub statuses: StatusVocabulary,
    /// Groups in the order they are sampled and corrupted.
    pub groups: Vec<CorruptionGroup>,
}

impl Default for DirtyOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            percent: DEFAULT_PERCENT,
            statuses: StatusVocabulary::default(),
            groups: default_groups(),
        }
    }
}

impl DirtyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_percent(mut self, percent: u32) -> Self {
        self.percent = percent;
        self
    }

    #[must_use]
    pub fn with_statuses(mut self, statuses: StatusVocabulary) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.percent) {
            return Err(ModelError::InvalidPercent {
                percent: self.percent,
            });
        }
        Ok(())
    }

    /// Hash columns of all groups; these must never be written.
    pub fn protected_columns(&self) -> Vec<&str> {
        self.groups
            .iter()
            .map(|group| group.hash_column.as_str())
            .collect()
    }

    /// Every column the run reads or guards.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self
            .groups
            .iter()
            .flat_map(CorruptionGroup::columns)
            .collect();
        columns.extend(self.protected_columns());
        columns
    }
}
