//! Field corruption passes.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::{debug, info, info_span, trace};

use smudge_model::{CorruptionGroup, Dataset, DirtyOptions, Mutation, StatusVocabulary};

use crate::count_overlap;
use crate::error::{Result, TransformError};
use crate::numeric::{format_rounded, parse_float, parse_int};
use crate::sample::{dirty_count, sample_rows};

/// One field rewritten by a corruption pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub row: usize,
    pub column: String,
    pub before: String,
    pub after: String,
}

/// Result of corrupting one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupOutcome {
    pub name: String,
    pub summary: String,
    pub hash_column: String,
    /// Rows selected for this group, in increasing order.
    pub rows: BTreeSet<usize>,
    pub changes: Vec<FieldChange>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CorruptionOutcome {
    pub groups: Vec<GroupOutcome>,
}

impl CorruptionOutcome {
    /// Rows selected by more than one group.
    pub fn overlap(&self) -> usize {
        count_overlap(self.groups.iter().map(|group| &group.rows))
    }

    /// Rows selected by any group.
    pub fn dirtied_rows(&self) -> BTreeSet<usize> {
        self.groups
            .iter()
            .flat_map(|group| group.rows.iter().copied())
            .collect()
    }
}

fn invalid_value(row: usize, column: &str, value: &str, expected: &'static str) -> TransformError {
    TransformError::InvalidFieldValue {
        row,
        column: column.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// Compute the corrupted form of `current`, drawing exactly one value from `rng`.
///
/// `row` and `column` are only used to describe a parse failure.
pub fn mutate_value<R: Rng + ?Sized>(
    rng: &mut R,
    mutation: &Mutation,
    current: &str,
    statuses: &StatusVocabulary,
    row: usize,
    column: &str,
) -> Result<String> {
    match *mutation {
        Mutation::FloatOffset { min, max, decimals } => {
            let value =
                parse_float(current).ok_or_else(|| invalid_value(row, column, current, "float"))?;
            let offset = rng.random_range(min..max);
            Ok(format_rounded(value + offset, decimals))
        }
        Mutation::IntOffset { min, max } => {
            let value =
                parse_int(current).ok_or_else(|| invalid_value(row, column, current, "integer"))?;
            let offset = rng.random_range(min..=max);
            let updated = value
                .checked_add(offset)
                .ok_or_else(|| invalid_value(row, column, current, "integer"))?;
            Ok(updated.to_string())
        }
        Mutation::ReplaceWithOther => {
            let choices = statuses.alternatives(current);
            choices
                .choose(rng)
                .map(|choice| (*choice).to_string())
                .ok_or_else(|| invalid_value(row, column, current, "status"))
        }
    }
}

fn check_rules(group: &CorruptionGroup) -> Result<()> {
    for rule in &group.fields {
        let reason = match rule.mutation {
            Mutation::FloatOffset { min, max, .. } if !(max - min).is_finite() => {
                Some(format!("offset range [{min}, {max}) is not finite"))
            }
            Mutation::FloatOffset { min, max, .. } if !(min < max) => {
                Some(format!("empty offset range [{min}, {max})"))
            }
            Mutation::IntOffset { min, max } if min > max => {
                Some(format!("empty offset range [{min}, {max}]"))
            }
            _ => None,
        };
        if let Some(reason) = reason {
            return Err(TransformError::InvalidRule {
                column: rule.column.clone(),
                reason,
            });
        }
    }
    Ok(())
}

/// Apply a group's field rules to the given rows, in increasing row order.
pub fn corrupt_group<R: Rng + ?Sized>(
    rng: &mut R,
    dataset: &mut Dataset,
    group: &CorruptionGroup,
    rows: &BTreeSet<usize>,
    statuses: &StatusVocabulary,
) -> Result<Vec<FieldChange>> {
    check_rules(group)?;
    let mut changes = Vec::with_capacity(rows.len() * group.fields.len());
    for &row in rows {
        for rule in &group.fields {
            let current = dataset.require_value(row, &rule.column)?;
            let updated = mutate_value(rng, &rule.mutation, current, statuses, row, &rule.column)?;
            let before = dataset.set_value(row, &rule.column, updated.clone())?;
            trace!(row, column = %rule.column, "field corrupted");
            changes.push(FieldChange {
                row,
                column: rule.column.clone(),
                before,
                after: updated,
            });
        }
    }
    Ok(changes)
}

/// Sample and corrupt every group of `options`, in group order.
///
/// Fails before touching the dataset if it is empty. A field that cannot be
/// parsed aborts the run; the dataset may then be partially modified and must
/// not be written.
pub fn corrupt_dataset<R: Rng + ?Sized>(
    rng: &mut R,
    dataset: &mut Dataset,
    options: &DirtyOptions,
) -> Result<CorruptionOutcome> {
    if dataset.is_empty() {
        return Err(TransformError::EmptyDataset);
    }
    let count = dirty_count(dataset.len(), options.percent);
    debug!(rows = dataset.len(), count, percent = options.percent, "dirty count");

    let mut outcome = CorruptionOutcome::default();
    for group in &options.groups {
        let span = info_span!("group", name = %group.name);
        let _guard = span.enter();
        let rows = sample_rows(rng, dataset.len(), count)?;
        let changes = corrupt_group(rng, dataset, group, &rows, &options.statuses)?;
        info!(rows = rows.len(), fields = changes.len(), "group corrupted");
        outcome.groups.push(GroupOutcome {
            name: group.name.clone(),
            summary: group.summary.clone(),
            hash_column: group.hash_column.clone(),
            rows,
            changes,
        });
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use smudge_model::{FieldRule, Record};

    fn single_row(values: &[(&str, &str)]) -> Dataset {
        Dataset::new(
            values.iter().map(|(name, _)| (*name).to_string()).collect(),
            vec![Record::new(
                values.iter().map(|(_, value)| (*value).to_string()).collect(),
            )],
        )
        .unwrap()
    }

    #[test]
    fn float_offset_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mutation = Mutation::FloatOffset {
            min: 0.5,
            max: 2.0,
            decimals: 4,
        };
        for _ in 0..200 {
            let out = mutate_value(
                &mut rng,
                &mutation,
                "10.0",
                &StatusVocabulary::default(),
                0,
                "Latitude",
            )
            .unwrap();
            let delta = out.parse::<f64>().unwrap() - 10.0;
            assert!((0.5 - 1e-9..=2.0 + 1e-9).contains(&delta), "delta {delta}");
            let decimals = out.split('.').nth(1).unwrap().len();
            assert!((1..=4).contains(&decimals));
        }
    }

    #[test]
    fn int_offset_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let mutation = Mutation::IntOffset { min: 1, max: 15 };
        for _ in 0..200 {
            let out = mutate_value(
                &mut rng,
                &mutation,
                "390",
                &StatusVocabulary::default(),
                0,
                "Inventory_Level",
            )
            .unwrap();
            let delta = out.parse::<i64>().unwrap() - 390;
            assert!((1..=15).contains(&delta));
        }
    }

    #[test]
    fn status_always_changes() {
        let mut rng = StdRng::seed_from_u64(9);
        let statuses = StatusVocabulary::default();
        for current in ["Delayed", "In Transit", "Delivered"] {
            for _ in 0..50 {
                let out = mutate_value(
                    &mut rng,
                    &Mutation::ReplaceWithOther,
                    current,
                    &statuses,
                    0,
                    "Shipment_Status",
                )
                .unwrap();
                assert_ne!(out, current);
                assert!(statuses.contains(&out));
            }
        }
    }

    #[test]
    fn unknown_status_is_replaced_from_full_vocabulary() {
        let mut rng = StdRng::seed_from_u64(9);
        let statuses = StatusVocabulary::default();
        let out = mutate_value(
            &mut rng,
            &Mutation::ReplaceWithOther,
            "Lost",
            &statuses,
            0,
            "Shipment_Status",
        )
        .unwrap();
        assert!(statuses.contains(&out));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = mutate_value(
            &mut rng,
            &Mutation::FloatOffset {
                min: 0.5,
                max: 2.0,
                decimals: 4,
            },
            "north",
            &StatusVocabulary::default(),
            7,
            "Latitude",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TransformError::InvalidFieldValue { row: 7, ref column, expected: "float", .. }
                if column == "Latitude"
        ));
    }

    #[test]
    fn corrupt_group_records_changes() {
        let mut dataset = single_row(&[("Waiting_Time", "38"), ("Env_Time_Hash", "h")]);
        let group = CorruptionGroup {
            name: "Env/Time".into(),
            summary: "Waiting".into(),
            hash_column: "Env_Time_Hash".into(),
            fields: vec![FieldRule::new(
                "Waiting_Time",
                Mutation::IntOffset { min: 1, max: 10 },
            )],
        };
        let rows: BTreeSet<usize> = [0].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(42);
        let changes = corrupt_group(
            &mut rng,
            &mut dataset,
            &group,
            &rows,
            &StatusVocabulary::default(),
        )
        .unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].before, "38");
        assert_eq!(dataset.value(0, "Waiting_Time"), Some(changes[0].after.as_str()));
        assert_eq!(dataset.value(0, "Env_Time_Hash"), Some("h"));
    }

    #[test]
    fn rule_targeting_protected_column_fails() {
        let mut dataset = single_row(&[("Env_Time_Hash", "12")])
            .with_protected_columns(["Env_Time_Hash"]);
        let group = CorruptionGroup {
            name: "Bad".into(),
            summary: "Hash".into(),
            hash_column: "Env_Time_Hash".into(),
            fields: vec![FieldRule::new(
                "Env_Time_Hash",
                Mutation::IntOffset { min: 1, max: 2 },
            )],
        };
        let rows: BTreeSet<usize> = [0].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(42);
        let err = corrupt_group(
            &mut rng,
            &mut dataset,
            &group,
            &rows,
            &StatusVocabulary::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::Model(_)));
        assert_eq!(dataset.value(0, "Env_Time_Hash"), Some("12"));
    }

    #[test]
    fn empty_range_rule_is_rejected() {
        let mut dataset = single_row(&[("Humidity", "50.0")]);
        let group = CorruptionGroup {
            name: "Bad".into(),
            summary: "Humidity".into(),
            hash_column: "Env_Time_Hash".into(),
            fields: vec![FieldRule::new(
                "Humidity",
                Mutation::FloatOffset {
                    min: 1.5,
                    max: 1.5,
                    decimals: 1,
                },
            )],
        };
        let rows: BTreeSet<usize> = [0].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(42);
        let err = corrupt_group(
            &mut rng,
            &mut dataset,
            &group,
            &rows,
            &StatusVocabulary::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::InvalidRule { .. }));
    }

    #[test]
    fn unbounded_range_rule_is_rejected() {
        let mut dataset = single_row(&[("Humidity", "50.0")]);
        let group = CorruptionGroup {
            name: "Bad".into(),
            summary: "Humidity".into(),
            hash_column: "Env_Time_Hash".into(),
            fields: vec![FieldRule::new(
                "Humidity",
                Mutation::FloatOffset {
                    min: 0.0,
                    max: f64::INFINITY,
                    decimals: 1,
                },
            )],
        };
        let rows: BTreeSet<usize> = [0].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(42);
        let err = corrupt_group(
            &mut rng,
            &mut dataset,
            &group,
            &rows,
            &StatusVocabulary::default(),
        )
        .unwrap_err();
        assert!(matches!(
            &err,
            TransformError::InvalidRule { column, .. } if column == "Humidity"
        ));
        assert!(err.to_string().contains("not finite"));
        assert_eq!(dataset.value(0, "Humidity"), Some("50.0"));
    }
}
