//! Answer key: which rows of a dirtied file differ from the clean baseline.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use smudge_model::schema::is_hash_column;
use smudge_model::{CorruptionGroup, Dataset};

use crate::count_overlap;
use crate::error::{Result, TransformError};

#[derive(Debug, Clone, Serialize)]
pub struct GroupDiff {
    pub name: String,
    pub hash_column: String,
    /// Rows where at least one of the group's columns differs.
    pub rows: BTreeSet<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetComparison {
    pub rows: usize,
    pub groups: Vec<GroupDiff>,
    /// Rows where a column outside every group, other than a hash, differs.
    pub other_changed_rows: BTreeSet<usize>,
    /// Rows where a hash column differs.
    pub hash_changed_rows: BTreeSet<usize>,
}

impl DatasetComparison {
    pub fn overlap(&self) -> usize {
        count_overlap(self.groups.iter().map(|group| &group.rows))
    }

    /// True when every hash column is byte-identical to the baseline.
    pub fn hashes_intact(&self) -> bool {
        self.hash_changed_rows.is_empty()
    }
}

/// Compare a dirtied dataset with the baseline it was produced from.
///
/// Both datasets must share the same header, in the same order, and the same
/// number of rows.
pub fn compare_datasets(
    baseline: &Dataset,
    dirty: &Dataset,
    groups: &[CorruptionGroup],
) -> Result<DatasetComparison> {
    if baseline.headers() != dirty.headers() {
        return Err(TransformError::HeaderMismatch {
            reason: format!(
                "baseline has [{}], dirty has [{}]",
                baseline.headers().join(", "),
                dirty.headers().join(", ")
            ),
        });
    }
    if baseline.len() != dirty.len() {
        return Err(TransformError::RowCountMismatch {
            baseline: baseline.len(),
            dirty: dirty.len(),
        });
    }

    // column index -> owning group, for group columns only
    let mut owner: BTreeMap<usize, usize> = BTreeMap::new();
    for (group_idx, group) in groups.iter().enumerate() {
        for column in group.columns() {
            if let Some(idx) = baseline.column_index(column) {
                owner.insert(idx, group_idx);
            }
        }
    }
    let hash_columns: BTreeSet<usize> = baseline
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, name)| {
            is_hash_column(name) || groups.iter().any(|group| &group.hash_column == *name)
        })
        .map(|(idx, _)| idx)
        .collect();

    let mut group_rows = vec![BTreeSet::new(); groups.len()];
    let mut other_changed_rows = BTreeSet::new();
    let mut hash_changed_rows = BTreeSet::new();
    for (row, (before, after)) in baseline.rows().iter().zip(dirty.rows()).enumerate() {
        for (idx, (old, new)) in before.values().iter().zip(after.values()).enumerate() {
            if old == new {
                continue;
            }
            if let Some(group_idx) = owner.get(&idx) {
                group_rows[*group_idx].insert(row);
            } else if hash_columns.contains(&idx) {
                hash_changed_rows.insert(row);
            } else {
                other_changed_rows.insert(row);
            }
        }
    }

    let comparison = DatasetComparison {
        rows: baseline.len(),
        groups: groups
            .iter()
            .zip(group_rows)
            .map(|(group, rows)| GroupDiff {
                name: group.name.clone(),
                hash_column: group.hash_column.clone(),
                rows,
            })
            .collect(),
        other_changed_rows,
        hash_changed_rows,
    };
    debug!(
        rows = comparison.rows,
        overlap = comparison.overlap(),
        "datasets compared"
    );
    Ok(comparison)
}
