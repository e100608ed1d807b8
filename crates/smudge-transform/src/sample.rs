//! Seeded selection of dirty rows.

use std::collections::BTreeSet;

use rand::Rng;

use crate::error::{Result, TransformError};

/// Rows to dirty per group: `percent` of `rows`, rounded down, at least one.
pub fn dirty_count(rows: usize, percent: u32) -> usize {
    (rows * percent as usize / 100).max(1)
}

/// Draw `count` distinct row indices uniformly from `0..rows`.
pub fn sample_rows<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    count: usize,
) -> Result<BTreeSet<usize>> {
    if rows == 0 {
        return Err(TransformError::EmptyDataset);
    }
    if count > rows {
        return Err(TransformError::SampleTooLarge { count, rows });
    }
    Ok(rand::seq::index::sample(rng, rows, count)
        .into_iter()
        .collect())
}
