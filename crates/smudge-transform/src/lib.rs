//! Row sampling and field corruption.
//!
//! All randomness comes from one caller-owned generator that is threaded
//! through every call. The draw order is fixed: for each group in turn, the
//! group's rows are sampled, then its fields are mutated row by row in
//! increasing index order and, within a row, in rule order. Changing that
//! order changes every later value.
//!
//! # Example
//!
//! ```ignore
//! use rand::{SeedableRng, rngs::StdRng};
//! use smudge_model::DirtyOptions;
//! use smudge_transform::corrupt_dataset;
//!
//! let options = DirtyOptions::default();
//! let mut rng = StdRng::seed_from_u64(options.seed);
//! let outcome = corrupt_dataset(&mut rng, &mut dataset, &options)?;
//! println!("overlap: {}", outcome.overlap());
//! ```

mod compare;
mod corrupt;
mod error;
mod numeric;
mod sample;

pub use compare::{DatasetComparison, GroupDiff, compare_datasets};
pub use corrupt::{
    CorruptionOutcome, FieldChange, GroupOutcome, corrupt_dataset, corrupt_group, mutate_value,
};
pub use error::{Result, TransformError};
pub use numeric::{format_rounded, parse_float, parse_int};
pub use sample::{dirty_count, sample_rows};

use std::collections::{BTreeMap, BTreeSet};

/// Number of rows that appear in two or more of the given sets.
pub(crate) fn count_overlap<'a, I>(sets: I) -> usize
where
    I: IntoIterator<Item = &'a BTreeSet<usize>>,
{
    let mut hits: BTreeMap<usize, usize> = BTreeMap::new();
    for set in sets {
        for row in set {
            *hits.entry(*row).or_default() += 1;
        }
    }
    hits.values().filter(|count| **count > 1).count()
}
