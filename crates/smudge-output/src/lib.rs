//! Dataset output.
//!
//! Datasets are written back as comma-separated text with the original header
//! and column order. Writes go through a temporary file next to the target
//! that is renamed into place, so overwriting the input file never leaves a
//! truncated copy behind.

mod error;
mod writer;

pub use error::{OutputError, Result};
pub use writer::{LineEnding, WriteOptions, dataset_to_bytes, temp_path_for, write_dataset};
