//! Core types for the dataset dirtying tool.
//!
//! A [`Dataset`] is loaded once, mutated in place by the corruption passes, and
//! written back out. The groups of columns that get corrupted, and the hash
//! column each group is meant to invalidate, are described by
//! [`CorruptionGroup`] values collected in [`DirtyOptions`].

pub mod dataset;
pub mod error;
pub mod group;
pub mod options;
pub mod schema;

pub use dataset::{Dataset, Record};
pub use error::{ModelError, Result};
pub use group::{CorruptionGroup, FieldRule, Mutation, default_groups};
pub use options::{DEFAULT_PERCENT, DEFAULT_SEED, DirtyOptions, StatusVocabulary};
