//! Dataset ingestion.
//!
//! Reads a comma-separated file with a single header row into a
//! [`smudge_model::Dataset`]. Values stay text; nothing is coerced at load time.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use smudge_ingest::load_dataset;
//! use smudge_model::DirtyOptions;
//!
//! let options = DirtyOptions::default();
//! let dataset = load_dataset(Path::new("smart_logistics.csv"), &options)?;
//! ```

mod error;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use loader::{load_dataset, read_dataset, require_columns, validate_encoding};
