use smudge_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("cannot sample rows from an empty dataset")]
    EmptyDataset,

    #[error("cannot sample {count} distinct rows from {rows}")]
    SampleTooLarge { count: usize, rows: usize },

    #[error("invalid {expected} value '{value}' in column '{column}' at row {row}")]
    InvalidFieldValue {
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("invalid rule for column '{column}': {reason}")]
    InvalidRule { column: String, reason: String },

    #[error("header mismatch: {reason}")]
    HeaderMismatch { reason: String },

    #[error("row count mismatch: baseline has {baseline} rows, dirty has {dirty}")]
    RowCountMismatch { baseline: usize, dirty: usize },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
