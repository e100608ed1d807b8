use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate column '{column}' in header")]
    DuplicateColumn { column: String },
    #[error("row {row} has {found} values but the header has {expected} columns")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },
    #[error("row {row} is out of range for a dataset of {len} rows")]
    RowOutOfRange { row: usize, len: usize },
    #[error("column '{column}' is protected and cannot be modified")]
    ProtectedColumn { column: String },
    #[error("invalid status vocabulary: {reason}")]
    InvalidVocabulary { reason: String },
    #[error("corruption percent must be between 1 and 100, got {percent}")]
    InvalidPercent { percent: u32 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
