//! In-memory tabular dataset.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ModelError, Result};

/// One row of the dataset. Values are aligned with the owning dataset's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: Vec<String>,
}

impl Record {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered records plus the header they were read with.
///
/// The header and the row count are fixed at construction. Values can only be
/// changed through [`Dataset::set_value`], which refuses to touch protected
/// columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    columns: BTreeMap<String, usize>,
    protected: BTreeSet<String>,
    rows: Vec<Record>,
}

impl Dataset {
    /// Build a dataset, rejecting duplicate column names and rows whose width
    /// does not match the header.
    pub fn new(headers: Vec<String>, rows: Vec<Record>) -> Result<Self> {
        let mut columns = BTreeMap::new();
        for (idx, name) in headers.iter().enumerate() {
            if columns.insert(name.clone(), idx).is_some() {
                return Err(ModelError::DuplicateColumn {
                    column: name.clone(),
                });
            }
        }
        for (row, record) in rows.iter().enumerate() {
            if record.len() != headers.len() {
                return Err(ModelError::RowWidth {
                    row,
                    expected: headers.len(),
                    found: record.len(),
                });
            }
        }
        Ok(Self {
            headers,
            columns,
            protected: BTreeSet::new(),
            rows,
        })
    }

    /// Mark columns as read-only for [`Dataset::set_value`].
    #[must_use]
    pub fn with_protected_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn record(&self, row: usize) -> Option<&Record> {
        self.rows.get(row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.get(column).copied()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn is_protected(&self, column: &str) -> bool {
        self.protected.contains(column)
    }

    /// Columns from `required` that are absent from the header, in input order.
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|column| !self.has_column(column))
            .collect()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows
            .get(row)
            .and_then(|record| record.values.get(idx))
            .map(String::as_str)
    }

    /// Like [`Dataset::value`], but reports why the lookup failed.
    pub fn require_value(&self, row: usize, column: &str) -> Result<&str> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| ModelError::UnknownColumn {
                column: column.to_string(),
            })?;
        let record = self.rows.get(row).ok_or(ModelError::RowOutOfRange {
            row,
            len: self.rows.len(),
        })?;
        Ok(record.values[idx].as_str())
    }

    /// Replace a value, returning the previous one.
    pub fn set_value(&mut self, row: usize, column: &str, value: String) -> Result<String> {
        if self.is_protected(column) {
            return Err(ModelError::ProtectedColumn {
                column: column.to_string(),
            });
        }
        let idx = self
            .column_index(column)
            .ok_or_else(|| ModelError::UnknownColumn {
                column: column.to_string(),
            })?;
        let len = self.rows.len();
        let record = self
            .rows
            .get_mut(row)
            .ok_or(ModelError::RowOutOfRange { row, len })?;
        Ok(std::mem::replace(&mut record.values[idx], value))
    }
}
