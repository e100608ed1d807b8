//! CSV file reading into a [`Dataset`].

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use smudge_model::{Dataset, DirtyOptions, Record};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open_file(path)?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        // UTF-16 LE BOM
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        // UTF-16 BE BOM
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the first header)
    Ok(())
}

fn read_headers(reader: &mut csv::Reader<File>, path: &Path) -> Result<Vec<String>> {
    let record = reader.headers().map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    if record.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut seen = BTreeSet::new();
    let mut headers = Vec::with_capacity(record.len());
    for (position, raw) in record.iter().enumerate() {
        let name = raw.trim_start_matches('\u{feff}').to_string();
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
                position,
            });
        }
        if !seen.insert(name.clone()) {
            return Err(IngestError::DuplicateColumn {
                column: name,
                path: path.to_path_buf(),
            });
        }
        headers.push(name);
    }
    Ok(headers)
}

/// Reads a CSV file with a single header row.
///
/// Every data row must have exactly one value per header column; blank lines
/// are skipped. Row numbers in errors are 0-based data row indices.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    validate_encoding(path)?;
    let file = open_file(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = read_headers(&mut reader, path)?;

    let mut rows = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        if record.len() != headers.len() {
            return Err(IngestError::MalformedRow {
                path: path.to_path_buf(),
                row,
                expected: headers.len(),
                found: record.len(),
            });
        }
        rows.push(Record::new(record.iter().map(str::to_string).collect()));
    }

    debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = headers.len(),
        "read csv"
    );
    Ok(Dataset::new(headers, rows)?)
}

/// Fails with [`IngestError::MissingColumns`] if any column is absent.
pub fn require_columns(dataset: &Dataset, path: &Path, required: &[&str]) -> Result<()> {
    let missing = dataset.missing_columns(required);
    if missing.is_empty() {
        return Ok(());
    }
    Err(IngestError::MissingColumns {
        path: path.to_path_buf(),
        columns: missing.into_iter().map(str::to_string).collect(),
    })
}

/// Reads a dataset for a dirtying run.
///
/// Checks that every group and hash column named by `options` is present and
/// marks the hash columns read-only.
pub fn load_dataset(path: &Path, options: &DirtyOptions) -> Result<Dataset> {
    let dataset = read_dataset(path)?;
    require_columns(&dataset, path, &options.required_columns())?;
    let dataset = dataset.with_protected_columns(options.protected_columns());
    info!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.headers().len(),
        "loaded dataset"
    );
    Ok(dataset)
}
