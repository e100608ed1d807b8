//! CSV serialization with atomic replacement of the target file.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use smudge_model::Dataset;
use tracing::{debug, info};

use crate::error::{OutputError, Result};

/// Row terminator for written files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `\r\n`, as written by the spreadsheet tooling the fixtures come from.
    #[default]
    Crlf,
    /// `\n`.
    Lf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    pub line_ending: LineEnding,
}

impl WriteOptions {
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}

/// Serialize the header and every record, quoting only where needed.
pub fn dataset_to_bytes(dataset: &Dataset, options: &WriteOptions) -> Result<Vec<u8>> {
    let terminator = match options.line_ending {
        LineEnding::Crlf => csv::Terminator::CRLF,
        LineEnding::Lf => csv::Terminator::Any(b'\n'),
    };
    let mut writer = csv::WriterBuilder::new()
        .terminator(terminator)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer
        .write_record(dataset.headers())
        .map_err(|source| OutputError::Csv { source })?;
    for record in dataset.rows() {
        writer
            .write_record(record.values())
            .map_err(|source| OutputError::Csv { source })?;
    }
    writer.into_inner().map_err(|e| OutputError::Csv {
        source: csv::Error::from(e.into_error()),
    })
}

/// Temporary file used while writing `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset.csv".to_string());
    path.with_file_name(format!("{name}.smudge.tmp"))
}

/// Write a dataset to `path`.
///
/// Uses atomic write (temp file + rename), so an existing file at `path`,
/// including the input the dataset was read from, is only replaced once the
/// new contents are fully on disk.
pub fn write_dataset(dataset: &Dataset, path: &Path, options: &WriteOptions) -> Result<()> {
    let bytes = dataset_to_bytes(dataset, options)?;
    let temp_path = temp_path_for(path);

    // Create parent directory if needed
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    if let Err(error) = write_temp(&temp_path, &bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }
    debug!(temp = %temp_path.display(), bytes = bytes.len(), "temp file written");

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(OutputError::AtomicWriteFailed {
            temp_path,
            target_path: path.to_path_buf(),
            source: e,
        });
    }

    info!(
        path = %path.display(),
        rows = dataset.len(),
        "dataset written"
    );
    Ok(())
}

fn write_temp(temp_path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|e| OutputError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| OutputError::Io {
        operation: "write",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.sync_all().map_err(|e| OutputError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source: e,
    })
}
