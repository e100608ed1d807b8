//! Dirtying pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: read the CSV, check required columns, protect hash columns
//! 2. **Corrupt**: sample and mutate each group from one seeded generator
//! 3. **Write**: serialize atomically to the resolved output path
//!
//! Every mutation happens before the write stage, so a bad field aborts the
//! run without producing output.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, info_span};

use smudge_ingest::{load_dataset, read_dataset};
use smudge_model::{Dataset, DirtyOptions};
use smudge_output::{WriteOptions, write_dataset};
use smudge_transform::{CorruptionOutcome, DatasetComparison, compare_datasets, corrupt_dataset};

use crate::logging::redact_value;

/// Where the dirtied dataset goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// `<stem>_dirty.<ext>` next to the input.
    Default,
    /// An explicit path, which must differ from the input.
    Path(PathBuf),
    /// Replace the input file.
    InPlace,
}

/// Everything needed for one dirtying run.
#[derive(Debug, Clone)]
pub struct DirtyRequest {
    pub input: PathBuf,
    pub target: OutputTarget,
    pub options: DirtyOptions,
    pub write: WriteOptions,
    /// Run every stage except the write.
    pub dry_run: bool,
}

impl DirtyRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            target: OutputTarget::Default,
            options: DirtyOptions::default(),
            write: WriteOptions::default(),
            dry_run: false,
        }
    }
}

/// Result of a dirtying run.
#[derive(Debug)]
pub struct DirtyRun {
    pub input: PathBuf,
    pub output: PathBuf,
    pub written: bool,
    pub rows: usize,
    pub seed: u64,
    pub percent: u32,
    pub outcome: CorruptionOutcome,
}

/// Per-group part of [`RunReport`].
#[derive(Debug, Serialize)]
pub struct GroupReport {
    pub name: String,
    pub summary: String,
    pub hash_column: String,
    pub dirtied: usize,
    pub rows: Vec<usize>,
}

/// Machine-readable run summary written by `--report-json`.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub written: bool,
    pub seed: u64,
    pub percent: u32,
    pub rows: usize,
    pub groups: Vec<GroupReport>,
    pub overlap: usize,
}

impl DirtyRun {
    pub fn report(&self) -> RunReport {
        RunReport {
            input: self.input.clone(),
            output: self.output.clone(),
            written: self.written,
            seed: self.seed,
            percent: self.percent,
            rows: self.rows,
            groups: self
                .outcome
                .groups
                .iter()
                .map(|group| GroupReport {
                    name: group.name.clone(),
                    summary: group.summary.clone(),
                    hash_column: group.hash_column.clone(),
                    dirtied: group.rows.len(),
                    rows: group.rows.iter().copied().collect(),
                })
                .collect(),
            overlap: self.outcome.overlap(),
        }
    }
}

/// `data.csv` -> `data_dirty.csv`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{stem}_dirty.{}", ext.to_string_lossy()),
        None => format!("{stem}_dirty"),
    };
    input.with_file_name(name)
}

fn same_file(left: &Path, right: &Path) -> bool {
    match (fs::canonicalize(left), fs::canonicalize(right)) {
        (Ok(left), Ok(right)) => left == right,
        _ => left == right,
    }
}

/// Resolve the output path, refusing to overwrite the input unless asked to.
pub fn resolve_output(input: &Path, target: &OutputTarget) -> Result<PathBuf> {
    match target {
        OutputTarget::InPlace => Ok(input.to_path_buf()),
        OutputTarget::Default => Ok(default_output_path(input)),
        OutputTarget::Path(path) => {
            if same_file(input, path) {
                bail!(
                    "output {} is the input file; pass --in-place to overwrite it",
                    path.display()
                );
            }
            Ok(path.clone())
        }
    }
}

/// Load, corrupt and write a dataset.
pub fn run_dirty(request: &DirtyRequest) -> Result<DirtyRun> {
    let options = &request.options;
    options.validate().context("invalid options")?;
    let output = resolve_output(&request.input, &request.target)?;

    let run_span = info_span!(
        "dirty",
        input = %request.input.display(),
        seed = options.seed
    );
    let _run_guard = run_span.enter();

    // =========================================================================
    // Stage 1: Load
    // =========================================================================
    let load_start = Instant::now();
    let mut dataset = load_dataset(&request.input, options)
        .with_context(|| format!("load {}", request.input.display()))?;
    info!(
        rows = dataset.len(),
        duration_ms = load_start.elapsed().as_millis(),
        "load complete"
    );

    // =========================================================================
    // Stage 2: Corrupt
    // =========================================================================
    let mut rng = StdRng::seed_from_u64(options.seed);
    let outcome = corrupt_dataset(&mut rng, &mut dataset, options)
        .with_context(|| format!("corrupt {}", request.input.display()))?;
    log_changes(&outcome);

    // =========================================================================
    // Stage 3: Write
    // =========================================================================
    let written = if request.dry_run {
        info!(output = %output.display(), "dry run, skipping write");
        false
    } else {
        write_dataset(&dataset, &output, &request.write)
            .with_context(|| format!("write {}", output.display()))?;
        true
    };

    Ok(DirtyRun {
        input: request.input.clone(),
        output,
        written,
        rows: dataset.len(),
        seed: options.seed,
        percent: options.percent,
        outcome,
    })
}

fn log_changes(outcome: &CorruptionOutcome) {
    for group in &outcome.groups {
        for change in &group.changes {
            debug!(
                group = %group.name,
                row = change.row,
                column = %change.column,
                before = redact_value(&change.before),
                after = redact_value(&change.after),
                "field changed"
            );
        }
    }
}

/// Write the run report as pretty-printed JSON.
pub fn write_report_json(report: &RunReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}

/// Load a clean baseline and a dirtied copy and compare them per group.
pub fn run_diff(
    baseline: &Path,
    dirty: &Path,
    options: &DirtyOptions,
) -> Result<DatasetComparison> {
    let load = |path: &Path| -> Result<Dataset> {
        read_dataset(path).with_context(|| format!("load {}", path.display()))
    };
    let baseline_data = load(baseline)?;
    let dirty_data = load(dirty)?;
    compare_datasets(&baseline_data, &dirty_data, &options.groups).context("compare datasets")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_appends_dirty_suffix() {
        assert_eq!(
            default_output_path(Path::new("/data/smart_logistics.csv")),
            PathBuf::from("/data/smart_logistics_dirty.csv")
        );
        assert_eq!(
            default_output_path(Path::new("fixture")),
            PathBuf::from("fixture_dirty")
        );
    }

    #[test]
    fn explicit_output_cannot_be_input() {
        let input = Path::new("data/in.csv");
        let err = resolve_output(input, &OutputTarget::Path(input.to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("--in-place"));
    }

    #[test]
    fn in_place_targets_input() {
        let input = Path::new("data/in.csv");
        assert_eq!(
            resolve_output(input, &OutputTarget::InPlace).unwrap(),
            input.to_path_buf()
        );
    }
}
