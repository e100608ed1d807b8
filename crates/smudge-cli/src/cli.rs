//! CLI argument definitions for smudge.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use smudge_model::{DEFAULT_PERCENT, DEFAULT_SEED};

#[derive(Parser)]
#[command(
    name = "smudge",
    version,
    about = "Dirty a logistics dataset so its hash columns no longer match",
    long_about = "Deterministically corrupt a small share of rows in two column groups \
                  (Location/Status and Environment/Time) while leaving the \
                  Location_Status_Hash and Env_Time_Hash columns untouched.\n\n\
                  The same input and seed always produce the same output."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include field values in debug logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Corrupt a dataset and write the dirtied copy.
    Dirty(DirtyArgs),

    /// Show which rows differ between a clean dataset and a dirtied copy.
    Diff(DiffArgs),

    /// List the corrupted column groups and their hash columns.
    Columns,
}

#[derive(Parser)]
pub struct DirtyArgs {
    /// Path to the clean CSV dataset.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output path (default: <INPUT stem>_dirty.<ext> next to the input).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite the input file (written atomically).
    #[arg(long = "in-place", conflicts_with = "output")]
    pub in_place: bool,

    /// Seed for the random generator.
    #[arg(long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Percentage of rows dirtied per group (at least one row).
    #[arg(
        long = "percent",
        default_value_t = DEFAULT_PERCENT,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub percent: u32,

    /// Shipment status vocabulary (repeat to replace the default
    /// Delayed / In Transit / Delivered).
    #[arg(long = "status", value_name = "VALUE")]
    pub statuses: Vec<String>,

    /// Line terminator for the written file.
    #[arg(long = "line-ending", value_enum, default_value = "crlf")]
    pub line_ending: LineEndingArg,

    /// Corrupt and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print every changed field after the summary.
    #[arg(long = "details")]
    pub details: bool,

    /// Write a JSON report of the run to this path.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct DiffArgs {
    /// The clean dataset.
    #[arg(value_name = "BASELINE")]
    pub baseline: PathBuf,

    /// The dirtied copy.
    #[arg(value_name = "DIRTY")]
    pub dirty: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LineEndingArg {
    Crlf,
    Lf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn dirty_defaults() {
        let cli = Cli::try_parse_from(["smudge", "dirty", "data.csv"]).unwrap();
        let Command::Dirty(args) = cli.command else {
            panic!("expected dirty command");
        };
        assert_eq!(args.seed, 42);
        assert_eq!(args.percent, 1);
        assert!(args.statuses.is_empty());
        assert!(!args.in_place);
    }

    #[test]
    fn in_place_conflicts_with_output() {
        let result =
            Cli::try_parse_from(["smudge", "dirty", "a.csv", "--in-place", "--output", "b.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn percent_is_range_checked() {
        assert!(Cli::try_parse_from(["smudge", "dirty", "a.csv", "--percent", "0"]).is_err());
        assert!(Cli::try_parse_from(["smudge", "dirty", "a.csv", "--percent", "101"]).is_err());
    }
}
