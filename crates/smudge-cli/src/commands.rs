use anyhow::{Context, Result};
use tracing::info;

use smudge_cli::pipeline::{DirtyRequest, OutputTarget, run_diff, run_dirty, write_report_json};
use smudge_cli::summary::{columns_table, print_details, print_diff, print_summary};
use smudge_model::{DirtyOptions, StatusVocabulary};
use smudge_output::{LineEnding, WriteOptions};

use crate::cli::{DiffArgs, DirtyArgs, LineEndingArg};

pub fn run_columns() -> Result<()> {
    let options = DirtyOptions::default();
    println!("{}", columns_table(&options.groups));
    println!("Statuses: {}", options.statuses.values().join(", "));
    Ok(())
}

fn build_request(args: &DirtyArgs) -> Result<DirtyRequest> {
    let mut options = DirtyOptions::new()
        .with_seed(args.seed)
        .with_percent(args.percent);
    if !args.statuses.is_empty() {
        let statuses = StatusVocabulary::new(args.statuses.iter().cloned())
            .context("invalid --status values")?;
        options = options.with_statuses(statuses);
    }
    let target = if args.in_place {
        OutputTarget::InPlace
    } else if let Some(path) = &args.output {
        OutputTarget::Path(path.clone())
    } else {
        OutputTarget::Default
    };
    let line_ending = match args.line_ending {
        LineEndingArg::Crlf => LineEnding::Crlf,
        LineEndingArg::Lf => LineEnding::Lf,
    };
    Ok(DirtyRequest {
        input: args.input.clone(),
        target,
        options,
        write: WriteOptions::default().with_line_ending(line_ending),
        dry_run: args.dry_run,
    })
}

pub fn run_dirty_command(args: &DirtyArgs) -> Result<()> {
    let request = build_request(args)?;
    let run = run_dirty(&request)?;
    print_summary(&run);
    if args.details {
        print_details(&run);
    }
    if let Some(path) = &args.report_json {
        write_report_json(&run.report(), path)?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}

pub fn run_diff_command(args: &DiffArgs) -> Result<()> {
    let comparison = run_diff(&args.baseline, &args.dirty, &DirtyOptions::default())?;
    print_diff(&comparison);
    Ok(())
}
