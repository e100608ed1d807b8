//! Human-readable reporting for the command-line tool.

use std::collections::BTreeSet;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use smudge_model::CorruptionGroup;
use smudge_transform::DatasetComparison;

use crate::pipeline::DirtyRun;

/// The summary printed after every successful run: one line per group, the
/// overlap between groups, and the output path.
pub fn summary_lines(run: &DirtyRun) -> Vec<String> {
    let groups = &run.outcome.groups;
    let mut lines: Vec<String> = groups
        .iter()
        .map(|group| {
            format!(
                "Dirtied {} rows for {} group ({})",
                group.rows.len(),
                group.name,
                group.summary
            )
        })
        .collect();
    let scope = if groups.len() == 2 {
        "both groups"
    } else {
        "more than one group"
    };
    lines.push(format!(
        "Overlap: {} rows corrupted in {scope}",
        run.outcome.overlap()
    ));
    if run.written {
        lines.push(format!("Output: {}", run.output.display()));
    } else {
        lines.push(format!(
            "Output: {} (dry run, nothing written)",
            run.output.display()
        ));
    }
    lines
}

pub fn print_summary(run: &DirtyRun) {
    for line in summary_lines(run) {
        println!("{line}");
    }
}

/// Table of every field changed by the run.
pub fn details_table(run: &DirtyRun) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Group"),
        header_cell("Column"),
        header_cell("Before"),
        header_cell("After"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for group in &run.outcome.groups {
        for change in &group.changes {
            table.add_row(vec![
                Cell::new(change.row),
                group_cell(&group.name),
                Cell::new(&change.column),
                dim_cell(&change.before),
                Cell::new(&change.after).fg(Color::Yellow),
            ]);
        }
    }
    table
}

pub fn print_details(run: &DirtyRun) {
    println!();
    println!("{}", details_table(run));
}

/// Table of the corruption groups and their field rules.
pub fn columns_table(groups: &[CorruptionGroup]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Hash column"),
        header_cell("Column"),
        header_cell("Mutation"),
    ]);
    apply_table_style(&mut table);
    for group in groups {
        for (idx, rule) in group.fields.iter().enumerate() {
            let (name, hash) = if idx == 0 {
                (group_cell(&group.name), Cell::new(&group.hash_column))
            } else {
                (dim_cell(""), dim_cell(""))
            };
            table.add_row(vec![
                name,
                hash,
                Cell::new(&rule.column),
                Cell::new(rule.mutation.to_string()),
            ]);
        }
    }
    table
}

/// Table of rows that differ between a baseline and its dirtied copy.
pub fn diff_table(comparison: &DatasetComparison) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Hash column"),
        header_cell("Rows"),
        header_cell("Row indices"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for group in &comparison.groups {
        table.add_row(vec![
            group_cell(&group.name),
            Cell::new(&group.hash_column),
            count_cell(group.rows.len(), Color::Yellow),
            Cell::new(join_rows(&group.rows)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Other columns")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(comparison.other_changed_rows.len(), Color::Red),
        Cell::new(join_rows(&comparison.other_changed_rows)),
    ]);
    table.add_row(vec![
        Cell::new("Hash columns")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(comparison.hash_changed_rows.len(), Color::Red),
        Cell::new(join_rows(&comparison.hash_changed_rows)),
    ]);
    table
}

/// Totals printed under the diff table.
pub fn diff_lines(comparison: &DatasetComparison) -> Vec<String> {
    let intact = if comparison.hashes_intact() {
        "yes"
    } else {
        "no"
    };
    vec![
        format!("Overlap: {} rows", comparison.overlap()),
        format!(
            "Other columns changed: {} rows",
            comparison.other_changed_rows.len()
        ),
        format!("Hash columns intact: {intact}"),
    ]
}

pub fn print_diff(comparison: &DatasetComparison) {
    println!("Rows: {}", comparison.rows);
    println!("{}", diff_table(comparison));
    for line in diff_lines(comparison) {
        println!("{line}");
    }
}

fn join_rows(rows: &BTreeSet<usize>) -> String {
    if rows.is_empty() {
        return "-".to_string();
    }
    rows.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn group_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
