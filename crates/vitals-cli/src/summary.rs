use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use vitals_cli::types::{FolderSummary, RunResult};

pub fn print_summary(result: &RunResult) {
    match &result.output_file {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Folder"),
        header_cell("Status"),
        header_cell("Files"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Notes"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    for summary in result.folder_summaries() {
        table.add_row(folder_row(&summary));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(result.records()).add_attribute(Attribute::Bold),
        Cell::new(result.consolidation.table.columns.len()).add_attribute(Attribute::Bold),
        dim_cell(date_range_label(result.date_range())),
    ]);
    println!("{table}");
}

fn folder_row(summary: &FolderSummary) -> Vec<Cell> {
    let status = if summary.processed {
        Cell::new("processed").fg(Color::Green)
    } else {
        Cell::new("skipped").fg(Color::Yellow)
    };
    let notes = if summary.notes.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(summary.notes.join("\n"))
    };
    vec![
        Cell::new(&summary.folder),
        status,
        Cell::new(format!("{}/{}", summary.files_loaded, summary.files_total)),
        count_cell(summary.rows),
        count_cell(summary.columns),
        notes,
    ]
}

fn date_range_label(range: Option<(i64, i64)>) -> String {
    match range {
        Some((first, last)) => format!("dates {first} to {last}"),
        None => "no dates".to_string(),
    }
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
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
