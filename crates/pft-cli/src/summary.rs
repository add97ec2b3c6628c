use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pft_model::SourceKind;

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    let output = &result.output;
    match &result.written {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: {} (dry run, not written)", output.filename),
    }
    println!(
        "Rows: {}  Columns: {}  Weeks: {}",
        output.rows,
        output.columns.len(),
        output.week_columns.len()
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("ms"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for stage in &output.stages {
        table.add_row(vec![
            Cell::new(stage.stage),
            Cell::new(stage.rows),
            Cell::new(stage.columns),
            dim_cell(stage.duration_ms),
        ]);
    }
    println!("{table}");

    print_conversion_table(result);
}

pub fn print_awaiting(missing: &[SourceKind]) {
    let names: Vec<&str> = missing.iter().map(|source| source.as_str()).collect();
    println!("awaiting input: {}", names.join(", "));
}

fn print_conversion_table(result: &RunResult) {
    let conversions = &result.output.conversions;
    if conversions.is_empty() {
        return;
    }
    println!("Values degraded to missing: {}", conversions.total());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Reason"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (column, reason, count) in conversions.summary() {
        table.add_row(vec![
            Cell::new(column),
            Cell::new(reason),
            Cell::new(count)
                .fg(Color::Yellow)
                .add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
