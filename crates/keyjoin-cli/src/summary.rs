use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{MergeResult, SourceSummary};

pub fn print_summary(result: &MergeResult) {
    println!("{}", source_table(&result.sources));
    if result.eligible == 0 {
        eprintln!("No key is shared across the input files; nothing written.");
        return;
    }
    if let Some(seed) = result.seed {
        println!("Seed: {seed}");
    }
    println!("{}", completion_line(result));
}

pub fn print_inspect(summaries: &[SourceSummary]) {
    println!("{}", source_table(summaries));
}

/// One-line outcome of a merge run.
pub fn completion_line(result: &MergeResult) -> String {
    if result.wrote_output {
        format!(
            "Merged {} files. Eligible keys: {}. Wrote {} rows to {}",
            result.sources.len(),
            result.eligible,
            result.written,
            result.output.display()
        )
    } else {
        format!(
            "Dry run over {} files. Eligible keys: {}. Would write {} rows to {}",
            result.sources.len(),
            result.eligible,
            result.written,
            result.output.display()
        )
    }
}

fn source_table(summaries: &[SourceSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Role"),
        header_cell("Delimiter"),
        header_cell("Key column"),
        header_cell("Columns"),
        header_cell("Rows"),
        header_cell("Skipped"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            role_cell(summary),
            Cell::new(summary.delimiter),
            Cell::new(&summary.key_column),
            Cell::new(summary.columns),
            optional_cell(summary.rows),
            skipped_cell(summary.skipped),
        ]);
    }
    table
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

fn role_cell(summary: &SourceSummary) -> Cell {
    match summary.group {
        Some(_) => Cell::new(summary.role()).fg(Color::Yellow),
        None => Cell::new(summary.role()),
    }
}

fn optional_cell(value: Option<usize>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn skipped_cell(value: Option<usize>) -> Cell {
    match value {
        Some(value) if value > 0 => Cell::new(value).fg(Color::Red),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
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

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use keyjoin_ingest::Delimiter;

    use super::*;

    fn result(wrote_output: bool) -> MergeResult {
        MergeResult {
            output: PathBuf::from("merged.csv"),
            wrote_output,
            sources: vec![SourceSummary {
                name: "A".to_string(),
                group: None,
                delimiter: Delimiter::Comma,
                key_column: "id".to_string(),
                columns: 2,
                rows: Some(2),
                skipped: Some(0),
            }],
            eligible: 2,
            requested: 1,
            written: 1,
            seed: Some(4),
        }
    }

    #[test]
    fn test_completion_line() {
        assert_eq!(
            completion_line(&result(true)),
            "Merged 1 files. Eligible keys: 2. Wrote 1 rows to merged.csv"
        );
        assert_eq!(
            completion_line(&result(false)),
            "Dry run over 1 files. Eligible keys: 2. Would write 1 rows to merged.csv"
        );
    }

    #[test]
    fn test_source_table_lists_sources() {
        let rendered = source_table(&result(true).sources).to_string();
        assert!(rendered.contains("Key column"));
        assert!(rendered.contains("required"));
    }
}
