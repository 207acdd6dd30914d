//! Plain-text rendering of the filtered table and prompt composition.
use engine::{DATE_FORMAT, EntryColumn, EntryRecord};

/// Line placed before the table in every prompt.
pub const PREAMBLE: &str = "Below is the table with indicators:";

const COLUMN_GAP: &str = "  ";

/// Render `records` as a fixed-width table without an index column.
///
/// Every column is right-aligned to its widest cell, header included.
pub fn render_table(records: &[EntryRecord]) -> String {
    let header: Vec<String> = EntryColumn::ALL
        .iter()
        .map(|column| column.name().to_string())
        .collect();
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|record| {
            [
                record.code_scale.clone(),
                record.code_project.clone(),
                record.entry_date.format(DATE_FORMAT).to_string(),
                format!("{:.2}", record.entered_amount),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_line(&header, &widths));
    for row in &rows {
        lines.push(render_line(row, &widths));
    }
    lines.join("\n")
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:>width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
}

/// Preamble, table and question, separated by blank lines.
pub fn compose_prompt(question: &str, records: &[EntryRecord]) -> String {
    format!("{PREAMBLE}\n\n{}\n\n{question}", render_table(records))
}
