//! Output assembly: header and one row per part, break columns sorted by quantity.

use crate::break_table::BreakTable;
use crate::error::Result;
use crate::models::BomTable;
use crate::state::ScrapeState;
use std::io::Write;

/// Header text of the key column in generated tables
pub const KEYS_COLUMN: &str = "Keys";

/// Break columns per distributor column: `(quantity, break index)` ascending
fn break_layout(table: &BomTable, state: &ScrapeState) -> Vec<Vec<(u64, usize)>> {
    (0..table.columns.len())
        .map(|column| {
            state
                .breaks(column)
                .map(BreakTable::sorted)
                .unwrap_or_default()
        })
        .collect()
}

fn header_row(table: &BomTable, layout: &[Vec<(u64, usize)>]) -> Vec<String> {
    let mut header = vec![KEYS_COLUMN.to_string()];
    for (column, breaks) in table.columns.iter().zip(layout) {
        let name = column.distributor.name();
        header.push(name.to_string());
        header.push(format!("{name}_Avail"));
        header.extend(breaks.iter().map(|(qty, _)| format!("{name}_{qty}")));
    }
    header
}

fn part_row(
    table: &BomTable,
    state: &ScrapeState,
    layout: &[Vec<(u64, usize)>],
    part_idx: usize,
) -> Vec<String> {
    let part = &table.parts[part_idx];
    let mut row = vec![part.key.clone()];
    for (column, breaks) in layout.iter().enumerate() {
        row.push(part.order_codes.get(column).cloned().unwrap_or_default());
        row.push(
            state
                .availability(part_idx, column)
                .map(|n| n.to_string())
                .unwrap_or_default(),
        );
        row.extend(breaks.iter().map(|&(_, idx)| {
            state
                .price_at_index(part_idx, column, idx)
                .unwrap_or_default()
                .to_string()
        }));
    }
    row
}

/// All output rows, header first
pub fn assemble(table: &BomTable, state: &ScrapeState) -> Vec<Vec<String>> {
    let layout = break_layout(table, state);
    let mut rows = Vec::with_capacity(table.parts.len() + 1);
    rows.push(header_row(table, &layout));
    rows.extend((0..table.parts.len()).map(|idx| part_row(table, state, &layout, idx)));
    rows
}

/// Writes the enriched table as tab-separated, newline-terminated records
pub fn write_table<W: Write>(writer: W, table: &BomTable, state: &ScrapeState) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for row in assemble(table, state) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
