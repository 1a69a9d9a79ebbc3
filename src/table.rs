//! Tab-separated BOM loading and header validation.

use crate::error::{BomError, Result};
use crate::models::{BomTable, Distributor, DistributorColumn, Part};
use std::io::{BufRead, BufReader, Read};

/// Header text required in the first column
pub const KEY_COLUMN: &str = "Key";

/// Splits one line of the spreadsheet's TSV export; quotes are literal text
fn split_fields(line: &str) -> Vec<&str> {
    line.split('\t').collect()
}

/// Reads and validates a BOM table.
///
/// The first header cell must be `Key`. Other header cells naming a known
/// distributor become order-code columns; a repeated distributor is an
/// error and any other column is dropped.
///
/// Every line after the header is a part, blank lines included, so the
/// output keeps the input's row count and order.
pub fn load_table<R: Read>(reader: R) -> Result<BomTable> {
    let mut lines = BufReader::new(reader).lines();

    let header_line = match lines.next() {
        Some(line) => line?,
        None => {
            return Err(BomError::MissingKeyColumn {
                found: String::new(),
            })
        }
    };
    let header = split_fields(&header_line);

    let first = header[0];
    if first != KEY_COLUMN {
        return Err(BomError::MissingKeyColumn {
            found: first.to_string(),
        });
    }

    let mut columns: Vec<DistributorColumn> = Vec::new();
    for (source_index, cell) in header.iter().enumerate().skip(1) {
        let Some(distributor) = Distributor::from_header(cell) else {
            log::debug!("Dropping column {} (\"{}\")", source_index + 1, cell);
            continue;
        };
        if columns.iter().any(|c| c.distributor == distributor) {
            return Err(BomError::DuplicateDistributorColumn(cell.to_string()));
        }
        columns.push(DistributorColumn {
            distributor,
            source_index,
        });
    }

    let mut parts = Vec::new();
    for line in lines {
        let line = line?;
        let record = split_fields(&line);
        let key = record[0].to_string();
        let order_codes = columns
            .iter()
            .map(|c| record.get(c.source_index).copied().unwrap_or_default().to_string())
            .collect();
        parts.push(Part { key, order_codes });
    }

    log::info!(
        "Loaded {} part(s) with distributor column(s): {}",
        parts.len(),
        columns
            .iter()
            .map(|c| c.distributor.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(BomTable { columns, parts })
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
