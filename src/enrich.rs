//! Orchestration: scrape every (part, distributor) pair, then emit the table.

use crate::config::Config;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::models::BomTable;
use crate::output::write_table;
use crate::state::ScrapeState;
use crate::table::load_table;
use std::io::{Read, Write};

/// Scrapes all parts sequentially, one distributor after another per part.
/// Parts without an order code for a distributor are skipped for it.
pub fn enrich(table: &BomTable, fetcher: &dyn Fetcher, config: &Config) -> ScrapeState {
    let mut state = ScrapeState::new(table.columns.len());
    let total = table.parts.len();

    for (part_idx, part) in table.parts.iter().enumerate() {
        log::info!("[{}/{}] {}", part_idx + 1, total, part.key);
        for (column, dist) in table.columns.iter().enumerate() {
            let Some(order_code) = part.order_code(column) else {
                continue;
            };
            log::debug!("{}: looking up {}", dist.distributor.name(), order_code);
            dist.distributor.scraper().scrape(
                fetcher,
                config,
                order_code,
                &mut state.recorder(part_idx, column),
            );
        }
    }

    for (column, dist) in table.columns.iter().enumerate() {
        log::info!(
            "{}: availability for {} part(s), {} price break column(s)",
            dist.distributor.name(),
            state.available_count(column),
            state.breaks(column).map_or(0, |b| b.len())
        );
    }

    state
}

/// Full pipeline: load and validate `input`, scrape, then write to `output`.
/// Nothing is fetched or written when validation fails.
pub fn run<R: Read, W: Write>(
    input: R,
    output: W,
    fetcher: &dyn Fetcher,
    config: &Config,
) -> Result<()> {
    let table = load_table(input)?;
    let state = enrich(&table, fetcher, config);
    write_table(output, &table, &state)
}

#[cfg(test)]
#[path = "enrich_tests.rs"]
mod tests;
