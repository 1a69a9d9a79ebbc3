//! Aggregate scrape results for one run.
//!
//! Scrapers never touch this directly; they write through a [`PartRecorder`]
//! scoped to one (part, distributor column) pair. Every slot is write-once.

use crate::break_table::BreakTable;
use std::collections::HashMap;

/// Availability, break registry and prices gathered during a run
#[derive(Debug, Clone, Default)]
pub struct ScrapeState {
    breaks: Vec<BreakTable>,
    /// Keyed by (part index, distributor column)
    availability: HashMap<(usize, usize), u64>,
    /// Keyed by (part index, distributor column, break index)
    prices: HashMap<(usize, usize, usize), String>,
}

impl ScrapeState {
    /// Empty state for a table with `columns` distributor columns
    pub fn new(columns: usize) -> Self {
        Self {
            breaks: vec![BreakTable::new(); columns],
            availability: HashMap::new(),
            prices: HashMap::new(),
        }
    }

    /// Writer for one part and distributor column
    pub fn recorder(&mut self, part: usize, column: usize) -> PartRecorder<'_> {
        if self.breaks.len() <= column {
            self.breaks.resize_with(column + 1, BreakTable::new);
        }
        PartRecorder {
            state: self,
            part,
            column,
        }
    }

    /// Break registry of a distributor column
    pub fn breaks(&self, column: usize) -> Option<&BreakTable> {
        self.breaks.get(column)
    }

    pub fn availability(&self, part: usize, column: usize) -> Option<u64> {
        self.availability.get(&(part, column)).copied()
    }

    /// Price at a registered break quantity
    #[cfg(test)]
    pub(crate) fn price(&self, part: usize, column: usize, quantity: u64) -> Option<&str> {
        let idx = self.breaks.get(column)?.get(quantity)?;
        self.price_at_index(part, column, idx)
    }

    pub(crate) fn price_at_index(&self, part: usize, column: usize, idx: usize) -> Option<&str> {
        self.prices.get(&(part, column, idx)).map(String::as_str)
    }

    /// Number of parts with a recorded availability for a column
    pub fn available_count(&self, column: usize) -> usize {
        self.availability.keys().filter(|(_, c)| *c == column).count()
    }
}

/// Write access to the slots of one (part, distributor column) pair
pub struct PartRecorder<'a> {
    state: &'a mut ScrapeState,
    part: usize,
    column: usize,
}

impl PartRecorder<'_> {
    /// Store on-hand stock; a second value for the same slot is ignored
    pub fn set_availability(&mut self, quantity: u64) {
        let key = (self.part, self.column);
        if let Some(existing) = self.state.availability.get(&key) {
            log::debug!(
                "Availability already recorded ({}), ignoring {}",
                existing,
                quantity
            );
            return;
        }
        self.state.availability.insert(key, quantity);
    }

    /// Register `quantity` for this distributor and store its price
    pub fn record_break(&mut self, quantity: u64, price: &str) {
        let idx = self.state.breaks[self.column].find_or_create(quantity);
        self.state
            .prices
            .entry((self.part, self.column, idx))
            .or_insert_with(|| price.to_string());
    }
}
