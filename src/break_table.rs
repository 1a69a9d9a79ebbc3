//! Per-distributor registry of price-break quantities.
//!
//! Quantities get an index in discovery order; that index keys the stored
//! prices. Output order is computed once at the end by sorting quantities
//! numerically.

use std::collections::HashMap;

/// Break quantities registered for one distributor
#[derive(Debug, Clone, Default)]
pub struct BreakTable {
    index: HashMap<u64, usize>,
    quantities: Vec<u64>,
}

impl BreakTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `quantity`, registering it at the next index if unseen
    pub fn find_or_create(&mut self, quantity: u64) -> usize {
        if let Some(&idx) = self.index.get(&quantity) {
            return idx;
        }
        let idx = self.quantities.len();
        self.quantities.push(quantity);
        self.index.insert(quantity, idx);
        log::debug!("Registered break quantity {} at index {}", quantity, idx);
        idx
    }

    /// Index of an already registered quantity
    #[cfg(test)]
    pub(crate) fn get(&self, quantity: u64) -> Option<usize> {
        self.index.get(&quantity).copied()
    }

    /// `(quantity, index)` pairs in ascending numeric quantity order
    pub fn sorted(&self) -> Vec<(u64, usize)> {
        let mut columns: Vec<(u64, usize)> = self
            .quantities
            .iter()
            .enumerate()
            .map(|(idx, &qty)| (qty, idx))
            .collect();
        columns.sort_unstable();
        columns
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}
