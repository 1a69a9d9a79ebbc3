//! Distributor scrapers
//!
//! Each distributor turns its page markup into a small sequence of typed
//! events, then applies the field-extraction rules to those events. Both
//! report through the same [`PartRecorder`] contract: an availability count
//! and any number of (quantity, price) breaks.

pub mod avnet;
pub mod digikey;
mod text;

pub use avnet::Avnet;
pub use digikey::DigiKey;
pub use text::{normalize_price, parse_count, parse_price_entry, parse_quantity};

use crate::config::Config;
use crate::fetch::Fetcher;
use crate::models::Distributor;
use crate::state::PartRecorder;
use scraper::ElementRef;

/// Scraping protocol of one distributor
pub trait Scraper {
    /// Look up `order_code` and record what was found.
    /// Misses leave `out` untouched; nothing here is fatal.
    fn scrape(
        &self,
        fetcher: &dyn Fetcher,
        config: &Config,
        order_code: &str,
        out: &mut PartRecorder<'_>,
    );
}

impl Distributor {
    pub fn scraper(&self) -> &'static dyn Scraper {
        match self {
            Distributor::DigiKey => &DigiKey,
            Distributor::Avnet => &Avnet,
        }
    }
}

/// Whitespace-collapsed text content of an element
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rows belonging to `table` itself, skipping rows of nested tables
pub(crate) fn own_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|e| e.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

/// Cells (`td`) directly under a row
pub(crate) fn cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "td")
        .collect()
}
