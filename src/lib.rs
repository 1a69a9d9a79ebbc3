//! BOM Prices - distributor stock and price-break enrichment
//!
//! Reads a tab-separated bill of materials whose columns hold distributor
//! order codes, scrapes each distributor's catalog pages for availability
//! and quantity price breaks, and writes the table back with the results
//! appended per distributor.

pub mod break_table;
pub mod config;
pub mod enrich;
pub mod error;
pub mod fetch;
pub mod io;
pub mod models;
pub mod output;
pub mod scrape;
pub mod state;
pub mod table;

pub use break_table::BreakTable;
pub use config::{Config, Currency};
pub use enrich::{enrich, run};
pub use error::{BomError, Result};
pub use fetch::{Fetch, Fetcher, HttpFetcher};
pub use models::{BomTable, Distributor, DistributorColumn, Part};
pub use output::write_table;
pub use scrape::Scraper;
pub use state::{PartRecorder, ScrapeState};
pub use table::load_table;
