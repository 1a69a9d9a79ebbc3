//! Avnet: search, pick subcategories, re-fetch in the quoted currency, scan rows.
//!
//! All requests for one part share a cookie session. The first row whose
//! part number matches and whose availability parses wins; breaks seen in
//! that row are committed together with the availability.

use super::{own_rows, parse_count, parse_price_entry, text_of, Scraper};
use crate::config::{Config, Currency};
use crate::fetch::{Fetch, Fetcher};
use crate::state::PartRecorder;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const NO_STOCK: &str = "no stock";
const PRICE_STYLE: &str = "white-space:nowrap";
const AVAILABILITY_STYLE: &str = "font-weight:bold";

lazy_static! {
    static ref RESULTS_TABLE: Selector =
        Selector::parse("table#results").expect("valid selector");
    static ref SUBCATEGORY_LINK: Selector =
        Selector::parse("a.medium[href]").expect("valid selector");
    /// Both wordings the storefront uses for region-restricted offers
    static ref REGION_MARKER: Regex =
        Regex::new(r"(?i)not\s+available\s+in\s+(?:this|your)\s+region")
            .expect("valid region regex");
}

/// Avnet search-and-browse scraper
pub struct Avnet;

/// Row-level events of a category page, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowEvent {
    RowStart,
    PartNumber(String),
    RegionBlocked,
    Prices(Vec<String>),
    Availability(String),
    RowEnd,
}

/// Keyword search URL for an order code
pub fn search_url(config: &Config, order_code: &str) -> String {
    format!(
        "{}/search?term={}",
        config.avnet_base_url,
        urlencoding::encode(order_code)
    )
}

impl Scraper for Avnet {
    fn scrape(
        &self,
        fetcher: &dyn Fetcher,
        config: &Config,
        order_code: &str,
        out: &mut PartRecorder<'_>,
    ) {
        let session = fetcher.session();
        if find_offer(session.as_ref(), config, order_code, out) {
            log::debug!("Avnet: matched {}", order_code);
        } else {
            log::warn!("Avnet: no matching offer for {}", order_code);
        }
    }
}

fn find_offer(
    session: &dyn Fetch,
    config: &Config,
    order_code: &str,
    out: &mut PartRecorder<'_>,
) -> bool {
    let search = search_url(config, order_code);
    let Some(page) = session.get(&search) else {
        return false;
    };

    let candidates = subcategories(&page, &search);
    log::debug!(
        "Avnet: {} candidate page(s) for {}",
        candidates.len(),
        order_code
    );

    for candidate in candidates {
        let Some(url) = with_currency(&candidate, config.currency) else {
            log::debug!("Avnet: skipping unparsable link {}", candidate);
            continue;
        };
        let Some(page) = session.get(&url) else {
            continue;
        };
        if apply(&row_events(&page), order_code, out) {
            return true;
        }
    }
    false
}

/// Pages to scan: the search page itself when it already lists results,
/// otherwise every subcategory it links to.
fn subcategories(page: &str, search_url: &str) -> Vec<String> {
    let document = Html::parse_document(page);
    if document.select(&RESULTS_TABLE).next().is_some() {
        return vec![search_url.to_string()];
    }

    let Ok(base) = Url::parse(search_url) else {
        return Vec::new();
    };
    let mut links: Vec<String> = Vec::new();
    for anchor in document.select(&SUBCATEGORY_LINK) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        match base.join(href) {
            Ok(url) => {
                let url = url.to_string();
                if !links.contains(&url) {
                    links.push(url);
                }
            }
            Err(e) => log::debug!("Avnet: bad subcategory link {}: {}", href, e),
        }
    }
    links
}

/// Applies the currency preference to a page URL
fn with_currency(url: &str, currency: Currency) -> Option<String> {
    let mut url = Url::parse(url).ok()?;
    url.query_pairs_mut().append_pair("currency", currency.code());
    Some(url.to_string())
}

fn row_events(page: &str) -> Vec<RowEvent> {
    let document = Html::parse_document(page);
    let Some(table) = document.select(&RESULTS_TABLE).next() else {
        return Vec::new();
    };

    let mut events = Vec::new();
    for row in own_rows(table) {
        events.push(RowEvent::RowStart);
        if REGION_MARKER.is_match(&text_of(row)) {
            events.push(RowEvent::RegionBlocked);
        }
        for node in row.descendants().skip(1) {
            let Some(cell) = ElementRef::wrap(node) else {
                continue;
            };
            if cell.value().name() != "td" {
                continue;
            }
            if cell.value().classes().any(|c| c == "partNumber") {
                events.push(RowEvent::PartNumber(text_of(cell)));
            } else if is_styled(cell, "right", PRICE_STYLE) {
                events.push(RowEvent::Prices(price_entries(cell)));
            } else if is_styled(cell, "center", AVAILABILITY_STYLE) {
                events.push(RowEvent::Availability(text_of(cell)));
            }
        }
        events.push(RowEvent::RowEnd);
    }
    events
}

/// Alignment must match exactly; the inline style only has to contain
/// `style`, ignoring case and whitespace.
fn is_styled(cell: ElementRef<'_>, align: &str, style: &str) -> bool {
    let element = cell.value();
    let aligned = element
        .attr("align")
        .is_some_and(|a| a.eq_ignore_ascii_case(align));
    let styled = element.attr("style").is_some_and(|s| {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        compact.to_lowercase().contains(style)
    });
    aligned && styled
}

/// Text of a price cell split at `<br>`
fn price_entries(cell: ElementRef<'_>) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = String::new();
    for node in cell.descendants().skip(1) {
        if let Some(text) = node.value().as_text() {
            current.push_str(text);
            current.push(' ');
        } else if node.value().as_element().is_some_and(|e| e.name() == "br") {
            push_entry(&mut entries, &current);
            current.clear();
        }
    }
    push_entry(&mut entries, &current);
    entries
}

fn push_entry(entries: &mut Vec<String>, raw: &str) {
    let entry = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !entry.is_empty() {
        entries.push(entry);
    }
}

fn parse_availability(text: &str) -> Option<u64> {
    if text.to_lowercase().contains(NO_STOCK) {
        return Some(0);
    }
    parse_count(text)
}

#[derive(Default)]
struct RowState {
    matched: bool,
    abandoned: bool,
    staged: Vec<(u64, String)>,
}

/// Runs the row rules over a page; `true` once an offer has been recorded
fn apply(events: &[RowEvent], order_code: &str, out: &mut PartRecorder<'_>) -> bool {
    let mut row = RowState::default();
    for event in events {
        match event {
            RowEvent::RowStart => row = RowState::default(),
            RowEvent::RowEnd => {}
            _ if row.abandoned => {}
            RowEvent::PartNumber(text) => {
                if text.trim() == order_code {
                    row.matched = true;
                } else {
                    row.abandoned = true;
                }
            }
            RowEvent::RegionBlocked => {
                log::debug!("Avnet: row for {} not offered in this region", order_code);
                row.abandoned = true;
            }
            RowEvent::Prices(entries) => {
                row.staged = entries
                    .iter()
                    .filter_map(|entry| parse_price_entry(entry))
                    .collect();
            }
            RowEvent::Availability(text) if row.matched => match parse_availability(text) {
                Some(count) => {
                    out.set_availability(count);
                    for (quantity, price) in &row.staged {
                        out.record_break(*quantity, price);
                    }
                    return true;
                }
                None => log::warn!(
                    "Avnet: unreadable availability \"{}\" for {}",
                    text,
                    order_code
                ),
            },
            RowEvent::Availability(_) => {}
        }
    }
    false
}

#[cfg(test)]
#[path = "avnet_tests.rs"]
mod tests;
