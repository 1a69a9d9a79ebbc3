//! DigiKey: one product-page fetch per part.
//!
//! The page carries an availability marker and a two-column pricing table.
//! Scanning ends at the pricing table; anything after it is ignored.

use super::{cells, normalize_price, own_rows, parse_count, parse_quantity, text_of, Scraper};
use crate::config::Config;
use crate::fetch::Fetcher;
use crate::state::PartRecorder;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    static ref AVAILABILITY: Selector =
        Selector::parse("#quantityAvailable, #quantityavailable").expect("valid selector");
    static ref PRICING_TABLE: Selector =
        Selector::parse("table#pricing").expect("valid selector");
}

/// DigiKey product-page scraper
pub struct DigiKey;

/// What the product page yields, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
enum PageEvent {
    Availability(String),
    PriceRow { quantity: String, price: String },
}

/// Product lookup URL on the regional storefront
pub fn lookup_url(config: &Config, order_code: &str) -> String {
    format!(
        "{}/products/en?keywords={}",
        config.digikey_base_url,
        urlencoding::encode(order_code)
    )
}

impl Scraper for DigiKey {
    fn scrape(
        &self,
        fetcher: &dyn Fetcher,
        config: &Config,
        order_code: &str,
        out: &mut PartRecorder<'_>,
    ) {
        let url = lookup_url(config, order_code);
        let Some(page) = fetcher.get(&url) else {
            log::warn!("DigiKey: no page for {}", order_code);
            return;
        };
        let breaks = apply(&page_events(&page), order_code, out);
        log::debug!("DigiKey: {} break(s) for {}", breaks, order_code);
    }
}

fn page_events(page: &str) -> Vec<PageEvent> {
    let document = Html::parse_document(page);
    let mut events = Vec::new();

    for node in document.root_element().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };

        if AVAILABILITY.matches(&element) {
            events.push(PageEvent::Availability(text_of(element)));
        } else if PRICING_TABLE.matches(&element) {
            for row in own_rows(element) {
                if let [quantity, price] = cells(row).as_slice() {
                    events.push(PageEvent::PriceRow {
                        quantity: text_of(*quantity),
                        price: text_of(*price),
                    });
                }
            }
            break;
        }
    }

    events
}

/// Records the events, returning the number of price breaks stored
fn apply(events: &[PageEvent], order_code: &str, out: &mut PartRecorder<'_>) -> usize {
    let mut breaks = 0;
    for event in events {
        match event {
            PageEvent::Availability(text) => match parse_count(text) {
                Some(count) => out.set_availability(count),
                None => log::warn!(
                    "DigiKey: unreadable availability \"{}\" for {}",
                    text,
                    order_code
                ),
            },
            PageEvent::PriceRow { quantity, price } => {
                let (Some(qty), Some(price)) = (parse_quantity(quantity), normalize_price(price))
                else {
                    log::debug!("DigiKey: skipping row \"{}\" / \"{}\"", quantity, price);
                    continue;
                };
                out.record_break(qty, &price);
                breaks += 1;
            }
        }
    }
    breaks
}

#[cfg(test)]
#[path = "digikey_tests.rs"]
mod tests;
