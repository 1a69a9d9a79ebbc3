//! Field normalisation shared by the distributor scrapers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// First integer in a text, allowing thousands separators inside it
    static ref COUNT: Regex = Regex::new(r"\d(?:[\d,.]*\d)?").expect("valid count regex");
    /// "<qty>+ <price>" or "<qty>-<qty> <price>", separator optionally followed by ':'
    static ref PRICE_ENTRY: Regex =
        Regex::new(r"^(?P<qty>\d[\d,.]*)\s*(?:\+|[-\x{2013}]\s*\d[\d,.]*)\s*:?\s*(?P<price>.*)$")
            .expect("valid price entry regex");
}

/// Extracts the first integer from marked-up count text (e.g., "1,234 In Stock" -> 1234)
pub fn parse_count(text: &str) -> Option<u64> {
    let digits: String = COUNT
        .find(text)?
        .as_str()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Parses a break quantity cell (e.g., "1,000" or "250+") into a positive integer
pub fn parse_quantity(text: &str) -> Option<u64> {
    let cleaned: String = text
        .trim()
        .trim_end_matches('+')
        .chars()
        .filter(|c| !matches!(c, ',' | '.') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok().filter(|&qty| qty > 0)
}

/// Strips currency symbols and normalises the decimal separator to '.'.
///
/// A lone ',' is a decimal comma ("0,45" -> "0.45"). With both separators
/// present the later one is the decimal point. A separator repeated more
/// than once only groups thousands.
pub fn normalize_price(text: &str) -> Option<String> {
    let trimmed = text
        .trim_matches(|c: char| !(c.is_ascii_digit() || c == ',' || c == '.'))
        .trim_end_matches(['.', ',']);
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

    if !compact.chars().any(|c| c.is_ascii_digit())
        || !compact
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.')
    {
        return None;
    }

    let commas = compact.matches(',').count();
    let dots = compact.matches('.').count();
    let normalized = match (commas, dots) {
        (0, 0) | (0, 1) => compact,
        (1, 0) => compact.replace(',', "."),
        (0, _) => compact.replace('.', ""),
        (_, 0) => compact.replace(',', ""),
        _ => {
            let last_comma = compact.rfind(',').unwrap_or(0);
            let last_dot = compact.rfind('.').unwrap_or(0);
            if last_comma > last_dot {
                compact.replace('.', "").replace(',', ".")
            } else {
                compact.replace(',', "")
            }
        }
    };
    Some(normalized)
}

/// Splits a price entry into its break quantity and price.
///
/// Range entries ("10-99 $0.40") and open-ended entries ("100+ $0.35")
/// break at their lower bound; a bare price is the single-unit price.
pub fn parse_price_entry(entry: &str) -> Option<(u64, String)> {
    let entry = entry.trim();
    if entry.is_empty() {
        return None;
    }
    match PRICE_ENTRY.captures(entry) {
        Some(caps) => {
            let quantity = parse_quantity(&caps["qty"])?;
            let price = normalize_price(&caps["price"])?;
            Some((quantity, price))
        }
        None => normalize_price(entry).map(|price| (1, price)),
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
