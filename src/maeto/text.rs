//! Normalization of locale-formatted price and installment text.

use regex_lite::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Decimal amount with optional thousands separators and exactly two
/// fractional digits, in either separator convention ("1.234,56", "1,234.56").
static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}(?:[.,]\d{3})*[.,]\d{2}").unwrap());

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Extracts a price from locale-formatted text.
///
/// Thousands separators are stripped and the decimal separator normalized,
/// so `"R$ 1.234,56"` and `"R$ 1,234.56"` both yield `1234.56`. Returns
/// `0.0` when no amount is present; missing prices are routine, not errors.
pub fn parse_locale_price(text: &str) -> f64 {
    let Some(matched) = PRICE.find(text) else {
        debug!("no price pattern in {:?}", text);
        return 0.0;
    };

    // The last three characters are the decimal separator and the two
    // fractional digits; everything before it is digits and separators.
    let raw = matched.as_str();
    let (whole, fraction) = raw.split_at(raw.len() - 3);
    let mut normalized: String = whole.chars().filter(char::is_ascii_digit).collect();
    normalized.push('.');
    normalized.push_str(&fraction[1..]);

    match normalized.parse() {
        Ok(value) => value,
        Err(e) => {
            debug!("failed to parse price {:?}: {}", raw, e);
            0.0
        }
    }
}

/// Extracts the installment count from text like `"12x sem juros"`.
///
/// Takes the first run of digits; returns `0` when none is found.
pub fn parse_installment_count(text: &str) -> u32 {
    let Some(matched) = DIGITS.find(text) else {
        return 0;
    };

    matched.as_str().parse().unwrap_or_else(|e| {
        debug!("failed to parse installment count {:?}: {}", matched.as_str(), e);
        0
    })
}
