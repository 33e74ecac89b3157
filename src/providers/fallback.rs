//! Static rates served when the live service cannot be used.

use crate::core::currency::RateTable;

/// Units of each currency per one US dollar.
pub const FALLBACK_USD_RATES: [(&str, f64); 13] = [
    ("USD", 1.0),
    ("PLN", 3.98),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("JPY", 151.4),
    ("AUD", 1.52),
    ("CAD", 1.35),
    ("CHF", 0.90),
    ("CNY", 7.23),
    ("BRL", 5.05),
    ("INR", 83.3),
    ("MXN", 16.5),
    ("THB", 36.4),
];

/// The fallback table rescaled so that `base` maps to 1.0.
///
/// A base missing from the table leaves the dollar-based rates untouched.
pub fn fallback_rates(base: &str) -> RateTable {
    let base_rate = FALLBACK_USD_RATES
        .iter()
        .find(|(code, _)| *code == base)
        .map_or(1.0, |(_, rate)| *rate);

    FALLBACK_USD_RATES
        .iter()
        .map(|(code, rate)| (code.to_string(), rate / base_rate))
        .collect()
}
