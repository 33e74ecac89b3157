pub mod currency_freaks;
pub mod fallback;

pub use currency_freaks::CurrencyFreaksProvider;
pub use fallback::{FALLBACK_USD_RATES, fallback_rates};
