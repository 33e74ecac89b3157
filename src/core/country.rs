//! Built-in reference data for the destinations a budget can be converted for.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: &'static str,
    pub name: &'static str,
    pub currency: &'static str,
    pub currency_name: &'static str,
    pub symbol: &'static str,
}

const fn country(
    id: &'static str,
    name: &'static str,
    currency: &'static str,
    currency_name: &'static str,
    symbol: &'static str,
) -> Country {
    Country {
        id,
        name,
        currency,
        currency_name,
        symbol,
    }
}

pub static COUNTRIES: [Country; 13] = [
    country("USA", "United States", "USD", "US Dollar", "$"),
    country("POL", "Poland", "PLN", "Polish Złoty", "zł"),
    country("GBR", "United Kingdom", "GBP", "British Pound", "£"),
    country("EU", "Eurozone", "EUR", "Euro", "€"),
    country("JPN", "Japan", "JPY", "Japanese Yen", "¥"),
    country("AUS", "Australia", "AUD", "Australian Dollar", "A$"),
    country("CAN", "Canada", "CAD", "Canadian Dollar", "C$"),
    country("CHE", "Switzerland", "CHF", "Swiss Franc", "CHF"),
    country("CHN", "China", "CNY", "Chinese Yuan", "元"),
    country("BRA", "Brazil", "BRL", "Brazilian Real", "R$"),
    country("IND", "India", "INR", "Indian Rupee", "₹"),
    country("MEX", "Mexico", "MXN", "Mexican Peso", "$"),
    country("THA", "Thailand", "THB", "Thai Baht", "฿"),
];

/// First country using the given currency code.
pub fn find_by_currency(currency: &str) -> Option<&'static Country> {
    COUNTRIES
        .iter()
        .find(|c| c.currency.eq_ignore_ascii_case(currency))
}

/// Display symbol for a currency, falling back to the code itself.
pub fn symbol_for(currency: &str) -> &str {
    find_by_currency(currency).map_or(currency, |c| c.symbol)
}
