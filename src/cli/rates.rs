use super::ui;
use crate::core::country::find_by_currency;
use crate::core::currency::{RateSource, Rates};
use crate::rates::RateProvider;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

pub fn display_rates(base: &str, rates: &Rates) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Country"),
        ui::header_cell(&format!("Per 1 {base}")),
    ]);

    for (currency, rate) in rates.table() {
        let country = find_by_currency(currency).map_or("", |c| c.name);
        table.add_row(vec![
            Cell::new(currency),
            Cell::new(country),
            Cell::new(format!("{rate:.4}")).set_alignment(CellAlignment::Right),
        ]);
    }

    let mut output = format!(
        "Exchange rates for {}\n\n",
        ui::style_text(base, ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    if rates.source() == RateSource::Fallback {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                "Live rates unavailable, using built-in fallback rates",
                ui::StyleType::Warning
            )
        ));
    }
    output
}

pub async fn run(provider: &RateProvider, base: &str) -> Result<()> {
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let rates = provider.fetch_rates(base).await;
    spinner.finish_and_clear();

    println!("{}", display_rates(base, &rates));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::RateTable;

    #[test]
    fn test_display_live_rates() {
        let rates = Rates::Live(RateTable::from([
            ("EUR".to_string(), 0.9234),
            ("SEK".to_string(), 10.5),
        ]));
        let output = display_rates("USD", &rates);

        assert!(output.contains("Per 1 USD"));
        assert!(output.contains("Eurozone"));
        assert!(output.contains("0.9234"));
        assert!(output.contains("SEK"));
        assert!(output.contains("10.5000"));
        assert!(!output.contains("fallback"));
    }

    #[tokio::test]
    async fn test_display_fallback_rates() {
        let rates = RateProvider::fallback_only().fetch_rates("PLN").await;
        let output = display_rates("PLN", &rates);

        assert!(output.contains("Poland"));
        assert!(output.contains("1.0000"));
        assert!(output.contains("0.2513"));
        assert!(output.contains("fallback rates"));
    }
}
