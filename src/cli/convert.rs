use super::ui;
use crate::conversion::{BudgetConversion, convert_budget};
use crate::core::budget::{Budget, Category};
use crate::core::country::symbol_for;
use crate::core::currency::RateSource;
use crate::rates::RateProvider;
use anyhow::Result;
use comfy_table::Cell;

impl BudgetConversion {
    pub fn display_as_table(&self) -> String {
        let base_symbol = symbol_for(&self.base_currency);
        let target_symbol = symbol_for(&self.target_currency);
        let original = &self.original_budget.budget;
        let converted = &self.converted_budget.budget;

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Category"),
            ui::header_cell(&format!("Budget ({})", self.base_currency)),
            ui::header_cell(&format!("Converted ({})", self.target_currency)),
        ]);

        for category in Category::ALL {
            table.add_row(vec![
                Cell::new(category.label()),
                ui::amount_cell(base_symbol, original.amount(category)),
                ui::amount_cell(target_symbol, converted.amount(category)),
            ]);
        }

        // Keys outside the known categories are shown but not totalled
        for (key, amount) in &original.amounts {
            if key.parse::<Category>().is_ok() {
                continue;
            }
            let converted_amount = converted.amounts.get(key).copied().unwrap_or(0.0);
            table.add_row(vec![
                Cell::new(ui::style_text(key, ui::StyleType::Subtle)),
                ui::amount_cell(base_symbol, *amount),
                ui::amount_cell(target_symbol, converted_amount),
            ]);
        }

        table.add_row(vec![
            Cell::new(ui::style_text("Total", ui::StyleType::TotalLabel)),
            ui::total_cell(base_symbol, self.original_budget.total),
            ui::total_cell(target_symbol, self.converted_budget.total),
        ]);

        let mut output = format!(
            "Trip budget in {}\n\n",
            ui::style_text(&self.target_currency, ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\nExchange rate: 1 {} = {:.4} {}",
            self.base_currency, self.exchange_rate, self.target_currency
        ));
        if self.rate_source == RateSource::Fallback {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(
                    "Live rates unavailable, using built-in fallback rates",
                    ui::StyleType::Warning
                )
            ));
        }

        output
    }
}

pub async fn run(provider: &RateProvider, budget: Budget, target_currency: &str) -> Result<()> {
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let result = convert_budget(provider, budget, target_currency).await;
    spinner.finish_and_clear();

    let conversion = result?;
    println!("{}", conversion.display_as_table());
    Ok(())
}
