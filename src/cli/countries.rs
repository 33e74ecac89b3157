use super::ui;
use crate::core::country::COUNTRIES;
use comfy_table::Cell;

pub fn display_countries() -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Country"),
        ui::header_cell("Currency"),
        ui::header_cell("Name"),
        ui::header_cell("Symbol"),
    ]);

    for country in &COUNTRIES {
        table.add_row(vec![
            Cell::new(country.id),
            Cell::new(country.name),
            Cell::new(country.currency),
            Cell::new(country.currency_name),
            Cell::new(country.symbol),
        ]);
    }
    table.to_string()
}

pub fn run() {
    println!("{}", display_countries());
}
