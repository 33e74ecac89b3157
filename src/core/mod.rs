//! Core business logic abstractions

pub mod budget;
pub mod config;
pub mod country;
pub mod currency;
pub mod log;

// Re-export main types for cleaner imports
pub use budget::{Budget, BudgetSummary, Category};
pub use country::{COUNTRIES, Country};
pub use currency::{ExchangeRateProvider, RateSource, RateTable, Rates};
