//! Terminal rendering for the command-line subcommands.

pub mod convert;
pub mod countries;
pub mod rates;
pub mod setup;
pub mod ui;
