//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - CoinMarketCap: listings and coin info over REST
//! - Report: terminal, JSON and CSV sinks
//! - CLI: Command-line interface handlers

pub mod cli;
pub mod coinmarketcap;
pub mod report;

pub use cli::CliApp;
pub use coinmarketcap::CoinMarketCapClient;
pub use report::{CsvExporter, JsonReport, TerminalReport};
