//! Report Adapters
//!
//! `ReportSink` implementations:
//! - `TerminalReport`: tables and detail blocks for humans
//! - `JsonReport`: pretty JSON for scripting
//! - `CsvExporter`: file export of the candidate set

mod csv_export;
mod format;
mod json;
mod terminal;

pub use csv_export::{write_csv, CsvExporter, CSV_HEADER};
pub use format::{hours, with_thousands};
pub use json::JsonReport;
pub use terminal::TerminalReport;
