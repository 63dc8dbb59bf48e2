//! CSV Export
//!
//! Writes the screened candidates to a CSV file, one row per coin in
//! report order. An existing file at the path is overwritten.

use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::Candidate;
use crate::ports::report::{Notice, ReportError, ReportSink, ScreenReport};
use super::format::hours;

/// Column order of the export
pub const CSV_HEADER: [&str; 14] = [
    "ID",
    "Name",
    "Symbol",
    "Date Added",
    "HoursSinceAdded",
    "Market Cap",
    "24h Volume",
    "Liquidity(approx)",
    "Twitter",
    "Reddit",
    "Facebook",
    "Telegram",
    "Contract",
    "Potential Level",
];

/// Write candidates as CSV with a header row
pub fn write_csv<W: Write>(candidates: &[Candidate], writer: W) -> Result<(), ReportError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for c in candidates {
        let [twitter, reddit, facebook, telegram, contract] = c.metadata.display_fields();
        let record: [String; 14] = [
            c.id.to_string(),
            c.name.clone(),
            c.symbol.clone(),
            c.date_added.clone(),
            hours(c.hours_since_added),
            float_cell(c.market_cap),
            float_cell(c.volume_24h),
            float_cell(c.liquidity),
            twitter.to_string(),
            reddit.to_string(),
            facebook.to_string(),
            telegram.to_string(),
            contract.to_string(),
            c.tier().to_string(),
        ];
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Float column value; whole numbers keep a trailing `.0`
fn float_cell(value: f64) -> String {
    format!("{:?}", value)
}

/// Report sink that saves candidates to a file
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for CsvExporter {
    fn render(&mut self, report: &ScreenReport) -> Result<(), ReportError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        write_csv(&report.candidates, file)?;
        tracing::info!(
            "Exported {} candidates to {}",
            report.candidates.len(),
            self.path.display()
        );
        Ok(())
    }

    fn render_notices(&mut self, _notices: &[Notice]) -> Result<(), ReportError> {
        Ok(())
    }
}
