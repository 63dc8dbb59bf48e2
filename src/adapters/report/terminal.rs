//! Terminal Report
//!
//! Plain-text rendering for the CLI: notices, a table of every candidate,
//! the same table per potential tier, then a numbered detail block per
//! coin. Freshly listed coins are highlighted in bold red, or marked
//! with `*` when colour is off.

use std::io::Write;

use crate::domain::Candidate;
use crate::ports::report::{Notice, NoticeLevel, ReportError, ReportSink, ScreenReport};
use super::format::{hours, with_thousands};

const HIGHLIGHT_ON: &str = "\x1b[1;31m";
const HIGHLIGHT_OFF: &str = "\x1b[0m";
const FRESH_MARK: &str = "*";
const RULE: &str = "----------------------------------------------------------------";

const TABLE_HEADERS: [&str; 13] = [
    "ID",
    "Name",
    "Symbol",
    "Hours",
    "Market Cap",
    "24h Volume",
    "Liquidity",
    "Tier",
    "Twitter",
    "Reddit",
    "Facebook",
    "Telegram",
    "Contract",
];

/// Index of the hours column (the highlighted cell)
const HOURS_COLUMN: usize = 3;
/// Link and contract columns follow the tier
const TIER_COLUMN: usize = 7;

pub struct TerminalReport<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> TerminalReport<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_notices(&mut self, notices: &[Notice]) -> Result<(), ReportError> {
        for notice in notices {
            let tag = match notice.level {
                NoticeLevel::Info => "[info]",
                NoticeLevel::Warning => "[warn]",
                NoticeLevel::Error => "[error]",
            };
            writeln!(self.out, "{} {}", tag, notice.message)?;
        }
        Ok(())
    }

    fn highlight(&self, text: &str, fresh: bool) -> String {
        match (fresh, self.color) {
            (true, true) => format!("{}{}{}", HIGHLIGHT_ON, text, HIGHLIGHT_OFF),
            (true, false) => format!("{}{}", text, FRESH_MARK),
            (false, true) => text.to_string(),
            (false, false) => format!("{} ", text),
        }
    }

    fn write_table(&mut self, rows: &[&Candidate], highlight_hours: f64) -> Result<(), ReportError> {
        let cells: Vec<[String; 13]> = rows
            .iter()
            .map(|c| {
                let [twitter, reddit, facebook, telegram, contract] = c.metadata.display_fields();
                [
                    c.id.to_string(),
                    c.name.clone(),
                    c.symbol.clone(),
                    hours(c.hours_since_added),
                    with_thousands(c.market_cap),
                    with_thousands(c.volume_24h),
                    with_thousands(c.liquidity),
                    c.tier().to_string(),
                    twitter.to_string(),
                    reddit.to_string(),
                    facebook.to_string(),
                    telegram.to_string(),
                    contract.to_string(),
                ]
            })
            .collect();

        let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.chars().count()).collect();
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        // Text columns left-aligned, figures right-aligned
        let header: Vec<String> = TABLE_HEADERS
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let cell = pad(h, widths[i], i);
                if i == HOURS_COLUMN && !self.color { format!("{} ", cell) } else { cell }
            })
            .collect();
        writeln!(self.out, "{}", header.join("  "))?;

        for (row, candidate) in cells.iter().zip(rows) {
            let fresh = candidate.is_fresh(highlight_hours);
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let padded = pad(cell, widths[i], i);
                    if i == HOURS_COLUMN { self.highlight(&padded, fresh) } else { padded }
                })
                .collect();
            writeln!(self.out, "{}", line.join("  ").trim_end())?;
        }
        Ok(())
    }

    fn write_details(&mut self, report: &ScreenReport) -> Result<(), ReportError> {
        for (i, c) in report.candidates.iter().enumerate() {
            let fresh = report.is_highlighted(c);
            let [twitter, reddit, facebook, telegram, contract] = c.metadata.display_fields();

            let block = format!(
                "{}. {} ({})\n\
                 \x20  - Market Cap: {}\n\
                 \x20  - 24h Volume: {}\n\
                 \x20  - Hours Since Added: {}\n\
                 \x20  - Potential Level: {}\n\
                 \x20  - Twitter: {}\n\
                 \x20  - Reddit: {}\n\
                 \x20  - Facebook: {}\n\
                 \x20  - Telegram: {}\n\
                 \x20  - Contract: {}",
                i + 1,
                c.name,
                c.symbol,
                with_thousands(c.market_cap),
                with_thousands(c.volume_24h),
                hours(c.hours_since_added),
                c.tier(),
                twitter,
                reddit,
                facebook,
                telegram,
                contract,
            );

            match (fresh, self.color) {
                (true, true) => writeln!(self.out, "{}{}{}", HIGHLIGHT_ON, block, HIGHLIGHT_OFF)?,
                (true, false) => writeln!(self.out, "{} {}", FRESH_MARK, block)?,
                (false, _) => writeln!(self.out, "{}", block)?,
            }
        }
        Ok(())
    }
}

fn pad(text: &str, width: usize, column: usize) -> String {
    if column == 1 || column == 2 || column > TIER_COLUMN {
        format!("{:<width$}", text, width = width)
    } else {
        format!("{:>width$}", text, width = width)
    }
}

impl<W: Write> ReportSink for TerminalReport<W> {
    fn render(&mut self, report: &ScreenReport) -> Result<(), ReportError> {
        self.write_notices(&report.notices)?;
        writeln!(self.out)?;

        writeln!(self.out, "All screened coins")?;
        writeln!(self.out, "{}", RULE)?;
        let all: Vec<&Candidate> = report.candidates.iter().collect();
        self.write_table(&all, report.highlight_hours)?;

        writeln!(self.out)?;
        writeln!(self.out, "By potential tier")?;
        writeln!(self.out, "{}", RULE)?;
        for (tier, group) in report.tier_groups() {
            writeln!(self.out, "Potential tier {} ({} coins)", tier, group.len())?;
            self.write_table(&group, report.highlight_hours)?;
            writeln!(self.out)?;
        }

        writeln!(self.out, "Details")?;
        writeln!(self.out, "{}", RULE)?;
        self.write_details(report)?;

        if !self.color {
            writeln!(self.out)?;
            writeln!(
                self.out,
                "{} listed within the last {} hours",
                FRESH_MARK,
                hours(report.highlight_hours)
            )?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn render_notices(&mut self, notices: &[Notice]) -> Result<(), ReportError> {
        self.write_notices(notices)?;
        self.out.flush()?;
        Ok(())
    }
}
