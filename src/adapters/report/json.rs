//! JSON Report
//!
//! Machine-readable output of a screen for piping into other tools.

use serde::Serialize;
use std::io::Write;

use crate::domain::Candidate;
use crate::ports::report::{Notice, ReportError, ReportSink, ScreenReport};

pub struct JsonReport<W: Write> {
    out: W,
}

#[derive(Serialize)]
struct NoticesOnly<'a> {
    candidates: &'a [Candidate],
    notices: &'a [Notice],
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonReport<W> {
    fn render(&mut self, report: &ScreenReport) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut self.out, report)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn render_notices(&mut self, notices: &[Notice]) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut self.out, &NoticesOnly { candidates: &[], notices })?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_render_round_trips_fields() {
        let mut c = Candidate::new(7, "Alpha".into(), "ALP".into(), "2024-01-01T00:00:00Z".into(), 3.5, 2_000_000.0, 10.0);
        c.classify();
        let report = ScreenReport::new(vec![c], 72.0);

        let mut sink = JsonReport::new(Vec::new());
        sink.render(&report).unwrap();
        let value: Value = serde_json::from_slice(&sink.into_inner()).unwrap();

        assert_eq!(value["candidates"][0]["id"], 7);
        assert_eq!(value["candidates"][0]["potential"], "C");
        assert_eq!(value["candidates"][0]["liquidity"], 10.0);
        assert_eq!(value["highlight_hours"], 72.0);
    }

    #[test]
    fn test_render_notices_has_empty_candidates() {
        let mut sink = JsonReport::new(Vec::new());
        sink.render_notices(&[Notice::error("HTTP 401")]).unwrap();
        let value: Value = serde_json::from_slice(&sink.into_inner()).unwrap();

        assert_eq!(value["candidates"].as_array().map(|a| a.len()), Some(0));
        assert_eq!(value["notices"][0]["level"], "error");
        assert_eq!(value["notices"][0]["message"], "HTTP 401");
    }
}
