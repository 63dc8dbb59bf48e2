//! Report Port
//!
//! Rendering interface for screen results. The pipeline produces a
//! [`ScreenReport`]; sinks decide how it looks (terminal, JSON, CSV file).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Candidate, PotentialTier};

/// Default highlight window for freshly listed coins
pub const DEFAULT_HIGHLIGHT_HOURS: f64 = 72.0;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Message collected during a screen and shown with the results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Everything a sink needs to render one screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenReport {
    /// Candidates sorted by hours since listing, ascending
    pub candidates: Vec<Candidate>,
    /// Candidates at or under this age are highlighted
    pub highlight_hours: f64,
    pub notices: Vec<Notice>,
}

impl ScreenReport {
    pub fn new(candidates: Vec<Candidate>, highlight_hours: f64) -> Self {
        Self {
            candidates,
            highlight_hours,
            notices: Vec::new(),
        }
    }

    /// Candidates of one tier, in report order
    pub fn tier_group(&self, tier: PotentialTier) -> Vec<&Candidate> {
        self.candidates.iter().filter(|c| c.tier() == tier).collect()
    }

    /// Non-empty tier groups in S, A, B, C, D order
    pub fn tier_groups(&self) -> Vec<(PotentialTier, Vec<&Candidate>)> {
        PotentialTier::ALL
            .iter()
            .map(|tier| (*tier, self.tier_group(*tier)))
            .filter(|(_, group)| !group.is_empty())
            .collect()
    }

    pub fn is_highlighted(&self, candidate: &Candidate) -> bool {
        candidate.is_fresh(self.highlight_hours)
    }
}

/// Rendering target for screen results
pub trait ReportSink {
    /// Render a completed screen
    fn render(&mut self, report: &ScreenReport) -> Result<(), ReportError>;

    /// Render notices when the screen ended without results
    fn render_notices(&mut self, notices: &[Notice]) -> Result<(), ReportError>;
}
