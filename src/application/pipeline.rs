//! Screen Pipeline
//!
//! Runs one screen end to end:
//! fetch listings -> screen -> sort -> enrich -> classify -> report.
//!
//! Only a listings failure ends the run early. Everything after that
//! degrades: a failed info lookup leaves metadata absent and adds a
//! warning notice.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::{Config, DEFAULT_PAGE_LIMIT};
use crate::domain::{apply_metadata, screen_listings, sort_by_age, Candidate, ScreenCriteria};
use crate::ports::market_data::{ListingsSource, MarketDataError, MetadataSource};
use crate::ports::report::{Notice, ReportError, ReportSink, ScreenReport, DEFAULT_HIGHLIGHT_HOURS};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Pipeline settings
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub criteria: ScreenCriteria,
    /// Listings requested per fetch
    pub page_limit: u32,
    pub highlight_hours: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            criteria: ScreenCriteria::default(),
            page_limit: DEFAULT_PAGE_LIMIT,
            highlight_hours: DEFAULT_HIGHLIGHT_HOURS,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.criteria
            .validate()
            .map_err(|e| PipelineError::ConfigError(e.to_string()))?;
        if self.page_limit == 0 {
            return Err(PipelineError::ConfigError("page_limit must be > 0".into()));
        }
        if !self.highlight_hours.is_finite() || self.highlight_hours < 0.0 {
            return Err(PipelineError::ConfigError(format!(
                "highlight_hours must be >= 0, got {}",
                self.highlight_hours
            )));
        }
        Ok(())
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            criteria: config.screen_criteria(),
            page_limit: config.screen.page_limit,
            highlight_hours: config.report.highlight_hours,
        }
    }
}

/// How a screen ended
#[derive(Debug)]
pub enum ScreenOutcome {
    /// Candidates found, enriched and classified
    Completed(ScreenReport),
    /// Listings fetched but nothing passed the screen
    NoCandidates(Vec<Notice>),
    /// Listings could not be fetched; nothing to screen
    FetchFailed {
        error: MarketDataError,
        notices: Vec<Notice>,
    },
}

impl ScreenOutcome {
    pub fn notices(&self) -> &[Notice] {
        match self {
            ScreenOutcome::Completed(report) => &report.notices,
            ScreenOutcome::NoCandidates(notices) => notices,
            ScreenOutcome::FetchFailed { notices, .. } => notices,
        }
    }

    pub fn report(&self) -> Option<&ScreenReport> {
        match self {
            ScreenOutcome::Completed(report) => Some(report),
            _ => None,
        }
    }

    /// Hand the outcome to a sink
    pub fn present<S: ReportSink + ?Sized>(&self, sink: &mut S) -> Result<(), ReportError> {
        match self {
            ScreenOutcome::Completed(report) => sink.render(report),
            other => sink.render_notices(other.notices()),
        }
    }
}

/// Fetch -> screen -> enrich -> classify
pub struct ScreenPipeline<L, M> {
    config: PipelineConfig,
    listings: L,
    metadata: M,
}

impl<L: ListingsSource, M: MetadataSource> ScreenPipeline<L, M> {
    pub fn new(config: PipelineConfig, listings: L, metadata: M) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { config, listings, metadata })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one screen evaluated at `now`
    pub async fn run(&self, now: DateTime<Utc>) -> ScreenOutcome {
        let mut notices = Vec::new();

        tracing::info!("Fetching up to {} listings...", self.config.page_limit);
        let page = match self.listings.fetch_listings(self.config.page_limit).await {
            Ok(page) => page,
            Err(error) => {
                tracing::error!("Listings fetch failed: {}", error);
                notices.extend(fetch_failure_notices("Listings", &error));
                notices.push(Notice::error(
                    "Unable to fetch listings; check the API key or network.",
                ));
                return ScreenOutcome::FetchFailed { error, notices };
            }
        };
        notices.push(Notice::info(format!(
            "Fetched {} listings, screening...",
            page.len()
        )));

        let (mut candidates, _stats) = screen_listings(&page, &self.config.criteria, now);
        drop(page);

        if candidates.is_empty() {
            notices.push(Notice::warning("No coins matched the screen."));
            return ScreenOutcome::NoCandidates(notices);
        }
        notices.push(Notice::info(format!(
            "{} coins passed the screen.",
            candidates.len()
        )));

        sort_by_age(&mut candidates);
        self.enrich(&mut candidates, &mut notices).await;

        for candidate in candidates.iter_mut() {
            candidate.classify();
        }

        let mut report = ScreenReport::new(candidates, self.config.highlight_hours);
        report.notices = notices;
        ScreenOutcome::Completed(report)
    }

    /// Attach metadata; failures leave every field absent
    async fn enrich(&self, candidates: &mut [Candidate], notices: &mut Vec<Notice>) {
        let ids: Vec<u64> = candidates.iter().map(|c| c.id).collect();

        let info = match self.metadata.fetch_info(&ids).await {
            Ok(info) => info,
            Err(error) => {
                tracing::warn!("Coin info fetch failed, continuing without metadata: {}", error);
                notices.extend(fetch_failure_notices("Info", &error));
                Default::default()
            }
        };

        let matched = apply_metadata(candidates, &info);
        tracing::debug!("Metadata matched for {}/{} candidates", matched, candidates.len());
    }
}

/// Status and body for HTTP failures, message for the rest
fn fetch_failure_notices(what: &str, error: &MarketDataError) -> Vec<Notice> {
    match error {
        MarketDataError::Status { status, body } => vec![
            Notice::error(format!("{} request failed with status code {}.", what, status)),
            Notice::error(format!("Response text: {}", body)),
        ],
        other => vec![Notice::error(format!(
            "Exception when requesting {}: {}",
            what.to_lowercase(),
            other
        ))],
    }
}
