use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;

use crate::domain::{CoinInfo, ListingsPage};
use super::market_data::{ListingsSource, MarketDataError, MetadataSource};
use super::report::{Notice, ReportError, ReportSink, ScreenReport};

/// Canned outcome for a mock call
#[derive(Debug, Clone)]
enum Canned<T> {
    Ok(T),
    Status(u16, String),
    Transport(String),
}

impl<T: Clone> Canned<T> {
    fn produce(&self) -> Result<T, MarketDataError> {
        match self {
            Canned::Ok(v) => Ok(v.clone()),
            Canned::Status(status, body) => Err(MarketDataError::Status {
                status: *status,
                body: body.clone(),
            }),
            Canned::Transport(msg) => Err(MarketDataError::Transport(msg.clone())),
        }
    }
}

/// Mock listings source that records requested limits
#[derive(Debug, Clone)]
pub struct MockListings {
    calls: Arc<Mutex<Vec<u32>>>,
    response: Canned<ListingsPage>,
}

impl MockListings {
    pub fn with_page(page: ListingsPage) -> Self {
        Self {
            calls: Arc::default(),
            response: Canned::Ok(page),
        }
    }

    pub fn failing_status(status: u16, body: &str) -> Self {
        Self {
            calls: Arc::default(),
            response: Canned::Status(status, body.to_string()),
        }
    }

    pub fn failing_transport(message: &str) -> Self {
        Self {
            calls: Arc::default(),
            response: Canned::Transport(message.to_string()),
        }
    }

    /// Get all recorded limits
    pub fn get_calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListingsSource for MockListings {
    async fn fetch_listings(&self, limit: u32) -> Result<ListingsPage, MarketDataError> {
        self.calls.lock().unwrap().push(limit);
        self.response.produce()
    }
}

/// Mock metadata source that records requested id batches
#[derive(Debug, Clone)]
pub struct MockMetadata {
    calls: Arc<Mutex<Vec<Vec<u64>>>>,
    response: Canned<HashMap<String, CoinInfo>>,
}

impl MockMetadata {
    pub fn with_entries(entries: HashMap<String, CoinInfo>) -> Self {
        Self {
            calls: Arc::default(),
            response: Canned::Ok(entries),
        }
    }

    pub fn empty() -> Self {
        Self::with_entries(HashMap::new())
    }

    pub fn failing_status(status: u16, body: &str) -> Self {
        Self {
            calls: Arc::default(),
            response: Canned::Status(status, body.to_string()),
        }
    }

    pub fn failing_transport(message: &str) -> Self {
        Self {
            calls: Arc::default(),
            response: Canned::Transport(message.to_string()),
        }
    }

    /// Get all recorded id batches
    pub fn get_calls(&self) -> Vec<Vec<u64>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataSource for MockMetadata {
    async fn fetch_info(&self, ids: &[u64]) -> Result<HashMap<String, CoinInfo>, MarketDataError> {
        self.calls.lock().unwrap().push(ids.to_vec());
        self.response.produce()
    }
}

/// Sink that keeps what it was asked to render
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub reports: Vec<ScreenReport>,
    pub notices: Vec<Notice>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for RecordingSink {
    fn render(&mut self, report: &ScreenReport) -> Result<(), ReportError> {
        self.notices.extend(report.notices.iter().cloned());
        self.reports.push(report.clone());
        Ok(())
    }

    fn render_notices(&mut self, notices: &[Notice]) -> Result<(), ReportError> {
        self.notices.extend_from_slice(notices);
        Ok(())
    }
}
