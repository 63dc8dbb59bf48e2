use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::{CoinInfo, ListingsPage};

/// Market data error type
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request failed with status code {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Data parsing error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MarketDataError {
    /// HTTP status when the provider answered with a non-success code
    pub fn status_code(&self) -> Option<u16> {
        match self {
            MarketDataError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Source of newly listed assets
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingsSource: Send + Sync {
    /// Fetch one bounded page of listings with quotes
    async fn fetch_listings(&self, limit: u32) -> Result<ListingsPage, MarketDataError>;
}

/// Source of per-coin social/contract metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Batched info lookup, keyed by identifier as a string
    async fn fetch_info(&self, ids: &[u64]) -> Result<HashMap<String, CoinInfo>, MarketDataError>;
}
