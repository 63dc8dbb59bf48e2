//! CoinMarketCap Client
//!
//! HTTP client for the CoinMarketCap Pro API. Two calls are used:
//! - `/v1/cryptocurrency/listings/latest` for the listings page
//! - `/v2/cryptocurrency/info` for social links and contract addresses
//!
//! No retries: a failed call is returned to the caller as-is.

use std::collections::HashMap;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{CoinInfo, ListingsPage};
use crate::ports::market_data::{ListingsSource, MarketDataError, MetadataSource};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://pro-api.coinmarketcap.com";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

const LISTINGS_PATH: &str = "/v1/cryptocurrency/listings/latest";
const INFO_PATH: &str = "/v2/cryptocurrency/info";

/// Listings always start at the first rank
const LISTINGS_START: &str = "1";

/// CoinMarketCap client configuration
#[derive(Debug, Clone)]
pub struct CoinMarketCapConfig {
    /// API root without trailing slash
    pub base_url: String,
    pub api_key: String,
    /// Quote currency for listings
    pub convert: String,
    /// Request timeout; client default when `None`
    pub timeout: Option<Duration>,
}

impl Default for CoinMarketCapConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            convert: "USD".to_string(),
            timeout: None,
        }
    }
}

impl CoinMarketCapConfig {
    /// Create config with an API key and defaults for everything else
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

/// CoinMarketCap API client
#[derive(Debug, Clone)]
pub struct CoinMarketCapClient {
    config: CoinMarketCapConfig,
    http: Client,
}

impl CoinMarketCapClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: CoinMarketCapConfig) -> Result<Self, MarketDataError> {
        if config.api_key.trim().is_empty() {
            return Err(MarketDataError::Config("API key is empty".into()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| MarketDataError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Create a new client with an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, MarketDataError> {
        Self::with_config(CoinMarketCapConfig::with_api_key(api_key))
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// GET with auth headers; non-success status becomes an error carrying the body
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<reqwest::Response, MarketDataError> {
        let url = self.url(path);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .header("Accepts", "application/json")
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| MarketDataError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} returned status {}", path, status);
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ListingsSource for CoinMarketCapClient {
    async fn fetch_listings(&self, limit: u32) -> Result<ListingsPage, MarketDataError> {
        let limit = limit.to_string();
        let response = self
            .get(
                LISTINGS_PATH,
                &[
                    ("start", LISTINGS_START),
                    ("limit", limit.as_str()),
                    ("convert", self.config.convert.as_str()),
                ],
            )
            .await?;

        let page: ListingsPage = response
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(format!("Failed to parse listings: {}", e)))?;

        tracing::info!("Fetched {} listings", page.len());
        Ok(page)
    }
}

#[async_trait]
impl MetadataSource for CoinMarketCapClient {
    async fn fetch_info(&self, ids: &[u64]) -> Result<HashMap<String, CoinInfo>, MarketDataError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let joined = join_ids(ids);
        let response = self.get(INFO_PATH, &[("id", joined.as_str())]).await?;

        let body: InfoResponse = response
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(format!("Failed to parse coin info: {}", e)))?;

        let info = decode_info_entries(body.data);
        tracing::info!("Fetched metadata for {} of {} coins", info.len(), ids.len());
        Ok(info)
    }
}

/// Info endpoint envelope; entries are decoded one by one
#[derive(Debug, Deserialize)]
struct InfoResponse {
    #[serde(default)]
    data: HashMap<String, Value>,
}

fn decode_info_entries(data: HashMap<String, Value>) -> HashMap<String, CoinInfo> {
    data.into_iter()
        .map(|(id, value)| (id, CoinInfo::from_value_lossy(value)))
        .collect()
}

/// Comma-joined identifier list for the `id` query parameter
pub fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
