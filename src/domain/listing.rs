//! Raw Listing Types
//!
//! Shape of the listings endpoint payload. Fields decode leniently: a
//! missing or wrongly typed field becomes `None`, so a single malformed
//! listing never rejects the whole page. The screen decides what to skip.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Any JSON value, converted to `T` when it fits
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], falling back to `T::default()`
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Each element decoded on its own; one that is not an object becomes an
/// empty listing and is counted invalid by the screen
fn lenient_listings<'de, D>(deserializer: D) -> Result<Vec<RawListing>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Vec<Value> = lenient_or_default(deserializer)?;
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}

/// One page of listings as returned by the provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingsPage {
    #[serde(default, deserialize_with = "lenient_listings")]
    pub data: Vec<RawListing>,
}

impl ListingsPage {
    pub fn new(data: Vec<RawListing>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A single asset from the listings endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawListing {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub symbol: Option<String>,
    /// ISO-8601 listing timestamp
    #[serde(default, deserialize_with = "lenient")]
    pub date_added: Option<String>,
    /// Quote blocks keyed by currency code ("USD")
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub quote: HashMap<String, Option<QuoteBlock>>,
}

/// Market figures for one quote currency
///
/// Kept as raw JSON so numeric strings and nulls reach the normalizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub market_cap: Value,
    #[serde(default)]
    pub volume_24h: Value,
}

impl RawListing {
    /// Quote block for a currency, if present and non-null
    pub fn quote_for(&self, currency: &str) -> Option<&QuoteBlock> {
        self.quote.get(currency).and_then(|q| q.as_ref())
    }
}
