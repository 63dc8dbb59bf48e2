//! Coin Metadata
//!
//! Social links and contract addresses from the info endpoint, and the
//! merge step that attaches them to screened candidates.
//!
//! Absence is modelled as `None` per field. Rendering turns `None` into
//! the [`SENTINEL`] so a candidate always shows five metadata values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::candidate::Candidate;

/// Placeholder for any metadata field that could not be retrieved
pub const SENTINEL: &str = "N";

/// Platforms read from the `urls` block
pub const PLATFORM_TWITTER: &str = "twitter";
pub const PLATFORM_REDDIT: &str = "reddit";
pub const PLATFORM_FACEBOOK: &str = "facebook";
pub const PLATFORM_TELEGRAM: &str = "telegram";

/// Info endpoint entry for one coin
///
/// Fields stay raw JSON and are read one at a time, so a malformed
/// `contract_address` never hides a valid social link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinInfo {
    /// Platform name -> list of URLs
    #[serde(default)]
    pub urls: Value,
    /// List of `{ contract_address, platform }` records
    #[serde(default)]
    pub contract_address: Value,
}

impl CoinInfo {
    /// Decode one info entry; anything other than an object is empty
    pub fn from_value_lossy(value: Value) -> Self {
        match value {
            Value::Object(mut entry) => Self {
                urls: entry.remove("urls").unwrap_or_default(),
                contract_address: entry.remove("contract_address").unwrap_or_default(),
            },
            other => {
                tracing::debug!("Unexpected coin info shape, ignoring entry: {}", other);
                Self::default()
            }
        }
    }

    /// First URL listed for a platform
    pub fn first_url(&self, platform: &str) -> Option<String> {
        self.urls
            .get(platform)
            .and_then(Value::as_array)
            .and_then(|urls| urls.first())
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Address of the first contract record
    pub fn first_contract(&self) -> Option<String> {
        self.contract_address
            .as_array()
            .and_then(|records| records.first())
            .and_then(|record| record.get("contract_address"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Social and contract fields carried by a candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinMetadata {
    pub twitter: Option<String>,
    pub reddit: Option<String>,
    pub facebook: Option<String>,
    pub telegram: Option<String>,
    pub contract_address: Option<String>,
}

impl CoinMetadata {
    /// Extract the five fields from an info entry
    pub fn from_info(info: &CoinInfo) -> Self {
        Self {
            twitter: info.first_url(PLATFORM_TWITTER),
            reddit: info.first_url(PLATFORM_REDDIT),
            facebook: info.first_url(PLATFORM_FACEBOOK),
            telegram: info.first_url(PLATFORM_TELEGRAM),
            contract_address: info.first_contract(),
        }
    }

    /// Field values in report order, with the sentinel for absent ones
    pub fn display_fields(&self) -> [&str; 5] {
        [
            or_sentinel(&self.twitter),
            or_sentinel(&self.reddit),
            or_sentinel(&self.facebook),
            or_sentinel(&self.telegram),
            or_sentinel(&self.contract_address),
        ]
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Value or the sentinel
pub fn or_sentinel(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(SENTINEL)
}

/// Merge info entries into candidates by identifier.
///
/// Candidates without an entry get all-absent metadata. Returns how many
/// candidates were matched.
pub fn apply_metadata(candidates: &mut [Candidate], info: &HashMap<String, CoinInfo>) -> usize {
    let mut matched = 0;

    for candidate in candidates.iter_mut() {
        candidate.metadata = match info.get(&candidate.id.to_string()) {
            Some(entry) => {
                matched += 1;
                CoinMetadata::from_info(entry)
            }
            None => CoinMetadata::default(),
        };
    }

    matched
}
