//! Screened Candidate
//!
//! A listing that survived the age/value screen. Created by the screen,
//! then filled in by enrichment and classification.

use serde::{Deserialize, Serialize};

use super::metadata::CoinMetadata;
use super::tier::PotentialTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Provider identifier
    pub id: u64,
    pub name: String,
    pub symbol: String,
    /// Listing timestamp as received
    pub date_added: String,
    /// Hours between listing and evaluation, one decimal
    pub hours_since_added: f64,
    /// Market cap in the quote currency
    pub market_cap: f64,
    /// 24-hour trading volume in the quote currency
    pub volume_24h: f64,
    /// Liquidity proxy, equal to 24h volume
    pub liquidity: f64,
    /// Assigned by classification
    pub potential: Option<PotentialTier>,
    /// Assigned by enrichment
    pub metadata: CoinMetadata,
}

impl Candidate {
    pub fn new(
        id: u64,
        name: String,
        symbol: String,
        date_added: String,
        hours_since_added: f64,
        market_cap: f64,
        volume_24h: f64,
    ) -> Self {
        Self {
            id,
            name,
            symbol,
            date_added,
            hours_since_added,
            market_cap,
            volume_24h,
            liquidity: volume_24h,
            potential: None,
            metadata: CoinMetadata::default(),
        }
    }

    /// Assign the potential tier from market cap and volume
    pub fn classify(&mut self) -> PotentialTier {
        let tier = PotentialTier::classify(self.market_cap, self.volume_24h);
        self.potential = Some(tier);
        tier
    }

    /// Tier, classifying on the fly if the pipeline has not done so yet
    pub fn tier(&self) -> PotentialTier {
        self.potential
            .unwrap_or_else(|| PotentialTier::classify(self.market_cap, self.volume_24h))
    }

    /// Listed within the given window
    pub fn is_fresh(&self, highlight_hours: f64) -> bool {
        self.hours_since_added <= highlight_hours
    }
}

/// Stable ascending sort by hours since listing (newest first)
pub fn sort_by_age(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| a.hours_since_added.total_cmp(&b.hours_since_added));
}
