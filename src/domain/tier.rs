//! Potential Tier Classification
//!
//! Rates a listing from its market cap and 24h volume alone.
//! Rules are evaluated top-down; the first match wins and all
//! comparisons are strict.

use serde::{Deserialize, Serialize};
use std::fmt;

/// S tier: market cap threshold (AND volume)
pub const TIER_S_MARKET_CAP: f64 = 500_000_000.0;
pub const TIER_S_VOLUME: f64 = 100_000_000.0;

/// A tier: market cap OR volume
pub const TIER_A_MARKET_CAP: f64 = 100_000_000.0;
pub const TIER_A_VOLUME: f64 = 50_000_000.0;

/// B tier: market cap OR volume
pub const TIER_B_MARKET_CAP: f64 = 10_000_000.0;
pub const TIER_B_VOLUME: f64 = 5_000_000.0;

/// C tier: market cap OR volume
pub const TIER_C_MARKET_CAP: f64 = 1_000_000.0;
pub const TIER_C_VOLUME: f64 = 1_000_000.0;

/// Discrete potential rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PotentialTier {
    S,
    A,
    B,
    C,
    D,
}

impl PotentialTier {
    /// Display order for grouped reports
    pub const ALL: [PotentialTier; 5] = [
        PotentialTier::S,
        PotentialTier::A,
        PotentialTier::B,
        PotentialTier::C,
        PotentialTier::D,
    ];

    /// Classify a (market cap, 24h volume) pair
    pub fn classify(market_cap: f64, volume_24h: f64) -> Self {
        if market_cap > TIER_S_MARKET_CAP && volume_24h > TIER_S_VOLUME {
            PotentialTier::S
        } else if market_cap > TIER_A_MARKET_CAP || volume_24h > TIER_A_VOLUME {
            PotentialTier::A
        } else if market_cap > TIER_B_MARKET_CAP || volume_24h > TIER_B_VOLUME {
            PotentialTier::B
        } else if market_cap > TIER_C_MARKET_CAP || volume_24h > TIER_C_VOLUME {
            PotentialTier::C
        } else {
            PotentialTier::D
        }
    }

    /// Single-letter label
    pub fn as_str(&self) -> &'static str {
        match self {
            PotentialTier::S => "S",
            PotentialTier::A => "A",
            PotentialTier::B => "B",
            PotentialTier::C => "C",
            PotentialTier::D => "D",
        }
    }

    /// Human-readable rule for the criteria view
    pub fn rule(&self) -> &'static str {
        match self {
            PotentialTier::S => "market cap > 500M AND 24h volume > 100M",
            PotentialTier::A => "market cap > 100M OR 24h volume > 50M",
            PotentialTier::B => "market cap > 10M OR 24h volume > 5M",
            PotentialTier::C => "market cap > 1M OR 24h volume > 1M",
            PotentialTier::D => "everything else",
        }
    }
}

impl fmt::Display for PotentialTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
