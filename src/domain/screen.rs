//! Age / Value Screen
//!
//! Reduces a raw listings page to candidates that are both new and
//! carry real money:
//! - listed no more than `max_age_hours` ago
//! - market cap, 24h volume and liquidity strictly above their minimums
//!
//! Listings with a missing id or an unparseable timestamp are skipped
//! without failing the batch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::candidate::Candidate;
use super::listing::{ListingsPage, RawListing};
use super::numeric::clean_number;

/// 180 days
pub const DEFAULT_MAX_AGE_HOURS: f64 = 4320.0;
pub const DEFAULT_MIN_MARKET_CAP: f64 = 300_000.0;
pub const DEFAULT_MIN_VOLUME: f64 = 30_000.0;
pub const DEFAULT_MIN_LIQUIDITY: f64 = 10_000.0;
pub const DEFAULT_QUOTE_CURRENCY: &str = "USD";

/// Fallback for listings without a name or symbol
const UNKNOWN_LABEL: &str = "N/A";

#[derive(Debug, Error, PartialEq)]
pub enum ScreenError {
    #[error("Invalid screen criteria: {0}")]
    InvalidCriteria(String),
}

/// Screen thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenCriteria {
    /// Listings older than this are never candidates
    pub max_age_hours: f64,
    pub min_market_cap: f64,
    pub min_volume: f64,
    pub min_liquidity: f64,
    /// Quote block to read figures from
    pub quote_currency: String,
}

impl Default for ScreenCriteria {
    fn default() -> Self {
        Self {
            max_age_hours: DEFAULT_MAX_AGE_HOURS,
            min_market_cap: DEFAULT_MIN_MARKET_CAP,
            min_volume: DEFAULT_MIN_VOLUME,
            min_liquidity: DEFAULT_MIN_LIQUIDITY,
            quote_currency: DEFAULT_QUOTE_CURRENCY.to_string(),
        }
    }
}

impl ScreenCriteria {
    pub fn with_max_age_hours(mut self, hours: f64) -> Self {
        self.max_age_hours = hours;
        self
    }

    pub fn with_min_market_cap(mut self, market_cap: f64) -> Self {
        self.min_market_cap = market_cap;
        self
    }

    pub fn with_min_volume(mut self, volume: f64) -> Self {
        self.min_volume = volume;
        self
    }

    pub fn with_min_liquidity(mut self, liquidity: f64) -> Self {
        self.min_liquidity = liquidity;
        self
    }

    pub fn validate(&self) -> Result<(), ScreenError> {
        if !self.max_age_hours.is_finite() || self.max_age_hours < 0.0 {
            return Err(ScreenError::InvalidCriteria(format!(
                "max_age_hours must be >= 0, got {}",
                self.max_age_hours
            )));
        }
        for (name, value) in [
            ("min_market_cap", self.min_market_cap),
            ("min_volume", self.min_volume),
            ("min_liquidity", self.min_liquidity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScreenError::InvalidCriteria(format!(
                    "{} must be >= 0, got {}",
                    name, value
                )));
            }
        }
        if self.quote_currency.is_empty() {
            return Err(ScreenError::InvalidCriteria(
                "quote_currency cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Strict threshold check on the three value figures
    pub fn passes_value(&self, market_cap: f64, volume_24h: f64, liquidity: f64) -> bool {
        market_cap > self.min_market_cap
            && volume_24h > self.min_volume
            && liquidity > self.min_liquidity
    }
}

/// Per-run counters, logged after screening
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenStats {
    pub examined: usize,
    pub invalid: usize,
    pub too_old: usize,
    pub below_threshold: usize,
    pub kept: usize,
}

/// Parse a provider listing timestamp.
///
/// RFC 3339 first; naive forms without an offset are taken as UTC.
pub fn parse_listing_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Hours elapsed, clamped at zero for future-dated listings
pub fn hours_between(listed: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let hours = (now - listed).num_milliseconds() as f64 / 3_600_000.0;
    hours.max(0.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Screen a listings page. Output keeps input order.
pub fn screen_listings(
    page: &ListingsPage,
    criteria: &ScreenCriteria,
    now: DateTime<Utc>,
) -> (Vec<Candidate>, ScreenStats) {
    let mut stats = ScreenStats::default();
    let mut candidates = Vec::new();

    for listing in &page.data {
        stats.examined += 1;
        match screen_one(listing, criteria, now) {
            Verdict::Keep(candidate) => {
                stats.kept += 1;
                candidates.push(candidate);
            }
            Verdict::Invalid => stats.invalid += 1,
            Verdict::TooOld => stats.too_old += 1,
            Verdict::BelowThreshold => stats.below_threshold += 1,
        }
    }

    tracing::info!(
        "Screened {} listings: {} kept, {} too old, {} below thresholds, {} invalid",
        stats.examined,
        stats.kept,
        stats.too_old,
        stats.below_threshold,
        stats.invalid
    );

    (candidates, stats)
}

enum Verdict {
    Keep(Candidate),
    Invalid,
    TooOld,
    BelowThreshold,
}

fn screen_one(listing: &RawListing, criteria: &ScreenCriteria, now: DateTime<Utc>) -> Verdict {
    let id = match listing.id {
        Some(id) if id != 0 => id,
        _ => {
            tracing::debug!("Skipping listing without id: {:?}", listing.name);
            return Verdict::Invalid;
        }
    };

    let date_added = match listing.date_added.as_deref() {
        Some(s) if !s.trim().is_empty() => s,
        _ => {
            tracing::debug!("Skipping listing {} without date_added", id);
            return Verdict::Invalid;
        }
    };

    let listed = match parse_listing_time(date_added) {
        Some(t) => t,
        None => {
            tracing::debug!("Skipping listing {}: unparseable date_added '{}'", id, date_added);
            return Verdict::Invalid;
        }
    };

    let hours = hours_between(listed, now);
    if hours > criteria.max_age_hours {
        return Verdict::TooOld;
    }

    let (market_cap, volume_24h) = match listing.quote_for(&criteria.quote_currency) {
        Some(q) => (clean_number(&q.market_cap), clean_number(&q.volume_24h)),
        None => (0.0, 0.0),
    };
    let liquidity = volume_24h;

    if !criteria.passes_value(market_cap, volume_24h, liquidity) {
        return Verdict::BelowThreshold;
    }

    Verdict::Keep(Candidate::new(
        id,
        listing.name.clone().unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        listing.symbol.clone().unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        date_added.to_string(),
        round_one_decimal(hours),
        market_cap,
        volume_24h,
    ))
}
