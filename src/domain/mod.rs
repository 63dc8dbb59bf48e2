//! Domain Layer - Core screening logic
//!
//! Pure types and functions with no I/O. All external interactions
//! happen through the ports layer.
//!
//! - `numeric`: lenient number coercion for provider fields
//! - `listing`: raw listings page shape
//! - `screen`: age / market cap / volume / liquidity screen
//! - `metadata`: social links and contract addresses
//! - `tier`: S/A/B/C/D potential rating
//! - `candidate`: screened listing carried through the pipeline

pub mod candidate;
pub mod listing;
pub mod metadata;
pub mod numeric;
pub mod screen;
pub mod tier;

pub use candidate::{sort_by_age, Candidate};
pub use listing::{ListingsPage, QuoteBlock, RawListing};
pub use metadata::{apply_metadata, or_sentinel, CoinInfo, CoinMetadata, SENTINEL};
pub use numeric::{clean_number, clean_optional};
pub use screen::{parse_listing_time, screen_listings, ScreenCriteria, ScreenError, ScreenStats};
pub use tier::PotentialTier;
