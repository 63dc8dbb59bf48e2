//! Listing Scout - CoinMarketCap new listing screener library
//!
//! Finds recently listed coins that clear market cap, volume and
//! liquidity floors, attaches their social links and contract address,
//! and rates each one S through D.
//!
//! # Modules
//!
//! - `domain`: Core screening logic (Candidate, ScreenCriteria, PotentialTier)
//! - `ports`: Trait abstractions (ListingsSource, MetadataSource, ReportSink)
//! - `adapters`: External implementations (CoinMarketCap, reports, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Screen pipeline

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
