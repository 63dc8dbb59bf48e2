//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Market data (listings page, coin info lookup)
//! - Report rendering (terminal, JSON, CSV)

pub mod market_data;
pub mod mocks;
pub mod report;

pub use market_data::{ListingsSource, MarketDataError, MetadataSource};
pub use report::{Notice, NoticeLevel, ReportError, ReportSink, ScreenReport, DEFAULT_HIGHLIGHT_HOURS};
