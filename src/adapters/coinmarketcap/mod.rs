//! CoinMarketCap Adapter
//!
//! Implements `ListingsSource` and `MetadataSource` against the
//! CoinMarketCap Pro REST API.
//!
//! # Example
//!
//! ```rust,ignore
//! use listing_scout::adapters::coinmarketcap::CoinMarketCapClient;
//! use listing_scout::ports::ListingsSource;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoinMarketCapClient::with_api_key("YOUR_KEY")?;
//!     let page = client.fetch_listings(5000).await?;
//!     println!("{} listings", page.len());
//!     Ok(())
//! }
//! ```

mod client;

pub use client::{join_ids, CoinMarketCapClient, CoinMarketCapConfig, API_KEY_HEADER, DEFAULT_BASE_URL};
