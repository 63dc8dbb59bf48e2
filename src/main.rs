//! Listing Scout - CoinMarketCap new listing screener
//!
//! Fetches the latest listings, screens them and rates each survivor.

use anyhow::Result;

use listing_scout::adapters::cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (the API key can live here)
    dotenvy::dotenv().ok();

    let app = cli::init();
    cli::execute(app).await
}
