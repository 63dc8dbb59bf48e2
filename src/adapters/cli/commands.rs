//! CLI Command Handlers
//!
//! Implementation of the `scan` and `criteria` commands.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use crate::adapters::coinmarketcap::CoinMarketCapClient;
use crate::adapters::report::{hours, with_thousands, CsvExporter, JsonReport, TerminalReport};
use crate::application::{PipelineConfig, ScreenOutcome, ScreenPipeline};
use crate::config::{load_config_or_default, Config};
use crate::domain::PotentialTier;
use crate::ports::ReportSink;

/// Config file read when `--config` is not given; optional
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Listing Scout - new coin listing screener for CoinMarketCap
#[derive(Parser, Debug)]
#[command(
    name = "listing-scout",
    version = env!("CARGO_PKG_VERSION"),
    about = "Screen newly listed coins on CoinMarketCap",
    long_about = "Listing Scout fetches the latest CoinMarketCap listings, keeps recent coins \
                  above market cap, volume and liquidity floors, attaches social links and \
                  contract addresses, and rates each coin on an S to D potential scale."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch, screen and rate new listings
    Scan(ScanCmd),

    /// Show the active screening thresholds and tier rules
    Criteria(CriteriaCmd),
}

/// Output format for `scan`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Run a screen
#[derive(Parser, Debug)]
pub struct ScanCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the results to CSV
    #[arg(short, long)]
    pub export: bool,

    /// CSV destination (implies --export)
    #[arg(long, value_name = "FILE")]
    pub export_path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable ANSI highlighting
    #[arg(long)]
    pub no_color: bool,

    /// Override the number of listings requested
    #[arg(short, long, value_name = "N")]
    pub limit: Option<u32>,
}

impl ScanCmd {
    /// Export destination, if exporting
    pub fn export_target(&self, config: &Config) -> Option<PathBuf> {
        match (&self.export_path, self.export) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(config.report.expanded_export_path()),
            (None, false) => None,
        }
    }
}

/// Show screening criteria
#[derive(Parser, Debug)]
pub struct CriteriaCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    match app.command {
        Command::Scan(cmd) => {
            let config = resolve_config(cmd.config.as_deref())?;
            init_logging(app.verbose, app.debug, &config.logging.level)?;
            scan_command(cmd, config).await
        }
        Command::Criteria(cmd) => {
            let config = resolve_config(cmd.config.as_deref())?;
            init_logging(app.verbose, app.debug, &config.logging.level)?;
            criteria_command(&config)
        }
    }
}

/// Load the given config, or the default path when it exists
fn resolve_config(path: Option<&Path>) -> Result<Config> {
    let (path, explicit) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_CONFIG_PATH), false),
    };
    load_config_or_default(path, explicit)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Initialize logging system
///
/// `RUST_LOG` wins, then `--debug` / `--verbose`, then the configured level.
fn init_logging(verbose: bool, debug: bool, configured: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        configured
    };

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level '{}'", level))?,
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    Ok(())
}

/// Handle scan command
async fn scan_command(cmd: ScanCmd, config: Config) -> Result<()> {
    let client_config = config.client_config()?;
    let client = CoinMarketCapClient::with_config(client_config)
        .context("Failed to create CoinMarketCap client")?;

    let mut pipeline_config = PipelineConfig::from(&config);
    if let Some(limit) = cmd.limit {
        pipeline_config.page_limit = limit;
    }

    let pipeline = ScreenPipeline::new(pipeline_config, client.clone(), client)
        .context("Invalid screen settings")?;

    let outcome = pipeline.run(Utc::now()).await;

    let stdout = io::stdout();
    match cmd.format {
        OutputFormat::Text => {
            let color = !cmd.no_color && stdout.is_terminal();
            outcome.present(&mut TerminalReport::new(stdout.lock(), color))?;
        }
        OutputFormat::Json => outcome.present(&mut JsonReport::new(stdout.lock()))?,
    }

    if let Some(path) = cmd.export_target(&config) {
        match outcome.report() {
            Some(report) => {
                CsvExporter::new(&path)
                    .render(report)
                    .with_context(|| format!("Failed to export CSV to {}", path.display()))?;
                eprintln!("Saved {} coins to {}", report.candidates.len(), path.display());
            }
            None => tracing::warn!("Nothing to export"),
        }
    }

    if let ScreenOutcome::FetchFailed { error, .. } = outcome {
        bail!("Listings fetch failed: {}", error);
    }

    Ok(())
}

/// Handle criteria command
fn criteria_command(config: &Config) -> Result<()> {
    let criteria = config.screen_criteria();

    println!("Screening criteria");
    println!("  Max age:            {} hours", hours(criteria.max_age_hours));
    println!("  Min market cap:     {} {}", with_thousands(criteria.min_market_cap), criteria.quote_currency);
    println!("  Min 24h volume:     {} {}", with_thousands(criteria.min_volume), criteria.quote_currency);
    println!("  Min liquidity:      {} {} (approximated by 24h volume)", with_thousands(criteria.min_liquidity), criteria.quote_currency);
    println!("  Highlight window:   {} hours", hours(config.report.highlight_hours));
    println!("  Listings per fetch: {}", config.screen.page_limit);
    println!();
    println!("Potential tiers (first match wins)");
    for tier in PotentialTier::ALL {
        println!("  {}: {}", tier, tier.rule());
    }

    Ok(())
}
