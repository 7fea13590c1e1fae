//! Roster Scraper CLI
//!
//! Crawls configured creator directories and exports a deduplicated
//! contact roster as CSV.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use roster_scraper::{
    error::{AppError, Result},
    models::Config,
    services::{self, HttpFetcher},
};

/// Roster Scraper - creator directory contact exporter
#[derive(Parser, Debug)]
#[command(
    name = "roster-scraper",
    version,
    about = "Scrape public creator profiles into a CSV roster"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Comma-separated role tags to crawl (default: all configured roles)
    #[arg(long)]
    roles: Option<String>,

    /// Minimum number of profiles to collect per role
    #[arg(long)]
    min_per_role: Option<usize>,

    /// Output CSV file path
    #[arg(short, long)]
    output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging from the verbosity flag and configured level.
fn init_logging(verbose: bool, configured_level: &str) {
    let level = if verbose { "debug" } else { configured_level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Apply CLI overrides on top of the loaded configuration.
fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(min) = cli.min_per_role {
        config.min_per_role = min;
    }
    if let Some(output) = &cli.output {
        config.output.file = output.clone();
    }
    if let Some(roles) = &cli.roles {
        let mut selected = Vec::new();
        for tag in roles.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match config.role(tag) {
                Some(role) => selected.push(role.clone()),
                None => {
                    log::warn!("Unknown role: {}", tag);
                }
            }
        }
        if selected.is_empty() {
            return Err(AppError::config(format!(
                "None of the requested roles are configured: {roles}"
            )));
        }
        config.roles = selected;
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    init_logging(cli.verbose, &config.logging.level);

    apply_overrides(&mut config, &cli)?;
    config.validate()?;

    log::info!("Output file: {}", config.output.file);

    let fetcher = Arc::new(HttpFetcher::new(&config.crawler)?);
    services::run_crawl(&config, fetcher).await?;

    Ok(())
}
