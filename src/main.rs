//! # Archive Harvester
//!
//! Crawls a news site's daily archive listings from a fixed start date
//! through today, extracts each article's text, and appends one JSON block
//! per harvested day to a single output file.
//!
//! ## Usage
//!
//! ```sh
//! archive_harvester
//! archive_harvester --start-date 2025-03-01 --output march.json
//! ```
//!
//! ## Architecture
//!
//! The run is one sequential loop over calendar days:
//! 1. **Indexing**: Fetch the day's archive listing and collect unseen article links
//! 2. **Fetching**: Download each article and extract intro and body text, pausing between articles
//! 3. **Output**: Append the day's records to the output file
//!
//! A failing day is logged and skipped; the process exits successfully
//! regardless of per-day failures.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use archive_harvester::cli::Cli;
use archive_harvester::config::HarvestConfig;
use archive_harvester::harvest::Harvester;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("archive_harvester starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = HarvestConfig::from_cli(&args).await?;
    let today = Local::now().date_naive();
    info!(
        start_date = %config.start_date,
        end_date = %config.end_date.unwrap_or(today),
        output = %config.output.display(),
        "Harvest window"
    );

    let mut harvester = Harvester::new(config)?;
    let stats = harvester.run(today).await;

    let elapsed = start_time.elapsed();
    info!(
        days_visited = stats.days_visited,
        days_persisted = stats.days_persisted,
        days_not_found = stats.days_not_found,
        days_failed = stats.days_failed,
        articles_written = stats.articles_written,
        seen_urls = harvester.seen().len(),
        ?elapsed,
        "Harvest finished"
    );

    Ok(())
}
