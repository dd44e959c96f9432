//! Command-line interface definitions for the archive harvester.
//!
//! Every flag is optional. Without any flags the harvester crawls the default
//! archive rubric from the built-in start date through today and appends to
//! `articles.json` in the working directory.

use clap::Parser;

use crate::config::OutputFormat;

/// Command-line arguments for the archive harvester.
///
/// Flags override values loaded from `--config`, which in turn override the
/// built-in defaults.
///
/// # Examples
///
/// ```sh
/// # Crawl from the default start date through today
/// archive_harvester
///
/// # Backfill a fixed window into a JSON-lines file
/// archive_harvester --start-date 2025-02-01 --end-date 2025-02-07 \
///     --output feb.jsonl --output-format jsonl
/// ```
#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Site base URL that listing and article links resolve against
    #[arg(long)]
    pub base_url: Option<String>,

    /// First day to harvest (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: Option<String>,

    /// Last day to harvest (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    pub end_date: Option<String>,

    /// Output file, opened in append mode
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output layout: one pretty JSON array per day, or one object per line
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Pause after each article, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// HTTP request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Drop intro paragraphs from the body text instead of repeating them
    #[arg(long)]
    pub exclude_intro_from_body: bool,

    /// Write the articles gathered before a day's failure instead of discarding them
    #[arg(long)]
    pub persist_partial_days: bool,
}
