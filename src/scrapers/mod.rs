//! Archive site scrapers.
//!
//! Harvesting a site happens in two phases per day:
//!
//! 1. **Indexing**: fetch the day's archive listing and read the article
//!    teasers from it ([`kommersant::index_day`])
//! 2. **Fetching**: download each article page and extract its text
//!    ([`kommersant::fetch_article`])
//!
//! Article URLs already handed out during this run are remembered in
//! [`SeenUrls`] and never returned by the index phase again.

pub mod kommersant;

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::models::ArticleSummary;
use reqwest::Client;
use std::collections::HashSet;
use tracing::debug;

/// Result of fetching one day's archive listing.
#[derive(Debug)]
pub enum Listing {
    /// The listing page exists; holds summaries not seen earlier in the run.
    Found(Vec<ArticleSummary>),
    /// The site answered with a non-success status for this day.
    NotFound { status: u16 },
}

/// Article URLs already harvested during the current run.
///
/// Lives only in memory; a new run starts empty.
#[derive(Debug, Default)]
pub struct SeenUrls {
    urls: HashSet<String>,
}

impl SeenUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a URL. Returns `false` if it was already present.
    pub fn insert(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Build the HTTP client shared by every request in a run.
pub fn build_client(config: &HarvestConfig) -> Result<Client, HarvestError> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;
    debug!(user_agent = %config.user_agent, timeout = ?config.request_timeout(), "Built HTTP client");
    Ok(client)
}
