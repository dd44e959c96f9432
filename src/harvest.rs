//! Day-by-day harvest driver.
//!
//! For every date in the window the driver fetches the archive listing,
//! harvests each new article in listing order, pausing after every article,
//! and appends the day's records to the output file. A failure anywhere in a
//! day is logged with the date and the run moves on to the next day; nothing
//! is retried.

use crate::config::HarvestConfig;
use crate::dates::DateRange;
use crate::error::HarvestError;
use crate::models::{ArticleRecord, ArticleSummary, DailyBatch};
use crate::outputs::json::JsonSink;
use crate::scrapers::kommersant::{canonical_article_url, fetch_article, index_day};
use crate::scrapers::{Listing, SeenUrls, build_client};
use crate::utils::truncate_for_log;
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// How a single day ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOutcome {
    /// The listing page did not answer with success.
    NotFound,
    /// The listing had no new articles.
    Empty,
    /// This many records were appended to the output.
    Persisted(usize),
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub days_visited: usize,
    pub days_not_found: usize,
    pub days_failed: usize,
    pub days_persisted: usize,
    pub articles_written: usize,
}

/// Owns everything a run mutates: the seen-set and the output sink.
pub struct Harvester {
    client: Client,
    config: HarvestConfig,
    sink: JsonSink,
    seen: SeenUrls,
}

impl Harvester {
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestError> {
        let client = build_client(&config)?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: HarvestConfig, client: Client) -> Self {
        let sink = JsonSink::new(config.output.clone(), config.output_format);
        Self {
            client,
            config,
            sink,
            seen: SeenUrls::new(),
        }
    }

    pub fn seen(&self) -> &SeenUrls {
        &self.seen
    }

    /// Harvest every day from the configured start through `today`, or through
    /// the configured end date when one is set.
    pub async fn run(&mut self, today: NaiveDate) -> RunStats {
        let end = self.config.end_date.unwrap_or(today);
        let mut stats = RunStats::default();

        for date in DateRange::new(self.config.start_date, end) {
            stats.days_visited += 1;
            info!(%date, "Harvesting archive day");

            match self.harvest_day(date).await {
                Ok(DayOutcome::NotFound) => stats.days_not_found += 1,
                Ok(DayOutcome::Empty) => {}
                Ok(DayOutcome::Persisted(count)) => {
                    stats.days_persisted += 1;
                    stats.articles_written += count;
                }
                Err(e) => {
                    stats.days_failed += 1;
                    error!(%date, error = %e, "Failed to harvest day");
                }
            }
        }

        stats
    }

    /// Harvest one day. Any error aborts the rest of the day.
    #[instrument(level = "info", skip(self))]
    pub async fn harvest_day(&mut self, date: NaiveDate) -> Result<DayOutcome, HarvestError> {
        let summaries = match index_day(&self.client, &self.config, date, &mut self.seen).await? {
            Listing::NotFound { status } => {
                warn!(%date, status, "Archive page not found for this day, moving on");
                return Ok(DayOutcome::NotFound);
            }
            Listing::Found(summaries) => summaries,
        };

        let mut batch = DailyBatch::new(date);
        for summary in summaries {
            let harvested = self.harvest_article(summary).await;
            self.pause().await;

            match harvested {
                Ok(record) => batch.push(record),
                Err(e) if self.config.persist_partial_days && !batch.is_empty() => {
                    let written = self.sink.append_batch(&batch).await?;
                    info!(%date, count = written, "Kept articles harvested before the failure");
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }

        if batch.is_empty() {
            debug!(%date, "No new articles for this day");
            return Ok(DayOutcome::Empty);
        }

        let written = self.sink.append_batch(&batch).await?;
        info!(
            %date,
            count = written,
            path = %self.sink.path().display(),
            "Articles for day written to file"
        );
        Ok(DayOutcome::Persisted(written))
    }

    async fn harvest_article(&self, mut summary: ArticleSummary) -> Result<ArticleRecord, HarvestError> {
        info!(title = %summary.title, "Harvesting article");

        summary.url = canonical_article_url(&summary.url);
        let content = fetch_article(
            &self.client,
            &summary.url,
            self.config.exclude_intro_from_body,
        )
        .await?;

        info!(
            date_label = %summary.date_label,
            content = %truncate_for_log(&content, 200),
            "Harvested article"
        );
        debug!(%content, "Full article content");
        Ok(ArticleRecord::new(summary, content))
    }

    async fn pause(&self) {
        let delay = self.config.article_delay();
        if delay > Duration::ZERO {
            sleep(delay).await;
        }
    }
}
