//! Harvest settings.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! individual command-line flags. The defaults describe the stock crawl of the
//! site's rubric archive, so a run without flags or a config file behaves like
//! the original harvester.
//!
//! # Example config
//!
//! ```yaml
//! base_url: https://www.kommersant.ru
//! listing_path: /archive/rubric/2/day/{date}/
//! start_date: 2025-01-24
//! output: articles.json
//! output_format: fragments
//! article_delay_ms: 1000
//! ```

use crate::cli::Cli;
use crate::error::HarvestError;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Placeholder substituted with `YYYY-MM-DD` in [`HarvestConfig::listing_path`].
pub const DATE_PLACEHOLDER: &str = "{date}";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Layout of the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One pretty-printed JSON array per harvested day, newline-terminated.
    #[default]
    Fragments,
    /// One JSON object per line.
    Jsonl,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub base_url: String,
    /// Archive listing path relative to `base_url`; must contain `{date}`.
    pub listing_path: String,
    pub start_date: NaiveDate,
    /// Last day to harvest. `None` means the local date at start-up.
    pub end_date: Option<NaiveDate>,
    pub output: PathBuf,
    pub output_format: OutputFormat,
    pub article_delay_ms: u64,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub exclude_intro_from_body: bool,
    pub persist_partial_days: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.kommersant.ru".to_string(),
            listing_path: "/archive/rubric/2/day/{date}/".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 24).unwrap_or_default(),
            end_date: None,
            output: PathBuf::from("articles.json"),
            output_format: OutputFormat::Fragments,
            article_delay_ms: 1000,
            request_timeout_secs: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            exclude_intro_from_body: false,
            persist_partial_days: false,
        }
    }
}

impl HarvestConfig {
    /// Load a config from a YAML file. Missing keys keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, HarvestError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let config: HarvestConfig = serde_yaml::from_str(&raw)?;
        info!("Loaded configuration file");
        Ok(config)
    }

    /// Build the effective config: defaults, then `--config`, then flags.
    pub async fn from_cli(cli: &Cli) -> Result<Self, HarvestError> {
        let base = match &cli.config {
            Some(path) => Self::load(path).await?,
            None => Self::default(),
        };
        let config = base.with_overrides(cli)?;
        config.validate()?;
        debug!(?config, "Effective configuration");
        Ok(config)
    }

    /// Apply command-line flags on top of this config.
    pub fn with_overrides(mut self, cli: &Cli) -> Result<Self, HarvestError> {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(start) = &cli.start_date {
            self.start_date = parse_date(start)?;
        }
        if let Some(end) = &cli.end_date {
            self.end_date = Some(parse_date(end)?);
        }
        if let Some(output) = &cli.output {
            self.output = PathBuf::from(output);
        }
        if let Some(format) = cli.output_format {
            self.output_format = format;
        }
        if let Some(delay) = cli.delay_ms {
            self.article_delay_ms = delay;
        }
        if let Some(timeout) = cli.timeout_secs {
            self.request_timeout_secs = Some(timeout);
        }
        self.exclude_intro_from_body |= cli.exclude_intro_from_body;
        self.persist_partial_days |= cli.persist_partial_days;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), HarvestError> {
        self.base()?;
        if !self.listing_path.contains(DATE_PLACEHOLDER) {
            return Err(HarvestError::InvalidConfig(format!(
                "listing_path \"{}\" has no {} placeholder",
                self.listing_path, DATE_PLACEHOLDER
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(HarvestError::InvalidConfig(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn base(&self) -> Result<Url, HarvestError> {
        Url::parse(&self.base_url).map_err(|source| HarvestError::InvalidUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    /// Absolute archive listing URL for one day.
    pub fn listing_url(&self, date: NaiveDate) -> Result<Url, HarvestError> {
        let path = self
            .listing_path
            .replace(DATE_PLACEHOLDER, &date.format(DATE_FORMAT).to_string());
        self.base()?
            .join(&path)
            .map_err(|source| HarvestError::InvalidUrl { url: path, source })
    }

    pub fn article_delay(&self) -> Duration {
        Duration::from_millis(self.article_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, HarvestError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| HarvestError::InvalidConfig(format!("invalid date \"{raw}\": {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_match_stock_crawl() {
        let config = HarvestConfig::default();
        assert_eq!(config.base_url, "https://www.kommersant.ru");
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2025, 1, 24).unwrap());
        assert_eq!(config.end_date, None);
        assert_eq!(config.output, PathBuf::from("articles.json"));
        assert_eq!(config.output_format, OutputFormat::Fragments);
        assert_eq!(config.article_delay(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), None);
        assert!(!config.exclude_intro_from_body);
        assert!(!config.persist_partial_days);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_listing_url_formats_date() {
        let config = HarvestConfig::default();
        let date = NaiveDate::from_ymd_opt(2025, 1, 24).unwrap();
        assert_eq!(
            config.listing_url(date).unwrap().as_str(),
            "https://www.kommersant.ru/archive/rubric/2/day/2025-01-24/"
        );
    }

    #[test]
    fn test_yaml_overrides_only_given_keys() {
        let yaml = "start_date: 2025-03-01\noutput_format: jsonl\narticle_delay_ms: 0\n";
        let config: HarvestConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(config.output_format, OutputFormat::Jsonl);
        assert_eq!(config.article_delay_ms, 0);
        assert_eq!(config.base_url, "https://www.kommersant.ru");
    }

    #[tokio::test]
    async fn test_load_from_file_then_cli_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harvest.yaml");
        tokio::fs::write(&path, "output: from_file.json\narticle_delay_ms: 500\n")
            .await
            .unwrap();

        let cli = Cli::parse_from([
            "archive_harvester",
            "--config",
            path.to_str().unwrap(),
            "--output",
            "from_cli.json",
        ]);
        let config = HarvestConfig::from_cli(&cli).await.unwrap();

        assert_eq!(config.output, PathBuf::from("from_cli.json"));
        assert_eq!(config.article_delay_ms, 500);
    }

    #[test]
    fn test_bad_start_date_is_rejected() {
        let cli = Cli::parse_from(["archive_harvester", "--start-date", "24.01.2025"]);
        let err = HarvestConfig::default().with_overrides(&cli).unwrap_err();
        assert!(matches!(err, HarvestError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_requires_placeholder() {
        let config = HarvestConfig {
            listing_path: "/archive/rubric/2/".to_string(),
            ..HarvestConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(HarvestError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_relative_base_url() {
        let config = HarvestConfig {
            base_url: "www.kommersant.ru".to_string(),
            ..HarvestConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(HarvestError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_end_before_start_is_not_an_error() {
        let cli = Cli::parse_from([
            "archive_harvester",
            "--start-date",
            "2025-02-02",
            "--end-date",
            "2025-02-01",
        ]);
        let config = HarvestConfig::default().with_overrides(&cli).unwrap();
        assert!(config.validate().is_ok());
    }
}
