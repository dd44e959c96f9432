//! Data models for harvested articles.
//!
//! - [`ArticleSummary`]: one teaser on a day's archive listing
//! - [`ArticleRecord`]: a summary plus the extracted article text
//! - [`DailyBatch`]: every record harvested for one calendar date
//!
//! Field names on disk follow the output file's established shape:
//! `title`, `date`, `url`, `content`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An article teaser found on an archive listing page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleSummary {
    /// Headline as given by the listing item's title attribute.
    pub title: String,
    /// Free-text date/time label shown by the site. Never parsed.
    #[serde(rename = "date")]
    pub date_label: String,
    /// Absolute article URL.
    pub url: String,
}

/// A fully harvested article: the listing summary and its text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    #[serde(flatten)]
    pub summary: ArticleSummary,
    /// Intro and body text, separated by a blank line when an intro exists.
    pub content: String,
}

impl ArticleRecord {
    pub fn new(summary: ArticleSummary, content: String) -> Self {
        Self { summary, content }
    }
}

/// Records harvested for a single calendar date, in listing order.
#[derive(Debug, Clone)]
pub struct DailyBatch {
    pub date: NaiveDate,
    pub records: Vec<ArticleRecord>,
}

impl DailyBatch {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ArticleRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ArticleRecord {
        ArticleRecord::new(
            ArticleSummary {
                title: "Заголовок".to_string(),
                date_label: "24.01.2025, 10:15".to_string(),
                url: "https://www.kommersant.ru/doc/1".to_string(),
            },
            "Intro.\n\nIntro. Body.".to_string(),
        )
    }

    #[test]
    fn test_record_serializes_flat_with_date_key() {
        let value = serde_json::to_value(sample_record()).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 4);
        assert_eq!(obj["title"], "Заголовок");
        assert_eq!(obj["date"], "24.01.2025, 10:15");
        assert_eq!(obj["url"], "https://www.kommersant.ru/doc/1");
        assert_eq!(obj["content"], "Intro.\n\nIntro. Body.");
    }

    #[test]
    fn test_record_deserializes_from_flat_object() {
        let json = r#"{"title":"A","date":"d","url":"https://x/1","content":"c"}"#;
        let record: ArticleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.summary.title, "A");
        assert_eq!(record.summary.date_label, "d");
        assert_eq!(record.content, "c");
    }

    #[test]
    fn test_daily_batch_starts_empty() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 24).unwrap();
        let mut batch = DailyBatch::new(date);
        assert!(batch.is_empty());

        batch.push(sample_record());
        assert_eq!(batch.len(), 1);
        assert!(!batch.is_empty());
    }
}
