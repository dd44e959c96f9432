//! JSON output file.
//!
//! The file is only ever opened in append mode. Each call to
//! [`JsonSink::append_batch`] adds one day's records and never inspects or
//! rewrites what is already there, so repeated runs over the same window
//! append duplicates.
//!
//! Non-ASCII text is written as UTF-8, not escaped.

use crate::config::OutputFormat;
use crate::error::HarvestError;
use crate::models::{ArticleRecord, DailyBatch};
use serde::Serialize;
use serde_json::Deserializer;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

const INDENT: &[u8] = b"    ";

/// Append-only writer for harvested days.
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
    format: OutputFormat,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one day's records. An empty batch leaves the file untouched.
    ///
    /// Returns the number of records written.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display(), date = %batch.date))]
    pub async fn append_batch(&self, batch: &DailyBatch) -> Result<usize, HarvestError> {
        if batch.is_empty() {
            debug!("Empty batch, nothing to write");
            return Ok(0);
        }

        let bytes = match self.format {
            OutputFormat::Fragments => encode_fragment(&batch.records)?,
            OutputFormat::Jsonl => encode_lines(&batch.records)?,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        debug!(bytes = bytes.len(), "Appended batch");
        Ok(batch.len())
    }
}

/// Pretty-printed array with 4-space indentation and a trailing newline.
fn encode_fragment(records: &[ArticleRecord]) -> Result<Vec<u8>, HarvestError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    records.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

fn encode_lines(records: &[ArticleRecord]) -> Result<Vec<u8>, HarvestError> {
    let mut buf = Vec::new();
    for record in records {
        serde_json::to_writer(&mut buf, record)?;
        buf.push(b'\n');
    }
    Ok(buf)
}

/// Read a fragment-layout file back as one `Vec` per appended day.
pub async fn read_batches(path: impl AsRef<Path>) -> Result<Vec<Vec<ArticleRecord>>, HarvestError> {
    let raw = fs::read_to_string(path).await?;
    let batches = Deserializer::from_str(&raw)
        .into_iter::<Vec<ArticleRecord>>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(batches)
}

/// Read a JSON-lines file back as a flat list of records.
pub async fn read_lines(path: impl AsRef<Path>) -> Result<Vec<ArticleRecord>, HarvestError> {
    let raw = fs::read_to_string(path).await?;
    let records = Deserializer::from_str(&raw)
        .into_iter::<ArticleRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}
