// Feed loading: one best-effort fetch of the published spreadsheet export,
// parsed into header-keyed rows.

pub mod schema;

use std::time::Duration;

use anyhow::{Context, Result};
use indexmap::IndexMap;

use crate::util::env;

/// A parsed CSV row, keyed by trimmed header name in column order.
pub type RawRow = IndexMap<String, String>;

/// Where and how to fetch the catalog feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub url: String,
    pub timeout: Duration,
}

impl FeedConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::feed_url(),
            timeout: Duration::from_secs(env::env_parse("FEED_TIMEOUT_SECS", 15u64)),
        }
    }
}

/// Fetch the feed as text. Single attempt, no retry or backoff; the caller
/// decides whether to keep a stale catalog or show an empty one.
pub async fn fetch_feed(config: &FeedConfig) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .context("building feed HTTP client")?;

    let response = client
        .get(&config.url)
        .send()
        .await
        .with_context(|| format!("feed request to {} failed", config.url))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("feed endpoint returned {}", status);
    }

    let body = response.text().await.context("reading feed body")?;
    tracing::debug!(bytes = body.len(), "feed fetched");
    Ok(body)
}

/// Parse delimited feed text into ordered header-keyed rows.
///
/// The header row defines the keys; rows where every field is empty are
/// skipped (published sheets pad trailing blank lines).
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("feed missing header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("malformed feed row")?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let mut row = RawRow::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let value = record.get(i).unwrap_or_default();
            row.insert(header.clone(), value.to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}
