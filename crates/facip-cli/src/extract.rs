//! `extract` and `parse` subcommands.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use facip_scholar::{parse_profile, ProfileMarkers, ProfileRecord, ProfileSelectors, ScholarClient};
use futures::stream::{self, StreamExt};

/// Extracts every URL with at most `concurrency` fetches in flight and prints
/// one JSON record per line, in input order. Failed extractions are printed
/// like any other record.
pub(crate) async fn run_extract(
    client: &ScholarClient,
    urls: &[String],
    concurrency: usize,
    pretty: bool,
) -> anyhow::Result<()> {
    let mut records = stream::iter(urls)
        .map(|url| client.extract(url))
        .buffered(concurrency);

    let mut failures = 0usize;
    while let Some(record) = records.next().await {
        if !record.is_success() {
            failures += 1;
        }
        println!("{}", render(&record, pretty)?);
    }

    tracing::info!(total = urls.len(), failures, "extraction finished");
    Ok(())
}

/// Parses a saved profile page with the default markers.
pub(crate) fn parse_saved_page(
    file: &Path,
    source_url: Option<&str>,
) -> anyhow::Result<ProfileRecord> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let selectors = ProfileSelectors::compile(&ProfileMarkers::default())?;
    let source_url = source_url.map_or_else(|| file.display().to_string(), str::to_owned);
    Ok(parse_profile(&html, &source_url, Utc::now(), &selectors))
}

pub(crate) fn render(record: &ProfileRecord, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(record)
    } else {
        serde_json::to_string(record)
    }
}
