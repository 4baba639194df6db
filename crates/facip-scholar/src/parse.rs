//! Field rules applied to a parsed profile page.
//!
//! Every rule is a (marker, extractor, fallback) triple run through
//! [`select_or`]: a missing marker resolves to the field's placeholder and
//! never aborts the rest of the page. An absent element and a page whose
//! markup has drifted are indistinguishable here.

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};

use crate::markers::ProfileSelectors;
use crate::normalize::{element_text, rows_to_metrics};
use crate::types::{
    CitationMetrics, ProfileRecord, Publication, ScholarProfile, MAX_PUBLICATIONS, NO_CITATIONS,
    UNKNOWN,
};

/// Parses `html` and assembles the success record.
///
/// Pure and synchronous; the network fetch happens in
/// [`crate::ScholarClient::extract`].
#[must_use]
pub fn parse_profile(
    html: &str,
    source_url: &str,
    fetched_at: DateTime<Utc>,
    selectors: &ProfileSelectors,
) -> ProfileRecord {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let name = select_text_or(root, &selectors.name, UNKNOWN);
    let affiliation = select_text_or(root, &selectors.affiliation, UNKNOWN);
    let citations = select_or(
        root,
        &selectors.metrics_table,
        |table| metrics_from_table(table, selectors),
        CitationMetrics::default,
    );
    let publications = select_or(
        root,
        &selectors.publications_table,
        |table| publications_from_table(table, selectors),
        Vec::new,
    );

    tracing::debug!(
        url = %source_url,
        name = %name,
        publications = publications.len(),
        metrics_found = !citations.is_empty(),
        "parsed scholar profile"
    );

    ProfileRecord::scraped(
        ScholarProfile::new(name, affiliation, citations, publications),
        source_url,
        fetched_at,
    )
}

/// Locates the first element under `scope` matching `selector` and maps it
/// with `extract`, or returns `fallback()` when nothing matches.
pub fn select_or<T>(
    scope: ElementRef<'_>,
    selector: &Selector,
    extract: impl FnOnce(ElementRef<'_>) -> T,
    fallback: impl FnOnce() -> T,
) -> T {
    scope.select(selector).next().map_or_else(fallback, extract)
}

/// [`select_or`] specialised to trimmed text content with a fixed fallback.
#[must_use]
pub fn select_text_or(scope: ElementRef<'_>, selector: &Selector, fallback: &str) -> String {
    select_or(scope, selector, element_text, || fallback.to_owned())
}

fn metrics_from_table(table: ElementRef<'_>, selectors: &ProfileSelectors) -> CitationMetrics {
    let rows: Vec<Vec<String>> = table
        .select(&selectors.table_row)
        .skip(1) // header
        .map(|row| row.select(&selectors.table_cell).map(element_text).collect())
        .collect();
    rows_to_metrics(&rows)
}

fn publications_from_table(
    table: ElementRef<'_>,
    selectors: &ProfileSelectors,
) -> Vec<Publication> {
    table
        .select(&selectors.publication_row)
        .take(MAX_PUBLICATIONS)
        .map(|row| publication_from_row(row, selectors))
        .collect()
}

fn publication_from_row(row: ElementRef<'_>, selectors: &ProfileSelectors) -> Publication {
    Publication {
        title: select_text_or(row, &selectors.publication_title, UNKNOWN),
        authors: select_text_or(row, &selectors.publication_authors, UNKNOWN),
        year: select_text_or(row, &selectors.publication_year, UNKNOWN),
        citations: select_text_or(row, &selectors.publication_citations, NO_CITATIONS),
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
