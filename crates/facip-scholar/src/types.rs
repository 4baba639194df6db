//! Normalized profile record produced by the extractor.
//!
//! ## Stored shape
//!
//! The record is persisted verbatim as the `scholar_data` sub-document of a
//! faculty member and read back by the dashboard, so the serialized keys
//! follow that document rather than the Rust field names:
//!
//! ```json
//! { "name": "...", "affiliation": "...",
//!   "citations": { "total": "500", "h_index": "12", "i10_index": "20" },
//!   "publications": [ { "title": "...", "authors": "...", "year": "2021", "citations": "14" } ],
//!   "profile_url": "https://...", "scraped_at": "2025-01-01T00:00:00Z" }
//! ```
//!
//! The failure variant carries only `error`, `profile_url`, and `scraped_at`.
//!
//! ### Metric values
//! Citation figures are kept as the page's text (`"1,204"` stays `"1,204"`).
//! Keys for rows the page does not have are omitted, never filled with a
//! placeholder.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Placeholder for a text field whose marker was not found.
pub const UNKNOWN: &str = "Unknown";

/// Citation count used when a publication row has no citation link.
pub const NO_CITATIONS: &str = "0";

/// Maximum number of publications kept from a profile page.
pub const MAX_PUBLICATIONS: usize = 5;

/// Result of one extraction call. Either a scraped profile or an error
/// description, always stamped with the requested URL and capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    #[serde(flatten)]
    outcome: ProfileOutcome,
    #[serde(rename = "profile_url")]
    source_url: String,
    #[serde(rename = "scraped_at")]
    fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProfileOutcome {
    Scraped(ScholarProfile),
    Failed { error: String },
}

/// Fields located on a successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScholarProfile {
    name: String,
    affiliation: String,
    citations: CitationMetrics,
    publications: Vec<Publication>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CitationMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i10_index: Option<String>,
}

/// One row of the publications table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
    pub title: String,
    /// Author list and venue line as shown under the title.
    pub authors: String,
    pub year: String,
    /// Citation count text, [`NO_CITATIONS`] when the row has no citation link.
    pub citations: String,
}

impl ProfileRecord {
    #[must_use]
    pub fn scraped(
        profile: ScholarProfile,
        source_url: impl Into<String>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            outcome: ProfileOutcome::Scraped(profile),
            source_url: source_url.into(),
            fetched_at,
        }
    }

    #[must_use]
    pub fn failed(
        error: impl Into<String>,
        source_url: impl Into<String>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            outcome: ProfileOutcome::Failed {
                error: error.into(),
            },
            source_url: source_url.into(),
            fetched_at,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> &ProfileOutcome {
        &self.outcome
    }

    /// The URL exactly as the caller supplied it.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    #[must_use]
    pub fn profile(&self) -> Option<&ScholarProfile> {
        match &self.outcome {
            ProfileOutcome::Scraped(profile) => Some(profile),
            ProfileOutcome::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ProfileOutcome::Scraped(_) => None,
            ProfileOutcome::Failed { error } => Some(error),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ProfileOutcome::Scraped(_))
    }
}

impl ScholarProfile {
    /// Builds a profile, keeping at most [`MAX_PUBLICATIONS`] entries in the
    /// order given.
    #[must_use]
    pub fn new(
        name: String,
        affiliation: String,
        citations: CitationMetrics,
        mut publications: Vec<Publication>,
    ) -> Self {
        publications.truncate(MAX_PUBLICATIONS);
        Self {
            name,
            affiliation,
            citations,
            publications,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn affiliation(&self) -> &str {
        &self.affiliation
    }

    #[must_use]
    pub fn citations(&self) -> &CitationMetrics {
        &self.citations
    }

    #[must_use]
    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }
}

impl CitationMetrics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total.is_none() && self.h_index.is_none() && self.i10_index.is_none()
    }
}
