//! Researcher profile extraction.
//!
//! Fetches a public scholar profile page, locates a fixed set of regions by
//! CSS marker, and folds the result into a [`ProfileRecord`]. Extraction never
//! fails past this crate's boundary: transport and parse problems come back as
//! the failure variant of the record.

pub mod client;
pub mod error;
pub mod markers;
pub mod normalize;
pub mod parse;
pub mod types;

pub use client::{extract_profile, ScholarClient};
pub use error::ScholarError;
pub use markers::{ProfileMarkers, ProfileSelectors};
pub use normalize::rows_to_metrics;
pub use parse::parse_profile;
pub use types::{
    CitationMetrics, ProfileOutcome, ProfileRecord, Publication, ScholarProfile,
    MAX_PUBLICATIONS, NO_CITATIONS, UNKNOWN,
};
