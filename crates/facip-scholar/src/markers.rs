//! CSS markers that locate each profile field.
//!
//! Defaults target the Google Scholar citations page (`/citations?user=...`).
//! Any page laid out the same way (a name element, an affiliation element, a
//! metrics table with a header row, a publications table with tagged data
//! rows) can be read by swapping the selector strings.

use scraper::Selector;

use crate::error::ScholarError;

/// Selector strings for every field the extractor reads.
///
/// Row-scoped markers (`publication_*`) are matched inside a single data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileMarkers {
    pub name: String,
    pub affiliation: String,
    pub metrics_table: String,
    pub publications_table: String,
    pub publication_row: String,
    pub publication_title: String,
    pub publication_authors: String,
    pub publication_year: String,
    pub publication_citations: String,
}

impl Default for ProfileMarkers {
    fn default() -> Self {
        Self {
            name: "div#gsc_prf_in".to_string(),
            affiliation: "div.gsc_prf_il".to_string(),
            metrics_table: "table#gsc_rsb_st".to_string(),
            publications_table: "table#gsc_a_t".to_string(),
            publication_row: "tr.gsc_a_tr".to_string(),
            publication_title: "td.gsc_a_t a".to_string(),
            publication_authors: "div.gs_gray".to_string(),
            publication_year: "td.gsc_a_y".to_string(),
            publication_citations: "td.gsc_a_c a".to_string(),
        }
    }
}

/// Compiled form of [`ProfileMarkers`]. Read-only after construction, so one
/// instance is shared by every concurrent extraction.
#[derive(Debug, Clone)]
pub struct ProfileSelectors {
    pub(crate) name: Selector,
    pub(crate) affiliation: Selector,
    pub(crate) metrics_table: Selector,
    pub(crate) table_row: Selector,
    pub(crate) table_cell: Selector,
    pub(crate) publications_table: Selector,
    pub(crate) publication_row: Selector,
    pub(crate) publication_title: Selector,
    pub(crate) publication_authors: Selector,
    pub(crate) publication_year: Selector,
    pub(crate) publication_citations: Selector,
}

impl ProfileSelectors {
    /// Compiles every marker.
    ///
    /// # Errors
    ///
    /// Returns [`ScholarError::InvalidMarker`] naming the first marker that is
    /// not valid CSS.
    pub fn compile(markers: &ProfileMarkers) -> Result<Self, ScholarError> {
        Ok(Self {
            name: compile_marker("name", &markers.name)?,
            affiliation: compile_marker("affiliation", &markers.affiliation)?,
            metrics_table: compile_marker("metrics_table", &markers.metrics_table)?,
            table_row: compile_marker("table_row", "tr")?,
            table_cell: compile_marker("table_cell", "td")?,
            publications_table: compile_marker(
                "publications_table",
                &markers.publications_table,
            )?,
            publication_row: compile_marker("publication_row", &markers.publication_row)?,
            publication_title: compile_marker("publication_title", &markers.publication_title)?,
            publication_authors: compile_marker(
                "publication_authors",
                &markers.publication_authors,
            )?,
            publication_year: compile_marker("publication_year", &markers.publication_year)?,
            publication_citations: compile_marker(
                "publication_citations",
                &markers.publication_citations,
            )?,
        })
    }
}

fn compile_marker(field: &'static str, selector: &str) -> Result<Selector, ScholarError> {
    Selector::parse(selector).map_err(|e| ScholarError::InvalidMarker {
        field,
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}
