//! Text and table normalization shared by the field rules in [`crate::parse`].

use scraper::ElementRef;

use crate::types::CitationMetrics;

/// All descendant text of `element`, concatenated and trimmed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Maps metrics-table data rows (header already removed) to named metrics.
///
/// The mapping is positional: row 0 is `total`, row 1 is `h_index`, row 2 is
/// `i10_index`. A row contributes its second cell when it has one; rows past
/// index 2 are ignored. Row labels are not consulted, so a page that reorders
/// its rows is mis-attributed rather than rejected.
#[must_use]
pub fn rows_to_metrics(rows: &[Vec<String>]) -> CitationMetrics {
    let mut metrics = CitationMetrics::default();

    for (index, cells) in rows.iter().enumerate() {
        let Some(value) = cells.get(1) else {
            continue;
        };
        let slot = match index {
            0 => &mut metrics.total,
            1 => &mut metrics.h_index,
            2 => &mut metrics.i10_index,
            _ => break,
        };
        *slot = Some(value.clone());
    }

    metrics
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
