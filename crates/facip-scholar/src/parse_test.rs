use chrono::TimeZone;

use super::*;
use crate::markers::ProfileMarkers;
use crate::types::ProfileOutcome;

const FIXTURE: &str = include_str!("../tests/fixtures/scholar_profile.html");
const URL: &str = "https://scholar.google.com/citations?user=JicYPdAAAAAJ";

fn selectors() -> ProfileSelectors {
    ProfileSelectors::compile(&ProfileMarkers::default()).expect("default markers compile")
}

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

fn parse(html: &str) -> ProfileRecord {
    parse_profile(html, URL, fixed_time(), &selectors())
}

fn scraped(record: &ProfileRecord) -> &ScholarProfile {
    record
        .profile()
        .unwrap_or_else(|| panic!("expected scraped record, got: {record:?}"))
}

/// Publications table with `count` rows titled `Paper 1..=count`.
fn publications_page(count: usize) -> String {
    let rows: String = (1..=count)
        .map(|n| {
            format!(
                "<tr class=\"gsc_a_tr\">\
                   <td class=\"gsc_a_t\"><a>Paper {n}</a><div class=\"gs_gray\">Author {n}</div></td>\
                   <td class=\"gsc_a_c\"><a>{n}</a></td>\
                   <td class=\"gsc_a_y\">{year}</td>\
                 </tr>",
                year = 2000 + n
            )
        })
        .collect();
    format!(
        "<html><body><div id=\"gsc_prf_in\">Jane Doe</div>\
         <table id=\"gsc_a_t\"><tr><th>Title</th></tr>{rows}</table></body></html>"
    )
}

// -----------------------------------------------------------------------
// Full page
// -----------------------------------------------------------------------

#[test]
fn well_formed_page_extracts_every_field() {
    let record = parse(FIXTURE);
    let profile = scraped(&record);

    assert_eq!(profile.name(), "Jane Doe");
    assert_eq!(profile.affiliation(), "State University");
    assert_eq!(profile.citations().total.as_deref(), Some("500"));
    assert_eq!(profile.citations().h_index.as_deref(), Some("12"));
    assert_eq!(profile.citations().i10_index.as_deref(), Some("20"));

    let pubs = profile.publications();
    assert_eq!(pubs.len(), 2);
    assert_eq!(pubs[0].title, "Graph Methods for Patent Analysis");
    assert_eq!(pubs[0].authors, "J Doe, A Smith");
    assert_eq!(pubs[0].year, "2019");
    assert_eq!(pubs[0].citations, "143");
    assert_eq!(pubs[1].title, "Licensing Outcomes at Public Universities");
    assert_eq!(pubs[1].citations, "27");

    assert_eq!(record.source_url(), URL);
    assert_eq!(record.fetched_at(), fixed_time());
}

#[test]
fn same_document_yields_identical_records() {
    let a = parse_profile(FIXTURE, URL, fixed_time(), &selectors());
    let later = fixed_time() + chrono::Duration::seconds(30);
    let b = parse_profile(FIXTURE, URL, later, &selectors());

    assert_eq!(a.outcome(), b.outcome());
    assert_eq!(a.source_url(), b.source_url());
    assert_ne!(a.fetched_at(), b.fetched_at());
}

// -----------------------------------------------------------------------
// Placeholders
// -----------------------------------------------------------------------

#[test]
fn missing_name_and_affiliation_use_placeholder() {
    let record = parse("<html><body><p>nothing here</p></body></html>");
    let profile = scraped(&record);
    assert_eq!(profile.name(), UNKNOWN);
    assert_eq!(profile.affiliation(), UNKNOWN);
    assert!(profile.citations().is_empty());
    assert!(profile.publications().is_empty());
}

#[test]
fn empty_body_still_produces_success_shape() {
    let record = parse("");
    assert!(record.is_success());
    assert_eq!(scraped(&record).name(), UNKNOWN);
}

#[test]
fn non_html_body_degrades_to_placeholders() {
    let record = parse(r#"{"error": "not html"}"#);
    let profile = scraped(&record);
    assert_eq!(profile.name(), UNKNOWN);
    assert!(profile.publications().is_empty());
}

#[test]
fn row_without_citation_link_defaults_to_zero() {
    let html = "<table id=\"gsc_a_t\"><tr class=\"gsc_a_tr\">\
                <td class=\"gsc_a_t\"><a>Uncited Work</a><div class=\"gs_gray\">J Doe</div></td>\
                <td class=\"gsc_a_c\"></td><td class=\"gsc_a_y\">2024</td></tr></table>";
    let record = parse(html);
    let pubs = scraped(&record).publications();
    assert_eq!(pubs.len(), 1);
    assert_eq!(pubs[0].title, "Uncited Work");
    assert_eq!(pubs[0].citations, NO_CITATIONS);
    assert_eq!(pubs[0].year, "2024");
}

#[test]
fn row_fields_fall_back_independently() {
    // Only the year cell is present; the row is kept with placeholders.
    let html = "<table id=\"gsc_a_t\"><tr class=\"gsc_a_tr\">\
                <td class=\"gsc_a_y\">2018</td></tr></table>";
    let record = parse(html);
    let pubs = scraped(&record).publications();
    assert_eq!(pubs.len(), 1);
    assert_eq!(pubs[0].title, UNKNOWN);
    assert_eq!(pubs[0].authors, UNKNOWN);
    assert_eq!(pubs[0].year, "2018");
    assert_eq!(pubs[0].citations, NO_CITATIONS);
}

#[test]
fn only_first_gray_line_is_taken_as_authors() {
    let record = parse(FIXTURE);
    let pubs = scraped(&record).publications();
    assert!(!pubs[0].authors.contains("Journal of Innovation"));
}

// -----------------------------------------------------------------------
// Citation metrics
// -----------------------------------------------------------------------

#[test]
fn missing_metrics_table_gives_empty_metrics() {
    let html = "<div id=\"gsc_prf_in\">Jane Doe</div><div class=\"gsc_prf_il\">State University</div>";
    let record = parse(html);
    let profile = scraped(&record);
    assert!(profile.citations().is_empty());
    assert_eq!(profile.name(), "Jane Doe");
    assert_eq!(profile.affiliation(), "State University");

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["citations"], serde_json::json!({}));
}

#[test]
fn metrics_table_with_two_rows_omits_i10() {
    let html = "<table id=\"gsc_rsb_st\">\
                <tr><th></th><th>All</th></tr>\
                <tr><td>Citations</td><td>500</td></tr>\
                <tr><td>h-index</td><td>12</td></tr></table>";
    let record = parse(html);
    let metrics = scraped(&record).citations();
    assert_eq!(metrics.total.as_deref(), Some("500"));
    assert_eq!(metrics.h_index.as_deref(), Some("12"));
    assert!(metrics.i10_index.is_none());

    let value = serde_json::to_value(&record).unwrap();
    assert!(value["citations"].get("i10_index").is_none());
}

#[test]
fn metrics_header_row_is_skipped_even_with_td_cells() {
    let html = "<table id=\"gsc_rsb_st\">\
                <tr><td>Header</td><td>All</td></tr>\
                <tr><td>Citations</td><td>77</td></tr></table>";
    let record = parse(html);
    assert_eq!(scraped(&record).citations().total.as_deref(), Some("77"));
}

// -----------------------------------------------------------------------
// Publications bound and order
// -----------------------------------------------------------------------

#[test]
fn eight_rows_keep_first_five_in_order() {
    let record = parse(&publications_page(8));
    let titles: Vec<&str> = scraped(&record)
        .publications()
        .iter()
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Paper 1", "Paper 2", "Paper 3", "Paper 4", "Paper 5"]
    );
}

#[test]
fn fewer_than_five_rows_are_all_kept() {
    let record = parse(&publications_page(3));
    assert_eq!(scraped(&record).publications().len(), 3);
}

#[test]
fn untagged_rows_are_not_publications() {
    let record = parse(&publications_page(0));
    assert!(scraped(&record).publications().is_empty());
}

// -----------------------------------------------------------------------
// Custom markers
// -----------------------------------------------------------------------

#[test]
fn custom_markers_read_a_differently_labelled_page() {
    let markers = ProfileMarkers {
        name: "h1.researcher".to_string(),
        affiliation: "p.org".to_string(),
        ..ProfileMarkers::default()
    };
    let selectors = ProfileSelectors::compile(&markers).unwrap();
    let html = "<h1 class=\"researcher\"> Ada Lovelace </h1><p class=\"org\">Analytical Society</p>";
    let record = parse_profile(html, URL, fixed_time(), &selectors);
    let ProfileOutcome::Scraped(profile) = record.outcome() else {
        panic!("expected scraped record");
    };
    assert_eq!(profile.name(), "Ada Lovelace");
    assert_eq!(profile.affiliation(), "Analytical Society");
}

// -----------------------------------------------------------------------
// select_or
// -----------------------------------------------------------------------

#[test]
fn select_or_uses_fallback_when_absent() {
    let html = Html::parse_document("<p>text</p>");
    let selector = Selector::parse("span.missing").unwrap();
    let value = select_or(html.root_element(), &selector, |_| 1, || 7);
    assert_eq!(value, 7);
}

#[test]
fn select_or_maps_first_match() {
    let html = Html::parse_document("<span class=\"v\">a</span><span class=\"v\">b</span>");
    let selector = Selector::parse("span.v").unwrap();
    let value = select_text_or(html.root_element(), &selector, "none");
    assert_eq!(value, "a");
}
