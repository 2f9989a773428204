pub mod detail;
pub mod results;

use scraper::{Html, Selector};
use tracing::debug;

use rucsearch_core::{DetailRecord, LookupError, ResultSet};

/// The registry serves several document shapes from the same endpoint.
/// Shape is decided once, up front, before any extraction happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageShape {
    /// The error banner was present and non-empty; carries its text.
    SiteError(String),
    /// Label/value detail layout.
    Detail,
    /// Results table with at least one data row.
    Results,
    /// No recognizable content, e.g. a header-only results table.
    Empty,
}

pub fn classify_page(doc: &Html) -> PageShape {
    if let Some(text) = site_error(doc) {
        return PageShape::SiteError(text);
    }
    if count(doc, "#print table tr") > 0 {
        return PageShape::Detail;
    }
    // The row count includes the table header.
    if count(doc, "td.beta table tr") >= 2 {
        return PageShape::Results;
    }
    PageShape::Empty
}

/// Parses a search submission response: site error, empty set, or a page
/// of summary rows with pagination metadata.
pub fn parse_search_page(html: &str) -> Result<ResultSet, LookupError> {
    let doc = Html::parse_document(html);
    match classify_page(&doc) {
        PageShape::SiteError(text) => Err(LookupError::Site(text)),
        PageShape::Results => {
            let set = results::extract_results(&doc);
            debug!(count = set.results.len(), total = set.meta.total, "parsed results page");
            Ok(set)
        }
        // Header-only and detail-shaped responses both yield nothing here;
        // an empty set is not an error.
        PageShape::Detail | PageShape::Empty => Ok(ResultSet::default()),
    }
}

/// Parses a detail lookup response into a single record.
pub fn parse_detail_page(html: &str) -> Result<DetailRecord, LookupError> {
    let doc = Html::parse_document(html);
    match classify_page(&doc) {
        PageShape::SiteError(text) => Err(LookupError::Site(text)),
        PageShape::Detail => Ok(detail::extract_detail(&doc)),
        PageShape::Results | PageShape::Empty => Err(LookupError::Unexpected(
            "detail table not found in response".into(),
        )),
    }
}

pub(crate) fn selector(s: &str) -> Option<Selector> {
    Selector::parse(s).ok()
}

fn count(doc: &Html, sel: &str) -> usize {
    selector(sel)
        .map(|s| doc.select(&s).count())
        .unwrap_or(0)
}

fn site_error(doc: &Html) -> Option<String> {
    let sel = selector("p.error")?;
    let el = doc.select(&sel).next()?;
    let text = el.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub(crate) fn element_text(el: scraper::ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
