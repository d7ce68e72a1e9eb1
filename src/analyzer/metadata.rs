//! Document metadata extraction for the analyzer
//!
//! Pulls the title, byline, and heading outline out of raw markup and the
//! domain out of the supplied source URL. Every field degrades to absent
//! rather than failing the analysis when the markup is malformed.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("BUG: hardcoded title selector is invalid"));

static TOP_HEADING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2").expect("BUG: hardcoded top-heading selector is invalid")
});

static META_AUTHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("meta[name='author']").expect("BUG: hardcoded meta-author selector is invalid")
});

static BYLINE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("[rel='author'], .byline, .author")
        .expect("BUG: hardcoded byline selector is invalid")
});

static HEADING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6").expect("BUG: hardcoded heading selector is invalid")
});

/// Title, byline, domain, and heading outline of a document
#[derive(Debug, Clone)]
pub(crate) struct DocumentOutline {
    pub title: Option<String>,
    pub byline: Option<String>,
    pub domain: Option<String>,
    pub headings: Vec<String>,
}

/// Extract document metadata from markup and an optional source URL
pub(crate) fn extract_metadata(markup: &str, source_url: Option<&str>) -> DocumentOutline {
    let document = Html::parse_document(markup);

    DocumentOutline {
        title: extract_title(&document),
        byline: extract_byline(&document),
        domain: source_url.and_then(parse_domain),
        headings: extract_headings(&document),
    }
}

/// Title element text, falling back to the first non-empty h1/h2
fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .chain(document.select(&TOP_HEADING_SELECTOR))
        .map(|element| element.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

/// Author metadata or a byline-labeled element, first non-empty match wins
fn extract_byline(document: &Html) -> Option<String> {
    let from_meta = document
        .select(&META_AUTHOR_SELECTOR)
        .filter_map(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string());

    let from_elements = document
        .select(&BYLINE_SELECTOR)
        .map(|element| element.text().collect::<String>().trim().to_string());

    from_meta
        .chain(from_elements)
        .find(|text| !text.is_empty())
}

/// Heading text in document order, trimmed, empty entries dropped
fn extract_headings(document: &Html) -> Vec<String> {
    document
        .select(&HEADING_SELECTOR)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Hostname of the source URL, absent when the URL does not parse
fn parse_domain(source_url: &str) -> Option<String> {
    Url::parse(source_url)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.to_string()))
}
