//! Readable-body extraction for the analyzer
//!
//! Locates the markup subtree most likely to hold the article body and
//! flattens it to plain text. Candidates are scored by visible-text density
//! (text length weighted by the text-to-markup ratio) after boilerplate
//! subtrees are skipped, so extraction is deterministic for a given input.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Tags whose subtrees never contribute visible body text
const EXCLUDED_TAGS: [&str; 9] = [
    "script", "style", "noscript", "nav", "header", "footer", "aside", "form", "template",
];

/// Tags that end a line when flattening to text
const BLOCK_TAGS: [&str; 21] = [
    "p",
    "div",
    "section",
    "article",
    "main",
    "li",
    "ul",
    "ol",
    "dl",
    "dt",
    "dd",
    "br",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "pre",
    "tr",
];

/// Candidates below this many characters of visible text are ignored
const MIN_CANDIDATE_CHARS: usize = 80;

// Hardcoded selectors cannot fail to parse; a failure here is a bug.
static CANDIDATE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("main, article, [role='main'], section, div")
        .expect("BUG: hardcoded candidate selector is invalid")
});

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("BUG: hardcoded body selector is invalid"));

static HTML_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("html").expect("BUG: hardcoded html selector is invalid"));

/// Extract the primary readable text of a document.
///
/// Scores each candidate container by `text_len * (text_len / html_len)` and
/// keeps the best one, with earlier elements winning ties. Falls back to the
/// whole document's visible text when no candidate qualifies. Never fails;
/// unusable markup degrades to an empty string.
pub fn extract_body(markup: &str) -> String {
    let document = Html::parse_document(markup);

    let mut best: Option<(f64, String)> = None;
    for element in document.select(&CANDIDATE_SELECTOR) {
        let text = visible_text(element);
        let text_len = text.chars().count();
        if text_len < MIN_CANDIDATE_CHARS {
            continue;
        }

        let html_len = element.html().len().max(1);
        let score = text_len as f64 * (text_len as f64 / html_len as f64);

        // Strictly-greater keeps the earliest element on equal scores
        if best.as_ref().is_none_or(|(top, _)| score > *top) {
            best = Some((score, text));
        }
    }

    if let Some((_, text)) = best {
        return text;
    }

    // No qualifying container; use everything visible in the document
    document
        .select(&BODY_SELECTOR)
        .next()
        .or_else(|| document.select(&HTML_SELECTOR).next())
        .map(visible_text)
        .unwrap_or_default()
}

/// Flatten an element's subtree to plain text, skipping boilerplate subtrees,
/// inserting line breaks at block boundaries, and collapsing whitespace.
fn visible_text(element: ElementRef) -> String {
    let mut raw = String::new();
    push_visible_text(element, &mut raw);
    normalize_text(&raw)
}

fn push_visible_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if EXCLUDED_TAGS.contains(&name) {
                continue;
            }
            push_visible_text(child_element, out);
            if BLOCK_TAGS.contains(&name) {
                out.push('\n');
            }
        }
    }
}

/// Collapse runs of whitespace within lines and drop blank lines
fn normalize_text(raw: &str) -> String {
    let mut lines = Vec::new();
    for line in raw.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            lines.push(collapsed);
        }
    }
    lines.join("\n")
}
