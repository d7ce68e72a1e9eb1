//! Page analysis module
//!
//! This module turns raw page markup into an [`AgentInsight`]: a short
//! summary, key points, candidate action items, and document metadata.
//!
//! The whole pipeline is pure, synchronous, and total over its inputs: it
//! performs no I/O, holds no state across calls, and never fails, however
//! malformed the markup is. Fields that cannot be derived degrade to absent
//! or empty values instead.

mod actions;
mod config;
mod content;
mod metadata;
mod summary;

pub use config::{AnalyzeOptions, AnalyzeOptionsBuilder};
pub use content::extract_body;
pub use summary::EMPTY_SUMMARY_PLACEHOLDER;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The structured result of analyzing one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInsight {
    /// Short prose summary of the page body
    pub summary: String,

    /// Salient sentences in extraction order, deduplicated
    pub key_points: Vec<String>,

    /// Imperative phrases eligible for promotion into tasks
    pub action_items: Vec<String>,

    /// Document metadata
    pub metadata: InsightMetadata,
}

/// Metadata attached to an insight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightMetadata {
    /// Document title, when one could be found
    pub title: Option<String>,

    /// Author or byline, when one could be found
    pub byline: Option<String>,

    /// Hostname of the source URL, when one was supplied
    pub domain: Option<String>,

    /// Character count of the extracted body text the insight was derived from
    pub length: usize,

    /// Heading outline in document order
    pub headings: Vec<String>,
}

/// Analyze page markup with default options.
///
/// See [`analyze_page_with_options`].
pub fn analyze_page(markup: &str, source_url: Option<&str>) -> AgentInsight {
    analyze_page_with_options(markup, source_url, &AnalyzeOptions::default())
}

/// Analyze page markup and compose the full insight.
///
/// The body text produced by [`extract_body`] feeds the summary, key points,
/// and action items, and its character count becomes `metadata.length`.
/// Never fails: empty or adversarial markup yields a placeholder summary,
/// empty lists, and absent metadata fields.
#[instrument(skip(markup, options), fields(markup_len = markup.len()))]
pub fn analyze_page_with_options(
    markup: &str,
    source_url: Option<&str>,
    options: &AnalyzeOptions,
) -> AgentInsight {
    let outline = metadata::extract_metadata(markup, source_url);
    let body = content::extract_body(markup);
    debug!("Extracted {} chars of body text", body.chars().count());

    AgentInsight {
        summary: summary::summarize(&body, options),
        key_points: summary::extract_key_points(&body, options),
        action_items: actions::extract_actions(&body, options),
        metadata: InsightMetadata {
            title: outline.title,
            byline: outline.byline,
            domain: outline.domain,
            length: body.chars().count(),
            headings: outline.headings,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"
        <html>
        <head>
            <title>Migrating the Billing Database</title>
            <meta name="author" content="Dana Ops">
        </head>
        <body>
            <nav>Home Docs Pricing Blog Careers Support and other navigation</nav>
            <article>
                <h2>Background</h2>
                <p>The billing database has outgrown its current instance class and
                query latency has doubled over the last quarter. The team agreed to
                move to a larger replicated setup during the next maintenance window.</p>
                <h2>Plan</h2>
                <p>You should migrate the database before Friday. Take a full snapshot
                first and verify it restores cleanly in staging.</p>
                <h2>Follow-up</h2>
                <p>Update the capacity dashboard after the migration completes.</p>
            </article>
            <footer>All rights reserved. Privacy policy. Terms of service.</footer>
        </body>
        </html>
    "#;

    #[test]
    fn test_full_article_scenario() {
        let insight = analyze_page(ARTICLE, Some("https://ops.example.com/runbooks/billing"));

        assert_eq!(
            insight.metadata.title.as_deref(),
            Some("Migrating the Billing Database")
        );
        assert_eq!(insight.metadata.byline.as_deref(), Some("Dana Ops"));
        assert_eq!(insight.metadata.domain.as_deref(), Some("ops.example.com"));
        assert_eq!(
            insight.metadata.headings,
            vec!["Background", "Plan", "Follow-up"]
        );
        assert!(!insight.summary.is_empty());
        assert_ne!(insight.summary, EMPTY_SUMMARY_PLACEHOLDER);
    }

    #[test]
    fn test_action_item_scenario() {
        let insight = analyze_page(ARTICLE, None);

        assert!(
            insight
                .action_items
                .iter()
                .any(|a| a == "You should migrate the database before Friday."),
            "expected migration call-to-action in {:?}",
            insight.action_items
        );
        assert_eq!(insight.metadata.domain, None);
    }

    #[test]
    fn test_empty_markup_scenario() {
        let insight = analyze_page("", None);

        assert_eq!(insight.summary, EMPTY_SUMMARY_PLACEHOLDER);
        assert!(insight.key_points.is_empty());
        assert!(insight.action_items.is_empty());
        assert_eq!(insight.metadata.length, 0);
        assert_eq!(insight.metadata.title, None);
        assert!(insight.metadata.headings.is_empty());
    }

    #[test]
    fn test_length_matches_extracted_body() {
        let insight = analyze_page(ARTICLE, None);
        let body = extract_body(ARTICLE);

        assert_eq!(insight.metadata.length, body.chars().count());
        assert!(insight.metadata.length > 0);
        assert!(insight.metadata.length < ARTICLE.len());
    }

    #[test]
    fn test_no_empty_or_duplicate_entries() {
        let insight = analyze_page(ARTICLE, None);

        for list in [&insight.key_points, &insight.action_items] {
            assert!(list.iter().all(|entry| !entry.trim().is_empty()));
            let mut normalized: Vec<String> = list
                .iter()
                .map(|entry| entry.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
                .collect();
            normalized.sort();
            normalized.dedup();
            assert_eq!(normalized.len(), list.len());
        }
    }

    #[test]
    fn test_idempotent_analysis() {
        let first = analyze_page(ARTICLE, Some("https://ops.example.com/runbooks/billing"));
        let second = analyze_page(ARTICLE, Some("https://ops.example.com/runbooks/billing"));

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_never_panics_on_adversarial_markup() {
        let inputs = [
            "<html><body>",
            "</div></div></div>",
            "<title>t</title",
            "<a href=\"x\"<b>broken</a>",
            "plain text, no markup, still analyzed as a page",
            "<article><article><article>nested</article>",
        ];

        for markup in inputs {
            let insight = analyze_page(markup, Some("not a url"));
            assert!(insight.metadata.domain.is_none());
        }
    }

    #[test]
    fn test_camel_case_wire_format() {
        let insight = analyze_page(ARTICLE, None);
        let json = serde_json::to_string(&insight).unwrap();

        assert!(json.contains("\"keyPoints\""));
        assert!(json.contains("\"actionItems\""));
        assert!(json.contains("\"headings\""));

        let parsed: AgentInsight = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, insight);
    }
}
